//! Core state types for the radar simulation
//!
//! - `Body`: one stock bubble (ticker, position, velocity, visual properties)
//! - `BodySnapshot`: plain, serializable read-only view handed to renderers
//!
//! Vectors are nalgebra `Vector3<f64>`.

use nalgebra::Vector3;
use serde::Serialize;

use crate::mapping::visual::VisualProperties;

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone)]
pub struct Body {
    pub ticker: String,           // identity key, unique in the active set
    pub x: NVec3,                 // position
    pub v: NVec3,                 // velocity
    pub rule_of_40: f64,          // drives attraction and exemption
    pub visual: VisualProperties, // size doubles as collision radius
}

impl Body {
    pub fn size(&self) -> f64 {
        self.visual.size
    }

    pub fn elasticity(&self) -> f64 {
        self.visual.elasticity
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            ticker: self.ticker.clone(),
            position: [self.x.x, self.x.y, self.x.z],
            velocity: [self.v.x, self.v.y, self.v.z],
            visual: self.visual.clone(),
        }
    }
}

/// What a renderer reads once per frame
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BodySnapshot {
    pub ticker: String,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub visual: VisualProperties,
}
