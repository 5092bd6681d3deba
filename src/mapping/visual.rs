//! Derived visual state of one bubble
//!
//! [`VisualProperties`] is computed from a [`RawStockRecord`] plus the batch's
//! market-cap and volume ranges. It is kept separate from the record (joined
//! by ticker) and is only ever rebuilt wholesale when a new batch arrives.

use serde::{Deserialize, Serialize};

use crate::mapping::metrics::{self, MetricRange};
use crate::market::record::RawStockRecord;

/// HSL color, hue in degrees, saturation/lightness in percent
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }
}

/// Halo color around a bubble
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum GlowColor {
    Gold,      // Rule of 40 ≥ 60
    White,     // Rule of 40 in [40, 60)
    Base(Hsl), // everything else glows in its own color
}

/// Everything the renderer and the physics need from one stock's metrics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VisualProperties {
    pub color: Hsl,             // base color
    pub glow_color: GlowColor,  // halo color
    pub glow: f64,              // halo intensity [0.1, 1.0]
    pub size: f64,              // radius [0.5, 3.0], also the collision radius
    pub pulse_speed: f64,       // animation multiplier [0.5, 3.0]
    pub opacity: f64,           // [0.4, 1.0]
    pub elasticity: f64,        // bounce coefficient (0.3, 1.0]
}

impl VisualProperties {
    /// Map one record against its batch's cap and volume ranges
    pub fn from_record(record: &RawStockRecord, caps: MetricRange, volumes: MetricRange) -> Self {
        let color = metrics::stock_color(record.change_pct, record.rule_of_40);

        Self {
            color,
            glow_color: metrics::glow_color(record.rule_of_40, color),
            glow: metrics::glow_intensity(record.rule_of_40),
            size: metrics::bubble_size(record.market_cap, caps),
            pulse_speed: metrics::pulse_speed(record.volume, volumes),
            opacity: metrics::opacity(record.debt_to_equity),
            elasticity: metrics::elasticity(record.volatility),
        }
    }

    /// True when no field is NaN or infinite
    pub fn is_finite(&self) -> bool {
        [
            self.color.hue,
            self.color.saturation,
            self.color.lightness,
            self.glow,
            self.size,
            self.pulse_speed,
            self.opacity,
            self.elasticity,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
