//! Simulation state: the active body set plus its parameters
//!
//! A data refresh replaces the body set wholesale. The new bodies are fully
//! mapped before the swap, so readers see either the old set or the new one,
//! never a mix; a failed refresh keeps the old set and records the error.
//!
//! [`SharedSimulation`] wraps the state in `Arc<RwLock<_>>` for hosts that
//! refresh from another thread than the one stepping and rendering.

use std::sync::{Arc, PoisonError, RwLock};

use rand::Rng;
use tracing::{info, warn};

use crate::data::source::{DataSource, StockFilter};
use crate::error::DataError;
use crate::mapping::batch::map_batch;
use crate::market::record::RawStockRecord;
use crate::simulation::engine::PhysicsStepper;
use crate::simulation::params::SimulationParameters;
use crate::simulation::states::{Body, BodySnapshot};
use crate::simulation::wave::GravitationalWave;

#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    bodies: Vec<Body>,
    records: Vec<RawStockRecord>, // the batch the bodies were mapped from
    pub params: SimulationParameters,
    pub wave: GravitationalWave,
    pub last_error: Option<String>, // message of the last failed refresh
    pub frame: u64,                 // steps taken since start
}

impl SimulationState {
    pub fn new(params: SimulationParameters) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// Map `records` and swap them in as the new body set.
    /// Prior positions and velocities are discarded.
    pub fn load<R: Rng + ?Sized>(&mut self, records: &[RawStockRecord], rng: &mut R) -> Result<usize, DataError> {
        match map_batch(records, rng) {
            Ok(bodies) => Ok(self.swap_in(bodies, records.to_vec())),
            Err(e) => {
                self.record_failure(&e);
                Err(e)
            }
        }
    }

    /// Fetch from `source` and load the result
    pub fn load_from<R: Rng + ?Sized>(
        &mut self,
        source: &mut dyn DataSource,
        filter: &StockFilter,
        rng: &mut R,
    ) -> Result<usize, DataError> {
        match source.fetch(filter) {
            Ok(records) => self.load(&records, rng),
            Err(e) => {
                self.record_failure(&e);
                Err(e)
            }
        }
    }

    fn swap_in(&mut self, bodies: Vec<Body>, records: Vec<RawStockRecord>) -> usize {
        let count = bodies.len();
        self.bodies = bodies;
        self.records = records;
        self.last_error = None;
        info!(count, "body set replaced");
        count
    }

    fn record_failure(&mut self, e: &DataError) {
        warn!(error = %e, kept = self.bodies.len(), "refresh failed, keeping previous bodies");
        self.last_error = Some(e.to_string());
    }

    /// Run one physics frame unless physics is switched off.
    /// Returns whether a step happened.
    pub fn advance(&mut self, stepper: &PhysicsStepper) -> bool {
        if !self.params.physics_enabled {
            return false;
        }
        stepper.step(&mut self.bodies, &self.params);
        self.frame += 1;
        true
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, ticker: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.ticker == ticker)
    }

    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        self.bodies.iter().map(Body::snapshot).collect()
    }

    /// Raw metrics behind the current bodies, for detail readouts
    pub fn records(&self) -> &[RawStockRecord] {
        &self.records
    }

    pub fn record(&self, ticker: &str) -> Option<&RawStockRecord> {
        self.records.iter().find(|r| r.ticker == ticker)
    }

    pub fn set_gravity_strength(&mut self, gravity_strength: f64) -> bool {
        self.params.set_gravity_strength(gravity_strength)
    }

    pub fn set_time_speed(&mut self, time_speed: f64) {
        self.params.set_time_speed(time_speed);
    }

    pub fn set_collisions_enabled(&mut self, enabled: bool) {
        self.params.set_collisions_enabled(enabled);
    }

    pub fn set_physics_enabled(&mut self, enabled: bool) {
        self.params.set_physics_enabled(enabled);
    }
}

/// Thread-safe handle: refreshes map outside the lock and swap under it
#[derive(Debug, Clone, Default)]
pub struct SharedSimulation {
    inner: Arc<RwLock<SimulationState>>,
}

impl SharedSimulation {
    pub fn new(state: SimulationState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Map `records` without holding the lock, then swap atomically
    pub fn load<R: Rng + ?Sized>(&self, records: &[RawStockRecord], rng: &mut R) -> Result<usize, DataError> {
        let mapped = map_batch(records, rng).map(|bodies| (bodies, records.to_vec()));
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match mapped {
            Ok((bodies, records)) => Ok(state.swap_in(bodies, records)),
            Err(e) => {
                state.record_failure(&e);
                Err(e)
            }
        }
    }

    /// One physics frame under the write lock
    pub fn advance(&self, stepper: &PhysicsStepper) -> bool {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        state.advance(stepper)
    }

    /// Run `f` with read access
    pub fn read<T>(&self, f: impl FnOnce(&SimulationState) -> T) -> T {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Run `f` with write access (parameter changes, wave triggers)
    pub fn write<T>(&self, f: impl FnOnce(&mut SimulationState) -> T) -> T {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        self.read(SimulationState::snapshots)
    }
}
