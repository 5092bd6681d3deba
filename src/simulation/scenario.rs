//! Build a fully-initialized radar scenario from configuration
//!
//! Takes a `RadarConfig` (YAML-facing) and produces the runtime bundle
//! `RadarScenario`, containing:
//! - simulation state (bodies, parameters, wave)
//! - the physics stepper
//! - the data source, the slice to request from it and the refresh timer
//! - a seeded rng used to place bodies on every load
//!
//! The scenario is inserted into Bevy as a `Resource` by the viewer and driven
//! directly by the headless runner.

use std::time::Duration;

use bevy::prelude::Resource;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::configuration::config::{RadarConfig, SourceKind};
use crate::data::mock::MockStockServer;
use crate::data::payload::JsonFileSource;
use crate::data::source::{DataSource, StockFilter};
use crate::error::{ConfigError, DataError};
use crate::simulation::engine::PhysicsStepper;
use crate::simulation::refresh::RefreshTimer;
use crate::simulation::state::SimulationState;

/// What happened during one call to [`RadarScenario::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    pub stepped: bool,   // physics ran this frame
    pub refreshed: bool, // the body set was replaced this frame
}

#[derive(Resource)]
pub struct RadarScenario {
    pub state: SimulationState,
    pub stepper: PhysicsStepper,
    pub source: Box<dyn DataSource + Send + Sync>,
    pub filter: StockFilter,
    pub refresh_timer: RefreshTimer,
    pub show_labels: bool,
    rng: ChaCha8Rng,
}

impl RadarScenario {
    pub fn build_scenario(cfg: &RadarConfig) -> Result<Self, ConfigError> {
        let source: Box<dyn DataSource + Send + Sync> = match cfg.data.source {
            SourceKind::Mock => Box::new(MockStockServer::new(cfg.data.seed)),
            SourceKind::Json => {
                let path = cfg.data.path.as_ref().ok_or(ConfigError::MissingPath)?;
                Box::new(JsonFileSource::new(path))
            }
        };

        Ok(Self::with_source(cfg, source))
    }

    /// Same as [`build_scenario`](Self::build_scenario) with an explicit source
    pub fn with_source(cfg: &RadarConfig, source: Box<dyn DataSource + Send + Sync>) -> Self {
        Self {
            state: SimulationState::new(cfg.parameters()),
            stepper: PhysicsStepper::new(),
            source,
            filter: cfg.data.stock_filter(),
            refresh_timer: RefreshTimer::new(cfg.refresh_interval()),
            show_labels: cfg.view.show_labels,
            // placement stream kept apart from the generator's
            rng: ChaCha8Rng::seed_from_u64(cfg.data.seed.wrapping_add(1)),
        }
    }

    /// Fetch and swap in a new body set; on failure the old set stays
    pub fn refresh(&mut self) -> Result<usize, DataError> {
        self.refresh_timer.reset();
        let count = self
            .state
            .load_from(self.source.as_mut(), &self.filter, &mut self.rng)?;
        info!(count, source = self.source.name(), "radar refreshed");
        Ok(count)
    }

    /// Switch to the next filter and refetch right away
    pub fn cycle_filter(&mut self) -> Result<usize, DataError> {
        self.filter = self.filter.next();
        info!(filter = ?self.filter, "stock filter changed");
        self.refresh()
    }

    /// One frame: periodic refresh, wave timeout, physics step
    pub fn tick(&mut self, delta: Duration, now_secs: f64) -> FrameReport {
        let mut report = FrameReport::default();

        if self.refresh_timer.tick(delta) {
            match self.refresh() {
                Ok(_) => report.refreshed = true,
                Err(e) => warn!(error = %e, "scheduled refresh failed"),
            }
        }

        self.state.wave.update(now_secs);
        report.stepped = self.state.advance(&self.stepper);
        report
    }
}
