//! Configuration types for loading radar scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`PhysicsConfig`] – gravity, time speed, collision and physics toggles
//! - [`ViewConfig`]    – label toggle, viewer vs headless, headless frame count
//! - [`DataConfig`]    – where stock records come from and which slice to load
//! - `refresh_interval_secs` – how often the data source is polled again
//!
//! # YAML format
//!
//! ```yaml
//! physics:
//!   gravity_strength: 0.03   # [0, 0.1]; 0.05 ± 0.005 selects orbital mode
//!   time_speed: 0.5          # [0, 1]
//!   collisions_enabled: true
//!   physics_enabled: true
//!
//! view:
//!   show_labels: true
//!   viewer: true             # false -> run headless
//!   frames: 600              # frames to step when headless
//!
//! data:
//!   source: mock             # mock | json
//!   path: ~                  # payload file when source is json (relative to this file)
//!   filter: all              # all | gainers | most-traded | best-value
//!   limit: 20
//!   min_rule40: 30
//!   seed: 42
//!
//! refresh_interval_secs: 300
//! ```
//!
//! Every section and field is optional; missing values fall back to the
//! defaults shown above.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::data::source::{StockFilter, DEFAULT_LIMIT, DEFAULT_MIN_RULE_OF_40};
use crate::error::ConfigError;
use crate::simulation::params::{SimulationParameters, GRAVITY_RANGE, TIME_SPEED_RANGE};

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity_strength: f64,
    pub time_speed: f64,
    pub collisions_enabled: bool,
    pub physics_enabled: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let p = SimulationParameters::default();
        Self {
            gravity_strength: p.gravity_strength,
            time_speed: p.time_speed,
            collisions_enabled: p.collisions_enabled,
            physics_enabled: p.physics_enabled,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ViewConfig {
    pub show_labels: bool, // rendering only, the simulation ignores it
    pub viewer: bool,      // `true` - open the 3D viewer, `false` - headless
    pub frames: u64,       // headless frame count
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            show_labels: true,
            viewer: true,
            frames: 600,
        }
    }
}

/// Which data source feeds the radar
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    #[serde(rename = "mock")] // in-process synthetic generator
    Mock,

    #[serde(rename = "json")] // saved endpoint response on disk
    Json,
}

/// Endpoint slice to request
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    All,
    Gainers,
    MostTraded,
    BestValue,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DataConfig {
    pub source: SourceKind,
    pub path: Option<PathBuf>,
    pub filter: FilterKind,
    pub limit: usize,
    pub min_rule40: f64,
    pub seed: u64, // generator and placement seed
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Mock,
            path: None,
            filter: FilterKind::All,
            limit: DEFAULT_LIMIT,
            min_rule40: DEFAULT_MIN_RULE_OF_40,
            seed: 42,
        }
    }
}

impl DataConfig {
    /// A limit of 0 means the default of 20
    pub fn stock_filter(&self) -> StockFilter {
        let limit = if self.limit == 0 { DEFAULT_LIMIT } else { self.limit };
        match self.filter {
            FilterKind::All => StockFilter::All,
            FilterKind::Gainers => StockFilter::Gainers { limit },
            FilterKind::MostTraded => StockFilter::MostTraded { limit },
            FilterKind::BestValue => StockFilter::BestValue {
                limit,
                min_rule_of_40: self.min_rule40,
            },
        }
    }

    /// Anchor a relative payload path at `dir`
    pub fn resolve_path(&mut self, dir: &Path) {
        if let Some(path) = self.path.as_mut().filter(|p| p.is_relative()) {
            *path = dir.join(&*path);
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RadarConfig {
    pub physics: PhysicsConfig,
    pub view: ViewConfig,
    pub data: DataConfig,
    pub refresh_interval_secs: u64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            view: ViewConfig::default(),
            data: DataConfig::default(),
            refresh_interval_secs: 300,
        }
    }
}

impl RadarConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: RadarConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a scenario file. A relative `data.path` is taken relative to the
    /// directory holding the scenario file, not the working directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut cfg: RadarConfig = serde_yaml::from_reader(reader)?;
        if let Some(dir) = path.parent() {
            cfg.data.resolve_path(dir);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Enforce the control-surface ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("physics.gravity_strength", self.physics.gravity_strength, GRAVITY_RANGE)?;
        check_range("physics.time_speed", self.physics.time_speed, TIME_SPEED_RANGE)?;
        if self.data.source == SourceKind::Json && self.data.path.is_none() {
            return Err(ConfigError::MissingPath);
        }
        Ok(())
    }

    pub fn parameters(&self) -> SimulationParameters {
        SimulationParameters {
            gravity_strength: self.physics.gravity_strength,
            time_speed: self.physics.time_speed,
            collisions_enabled: self.physics.collisions_enabled,
            physics_enabled: self.physics.physics_enabled,
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

fn check_range(name: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), ConfigError> {
    // written so NaN fails too
    if !(value >= min && value <= max) {
        return Err(ConfigError::OutOfRange { name, value, min, max });
    }
    Ok(())
}
