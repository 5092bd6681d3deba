pub mod error;
pub mod market;
pub mod mapping;
pub mod simulation;
pub mod data;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::{ConfigError, DataError};
pub use market::record::RawStockRecord;
pub use mapping::visual::{GlowColor, Hsl, VisualProperties};
pub use mapping::batch::map_batch;
pub use simulation::states::{Body, BodySnapshot, NVec3};
pub use simulation::params::{SimulationParameters, StepMode};
pub use simulation::forces::{Acceleration, AccelSet, ValueAttraction, OrbitalPull};
pub use simulation::engine::PhysicsStepper;
pub use simulation::state::{SimulationState, SharedSimulation};
pub use simulation::scenario::{RadarScenario, FrameReport};

pub use data::source::{DataSource, StockFilter};
pub use data::mock::MockStockServer;
pub use data::payload::{JsonFileSource, StocksResponse};

pub use configuration::config::{PhysicsConfig, ViewConfig, DataConfig, RadarConfig};

pub use visualization::{radar_vis3d::run_3d, radar_headless::run_headless};

pub use benchmark::benchmark::bench_step;
