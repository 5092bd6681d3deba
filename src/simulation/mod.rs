pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod collision;
pub mod integrator;
pub mod state;
pub mod wave;
pub mod refresh;
pub mod scenario;
