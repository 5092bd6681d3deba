pub mod metrics;
pub mod visual;
pub mod batch;
