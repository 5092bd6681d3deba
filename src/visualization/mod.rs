pub mod radar_vis3d;
pub mod radar_headless;
