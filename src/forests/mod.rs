pub mod bootstrap;
pub mod classifier;
pub mod params;
