pub mod classifier;
pub mod entropy;
pub mod node;
pub mod params;
