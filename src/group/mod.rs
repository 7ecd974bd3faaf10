pub mod classifier;
pub mod group_model;
pub mod overlay;
