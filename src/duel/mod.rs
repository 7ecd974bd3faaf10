pub mod error;
pub mod gesture;
pub mod navigator;
pub mod zone_model;
