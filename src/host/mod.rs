pub mod error;
pub mod fake;
pub mod graph;
pub mod input;
pub mod locale;
pub mod scene_model;
pub mod speech;
