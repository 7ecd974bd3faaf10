pub mod cursor;
pub mod navigator;
