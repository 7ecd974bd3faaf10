pub mod cli;
pub mod duel;
pub mod engine;
pub mod group;
pub mod host;
pub mod label;
pub mod nav;
pub mod report;
pub mod scenario;
pub mod screens;
pub mod speech;
pub mod trace;
