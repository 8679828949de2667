//! Report output: console summary, CSV and JSON files.

pub mod generator;

pub use generator::*;
