//! Report output: CSV reports, JSON run summary, console summary.

pub mod generator;

pub use generator::*;
