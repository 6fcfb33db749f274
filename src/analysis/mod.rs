//! Aggregation of votes into the legislator and bill reports.

pub mod aggregator;

pub use aggregator::*;
