//! Output Systems
//!
//! Statistics collection for per-generation records and run summaries.

pub mod stats;

pub use stats::StatsCollector;
