//! Shared data types for the ethnocentrism simulation.
//!
//! This crate contains pure data structures with no simulation logic:
//! strategy classification, render-ready grid snapshots and per-generation
//! records. Renderers and charting tools depend on it without pulling in
//! the engine.

pub mod record;
pub mod snapshot;
pub mod strategy;

pub use record::{GenerationRecord, RunSummary};
pub use snapshot::{CellView, GridSnapshot, Paint};
pub use strategy::{Strategy, StrategyCounts};
