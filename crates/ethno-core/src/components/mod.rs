//! Simulation Components
//!
//! The agent value type and the grid resource that owns every agent.

pub mod agent;
pub mod grid;

pub use agent::*;
pub use grid::*;
