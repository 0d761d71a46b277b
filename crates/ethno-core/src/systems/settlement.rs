//! Settlement System
//!
//! Adds at most one randomly-configured agent per generation.

use bevy_ecs::prelude::*;

use super::GenerationReport;
use crate::components::agent::{Agent, Palette};
use crate::components::grid::{Cell, Grid};
use crate::config::SimParams;
use crate::rng::RandomSource;
use crate::SimRng;

/// Places one new agent into the first empty cell of a randomized scan.
///
/// Rows are visited in a random order and each visited row draws its own
/// random column order. The scan stops at the first empty cell, so a
/// generation never gains more than one settler. Returns the settled cell,
/// or `None` when the grid is full.
pub fn settle(
    grid: &mut Grid,
    rng: &mut dyn RandomSource,
    palette: &Palette,
    potential: f64,
) -> Option<Cell> {
    let size = grid.size();
    for row in rng.permutation(size) {
        for col in rng.permutation(size) {
            if grid.is_empty_at((row, col)) {
                let agent = Agent::random(rng, palette, potential);
                grid.place((row, col), agent);
                return Some((row, col));
            }
        }
    }
    None
}

/// Settlement phase of a generation
pub fn run_settlement(
    mut grid: ResMut<Grid>,
    mut rng: ResMut<SimRng>,
    params: Res<SimParams>,
    mut report: ResMut<GenerationReport>,
) {
    report.settled = settle(
        &mut grid,
        rng.source(),
        &params.palette,
        params.payoff.baseline_potential,
    );
    match report.settled {
        Some(cell) => tracing::trace!(?cell, "settler arrived"),
        None => tracing::trace!("grid full, no settler"),
    }
}
