//! Death System

use bevy_ecs::prelude::*;

use super::GenerationReport;
use crate::components::grid::Grid;
use crate::config::SimParams;
use crate::rng::RandomSource;
use crate::SimRng;

/// Clears each cell independently with probability `death_probability`.
///
/// One uniform draw is taken for every cell in row-major order, occupied or
/// not. Returns the number of agents removed.
pub fn cull(grid: &mut Grid, rng: &mut dyn RandomSource, death_probability: f64) -> usize {
    let mut deaths = 0;
    for cell in grid.cells().collect::<Vec<_>>() {
        if rng.uniform() < death_probability && grid.clear(cell).is_some() {
            tracing::trace!(?cell, "agent died");
            deaths += 1;
        }
    }
    deaths
}

/// Death phase of a generation
pub fn run_death(
    mut grid: ResMut<Grid>,
    mut rng: ResMut<SimRng>,
    params: Res<SimParams>,
    mut report: ResMut<GenerationReport>,
) {
    report.deaths = cull(&mut grid, rng.source(), params.death_probability);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::{Agent, ColorId};
    use crate::rng::{Draw, ScriptedSource, SeededSource};

    fn populated(size: usize) -> Grid {
        let mut grid = Grid::new(size);
        for cell in grid.cells().collect::<Vec<_>>() {
            grid.place(cell, Agent::new(ColorId(0), true, false, 0.12));
        }
        grid
    }

    #[test]
    fn test_certain_death_clears_everything() {
        let mut grid = populated(4);
        grid.clear((2, 2));
        let mut rng = SeededSource::new(8);
        assert_eq!(cull(&mut grid, &mut rng, 1.0), 15);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_zero_probability_spares_everyone() {
        let mut grid = populated(3);
        let mut rng = SeededSource::new(8);
        assert_eq!(cull(&mut grid, &mut rng, 0.0), 0);
        assert_eq!(grid.occupied_count(), 9);
    }

    #[test]
    fn test_one_draw_per_cell_in_row_major_order() {
        let mut grid = populated(2);
        grid.clear((0, 1));
        let mut rng = ScriptedSource::new([
            Draw::Uniform(0.05),
            Draw::Uniform(0.05),
            Draw::Uniform(0.5),
            Draw::Uniform(0.09),
        ]);
        assert_eq!(cull(&mut grid, &mut rng, 0.10), 2);
        assert!(grid.is_empty_at((0, 0)));
        assert!(!grid.is_empty_at((1, 0)));
        assert!(grid.is_empty_at((1, 1)));
        assert_eq!(rng.remaining(), 0);
    }
}
