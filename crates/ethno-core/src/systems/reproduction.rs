//! Reproduction System
//!
//! Payoff-proportional cloning into empty neighbor cells, with per-trait
//! mutation of the offspring.

use bevy_ecs::prelude::*;

use super::GenerationReport;
use crate::components::agent::{Agent, Palette};
use crate::components::grid::Grid;
use crate::config::SimParams;
use crate::rng::RandomSource;
use crate::SimRng;

/// Resamples each offspring trait independently with probability `rate`.
/// Draw order: color, inner flag, outer flag; a resample draw immediately
/// follows the trait's own mutation check.
pub fn mutate(child: &mut Agent, rng: &mut dyn RandomSource, palette: &Palette, rate: f64) {
    if rng.uniform() < rate {
        child.color = palette.random(rng);
    }
    if rng.uniform() < rate {
        child.inner_coop = rng.coin();
    }
    if rng.uniform() < rate {
        child.outer_coop = rng.coin();
    }
}

/// Gives every agent a chance to spawn, then resets all potentials.
///
/// Cells are visited in a random row order with a fresh random column
/// order per row. An agent spawns when a uniform draw falls below its
/// potential; the clone goes into the first empty neighbor of a shuffled
/// up/down/left/right list. Offspring are placed immediately and may
/// themselves be visited later in the same pass. Returns the number of
/// births.
pub fn reproduce(grid: &mut Grid, rng: &mut dyn RandomSource, params: &SimParams) -> usize {
    let size = grid.size();
    let mut births = 0;

    for row in rng.permutation(size) {
        for col in rng.permutation(size) {
            let parent = match grid.get((row, col)) {
                Some(agent) => agent,
                None => continue,
            };
            if rng.uniform() >= parent.potential {
                continue;
            }
            let mut child = parent.clone();

            let neighbors = grid.neighbors((row, col));
            let order = rng.permutation(neighbors.len());
            let Some(target) = order
                .into_iter()
                .map(|k| neighbors[k])
                .find(|&cell| grid.is_empty_at(cell))
            else {
                continue;
            };

            mutate(&mut child, rng, &params.palette, params.mutation_rate);
            tracing::trace!(parent = ?(row, col), child = ?target, "offspring placed");
            grid.place(target, child);
            births += 1;
        }
    }

    grid.reset_potentials(params.payoff.baseline_potential);
    births
}

/// Reproduction phase of a generation
pub fn run_reproduction(
    mut grid: ResMut<Grid>,
    mut rng: ResMut<SimRng>,
    params: Res<SimParams>,
    mut report: ResMut<GenerationReport>,
) {
    report.births = reproduce(&mut grid, rng.source(), &params);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::ColorId;
    use crate::config::SimConfig;
    use crate::rng::{Draw, ScriptedSource, SeededSource};

    fn params(size: usize, mutation_rate: f64) -> SimParams {
        let mut config = SimConfig::default();
        config.world.size = size;
        config.dynamics.mutation_rate = mutation_rate;
        config.params().unwrap()
    }

    #[test]
    fn test_spawns_into_first_empty_shuffled_neighbor() {
        let params = params(3, 0.0);
        let mut grid = Grid::new(3);
        grid.place((1, 1), Agent::new(ColorId(2), true, false, 0.5));
        // Up neighbor is taken, so the shuffled order [up, right, ...] lands right
        grid.place((0, 1), Agent::new(ColorId(0), false, false, 0.0));

        let mut rng = ScriptedSource::new([
            Draw::Permutation(vec![1, 0, 2]),
            // row 1
            Draw::Permutation(vec![1, 0, 2]),
            Draw::Uniform(0.3),
            Draw::Permutation(vec![0, 3, 1, 2]),
            Draw::Uniform(0.9),
            Draw::Uniform(0.9),
            Draw::Uniform(0.9),
            // (1, 2) is the fresh offspring; it carries the parent's potential
            Draw::Uniform(0.99),
            // row 0
            Draw::Permutation(vec![0, 1, 2]),
            Draw::Uniform(0.5),
            // row 2
            Draw::Permutation(vec![0, 1, 2]),
        ]);

        let births = reproduce(&mut grid, &mut rng, &params);

        assert_eq!(births, 1);
        assert_eq!(rng.remaining(), 0);
        let child = grid.get((1, 2)).unwrap();
        assert_eq!(child.color, ColorId(2));
        assert!(child.inner_coop);
        assert!(!child.outer_coop);
    }

    #[test]
    fn test_draw_at_or_above_potential_skips() {
        let params = params(2, 0.0);
        let mut grid = Grid::new(2);
        grid.place((0, 0), Agent::new(ColorId(0), true, true, 0.25));

        let mut rng = ScriptedSource::new([
            Draw::Permutation(vec![0, 1]),
            Draw::Permutation(vec![0, 1]),
            Draw::Uniform(0.25),
            Draw::Permutation(vec![0, 1]),
        ]);
        assert_eq!(reproduce(&mut grid, &mut rng, &params), 0);
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_negative_potential_never_spawns() {
        let params = params(3, 0.0);
        let mut grid = Grid::new(3);
        grid.place((1, 1), Agent::new(ColorId(0), false, false, -0.05));

        let mut rng = SeededSource::new(5);
        for _ in 0..20 {
            grid.get_mut((1, 1)).unwrap().potential = -0.05;
            assert_eq!(reproduce(&mut grid, &mut rng, &params), 0);
        }
    }

    #[test]
    fn test_surrounded_parent_has_no_offspring() {
        let params = params(3, 0.0);
        let mut grid = Grid::new(3);
        for cell in grid.cells().collect::<Vec<_>>() {
            grid.place(cell, Agent::new(ColorId(0), true, true, 1.0));
        }
        let mut rng = SeededSource::new(11);
        assert_eq!(reproduce(&mut grid, &mut rng, &params), 0);
        assert_eq!(grid.occupied_count(), 9);
    }

    #[test]
    fn test_potentials_reset_after_reproduction() {
        let params = params(4, 0.005);
        let mut grid = Grid::new(4);
        grid.place((0, 0), Agent::new(ColorId(0), true, true, 0.9));
        grid.place((2, 3), Agent::new(ColorId(1), false, true, -0.2));
        grid.place((3, 1), Agent::new(ColorId(2), true, false, 0.4));

        let mut rng = SeededSource::new(3);
        reproduce(&mut grid, &mut rng, &params);
        for (_, agent) in grid.iter_occupied() {
            assert_eq!(agent.potential, params.payoff.baseline_potential);
        }
    }

    #[test]
    fn test_full_mutation_rate_resamples_every_trait() {
        let palette = Palette::new(vec!["c".into(), "m".into(), "y".into(), "r".into()]);
        let mut child = Agent::new(ColorId(0), true, true, 0.12);
        let mut rng = ScriptedSource::new([
            Draw::Uniform(0.999),
            Draw::Below(3),
            Draw::Uniform(0.999),
            Draw::Below(0),
            Draw::Uniform(0.999),
            Draw::Below(0),
        ]);
        mutate(&mut child, &mut rng, &palette, 1.0);
        assert_eq!(child.color, ColorId(3));
        assert!(!child.inner_coop);
        assert!(!child.outer_coop);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_zero_mutation_rate_keeps_traits() {
        let palette = Palette::new(vec!["c".into(), "m".into()]);
        let mut child = Agent::new(ColorId(1), false, true, 0.12);
        let before = child.clone();
        let mut rng = ScriptedSource::new([
            Draw::Uniform(0.0),
            Draw::Uniform(0.0),
            Draw::Uniform(0.0),
        ]);
        mutate(&mut child, &mut rng, &palette, 0.0);
        assert_eq!(child, before);
    }
}
