//! Generation Systems
//!
//! The four phases of a generation, each a plain function over the grid plus
//! an ECS system wrapping it. The systems are chained in the order
//! settlement, interaction, reproduction, death.

pub mod death;
pub mod interaction;
pub mod reproduction;
pub mod settlement;

use bevy_ecs::prelude::*;

use crate::components::grid::Cell;

pub use death::{cull, run_death};
pub use interaction::{interact, play_dilemma, run_interaction};
pub use reproduction::{mutate, reproduce, run_reproduction};
pub use settlement::{run_settlement, settle};

/// Resource: bookkeeping for the generation currently being run
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    /// 1-based index of the current generation
    pub generation: u64,
    pub settled: Option<Cell>,
    /// Pairwise encounters played during interaction
    pub encounters: usize,
    pub births: usize,
    pub deaths: usize,
}

/// Starts a new generation: bumps the counter and clears last generation's tallies
pub fn begin_generation(mut report: ResMut<GenerationReport>) {
    let generation = report.generation + 1;
    *report = GenerationReport {
        generation,
        ..Default::default()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_generation_resets_tallies() {
        let mut world = World::new();
        world.insert_resource(GenerationReport {
            generation: 3,
            settled: Some((1, 1)),
            encounters: 4,
            births: 2,
            deaths: 1,
        });

        let mut schedule = Schedule::default();
        schedule.add_systems(begin_generation);
        schedule.run(&mut world);

        let report = world.resource::<GenerationReport>();
        assert_eq!(report.generation, 4);
        assert_eq!(report.settled, None);
        assert_eq!(report.births, 0);
        assert_eq!(report.deaths, 0);
    }
}
