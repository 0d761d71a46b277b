//! Simulation Driver
//!
//! Owns the ECS world holding the grid, parameters, random source and
//! statistics, and the schedule that advances it one generation at a time.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use ethno_events::{GenerationRecord, GridSnapshot, RunSummary, StrategyCounts};
use tracing::{debug, info};

use crate::components::grid::{Cell, Grid};
use crate::config::{ConfigError, SimConfig, SimParams};
use crate::output::StatsCollector;
use crate::rng::{RandomSource, SeededSource};
use crate::systems::{
    begin_generation, cull, interact, reproduce, run_death, run_interaction, run_reproduction,
    run_settlement, settle, GenerationReport,
};
use crate::SimRng;

/// An ethnocentrism simulation on a single grid.
///
/// Each [`step`](Simulation::step) runs settlement, interaction,
/// reproduction and death in that order, drawing every random value from
/// the one source supplied at construction.
pub struct Simulation {
    world: World,
    schedule: Schedule,
}

impl Simulation {
    /// Builds a simulation driven by `source`.
    ///
    /// Fails if the configuration does not validate.
    pub fn new(config: &SimConfig, source: impl RandomSource + 'static) -> Result<Self, ConfigError> {
        let params = config.params()?;
        info!(
            size = params.size,
            colors = params.palette.len(),
            mutation_rate = params.mutation_rate,
            death_probability = params.death_probability,
            "Creating simulation"
        );

        let mut world = World::new();
        world.insert_resource(Grid::new(params.size));
        world.insert_resource(params);
        world.insert_resource(SimRng::new(source));
        world.insert_resource(GenerationReport::default());
        world.insert_resource(StatsCollector::new());

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems(
            (
                begin_generation,
                run_settlement,
                run_interaction,
                run_reproduction,
                run_death,
            )
                .chain(),
        );

        Ok(Self { world, schedule })
    }

    /// Builds a simulation with a [`SeededSource`] seeded from `seed`.
    pub fn seeded(config: &SimConfig, seed: u64) -> Result<Self, ConfigError> {
        info!(seed, "Seeding random source");
        Self::new(config, SeededSource::new(seed))
    }

    /// Builds a simulation using the configured seed, or a fresh one.
    pub fn from_config(config: &SimConfig) -> Result<Self, ConfigError> {
        let source = match config.run.seed {
            Some(seed) => SeededSource::new(seed),
            None => SeededSource::from_entropy(),
        };
        info!(seed = source.seed(), "Seeding random source");
        Self::new(config, source)
    }

    /// Advances one generation and returns its record.
    pub fn step(&mut self) -> GenerationRecord {
        self.schedule.run(&mut self.world);

        let report = self.world.resource::<GenerationReport>().clone();
        let counts = self.world.resource::<Grid>().census();
        let record = GenerationRecord {
            generation: report.generation,
            settled: report.settled,
            births: report.births,
            deaths: report.deaths,
            counts,
        };
        debug!(
            generation = record.generation,
            settled = ?record.settled,
            encounters = report.encounters,
            births = record.births,
            deaths = record.deaths,
            population = record.population(),
            "Generation complete"
        );

        self.world
            .resource_mut::<StatsCollector>()
            .record(record.clone());
        record
    }

    /// Advances `generations` generations, returning every record.
    pub fn run(&mut self, generations: u64) -> Vec<GenerationRecord> {
        (0..generations).map(|_| self.step()).collect()
    }

    /// Runs only the settlement phase.
    pub fn settlement(&mut self) -> Option<Cell> {
        self.with_grid_and_rng(|grid, rng, params| {
            settle(grid, rng, &params.palette, params.payoff.baseline_potential)
        })
    }

    /// Runs only the interaction phase, returning the encounters played.
    pub fn interaction(&mut self) -> usize {
        self.world.resource_scope(|world, mut grid: Mut<Grid>| {
            interact(&mut grid, &world.resource::<SimParams>().payoff)
        })
    }

    /// Runs only the reproduction phase, returning the number of births.
    pub fn reproduction(&mut self) -> usize {
        self.with_grid_and_rng(|grid, rng, params| reproduce(grid, rng, params))
    }

    /// Runs only the death phase, returning the number of deaths.
    pub fn death(&mut self) -> usize {
        self.with_grid_and_rng(|grid, rng, params| cull(grid, rng, params.death_probability))
    }

    fn with_grid_and_rng<R>(
        &mut self,
        f: impl FnOnce(&mut Grid, &mut dyn RandomSource, &SimParams) -> R,
    ) -> R {
        self.world.resource_scope(|world, mut rng: Mut<SimRng>| {
            world.resource_scope(|world, mut grid: Mut<Grid>| {
                f(&mut grid, rng.source(), world.resource::<SimParams>())
            })
        })
    }

    /// Strategy counts for the current grid.
    pub fn statistics(&self) -> StrategyCounts {
        self.grid().census()
    }

    /// Render-ready view of the current grid.
    pub fn snapshot(&self) -> GridSnapshot {
        self.grid().snapshot(&self.params().palette, self.generation())
    }

    /// Summary over every generation run through [`step`](Simulation::step).
    pub fn summary(&self) -> RunSummary {
        self.world.resource::<StatsCollector>().summary()
    }

    pub fn history(&self) -> &[GenerationRecord] {
        self.world.resource::<StatsCollector>().history()
    }

    /// Number of completed generations.
    pub fn generation(&self) -> u64 {
        self.world.resource::<GenerationReport>().generation
    }

    pub fn grid(&self) -> &Grid {
        self.world.resource::<Grid>()
    }

    /// Direct access to the grid, for seeding a custom starting population.
    pub fn grid_mut(&mut self) -> &mut Grid {
        self.world.resource_mut::<Grid>().into_inner()
    }

    pub fn params(&self) -> &SimParams {
        self.world.resource::<SimParams>()
    }
}
