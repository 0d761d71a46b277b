//! Axelrod–Hammond Ethnocentrism Simulation Engine
//!
//! Agents on a toroidal grid settle, play a spatial Prisoner's Dilemma with
//! their neighbors, reproduce in proportion to their payoff and die at
//! random. Each generation yields strategy counts and a render-ready grid
//! snapshot.

use bevy_ecs::prelude::*;

pub mod components;
pub mod config;
pub mod output;
pub mod rng;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::{ConfigError, Payoff, SimConfig, SimParams};
pub use rng::{Draw, RandomSource, ScriptedSource, SeededSource};
pub use simulation::Simulation;

/// Random source resource shared by every phase of a generation
#[derive(Resource)]
pub struct SimRng(pub Box<dyn RandomSource>);

impl SimRng {
    pub fn new(source: impl RandomSource + 'static) -> Self {
        Self(Box::new(source))
    }

    pub fn source(&mut self) -> &mut dyn RandomSource {
        &mut *self.0
    }
}
