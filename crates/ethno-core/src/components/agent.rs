//! Agent Components
//!
//! An agent is a color plus two cooperation flags and a transient
//! reproduction potential.

use ethno_events::Strategy;
use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

/// Index of a color in the simulation's [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColorId(pub usize);

/// Fixed, non-empty list of distinct color names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    names: Vec<String>,
}

impl Palette {
    /// Wraps an already-validated list of names (see `SimConfig::validate`).
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of a palette color. Ids outside the palette render as `"?"`.
    pub fn name(&self, color: ColorId) -> &str {
        self.names.get(color.0).map(String::as_str).unwrap_or("?")
    }

    pub fn id_of(&self, name: &str) -> Option<ColorId> {
        self.names.iter().position(|n| n == name).map(ColorId)
    }

    /// Draws a color uniformly from the palette.
    pub fn random(&self, rng: &mut dyn RandomSource) -> ColorId {
        ColorId(rng.below(self.names.len()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColorId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (ColorId(i), n.as_str()))
    }
}

/// A single grid inhabitant.
///
/// Offspring are produced with [`Clone`], so a child starts as an
/// independent copy of its parent's traits and current potential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub color: ColorId,
    /// Cooperates with same-color partners
    pub inner_coop: bool,
    /// Cooperates with different-color partners
    pub outer_coop: bool,
    /// Reproduction potential; unbounded in both directions until reset
    pub potential: f64,
}

impl Agent {
    pub fn new(color: ColorId, inner_coop: bool, outer_coop: bool, potential: f64) -> Self {
        Self {
            color,
            inner_coop,
            outer_coop,
            potential,
        }
    }

    /// Creates an agent with uniformly random traits.
    /// Draw order: color, then inner flag, then outer flag.
    pub fn random(rng: &mut dyn RandomSource, palette: &Palette, potential: f64) -> Self {
        let color = palette.random(rng);
        let inner_coop = rng.coin();
        let outer_coop = rng.coin();
        Self::new(color, inner_coop, outer_coop, potential)
    }

    pub fn strategy(&self) -> Strategy {
        Strategy::from_flags(self.inner_coop, self.outer_coop)
    }

    pub fn same_group(&self, other: &Agent) -> bool {
        self.color == other.color
    }

    /// Whether this agent cooperates with `other`, given their group relation.
    pub fn cooperates_with(&self, other: &Agent) -> bool {
        if self.same_group(other) {
            self.inner_coop
        } else {
            self.outer_coop
        }
    }

    /// Pays the cost of cooperating.
    pub fn give(&mut self, cost: f64) {
        self.potential -= cost;
    }

    /// Collects the benefit of a partner's cooperation.
    pub fn receive(&mut self, benefit: f64) {
        self.potential += benefit;
    }

    pub fn reset(&mut self, baseline: f64) {
        self.potential = baseline;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Draw, ScriptedSource};

    fn palette() -> Palette {
        Palette::new(vec!["c".into(), "m".into(), "y".into(), "r".into()])
    }

    #[test]
    fn test_random_agent_draw_order() {
        let mut rng = ScriptedSource::new([Draw::Below(2), Draw::Below(1), Draw::Below(0)]);
        let agent = Agent::random(&mut rng, &palette(), 0.12);
        assert_eq!(agent.color, ColorId(2));
        assert!(agent.inner_coop);
        assert!(!agent.outer_coop);
        assert_eq!(agent.potential, 0.12);
        assert_eq!(agent.strategy(), Strategy::Ethnocentric);
    }

    #[test]
    fn test_give_and_receive() {
        let mut agent = Agent::new(ColorId(0), true, true, 0.12);
        agent.give(0.01);
        agent.receive(0.03);
        assert!((agent.potential - 0.14).abs() < 1e-12);
        agent.reset(0.12);
        assert_eq!(agent.potential, 0.12);
    }

    #[test]
    fn test_potential_has_no_floor() {
        let mut agent = Agent::new(ColorId(0), true, false, 0.0);
        agent.give(0.01);
        assert!(agent.potential < 0.0);
    }

    #[test]
    fn test_cooperates_with_uses_group_flag() {
        let ethno = Agent::new(ColorId(0), true, false, 0.12);
        let kin = Agent::new(ColorId(0), false, false, 0.12);
        let stranger = Agent::new(ColorId(1), false, false, 0.12);
        assert!(ethno.cooperates_with(&kin));
        assert!(!ethno.cooperates_with(&stranger));
    }

    #[test]
    fn test_clone_is_independent() {
        let parent = Agent::new(ColorId(1), true, true, 0.2);
        let mut child = parent.clone();
        child.inner_coop = false;
        child.give(0.5);
        assert!(parent.inner_coop);
        assert_eq!(parent.potential, 0.2);
    }

    #[test]
    fn test_palette_lookup() {
        let palette = palette();
        assert_eq!(palette.name(ColorId(3)), "r");
        assert_eq!(palette.id_of("m"), Some(ColorId(1)));
        assert_eq!(palette.id_of("k"), None);
        assert_eq!(palette.iter().count(), 4);
    }
}
