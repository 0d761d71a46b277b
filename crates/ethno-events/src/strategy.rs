//! Strategy Types
//!
//! The four behavioral strategies an agent can follow and the per-strategy
//! population counts reported every generation.
//!
//! # Example
//!
//! ```
//! use ethno_events::{Strategy, StrategyCounts};
//!
//! let strategy = Strategy::from_flags(true, false);
//! assert_eq!(strategy, Strategy::Ethnocentric);
//!
//! let mut counts = StrategyCounts::default();
//! counts.add(strategy);
//! assert_eq!(counts.as_array(), [1, 0, 0, 0]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Behavioral strategy derived from an agent's (in-group, out-group) cooperation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Cooperates in-group, defects out-group
    Ethnocentric,
    /// Cooperates with everyone
    Samaritan,
    /// Defects in-group, cooperates out-group
    Traitor,
    /// Defects against everyone
    Selfish,
}

impl Strategy {
    /// Classifies a pair of cooperation flags.
    pub fn from_flags(inner_coop: bool, outer_coop: bool) -> Self {
        match (inner_coop, outer_coop) {
            (true, false) => Strategy::Ethnocentric,
            (true, true) => Strategy::Samaritan,
            (false, true) => Strategy::Traitor,
            (false, false) => Strategy::Selfish,
        }
    }

    /// Returns the (in-group, out-group) cooperation flags of this strategy.
    pub fn flags(self) -> (bool, bool) {
        match self {
            Strategy::Ethnocentric => (true, false),
            Strategy::Samaritan => (true, true),
            Strategy::Traitor => (false, true),
            Strategy::Selfish => (false, false),
        }
    }

    /// Returns all strategies in reporting order.
    pub fn all() -> &'static [Strategy] {
        &[
            Strategy::Ethnocentric,
            Strategy::Samaritan,
            Strategy::Traitor,
            Strategy::Selfish,
        ]
    }

    /// Position of this strategy in [`StrategyCounts::as_array`].
    pub fn index(self) -> usize {
        match self {
            Strategy::Ethnocentric => 0,
            Strategy::Samaritan => 1,
            Strategy::Traitor => 2,
            Strategy::Selfish => 3,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Ethnocentric => write!(f, "ethnocentric"),
            Strategy::Samaritan => write!(f, "samaritan"),
            Strategy::Traitor => write!(f, "traitor"),
            Strategy::Selfish => write!(f, "selfish"),
        }
    }
}

/// Population count per strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyCounts {
    pub ethnocentric: usize,
    pub samaritan: usize,
    pub traitor: usize,
    pub selfish: usize,
}

impl StrategyCounts {
    /// Counts one more agent of the given strategy.
    pub fn add(&mut self, strategy: Strategy) {
        *self.get_mut(strategy) += 1;
    }

    pub fn get(&self, strategy: Strategy) -> usize {
        match strategy {
            Strategy::Ethnocentric => self.ethnocentric,
            Strategy::Samaritan => self.samaritan,
            Strategy::Traitor => self.traitor,
            Strategy::Selfish => self.selfish,
        }
    }

    fn get_mut(&mut self, strategy: Strategy) -> &mut usize {
        match strategy {
            Strategy::Ethnocentric => &mut self.ethnocentric,
            Strategy::Samaritan => &mut self.samaritan,
            Strategy::Traitor => &mut self.traitor,
            Strategy::Selfish => &mut self.selfish,
        }
    }

    /// Counts in fixed order: ethnocentric, samaritan, traitor, selfish.
    pub fn as_array(&self) -> [usize; 4] {
        [self.ethnocentric, self.samaritan, self.traitor, self.selfish]
    }

    /// Total population across all strategies.
    pub fn total(&self) -> usize {
        self.as_array().iter().sum()
    }

    /// Share of the population following `strategy`, 0.0 for an empty population.
    pub fn share(&self, strategy: Strategy) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(strategy) as f64 / total as f64
    }

    /// The most common strategy, `None` for an empty population.
    /// Ties go to the strategy that comes first in reporting order.
    pub fn dominant(&self) -> Option<Strategy> {
        if self.total() == 0 {
            return None;
        }
        Strategy::all()
            .iter()
            .copied()
            .fold(None, |best: Option<Strategy>, s| match best {
                Some(b) if self.get(b) >= self.get(s) => Some(b),
                _ => Some(s),
            })
    }
}

impl From<StrategyCounts> for [usize; 4] {
    fn from(counts: StrategyCounts) -> Self {
        counts.as_array()
    }
}
