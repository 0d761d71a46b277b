//! Generation Records
//!
//! Per-generation bookkeeping and whole-run summaries. One record is emitted
//! per generation; a driver streams them as JSON lines for charting.

use serde::{Deserialize, Serialize};

use crate::{Strategy, StrategyCounts};

/// Outcome of one full generation (settlement, interaction, reproduction, death).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// 1-based index of the generation that produced this record
    pub generation: u64,
    /// Cell that received a settler, if the grid had room
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settled: Option<(usize, usize)>,
    pub births: usize,
    pub deaths: usize,
    /// Census taken after death
    pub counts: StrategyCounts,
}

impl GenerationRecord {
    pub fn population(&self) -> usize {
        self.counts.total()
    }

    /// Serializes the record to a JSON line (for JSONL format).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a record from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Aggregate view over every generation recorded so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub generations: u64,
    pub final_counts: StrategyCounts,
    /// Highest count each strategy reached in any generation
    pub peak_counts: StrategyCounts,
    /// Mean population share per strategy, in reporting order
    pub mean_shares: [f64; 4],
    pub total_births: usize,
    pub total_deaths: usize,
    pub total_settled: usize,
}

impl RunSummary {
    pub fn mean_share(&self, strategy: Strategy) -> f64 {
        self.mean_shares[strategy.index()]
    }
}
