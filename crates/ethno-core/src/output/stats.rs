//! Statistics Output
//!
//! Collects per-generation records and summarizes a run for analysis.

use bevy_ecs::prelude::*;
use ethno_events::{GenerationRecord, RunSummary, Strategy, StrategyCounts};

/// Resource to accumulate statistics during simulation
#[derive(Resource, Debug, Default)]
pub struct StatsCollector {
    history: Vec<GenerationRecord>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a generation
    pub fn record(&mut self, record: GenerationRecord) {
        self.history.push(record);
    }

    pub fn history(&self) -> &[GenerationRecord] {
        &self.history
    }

    pub fn last(&self) -> Option<&GenerationRecord> {
        self.history.last()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Counts of one strategy across all recorded generations.
    pub fn series(&self, strategy: Strategy) -> Vec<usize> {
        self.history.iter().map(|r| r.counts.get(strategy)).collect()
    }

    /// Generate the run summary
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            generations: self.history.len() as u64,
            final_counts: self.last().map(|r| r.counts).unwrap_or_default(),
            ..Default::default()
        };

        let mut peaks = StrategyCounts::default();
        for record in &self.history {
            peaks.ethnocentric = peaks.ethnocentric.max(record.counts.ethnocentric);
            peaks.samaritan = peaks.samaritan.max(record.counts.samaritan);
            peaks.traitor = peaks.traitor.max(record.counts.traitor);
            peaks.selfish = peaks.selfish.max(record.counts.selfish);

            for &strategy in Strategy::all() {
                summary.mean_shares[strategy.index()] += record.counts.share(strategy);
            }

            summary.total_births += record.births;
            summary.total_deaths += record.deaths;
            if record.settled.is_some() {
                summary.total_settled += 1;
            }
        }
        summary.peak_counts = peaks;

        if !self.history.is_empty() {
            let n = self.history.len() as f64;
            for share in summary.mean_shares.iter_mut() {
                *share /= n;
            }
        }
        summary
    }
}
