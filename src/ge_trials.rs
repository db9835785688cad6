//! Trial aggregation
//!
//! Runs many independent trials against one population and tabulates how
//! many trials ended at each (rounds, coverage) cell.

use std::collections::BTreeMap;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ge_host::Population;
use crate::ge_interface::{EventSink, MessageId, NoOpSink, RoundCount};
use crate::ge_rounds::{run_trial, RoundOutcome, DEFAULT_MAX_ROUNDS};
use crate::ge_strategy::GossipStrategy;

/// Trial counts keyed by rounds taken, then by coverage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedResult {
    cells: BTreeMap<RoundCount, BTreeMap<usize, usize>>,
}

impl AggregatedResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &RoundOutcome) {
        self.add(outcome.rounds_taken, outcome.coverage, 1);
    }

    fn add(&mut self, rounds: RoundCount, coverage: usize, count: usize) {
        *self
            .cells
            .entry(rounds)
            .or_default()
            .entry(coverage)
            .or_insert(0) += count;
    }

    /// Add every cell of `other` into this result
    pub fn merge(&mut self, other: &AggregatedResult) {
        for (&rounds, by_coverage) in &other.cells {
            for (&coverage, &count) in by_coverage {
                self.add(rounds, coverage, count);
            }
        }
    }

    /// Coverage histogram for a single round count
    pub fn bucket(&self, rounds: RoundCount) -> Option<&BTreeMap<usize, usize>> {
        self.cells.get(&rounds)
    }

    /// Buckets in ascending round order
    pub fn buckets(&self) -> impl Iterator<Item = (RoundCount, &BTreeMap<usize, usize>)> {
        self.cells.iter().map(|(rounds, bucket)| (*rounds, bucket))
    }

    pub fn count(&self, rounds: RoundCount, coverage: usize) -> usize {
        self.bucket(rounds)
            .and_then(|b| b.get(&coverage))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_trials(&self) -> usize {
        self.cells.values().flat_map(|b| b.values()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(RoundCount, usize, usize)> for AggregatedResult {
    /// Build from `(rounds, coverage, count)` triples
    fn from_iter<I: IntoIterator<Item = (RoundCount, usize, usize)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (rounds, coverage, count) in iter {
            result.add(rounds, coverage, count);
        }
        result
    }
}

/// Knobs shared by every aggregation of a session
#[derive(Debug, Clone, Copy)]
pub struct TrialConfig {
    /// Safety bound handed to the round engine
    pub max_rounds: RoundCount,

    /// Clear host history before each trial instead of accumulating it
    pub reset_between_trials: bool,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            reset_between_trials: false,
        }
    }
}

/// Owns the random source and the message id sequence
pub struct TrialAggregator {
    config: TrialConfig,
    rng: StdRng,
    last_message: MessageId,
}

impl TrialAggregator {
    pub fn new(config: TrialConfig, seed: [u8; 32]) -> Self {
        Self {
            config,
            rng: StdRng::from_seed(seed),
            last_message: 0,
        }
    }

    pub fn config(&self) -> &TrialConfig {
        &self.config
    }

    /// Last message id handed out, 0 before the first trial
    pub fn last_message(&self) -> MessageId {
        self.last_message
    }

    fn next_message(&mut self) -> MessageId {
        self.last_message += 1;
        self.last_message
    }

    pub fn collect_statistics(
        &mut self,
        population: &mut Population,
        strategy: &dyn GossipStrategy,
        num_trials: usize,
    ) -> AggregatedResult {
        self.collect_statistics_with_sink(population, strategy, num_trials, &mut NoOpSink)
    }

    /// Run `num_trials` trials, each from a uniformly chosen origin
    pub fn collect_statistics_with_sink(
        &mut self,
        population: &mut Population,
        strategy: &dyn GossipStrategy,
        num_trials: usize,
        sink: &mut dyn EventSink,
    ) -> AggregatedResult {
        let mut result = AggregatedResult::new();
        if population.is_empty() {
            return result;
        }

        let mut truncated = 0;
        for trial in 0..num_trials {
            if self.config.reset_between_trials {
                population.reset();
            }

            let message = self.next_message();
            let origin = self.rng.gen_range(0..population.len());
            let outcome = run_trial(
                population,
                origin,
                message,
                strategy,
                self.config.max_rounds,
                &mut self.rng,
                sink,
            );

            if outcome.bound_reached {
                truncated += 1;
            }
            result.record(&outcome);

            if (trial + 1) % 1000 == 0 {
                debug!("{}: {}/{} trials", strategy.name(), trial + 1, num_trials);
            }
        }

        info!(
            "{}: {} trials over {} hosts, {} round buckets, {} hit the round bound",
            strategy.name(),
            result.total_trials(),
            population.len(),
            result.buckets().count(),
            truncated
        );

        result
    }
}
