//! Emulation session runner
//!
//! Runs every configured strategy in order. Each strategy gets a fresh
//! population so earlier runs never leave history behind for later ones;
//! the random source and the message id sequence are shared by the whole
//! session.

use log::info;

use crate::ge_config::EmulatorConfig;
use crate::ge_event_sink::LoggingEventSink;
use crate::ge_host::Population;
use crate::ge_report::{report, summarize, Summary};
use crate::ge_trials::{AggregatedResult, TrialAggregator};

/// Outcome of one configured strategy
#[derive(Debug, Clone)]
pub struct StrategyResult {
    pub name: String,
    pub aggregated: AggregatedResult,
    pub summary: Summary,
}

/// Outcome of a whole session
#[derive(Debug, Clone)]
pub struct SessionResult {
    /// Seed used for the session
    pub seed_used: [u8; 32],

    pub population_size: usize,

    pub strategies: Vec<StrategyResult>,
}

impl SessionResult {
    /// Print one table per strategy, header line first
    pub fn print_summary(&self) {
        print!("{}", self.render());
    }

    /// Text written by `print_summary`
    pub fn render(&self) -> String {
        self.strategies
            .iter()
            .map(|s| report(&s.name, &s.aggregated, self.population_size))
            .collect()
    }
}

pub struct EmulatorRunner {
    config: EmulatorConfig,
    seed: [u8; 32],
    trace_events: bool,
}

impl EmulatorRunner {
    pub fn new(config: EmulatorConfig) -> Self {
        let seed = config.resolve_seed();
        Self {
            config,
            seed,
            trace_events: false,
        }
    }

    /// Forward every round event to the logger
    pub fn with_event_trace(mut self, enabled: bool) -> Self {
        self.trace_events = enabled;
        self
    }

    pub fn seed(&self) -> [u8; 32] {
        self.seed
    }

    pub fn run(self) -> SessionResult {
        let population_size = self.config.population_size;
        let mut aggregator = TrialAggregator::new(self.config.trial_config(), self.seed);
        let mut sink = LoggingEventSink::new(self.trace_events);

        info!(
            "emulating {} hosts, {} strategies, seed {:?}",
            population_size,
            self.config.runs.len(),
            self.seed
        );

        let mut strategies = Vec::with_capacity(self.config.runs.len());
        for run in &self.config.runs {
            let strategy = run.strategy.build(population_size);
            let name = run
                .name
                .clone()
                .unwrap_or_else(|| strategy.name().to_string());

            let mut population = Population::new(population_size);
            let aggregated = aggregator.collect_statistics_with_sink(
                &mut population,
                strategy.as_ref(),
                run.num_trials,
                &mut sink,
            );
            let summary = summarize(&aggregated, population_size);

            strategies.push(StrategyResult {
                name,
                aggregated,
                summary,
            });
        }

        SessionResult {
            seed_used: self.seed,
            population_size,
            strategies,
        }
    }
}
