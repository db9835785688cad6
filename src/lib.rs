//! # gossip_emu - Epidemic Dissemination Emulator
//!
//! Emulates gossip dissemination of a single message across a fixed
//! population of in-process hosts and measures how often, and after how
//! many synchronous rounds, the message reaches every host.
//!
//! ## Core Components
//!
//! - **Host / Population**: per-host history of received messages
//! - **GossipStrategy**: peer selection (random fanout, fixed ring neighbors)
//! - **Round engine**: drives one message through rounds until the frontier drains
//! - **TrialAggregator**: runs many trials from random origins and tabulates them
//! - **Report**: per-round full-coverage percentages
//!
//! ```no_run
//! use gossip_emu::{report, Population, RandomFanout, TrialAggregator, TrialConfig};
//!
//! let mut population = Population::new(100);
//! let strategy = RandomFanout::new(100, 4);
//! let mut aggregator = TrialAggregator::new(TrialConfig::default(), [42u8; 32]);
//!
//! let result = aggregator.collect_statistics(&mut population, &strategy, 10_000);
//! print!("{}", report("Random gossip", &result, population.len()));
//! ```

pub mod ge_config;
pub mod ge_event_sink;
pub mod ge_host;
pub mod ge_interface;
pub mod ge_report;
pub mod ge_rounds;
pub mod ge_runner;
pub mod ge_strategy;
pub mod ge_trials;

// Re-export commonly used types
pub use ge_config::{parse_seed_hex, ConfigError, EmulatorConfig, Scenario, StrategyRun};
pub use ge_host::{Host, Population};
pub use ge_interface::{Event, EventSink, HostId, MessageId, NoOpSink, RoundCount};
pub use ge_report::{report, summarize, Summary};
pub use ge_rounds::{run_trial, RoundOutcome};
pub use ge_runner::{EmulatorRunner, SessionResult};
pub use ge_strategy::{FixedNeighbors, GossipStrategy, RandomFanout, StrategyKind};
pub use ge_trials::{AggregatedResult, TrialAggregator, TrialConfig};
