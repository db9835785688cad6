//! Emulator configuration
//!
//! Defaults reproduce the reference comparison: 100 hosts, random gossip
//! with fanout 4 over 10000 trials, then pair gossip over 1000 trials.
//! Scenario files are YAML and may override any field.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Deserialize;
use thiserror::Error;

use crate::ge_interface::RoundCount;
use crate::ge_rounds::DEFAULT_MAX_ROUNDS;
use crate::ge_strategy::StrategyKind;
use crate::ge_trials::TrialConfig;

pub const DEFAULT_POPULATION_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid seed '{0}': expected an even number of hex digits, at most 64")]
    InvalidSeed(String),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

/// One strategy to aggregate, with its own fresh population
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StrategyRun {
    /// Header line of the report, defaults to the strategy's own name
    #[serde(default)]
    pub name: Option<String>,

    pub num_trials: usize,

    pub strategy: StrategyKind,
}

/// Main configuration for an emulation session
#[derive(Debug, Clone)]
pub struct EmulatorConfig {
    /// Number of hosts, shared by all strategy runs
    pub population_size: usize,

    /// Safety bound on rounds per trial
    pub max_rounds: RoundCount,

    /// Clear host history before every trial
    pub reset_between_trials: bool,

    /// Random seed for reproducibility (None = generate random)
    pub seed: Option<[u8; 32]>,

    /// Strategies to compare, run in order
    pub runs: Vec<StrategyRun>,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            max_rounds: DEFAULT_MAX_ROUNDS,
            reset_between_trials: false,
            seed: None,
            runs: vec![
                StrategyRun {
                    name: None,
                    num_trials: 10_000,
                    strategy: StrategyKind::random_fanout(),
                },
                StrategyRun {
                    name: None,
                    num_trials: 1_000,
                    strategy: StrategyKind::fixed_neighbors(),
                },
            ],
        }
    }
}

impl EmulatorConfig {
    /// Get or generate seed
    pub fn resolve_seed(&self) -> [u8; 32] {
        self.seed.unwrap_or_else(|| {
            let mut temp_rng = StdRng::from_entropy();
            let mut seed = [0u8; 32];
            temp_rng.fill_bytes(&mut seed);
            seed
        })
    }

    pub fn trial_config(&self) -> TrialConfig {
        TrialConfig {
            max_rounds: self.max_rounds,
            reset_between_trials: self.reset_between_trials,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(invalid("population_size", "must be at least 1"));
        }
        if self.max_rounds == 0 {
            return Err(invalid("max_rounds", "must be at least 1"));
        }
        for run in &self.runs {
            if run.num_trials == 0 {
                return Err(invalid("num_trials", "must be at least 1"));
            }
            match &run.strategy {
                StrategyKind::RandomFanout { fanout } if *fanout == 0 => {
                    return Err(invalid("fanout", "must be at least 1"));
                }
                StrategyKind::FixedNeighbors { offsets } if offsets.is_empty() => {
                    return Err(invalid("offsets", "need at least one offset"));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}

// ============================================================================
// Scenario Files
// ============================================================================

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ScenarioMeta {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Scenario file format, every field optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    #[serde(default)]
    meta: ScenarioMeta,
    population_size: Option<usize>,
    max_rounds: Option<RoundCount>,
    reset_between_trials: Option<bool>,
    seed: Option<String>,
    strategies: Option<Vec<StrategyRun>>,
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub meta: ScenarioMeta,
    pub config: EmulatorConfig,
}

impl Scenario {
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let file: ScenarioFile = serde_yaml::from_str(content)?;
        let defaults = EmulatorConfig::default();

        let config = EmulatorConfig {
            population_size: file.population_size.unwrap_or(defaults.population_size),
            max_rounds: file.max_rounds.unwrap_or(defaults.max_rounds),
            reset_between_trials: file
                .reset_between_trials
                .unwrap_or(defaults.reset_between_trials),
            seed: file.seed.as_deref().map(parse_seed_hex).transpose()?,
            runs: file.strategies.unwrap_or(defaults.runs),
        };
        config.validate()?;

        Ok(Self {
            meta: file.meta,
            config,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }
}

/// Parse a hex seed, optionally `0x` prefixed
///
/// Digits come in whole bytes; seeds shorter than 32 bytes are zero padded
/// at the end.
pub fn parse_seed_hex(hex: &str) -> Result<[u8; 32], ConfigError> {
    let digits = hex.strip_prefix("0x").unwrap_or(hex);
    if digits.is_empty() || digits.len() > 64 || digits.len() % 2 != 0 {
        return Err(ConfigError::InvalidSeed(hex.to_string()));
    }

    let mut seed = [0u8; 32];
    for (i, chunk) in digits.as_bytes().chunks(2).enumerate() {
        let byte = std::str::from_utf8(chunk)
            .ok()
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .ok_or_else(|| ConfigError::InvalidSeed(hex.to_string()))?;
        seed[i] = byte;
    }
    Ok(seed)
}
