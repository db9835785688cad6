//! Peer selection strategies
//!
//! A strategy decides which hosts a freshly informed host forwards the
//! message to. Strategies are built against a fixed population size and
//! never look at any other host state.

use rand::seq::index;
use rand::RngCore;
use serde::Deserialize;

use crate::ge_interface::HostId;

pub const DEFAULT_FANOUT: usize = 4;
pub const DEFAULT_NEIGHBOR_OFFSETS: [usize; 2] = [1, 2];

/// Maps a host to the peers it forwards to
pub trait GossipStrategy {
    /// Human readable name, used as report header
    fn name(&self) -> &str;

    /// Peers `host` forwards to this round. May contain duplicates or the
    /// host itself, the round engine deduplicates.
    fn next_hosts(&self, host: HostId, rng: &mut dyn RngCore) -> Vec<HostId>;
}

/// Forward to `fanout` distinct hosts picked uniformly from the whole population
#[derive(Debug, Clone)]
pub struct RandomFanout {
    population_size: usize,
    fanout: usize,
}

impl RandomFanout {
    pub fn new(population_size: usize, fanout: usize) -> Self {
        Self {
            population_size,
            fanout,
        }
    }

    pub fn fanout(&self) -> usize {
        self.fanout
    }
}

impl GossipStrategy for RandomFanout {
    fn name(&self) -> &str {
        "Random gossip"
    }

    fn next_hosts(&self, _host: HostId, rng: &mut dyn RngCore) -> Vec<HostId> {
        // sample() panics if asked for more than the population holds
        let amount = self.fanout.min(self.population_size);
        index::sample(rng, self.population_size, amount).into_vec()
    }
}

/// Forward to the hosts at fixed offsets along the ring
#[derive(Debug, Clone)]
pub struct FixedNeighbors {
    population_size: usize,
    offsets: Vec<usize>,
}

impl FixedNeighbors {
    pub fn new(population_size: usize, offsets: Vec<usize>) -> Self {
        Self {
            population_size,
            offsets,
        }
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }
}

impl GossipStrategy for FixedNeighbors {
    fn name(&self) -> &str {
        "Pair gossip"
    }

    fn next_hosts(&self, host: HostId, _rng: &mut dyn RngCore) -> Vec<HostId> {
        if self.population_size == 0 {
            return Vec::new();
        }
        self.offsets
            .iter()
            // reduce first, offsets may be anywhere up to usize::MAX
            .map(|offset| (host + offset % self.population_size) % self.population_size)
            .collect()
    }
}

/// Strategy selection as it appears in configuration files
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyKind {
    RandomFanout {
        #[serde(default = "default_fanout")]
        fanout: usize,
    },
    FixedNeighbors {
        #[serde(default = "default_offsets")]
        offsets: Vec<usize>,
    },
}

fn default_fanout() -> usize {
    DEFAULT_FANOUT
}

fn default_offsets() -> Vec<usize> {
    DEFAULT_NEIGHBOR_OFFSETS.to_vec()
}

impl StrategyKind {
    pub fn random_fanout() -> Self {
        Self::RandomFanout {
            fanout: DEFAULT_FANOUT,
        }
    }

    pub fn fixed_neighbors() -> Self {
        Self::FixedNeighbors {
            offsets: default_offsets(),
        }
    }

    /// Instantiate the strategy for a population of `population_size` hosts
    pub fn build(&self, population_size: usize) -> Box<dyn GossipStrategy> {
        match self {
            StrategyKind::RandomFanout { fanout } => {
                Box::new(RandomFanout::new(population_size, *fanout))
            }
            StrategyKind::FixedNeighbors { offsets } => {
                Box::new(FixedNeighbors::new(population_size, offsets.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    #[test]
    fn test_random_fanout_distinct_and_in_range() {
        let strategy = RandomFanout::new(100, 4);
        let mut rng = StdRng::from_seed([7u8; 32]);

        for host in 0..50 {
            let peers = strategy.next_hosts(host, &mut rng);
            assert_eq!(peers.len(), 4);
            let unique: BTreeSet<_> = peers.iter().collect();
            assert_eq!(unique.len(), 4);
            assert!(peers.iter().all(|&p| p < 100));
        }
    }

    #[test]
    fn test_random_fanout_clamped_to_population() {
        let strategy = RandomFanout::new(3, 4);
        let mut rng = StdRng::from_seed([7u8; 32]);

        let mut peers = strategy.next_hosts(0, &mut rng);
        peers.sort();
        assert_eq!(peers, vec![0, 1, 2]);
    }

    #[test]
    fn test_random_fanout_same_seed_same_sample() {
        let strategy = RandomFanout::new(100, 4);
        let mut a = StdRng::from_seed([9u8; 32]);
        let mut b = StdRng::from_seed([9u8; 32]);

        for host in 0..20 {
            assert_eq!(
                strategy.next_hosts(host, &mut a),
                strategy.next_hosts(host, &mut b)
            );
        }
    }

    #[test]
    fn test_fixed_neighbors_wrap_around() {
        let strategy = FixedNeighbors::new(5, vec![1, 2]);
        let mut rng = StdRng::from_seed([0u8; 32]);

        assert_eq!(strategy.next_hosts(0, &mut rng), vec![1, 2]);
        assert_eq!(strategy.next_hosts(3, &mut rng), vec![4, 0]);
        assert_eq!(strategy.next_hosts(4, &mut rng), vec![0, 1]);
    }

    #[test]
    fn test_fixed_neighbors_huge_offset_wraps() {
        let strategy = FixedNeighbors::new(5, vec![usize::MAX, 7]);
        let mut rng = StdRng::from_seed([0u8; 32]);

        // usize::MAX % 5 == 0 on 64 bit targets
        let expected = (3 + usize::MAX % 5) % 5;
        assert_eq!(strategy.next_hosts(3, &mut rng), vec![expected, 0]);
        assert!(strategy.next_hosts(4, &mut rng).iter().all(|&h| h < 5));
    }

    #[test]
    fn test_fixed_neighbors_empty_population() {
        let strategy = FixedNeighbors::new(0, vec![1, 2]);
        let mut rng = StdRng::from_seed([0u8; 32]);

        assert!(strategy.next_hosts(0, &mut rng).is_empty());
    }

    #[test]
    fn test_kind_builds_named_strategy() {
        assert_eq!(StrategyKind::random_fanout().build(10).name(), "Random gossip");
        assert_eq!(StrategyKind::fixed_neighbors().build(10).name(), "Pair gossip");
    }

    #[test]
    fn test_kind_from_yaml() {
        let kind: StrategyKind = serde_yaml::from_str("kind: random_fanout\nfanout: 6\n").unwrap();
        assert_eq!(kind, StrategyKind::RandomFanout { fanout: 6 });

        let kind: StrategyKind = serde_yaml::from_str("kind: fixed_neighbors\n").unwrap();
        assert_eq!(kind, StrategyKind::fixed_neighbors());
    }
}
