use hashbrown::HashSet;
use rand::RngCore;

use crate::ge_interface::{HostId, MessageId};
use crate::ge_strategy::GossipStrategy;

/// A single emulated host
///
/// Remembers every message it has ever received. A message it already
/// knows is never forwarded a second time, which is what drives every
/// trial towards a fixed point.
#[derive(Debug, Clone)]
pub struct Host {
    id: HostId,
    seen: HashSet<MessageId>,
}

impl Host {
    pub fn new(id: HostId) -> Self {
        Self {
            id,
            seen: HashSet::new(),
        }
    }

    pub fn id(&self) -> HostId {
        self.id
    }

    /// Deliver `message` to this host
    ///
    /// Returns the peers to forward to, or `None` when the message was
    /// already known (nothing to do).
    pub fn receive(
        &mut self,
        message: MessageId,
        strategy: &dyn GossipStrategy,
        rng: &mut dyn RngCore,
    ) -> Option<Vec<HostId>> {
        if !self.seen.insert(message) {
            return None;
        }
        Some(strategy.next_hosts(self.id, rng))
    }

    pub fn has_seen(&self, message: &MessageId) -> bool {
        self.seen.contains(message)
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    fn forget_all(&mut self) {
        self.seen.clear();
    }
}

/// The fixed set of hosts a session runs against
///
/// Hosts keep their `seen` history across trials until `reset()` is called.
#[derive(Debug, Clone)]
pub struct Population {
    hosts: Vec<Host>,
}

impl Population {
    pub fn new(size: usize) -> Self {
        Self {
            hosts: (0..size).map(Host::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn host(&self, id: HostId) -> Option<&Host> {
        self.hosts.get(id)
    }

    pub fn host_mut(&mut self, id: HostId) -> Option<&mut Host> {
        self.hosts.get_mut(id)
    }

    pub fn hosts(&self) -> impl Iterator<Item = &Host> {
        self.hosts.iter()
    }

    /// Number of hosts that hold `message`
    pub fn coverage(&self, message: MessageId) -> usize {
        self.hosts.iter().filter(|h| h.has_seen(&message)).count()
    }

    /// Drop all receive history
    pub fn reset(&mut self) {
        for host in self.hosts.iter_mut() {
            host.forget_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ge_strategy::FixedNeighbors;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_first_receive_forwards() {
        let strategy = FixedNeighbors::new(10, vec![1, 2]);
        let mut rng = StdRng::from_seed([1u8; 32]);
        let mut host = Host::new(3);

        let peers = host.receive(7, &strategy, &mut rng);

        assert_eq!(peers, Some(vec![4, 5]));
        assert!(host.has_seen(&7));
    }

    #[test]
    fn test_repeat_receive_is_noop() {
        let strategy = FixedNeighbors::new(10, vec![1, 2]);
        let mut rng = StdRng::from_seed([1u8; 32]);
        let mut host = Host::new(0);

        assert!(host.receive(1, &strategy, &mut rng).is_some());
        assert_eq!(host.receive(1, &strategy, &mut rng), None);
        assert_eq!(host.seen_count(), 1);
    }

    #[test]
    fn test_seen_grows_monotonically() {
        let strategy = FixedNeighbors::new(10, vec![1]);
        let mut rng = StdRng::from_seed([2u8; 32]);
        let mut host = Host::new(5);

        let mut last = 0;
        for message in [1, 2, 2, 3, 1, 4] {
            host.receive(message, &strategy, &mut rng);
            assert!(host.seen_count() >= last);
            last = host.seen_count();
        }
        assert_eq!(last, 4);
    }

    #[test]
    fn test_population_coverage_and_reset() {
        let strategy = FixedNeighbors::new(4, vec![1]);
        let mut rng = StdRng::from_seed([3u8; 32]);
        let mut population = Population::new(4);

        for id in [0, 2] {
            population
                .host_mut(id)
                .unwrap()
                .receive(9, &strategy, &mut rng);
        }
        assert_eq!(population.coverage(9), 2);
        assert_eq!(population.coverage(10), 0);

        population.reset();
        assert_eq!(population.coverage(9), 0);
        assert!(population.hosts().all(|h| h.seen_count() == 0));
        assert_eq!(population.len(), 4);
    }
}
