//! Round engine
//!
//! Drives a single message from its origin through synchronous rounds. In
//! every round each host of the current frontier receives the message once;
//! the union of what they forward becomes the next frontier. The trial is
//! over when the frontier drains or the round bound is hit.

use indexmap::IndexSet;
use log::warn;
use rand::RngCore;

use crate::ge_host::Population;
use crate::ge_interface::{Event, EventSink, HostId, MessageId, RoundCount};
use crate::ge_strategy::GossipStrategy;

pub const DEFAULT_MAX_ROUNDS: RoundCount = 10_000;

/// Result of disseminating one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Rounds that produced new forwarding work
    pub rounds_taken: RoundCount,

    /// Hosts holding the message once the trial ended
    pub coverage: usize,

    /// True when the trial was cut off by `max_rounds`
    pub bound_reached: bool,
}

// insertion ordered so a seeded run visits hosts in the same order every time
type Frontier = IndexSet<HostId>;

/// Run a single trial of `message` starting at `origin`
///
/// `origin` must be a valid index into `population` and `message` must not
/// have been used before in this population. An unknown origin is logged and
/// yields an empty outcome (zero coverage) without touching any host.
pub fn run_trial(
    population: &mut Population,
    origin: HostId,
    message: MessageId,
    strategy: &dyn GossipStrategy,
    max_rounds: RoundCount,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
) -> RoundOutcome {
    let mut frontier = Frontier::new();
    match population.host_mut(origin) {
        Some(host) => {
            frontier.extend(host.receive(message, strategy, rng).unwrap_or_default());
        }
        None => {
            warn!(
                "message {}: origin {} outside population of {}, trial skipped",
                message,
                origin,
                population.len()
            );
            return RoundOutcome {
                rounds_taken: 0,
                coverage: 0,
                bound_reached: false,
            };
        }
    }

    sink.log(Event::TrialStarted {
        message,
        origin,
        initial_frontier: frontier.len(),
    });

    let mut rounds_taken = 0;
    let mut bound_reached = false;

    while !frontier.is_empty() {
        if rounds_taken >= max_rounds {
            bound_reached = true;
            break;
        }

        let next = forward_round(population, &frontier, message, strategy, rng);
        if next.is_empty() {
            break;
        }

        rounds_taken += 1;
        sink.log(Event::RoundCompleted {
            message,
            round: rounds_taken,
            frontier: next.len(),
        });
        frontier = next;
    }

    let coverage = population.coverage(message);

    if bound_reached {
        warn!(
            "message {} stopped after {} rounds with {} hosts still forwarding",
            message,
            max_rounds,
            frontier.len()
        );
        sink.log(Event::RoundBoundReached {
            message,
            max_rounds,
            frontier: frontier.len(),
        });
    } else {
        sink.log(Event::TrialFinished {
            message,
            rounds: rounds_taken,
            coverage,
        });
    }

    RoundOutcome {
        rounds_taken,
        coverage,
        bound_reached,
    }
}

/// Deliver `message` to every frontier host, collect who they forward to
fn forward_round(
    population: &mut Population,
    frontier: &Frontier,
    message: MessageId,
    strategy: &dyn GossipStrategy,
    rng: &mut dyn RngCore,
) -> Frontier {
    let mut next = Frontier::new();
    for &id in frontier {
        // strategies only hand out in-range ids, anything else is dropped
        if let Some(host) = population.host_mut(id) {
            next.extend(host.receive(message, strategy, rng).unwrap_or_default());
        }
    }
    next
}
