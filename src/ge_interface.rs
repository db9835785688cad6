// index of a host within its population - stable for the lifetime of a run
pub type HostId = usize;

// handed out by the trial aggregator, strictly increasing, never reused
pub type MessageId = u64;

pub type RoundCount = usize;

// ============================================================================
// Event Logging System
// ============================================================================

/// Events emitted by the round engine for debugging and analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Origin host received a fresh message
    TrialStarted {
        message: MessageId,
        origin: HostId,
        initial_frontier: usize,
    },
    /// A round was processed and produced a non-empty frontier
    RoundCompleted {
        message: MessageId,
        round: RoundCount,
        frontier: usize,
    },
    /// Frontier drained, dissemination reached its fixed point
    TrialFinished {
        message: MessageId,
        rounds: RoundCount,
        coverage: usize,
    },
    /// Safety bound hit while hosts still had forwarding work
    RoundBoundReached {
        message: MessageId,
        max_rounds: RoundCount,
        frontier: usize,
    },
}

/// Trait for consuming events from the round engine
pub trait EventSink {
    fn log(&mut self, event: Event);
}

/// No-op event sink for bulk statistics runs
pub struct NoOpSink;

impl EventSink for NoOpSink {
    #[inline(always)]
    fn log(&mut self, _event: Event) {}
}
