//! Event sink that forwards round engine events to the `log` facade

use log::trace;

use crate::ge_interface::{Event, EventSink};

/// Logging event sink, events end up at trace level
pub struct LoggingEventSink {
    enabled: bool,
    logged: usize,
}

impl LoggingEventSink {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, logged: 0 }
    }

    /// Number of events written so far
    pub fn logged(&self) -> usize {
        self.logged
    }
}

impl EventSink for LoggingEventSink {
    fn log(&mut self, event: Event) {
        if !self.enabled {
            return;
        }
        self.logged += 1;

        match event {
            Event::TrialStarted {
                message,
                origin,
                initial_frontier,
            } => {
                trace!("m:{} start at h:{} frontier:{}", message, origin, initial_frontier);
            }
            Event::RoundCompleted {
                message,
                round,
                frontier,
            } => {
                trace!("m:{} round:{} frontier:{}", message, round, frontier);
            }
            Event::TrialFinished {
                message,
                rounds,
                coverage,
            } => {
                trace!("m:{} done rounds:{} coverage:{}", message, rounds, coverage);
            }
            Event::RoundBoundReached {
                message,
                max_rounds,
                frontier,
            } => {
                trace!(
                    "m:{} cut off at {} rounds, frontier:{}",
                    message,
                    max_rounds,
                    frontier
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_sink_counts_nothing() {
        let mut sink = LoggingEventSink::new(false);
        sink.log(Event::RoundCompleted {
            message: 1,
            round: 1,
            frontier: 2,
        });
        assert_eq!(sink.logged(), 0);
    }

    #[test]
    fn test_enabled_sink_counts_events() {
        let mut sink = LoggingEventSink::new(true);
        sink.log(Event::TrialStarted {
            message: 1,
            origin: 0,
            initial_frontier: 2,
        });
        sink.log(Event::TrialFinished {
            message: 1,
            rounds: 3,
            coverage: 10,
        });
        assert_eq!(sink.logged(), 2);
    }
}
