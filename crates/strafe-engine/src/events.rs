//! Engine notifications delivered over crossbeam channels.

use crossbeam_channel::{Receiver, Sender, TrySendError};

use log::trace;
use strafe_core::SyncPercent;

/// Ticks between two [`EngineEvent::Progress`] notifications.
pub const PROGRESS_INTERVAL: u64 = 10;

/// Events buffered per subscriber. Once a subscriber's queue is full,
/// further events are dropped for it until it catches up.
pub const EVENT_QUEUE_CAPACITY: usize = 256;

/// Something a UI layer may want to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    /// The engine went from idle to running; history was cleared.
    Started,
    /// The engine stopped processing frames.
    Paused,
    /// The sync percentage changed.
    SyncChanged(SyncPercent),
    /// Another [`PROGRESS_INTERVAL`] ticks were recorded.
    Progress {
        /// Ticks since the last start.
        total_ticks: u64,
    },
}

/// Fan-out of events to every live subscriber.
#[derive(Debug, Default)]
pub(crate) struct EventBus {
    senders: Vec<Sender<EngineEvent>>,
}

impl EventBus {
    /// Register a new subscriber with a queue of [`EVENT_QUEUE_CAPACITY`].
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        let (tx, rx) = crossbeam_channel::bounded(EVENT_QUEUE_CAPACITY);
        self.senders.push(tx);
        rx
    }

    /// Send `event` to every subscriber, forgetting those that hung up.
    /// A subscriber with a full queue misses the event.
    pub fn emit(&mut self, event: EngineEvent) {
        self.senders.retain(|tx| match tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                trace!("event queue full, dropped {event:?}");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.senders.len()
    }
}
