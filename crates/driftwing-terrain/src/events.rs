//! Refresh lifecycle events.
//!
//! The streaming controller publishes an event when a background refresh is
//! dispatched and another when it has been published to the grid. Events are
//! delivered over a bounded channel with lossy sends: a slow or absent
//! consumer never blocks a refresh thread.

use crossbeam_channel::{bounded, Receiver, Sender};

use driftwing_common::GridCoord;

/// Default event channel capacity.
const DEFAULT_CAPACITY: usize = 64;

/// Lifecycle notifications emitted by the streaming controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshEvent {
    /// A background refresh was dispatched for a new anchor.
    Started {
        /// Target anchor the refresh is generating toward
        anchor: GridCoord,
    },
    /// A refresh finished and its grid was published.
    Completed {
        /// Anchor the published grid is centered on
        anchor: GridCoord,
        /// Slots left holding their previous texture because the backend
        /// rejected the new upload
        stale_slots: usize,
    },
}

/// Bounded, lossy channel for refresh events.
#[derive(Debug, Clone)]
pub struct RefreshEvents {
    sender: Sender<RefreshEvent>,
    receiver: Receiver<RefreshEvent>,
}

impl Default for RefreshEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RefreshEvents {
    /// Creates an event channel with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Publishes an event. If the channel is full the event is dropped.
    pub fn publish(&self, event: RefreshEvent) {
        let _ = self.sender.try_send(event);
    }

    /// Returns the receiving end of the channel.
    ///
    /// Events are consumed, not broadcast: with multiple receivers each
    /// event is seen by exactly one of them.
    #[must_use]
    pub fn receiver(&self) -> Receiver<RefreshEvent> {
        self.receiver.clone()
    }

    /// Creates a sender handle for publishing from another thread.
    #[must_use]
    pub fn sender(&self) -> Sender<RefreshEvent> {
        self.sender.clone()
    }

    /// Drains all pending events.
    #[must_use]
    pub fn drain(&self) -> Vec<RefreshEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }
}
