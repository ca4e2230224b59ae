//! # Scene Notification Bus
//!
//! Hands readiness changes and reaction cues to another thread (typically
//! the host's UI thread) without blocking the tracking callback.
//!
//! ```text
//! ┌──────────────┐      ┌─────────────┐      ┌─────────────┐
//! │ Coordinator  │─────>│   Channel   │─────>│   UI loop   │
//! │ (sink/audio) │      │  (bounded)  │      │  (drain)    │
//! └──────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! [`SceneEventSender`] implements [`ReadinessSink`] and [`AudioCue`], so it
//! plugs straight into a [`ReactionCoordinator`](crate::ReactionCoordinator).

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::integration::{AudioCue, ReadinessSink};

/// Notifications that leave the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    /// Readiness flipped.
    ReadinessChanged {
        /// New readiness.
        ready: bool,
    },
    /// A reaction happened; play the cue.
    ReactionPerformed,
}

/// Bounded channel carrying [`SceneEvent`]s.
pub struct SceneEventBus {
    sender: Sender<SceneEvent>,
    receiver: Receiver<SceneEvent>,
    dropped: Arc<AtomicU64>,
}

impl SceneEventBus {
    /// Creates a new bus holding at most `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates a sender handle (clone for multiple producers).
    #[must_use]
    pub fn sender(&self) -> SceneEventSender {
        SceneEventSender {
            sender: self.sender.clone(),
            dropped: Arc::clone(&self.dropped),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> SceneEventReceiver {
        SceneEventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a new pair of sender and receiver.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (SceneEventSender, SceneEventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

/// Handle for sending events.
#[derive(Clone, Debug)]
pub struct SceneEventSender {
    sender: Sender<SceneEvent>,
    dropped: Arc<AtomicU64>,
}

impl SceneEventSender {
    /// Sends an event (non-blocking).
    ///
    /// Returns `false` if the channel is full or the receiver is gone; the
    /// event is dropped and counted.
    #[inline]
    pub fn send(&self, event: SceneEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("Scene event bus full, dropping {:?}", event);
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Events dropped so far across all senders of this bus.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl ReadinessSink for SceneEventSender {
    fn readiness_changed(&mut self, ready: bool) {
        self.send(SceneEvent::ReadinessChanged { ready });
    }
}

impl AudioCue for SceneEventSender {
    fn play_reaction(&mut self) {
        self.send(SceneEvent::ReactionPerformed);
    }
}

/// Handle for receiving events.
#[derive(Clone, Debug)]
pub struct SceneEventReceiver {
    receiver: Receiver<SceneEvent>,
}

impl SceneEventReceiver {
    /// Receives all pending events (non-blocking).
    #[inline]
    pub fn drain(&self) -> Vec<SceneEvent> {
        self.receiver.try_iter().collect()
    }

    /// Receives one event (non-blocking).
    #[inline]
    pub fn try_recv(&self) -> Option<SceneEvent> {
        self.receiver.try_recv().ok()
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Latest readiness among the pending events, consuming them all.
    ///
    /// UI loops that only care about the button state use this.
    pub fn latest_readiness(&self) -> Option<bool> {
        self.drain().into_iter().rev().find_map(|event| match event {
            SceneEvent::ReadinessChanged { ready } => Some(ready),
            SceneEvent::ReactionPerformed => None,
        })
    }
}
