//! The screen's single input queue.

use ::tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use ::tracing::{debug, trace};

use crate::input::keyboard::InputEvent;

/// FIFO of pending [`InputEvent`]s, drained by the owning screen between
/// frames.
///
/// Events are only ever applied by the owner, one at a time, so producers on
/// other threads (a speech service callback, say) never touch keyboard state
/// directly.
#[derive(Debug)]
pub struct EventQueue {
    tx: UnboundedSender<InputEvent>,
    rx: UnboundedReceiver<InputEvent>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// A handle for posting events from elsewhere.
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    /// Takes the oldest pending event without blocking.
    pub fn try_next(&mut self) -> Option<InputEvent> {
        match self.rx.try_recv() {
            Ok(evt) => Some(evt),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                trace!("Event queue disconnected");
                None
            }
        }
    }
}

/// A clonable, `Send` handle which posts events onto a screen's queue.
#[derive(Clone, Debug)]
pub struct EventSender {
    tx: UnboundedSender<InputEvent>,
}

impl EventSender {
    /// Posts an event. Events sent after the screen has closed are dropped.
    pub fn send(&self, evt: InputEvent) {
        if self.tx.send(evt).is_err() {
            debug!("Screen closed, dropping event");
        }
    }

    /// Posts a successful recognition result.
    pub fn transcript(&self, text: impl Into<String>) {
        self.send(InputEvent::SpeechResult { text: text.into() });
    }

    /// Posts a recognition failure.
    pub fn failure(&self, reason: impl Into<String>) {
        self.send(InputEvent::SpeechError {
            reason: reason.into(),
        });
    }

    /// Returns `true` once the owning screen has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
