//! Inbound frame handler slot.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::warn;

use super::frame::InboundFrame;

/// Callback receiving decoded inbound frames.
pub type FrameHandler = Arc<dyn Fn(InboundFrame) + Send + Sync>;

/// Holds the most recently registered handler.
///
/// Shared between a socket handle and its connection task so the owner can
/// swap handlers without the task noticing.
#[derive(Clone)]
pub(crate) struct HandlerSlot {
    inner: Arc<RwLock<FrameHandler>>,
}

impl HandlerSlot {
    pub(crate) fn new(handler: FrameHandler) -> Self {
        HandlerSlot {
            inner: Arc::new(RwLock::new(handler)),
        }
    }

    pub(crate) fn replace(&self, handler: FrameHandler) {
        *self.inner.write() = handler;
    }

    /// Delivers a frame to the current handler.
    ///
    /// The lock is released before the handler runs, so a handler may
    /// register its own replacement. A panicking handler loses the frame
    /// but leaves the connection running.
    pub(crate) fn dispatch(&self, frame: InboundFrame) {
        let handler = Arc::clone(&self.inner.read());
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| handler(frame))) {
            warn!(panic = panic_message(&*payload), "frame handler panicked");
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
