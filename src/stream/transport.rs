//! Transport boundary
//!
//! The streaming call only needs to exchange whole buffers, signal
//! end-of-stream and be cancellable. Framing lives below this trait.

use std::sync::Arc;

use bytes::Bytes;
use crossbeam::channel::{bounded, Receiver, Sender, TryRecvError};
use parking_lot::Mutex;

use crate::error::Result;

/// Moves demarcated frames between the two ends of one call
pub trait Transport: Send {
    /// Send one complete frame
    fn send_buffer(&mut self, frame: Bytes) -> Result<()>;

    /// Half-close: no more frames will be sent from this end
    fn close_send(&mut self) -> Result<()>;

    /// Block until the next frame arrives
    ///
    /// Returns `Ok(None)` once the peer has closed its send side.
    fn recv_buffer(&mut self) -> Result<Option<Bytes>>;

    /// Close the send side, reporting `reason` to the peer as a failure
    fn abort(&mut self, reason: &str) -> Result<()> {
        tracing::debug!("Transport cannot carry abort reason, closing: {}", reason);
        self.close_send()
    }

    /// Cancel signal shared with whatever is blocked on this transport
    fn cancel_token(&self) -> CancelToken;

    fn cancel(&self) {
        self.cancel_token().cancel();
    }
}

/// Cooperative cancellation signal
///
/// Cloning shares the signal. Cancelling disconnects `signal()`, which wakes
/// every `select!` waiting on it.
#[derive(Debug, Clone)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Debug)]
struct CancelInner {
    /// Dropped on cancel; never used to send
    trigger: Mutex<Option<Sender<()>>>,

    signal: Receiver<()>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (trigger, signal) = bounded(0);
        Self {
            inner: Arc::new(CancelInner {
                trigger: Mutex::new(Some(trigger)),
                signal,
            }),
        }
    }

    /// Cancel; later calls are no-ops
    pub fn cancel(&self) {
        if self.inner.trigger.lock().take().is_some() {
            tracing::debug!("Call cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.inner.signal.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Receiver that becomes disconnected once cancelled
    pub fn signal(&self) -> &Receiver<()> {
        &self.inner.signal
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
