//! In-memory transport
//!
//! Two connected ends over crossbeam channels, one per direction.

use bytes::Bytes;
use crossbeam::channel::{bounded, select, Receiver, Sender};

use crate::error::{CmdStreamError, Result};

use super::transport::{CancelToken, Transport};

/// What travels over one direction of the pair
#[derive(Debug)]
enum Frame {
    Data(Bytes),
    Abort(String),
}

/// One end of an in-memory call
///
/// Dropping an end, or calling `close_send`, ends the stream its peer reads.
#[derive(Debug)]
pub struct ChannelTransport {
    /// Outgoing frames (None after half-close)
    tx: Option<Sender<Frame>>,

    /// Incoming frames
    rx: Receiver<Frame>,

    /// Shared by both ends
    cancel: CancelToken,
}

impl ChannelTransport {
    /// Create two connected ends buffering up to `capacity` frames each way
    pub fn pair(capacity: usize) -> (ChannelTransport, ChannelTransport) {
        let (client_tx, server_rx) = bounded(capacity);
        let (server_tx, client_rx) = bounded(capacity);
        let cancel = CancelToken::new();

        let client = ChannelTransport {
            tx: Some(client_tx),
            rx: client_rx,
            cancel: cancel.clone(),
        };
        let server = ChannelTransport {
            tx: Some(server_tx),
            rx: server_rx,
            cancel,
        };
        (client, server)
    }

    fn sender(&self) -> Result<&Sender<Frame>> {
        self.tx
            .as_ref()
            .ok_or_else(|| CmdStreamError::Transport("send side already closed".to_string()))
    }
}

impl Transport for ChannelTransport {
    fn send_buffer(&mut self, frame: Bytes) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(CmdStreamError::Cancelled);
        }
        let tx = self.sender()?;

        select! {
            send(tx, Frame::Data(frame)) -> sent => sent
                .map_err(|_| CmdStreamError::Transport("peer hung up".to_string())),
            recv(self.cancel.signal()) -> _ => Err(CmdStreamError::Cancelled),
        }
    }

    fn close_send(&mut self) -> Result<()> {
        self.tx = None;
        Ok(())
    }

    fn recv_buffer(&mut self) -> Result<Option<Bytes>> {
        if self.cancel.is_cancelled() {
            return Err(CmdStreamError::Cancelled);
        }

        select! {
            recv(self.rx) -> frame => match frame {
                Ok(Frame::Data(bytes)) => Ok(Some(bytes)),
                Ok(Frame::Abort(reason)) => Err(CmdStreamError::Remote(reason)),
                // Peer dropped its sender: end of stream
                Err(_) => Ok(None),
            },
            recv(self.cancel.signal()) -> _ => Err(CmdStreamError::Cancelled),
        }
    }

    fn abort(&mut self, reason: &str) -> Result<()> {
        let Some(tx) = self.tx.take() else {
            return Ok(());
        };
        if self.cancel.is_cancelled() {
            return Ok(());
        }

        // Peer may already be gone, or the call cancelled while the channel is full
        select! {
            send(tx, Frame::Abort(reason.to_string())) -> _ => {},
            recv(self.cancel.signal()) -> _ => {},
        }
        Ok(())
    }

    fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}
