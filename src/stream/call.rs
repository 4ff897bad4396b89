//! Streaming call
//!
//! Client side of a server-streaming command call.
//!
//! ```text
//!  Idle ──send request──▶ RequestSent ──half-close──▶ Streaming ──end-of-stream──▶ Closed
//!                                                      │    ▲
//!                                                      └────┘ recv response
//!  any transport or decode error ──▶ Failed
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::time::Instant;

use crate::config::CallConfig;
use crate::error::{CmdStreamError, Result};
use crate::message::{CommandRequest, CommandResponse, Message};

use super::transport::{CancelToken, Transport};

/// Where a call is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Idle,
    RequestSent,
    Streaming,
    Closed,
    Failed,
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallState::Idle => "Idle",
            CallState::RequestSent => "RequestSent",
            CallState::Streaming => "Streaming",
            CallState::Closed => "Closed",
            CallState::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// One in-flight call: a single request out, a stream of `R` back
///
/// Not shareable between callers; use `cancel_token()` to stop it from
/// another thread.
pub struct StreamingCall<T, R = CommandResponse> {
    /// Frame transport for this call
    transport: T,

    config: CallConfig,

    state: CallState,

    /// Responses decoded so far
    received: usize,

    _response: PhantomData<fn() -> R>,
}

impl<T: Transport, R: Message> StreamingCall<T, R> {
    pub fn new(transport: T, config: CallConfig) -> Self {
        Self {
            transport,
            config,
            state: CallState::Idle,
            received: 0,
            _response: PhantomData,
        }
    }

    pub fn state(&self) -> CallState {
        self.state
    }

    /// Number of responses handed to the caller
    pub fn received(&self) -> usize {
        self.received
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.transport.cancel_token()
    }

    pub fn cancel(&self) {
        self.transport.cancel();
    }

    fn transition(&mut self, next: CallState) {
        tracing::debug!("Call state {} -> {}", self.state, next);
        self.state = next;
    }

    fn fail(&mut self, error: CmdStreamError) -> CmdStreamError {
        tracing::warn!("Call failed after {} responses: {}", self.received, error);
        self.transition(CallState::Failed);
        error
    }

    fn check_size(&self, size: usize) -> Result<()> {
        if size > self.config.max_message_size {
            return Err(CmdStreamError::MessageTooLarge {
                size,
                max: self.config.max_message_size,
            });
        }
        Ok(())
    }

    /// Encode and send the request, then half-close the send side
    pub fn start<Q: Message>(&mut self, request: &Q) -> Result<()> {
        if self.state != CallState::Idle {
            return Err(CmdStreamError::InvalidState {
                operation: "start",
                state: self.state,
            });
        }

        let frame = request.encode_to_bytes();
        if let Err(e) = self.check_size(frame.len()) {
            return Err(self.fail(e));
        }

        let started = Instant::now();
        if let Err(e) = self.transport.send_buffer(frame) {
            return Err(self.fail(e));
        }
        let elapsed = started.elapsed();
        if elapsed > self.config.slow_send_threshold {
            tracing::info!("Send took {} ms", elapsed.as_millis());
        }
        self.transition(CallState::RequestSent);

        if let Err(e) = self.transport.close_send() {
            return Err(self.fail(e));
        }
        self.transition(CallState::Streaming);
        Ok(())
    }

    /// Block for the next response
    ///
    /// `Ok(None)` once the server has ended the stream.
    pub fn recv(&mut self) -> Result<Option<R>> {
        match self.state {
            CallState::Streaming => {}
            CallState::Closed => return Ok(None),
            state => {
                return Err(CmdStreamError::InvalidState {
                    operation: "recv",
                    state,
                })
            }
        }

        let frame = match self.transport.recv_buffer() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                tracing::debug!("Stream closed after {} responses", self.received);
                self.transition(CallState::Closed);
                return Ok(None);
            }
            Err(e) => return Err(self.fail(e)),
        };

        tracing::trace!("Received frame of {} bytes", frame.len());
        if let Err(e) = self.check_size(frame.len()) {
            return Err(self.fail(e));
        }

        match R::decode(&frame) {
            Ok(response) => {
                self.received += 1;
                Ok(Some(response))
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Turn the call into a lazy iterator over its responses
    pub fn responses(self) -> Responses<T, R> {
        Responses {
            call: self,
            done: false,
        }
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

/// Responses pulled from the transport one at a time
///
/// Ends after end-of-stream, or right after yielding the error that failed
/// the call.
pub struct Responses<T, R = CommandResponse> {
    call: StreamingCall<T, R>,
    done: bool,
}

impl<T: Transport, R: Message> Responses<T, R> {
    pub fn state(&self) -> CallState {
        self.call.state()
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.call.cancel_token()
    }
}

impl<T: Transport, R: Message> Iterator for Responses<T, R> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.call.recv() {
            Ok(Some(response)) => Some(Ok(response)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<T: Transport, R: Message> FusedIterator for Responses<T, R> {}

/// Start a command call and return its response stream
pub fn execute_command<T: Transport>(
    transport: T,
    request: &CommandRequest,
    config: CallConfig,
) -> Result<Responses<T>> {
    config.validate()?;
    tracing::debug!("Executing command: {}", request);

    let mut call = StreamingCall::new(transport, config);
    call.start(request)?;
    Ok(call.responses())
}
