//! Call server
//!
//! Serves one command call: reads the request, lets a handler stream
//! responses, then ends the stream.

use crate::config::CallConfig;
use crate::error::{CmdStreamError, Result};
use crate::message::{CommandRequest, CommandResponse, Event, Level, Message};

use super::transport::Transport;

/// Runs a command and streams its output
pub trait CommandHandler<E: Message = Event> {
    fn execute(&self, request: CommandRequest, sink: &mut ResponseSink<'_, E>) -> Result<()>;
}

/// Send half handed to a `CommandHandler`
pub struct ResponseSink<'a, E: Message = Event> {
    transport: &'a mut dyn Transport,
    max_message_size: usize,
    sent: usize,
    _event: std::marker::PhantomData<fn(E)>,
}

impl<'a, E: Message> ResponseSink<'a, E> {
    fn new(transport: &'a mut dyn Transport, max_message_size: usize) -> Self {
        Self {
            transport,
            max_message_size,
            sent: 0,
            _event: std::marker::PhantomData,
        }
    }

    /// Encode and send one response
    pub fn send(&mut self, response: &CommandResponse<E>) -> Result<()> {
        let frame = response.encode_to_bytes();
        if frame.len() > self.max_message_size {
            return Err(CmdStreamError::MessageTooLarge {
                size: frame.len(),
                max: self.max_message_size,
            });
        }
        self.transport.send_buffer(frame)?;
        self.sent += 1;
        Ok(())
    }

    pub fn send_event(&mut self, event: E) -> Result<()> {
        self.send(&CommandResponse::new(event))
    }

    /// Responses sent so far
    pub fn sent(&self) -> usize {
        self.sent
    }
}

/// Serve a single call on `transport`
///
/// Returns the number of responses sent. A handler error is passed to the
/// peer through `Transport::abort` and returned.
pub fn serve_call<T, H, E>(mut transport: T, handler: &H, config: &CallConfig) -> Result<usize>
where
    T: Transport,
    H: CommandHandler<E>,
    E: Message,
{
    let frame = match transport.recv_buffer()? {
        Some(frame) => frame,
        None => {
            return Err(CmdStreamError::Transport(
                "stream closed before a request arrived".to_string(),
            ))
        }
    };

    if frame.len() > config.max_message_size {
        let error = CmdStreamError::MessageTooLarge {
            size: frame.len(),
            max: config.max_message_size,
        };
        transport.abort(&error.to_string())?;
        return Err(error);
    }

    let request = match CommandRequest::decode(&frame) {
        Ok(request) => request,
        Err(e) => {
            let error = CmdStreamError::from(e);
            tracing::warn!("Rejecting malformed request: {}", error);
            transport.abort(&error.to_string())?;
            return Err(error);
        }
    };

    tracing::debug!("Serving {}", request);

    let mut sink = ResponseSink::new(&mut transport, config.max_message_size);
    let outcome = handler.execute(request, &mut sink);
    let sent = sink.sent();

    match outcome {
        Ok(()) => {
            transport.close_send()?;
            tracing::debug!("Call served, {} responses sent", sent);
            Ok(sent)
        }
        Err(e) => {
            tracing::warn!("Handler failed after {} responses: {}", sent, e);
            transport.abort(&e.to_string())?;
            Err(e)
        }
    }
}

/// Streams one `Info` event per argument, in order
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoHandler;

impl CommandHandler for EchoHandler {
    fn execute(&self, request: CommandRequest, sink: &mut ResponseSink<'_>) -> Result<()> {
        for arg in request.args {
            sink.send_event(Event::new(Level::Info, arg))?;
        }
        Ok(())
    }
}
