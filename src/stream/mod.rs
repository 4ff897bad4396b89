//! Streaming Call Module
//!
//! The call convention on top of the codec: one request message out, zero or
//! more response messages back until end-of-stream.
//!
//! ## Architecture
//! - `Transport` exchanges whole frames and carries the cancel signal
//! - `StreamingCall` drives the client side state machine
//! - `serve_call` drives the server side for one call
//! - `ChannelTransport` connects both sides in memory

mod transport;
mod channel;
mod call;
mod server;

pub use transport::{CancelToken, Transport};
pub use channel::ChannelTransport;
pub use call::{execute_command, CallState, Responses, StreamingCall};
pub use server::{serve_call, CommandHandler, EchoHandler, ResponseSink};
