//! # cmdstream
//!
//! A self-describing binary message codec and the streaming call built on it:
//! - Tag/length/value wire format (varints, length-delimited fields, legacy group skipping)
//! - Command request/response messages with exact size computation
//! - Server-streaming call: one request out, a lazy stream of responses back
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Streaming Call (stream)                    │
//! │    Idle → RequestSent → Streaming → Closed | Failed          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ frames (Bytes)
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Transport  │          │  Messages   │
//!   │ (external)  │          │  (message)  │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │ Wire Codec  │
//!                           │   (wire)    │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod wire;
pub mod message;
pub mod stream;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CmdStreamError, DecodeError, DecodeResult, Result};
pub use config::CallConfig;
pub use message::{CommandRequest, CommandResponse, Event, Level, Message, Time};
pub use stream::{execute_command, serve_call, ChannelTransport, StreamingCall, Transport};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of cmdstream
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
