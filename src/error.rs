//! Error types for cmdstream
//!
//! `DecodeError` covers malformed wire input. `CmdStreamError` is the unified
//! error for everything above the codec.

use thiserror::Error;

use crate::wire::WireType;

/// Result type alias using CmdStreamError
pub type Result<T> = std::result::Result<T, CmdStreamError>;

/// Result type alias for codec operations
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Errors raised while decoding a wire buffer
///
/// Every variant aborts the decode of the enclosing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("varint overflows 64 bits")]
    IntegerOverflow,

    #[error("invalid length prefix")]
    InvalidLength,

    #[error("illegal tag: field {field_number} (wire type {wire_type})")]
    InvalidTag { field_number: u64, wire_type: u8 },

    #[error("wrong wire type for field {field_number}: expected {expected:?}, got {actual:?}")]
    WireTypeMismatch {
        field_number: u32,
        expected: WireType,
        actual: WireType,
    },

    #[error("illegal wire type {0}")]
    InvalidWireType(u8),

    #[error("field {field_number} is not valid UTF-8")]
    InvalidUtf8 { field_number: u32 },

    #[error("group nesting exceeds recursion limit")]
    RecursionLimitExceeded,
}

/// Unified error type for cmdstream operations
#[derive(Debug, Error)]
pub enum CmdStreamError {
    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Message too large: {size} bytes (max {max})")]
    MessageTooLarge { size: usize, max: usize },

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Stream aborted by peer: {0}")]
    Remote(String),

    #[error("Call cancelled")]
    Cancelled,

    // -------------------------------------------------------------------------
    // Call Errors
    // -------------------------------------------------------------------------
    #[error("Cannot {operation} in state {state}")]
    InvalidState {
        operation: &'static str,
        state: crate::stream::CallState,
    },

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // -------------------------------------------------------------------------
    // I/O and Configuration Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
