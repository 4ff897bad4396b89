//! Command request
//!
//! The single message a client sends to start a command call.

use std::fmt;
use std::time::Duration;

use bytes::BufMut;

use crate::error::DecodeResult;
use crate::wire::{
    bytes_field_len, encode_int64_field, encode_string_field, int64_field_len, Tag, WireReader,
};

use super::Message;

const ARGS_FIELD: u32 = 1;
const ACTION_TIMEOUT_FIELD: u32 = 2;

/// Runs a command given the same arguments as on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRequest {
    /// Command-line arguments, in order
    pub args: Vec<String>,

    /// Action timeout in nanoseconds; 0 means use the server default
    pub action_timeout: i64,
}

impl CommandRequest {
    /// Create a request with no action timeout
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            action_timeout: 0,
        }
    }

    /// Set the action timeout, saturating at i64::MAX nanoseconds
    pub fn with_action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = i64::try_from(timeout.as_nanos()).unwrap_or(i64::MAX);
        self
    }

    /// The action timeout, or `None` when unset (or negative)
    pub fn action_timeout(&self) -> Option<Duration> {
        match self.action_timeout {
            t if t > 0 => Some(Duration::from_nanos(t as u64)),
            _ => None,
        }
    }
}

impl Message for CommandRequest {
    fn encoded_len(&self) -> usize {
        let args: usize = self
            .args
            .iter()
            .map(|arg| bytes_field_len(ARGS_FIELD, arg.len()))
            .sum();

        let timeout = if self.action_timeout != 0 {
            int64_field_len(ACTION_TIMEOUT_FIELD, self.action_timeout)
        } else {
            0
        };

        args + timeout
    }

    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        for arg in &self.args {
            encode_string_field(ARGS_FIELD, arg, buf);
        }
        if self.action_timeout != 0 {
            encode_int64_field(ACTION_TIMEOUT_FIELD, self.action_timeout, buf);
        }
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut WireReader<'_>) -> DecodeResult<()> {
        match tag.field_number {
            ARGS_FIELD => {
                let arg = reader.read_string(tag)?;
                self.args.push(arg);
            }
            ACTION_TIMEOUT_FIELD => self.action_timeout = reader.read_int64(tag)?,
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }
}

impl fmt::Display for CommandRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CommandRequest{{args:{:?}, action_timeout:{}}}",
            self.args, self.action_timeout
        )
    }
}
