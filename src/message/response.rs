//! Command response
//!
//! One item of the stream a server sends back for a command call.

use std::fmt;

use bytes::BufMut;

use crate::error::DecodeResult;
use crate::wire::{encode_message_field, message_field_len, Tag, WireReader};

use super::{Event, Message};

const EVENT_FIELD: u32 = 1;

/// Wraps one optional embedded message, by default a log `Event`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse<E = Event> {
    pub event: Option<E>,
}

impl<E> Default for CommandResponse<E> {
    fn default() -> Self {
        Self { event: None }
    }
}

impl<E> CommandResponse<E> {
    pub fn new(event: E) -> Self {
        Self { event: Some(event) }
    }
}

impl<E: Message> Message for CommandResponse<E> {
    fn encoded_len(&self) -> usize {
        self.event
            .as_ref()
            .map_or(0, |event| message_field_len(EVENT_FIELD, event))
    }

    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        if let Some(event) = &self.event {
            encode_message_field(EVENT_FIELD, event, buf);
        }
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut WireReader<'_>) -> DecodeResult<()> {
        match tag.field_number {
            EVENT_FIELD => reader.read_message(tag, &mut self.event),
            _ => reader.skip_field(tag),
        }
    }
}

impl<E: fmt::Display> fmt::Display for CommandResponse<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.event {
            Some(event) => write!(f, "CommandResponse{{event:{}}}", event),
            None => write!(f, "CommandResponse{{event:nil}}"),
        }
    }
}
