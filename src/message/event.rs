//! Log events
//!
//! The payload a command server streams back while a command runs.

use std::fmt;

use bytes::BufMut;

use crate::error::DecodeResult;
use crate::wire::{
    bytes_field_len, encode_int32_field, encode_int64_field, encode_message_field,
    encode_string_field, int32_field_len, int64_field_len, message_field_len, Tag, WireReader,
};

use super::Message;

/// Severity of an event
///
/// Values this crate does not know are kept as `Other` so they re-encode
/// unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Level {
    #[default]
    Info,
    Warning,
    Error,
    /// Output meant for the console as-is, without decoration
    Console,
    Other(i32),
}

impl Level {
    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => Level::Info,
            1 => Level::Warning,
            2 => Level::Error,
            3 => Level::Console,
            other => Level::Other(other),
        }
    }

    pub fn as_i32(self) -> i32 {
        match self {
            Level::Info => 0,
            Level::Warning => 1,
            Level::Error => 2,
            Level::Console => 3,
            Level::Other(value) => value,
        }
    }
}

/// Wall-clock timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Time {
    pub seconds: i64,
    pub nanoseconds: i32,
}

impl Message for Time {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.seconds != 0 {
            len += int64_field_len(1, self.seconds);
        }
        if self.nanoseconds != 0 {
            len += int32_field_len(2, self.nanoseconds);
        }
        len
    }

    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        if self.seconds != 0 {
            encode_int64_field(1, self.seconds, buf);
        }
        if self.nanoseconds != 0 {
            encode_int32_field(2, self.nanoseconds, buf);
        }
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut WireReader<'_>) -> DecodeResult<()> {
        match tag.field_number {
            1 => self.seconds = reader.read_int64(tag)?,
            2 => self.nanoseconds = reader.read_int32(tag)?,
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }
}

/// A single log line produced while a command executes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    pub time: Option<Time>,
    pub level: Level,
    pub file: String,
    pub line: i64,
    pub value: String,
}

impl Event {
    const TIME: u32 = 1;
    const LEVEL: u32 = 2;
    const FILE: u32 = 3;
    const LINE: u32 = 4;
    const VALUE: u32 = 5;

    /// An event carrying only a level and its text
    pub fn new(level: Level, value: impl Into<String>) -> Self {
        Self {
            level,
            value: value.into(),
            ..Self::default()
        }
    }
}

impl Message for Event {
    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if let Some(time) = &self.time {
            len += message_field_len(Self::TIME, time);
        }
        if self.level.as_i32() != 0 {
            len += int32_field_len(Self::LEVEL, self.level.as_i32());
        }
        if !self.file.is_empty() {
            len += bytes_field_len(Self::FILE, self.file.len());
        }
        if self.line != 0 {
            len += int64_field_len(Self::LINE, self.line);
        }
        if !self.value.is_empty() {
            len += bytes_field_len(Self::VALUE, self.value.len());
        }
        len
    }

    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        if let Some(time) = &self.time {
            encode_message_field(Self::TIME, time, buf);
        }
        if self.level.as_i32() != 0 {
            encode_int32_field(Self::LEVEL, self.level.as_i32(), buf);
        }
        if !self.file.is_empty() {
            encode_string_field(Self::FILE, &self.file, buf);
        }
        if self.line != 0 {
            encode_int64_field(Self::LINE, self.line, buf);
        }
        if !self.value.is_empty() {
            encode_string_field(Self::VALUE, &self.value, buf);
        }
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut WireReader<'_>) -> DecodeResult<()> {
        match tag.field_number {
            Self::TIME => reader.read_message(tag, &mut self.time)?,
            Self::LEVEL => self.level = Level::from_i32(reader.read_int32(tag)?),
            Self::FILE => self.file = reader.read_string(tag)?,
            Self::LINE => self.line = reader.read_int64(tag)?,
            Self::VALUE => self.value = reader.read_string(tag)?,
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}]", self.level)?;
        if !self.file.is_empty() {
            write!(f, " {}:{}", self.file, self.line)?;
        }
        write!(f, " {}", self.value)
    }
}
