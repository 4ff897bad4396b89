//! Field tags and wire types

use std::fmt;

use crate::error::{DecodeError, DecodeResult};

/// Largest field number the encoder supports
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// How the bytes following a tag are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

impl WireType {
    /// Parse the low 3 bits of a tag
    pub fn from_code(code: u8) -> DecodeResult<Self> {
        match code {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            3 => Ok(WireType::StartGroup),
            4 => Ok(WireType::EndGroup),
            5 => Ok(WireType::Fixed32),
            other => Err(DecodeError::InvalidWireType(other)),
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A decoded (field number, wire type) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub field_number: u32,
    pub wire_type: WireType,
}

impl Tag {
    pub fn new(field_number: u32, wire_type: WireType) -> Self {
        debug_assert!(
            field_number > 0 && field_number <= MAX_FIELD_NUMBER,
            "field number {} out of range",
            field_number
        );
        Self {
            field_number,
            wire_type,
        }
    }

    /// Split a raw tag varint into its parts
    ///
    /// Accepts `EndGroup`; rejecting it outside a group is the reader's job.
    pub fn from_raw(raw: u64) -> DecodeResult<Self> {
        let code = (raw & 0x07) as u8;
        let field_number = raw >> 3;

        // Field numbers are read as signed 32-bit; anything non-positive is illegal.
        // Checked before the wire type so a zero tag reports as such.
        if field_number == 0 || field_number > i32::MAX as u64 {
            return Err(DecodeError::InvalidTag {
                field_number,
                wire_type: code,
            });
        }
        let wire_type = WireType::from_code(code)?;

        Ok(Self {
            field_number: field_number as u32,
            wire_type,
        })
    }

    /// The varint value this tag encodes to
    pub fn to_raw(self) -> u64 {
        ((self.field_number as u64) << 3) | self.wire_type.code() as u64
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.field_number, self.wire_type)
    }
}
