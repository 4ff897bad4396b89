//! Wire Reader
//!
//! A cursor over an already-demarcated buffer.

use crate::error::{DecodeError, DecodeResult};
use crate::message::Message;

use super::tag::{Tag, WireType};
use super::varint::MAX_VARINT_LEN;

/// Cursor over an encoded message
///
/// Every read either succeeds and advances past the bytes it consumed, or
/// fails and leaves the cursor where it was.
#[derive(Debug, Clone, Copy)]
pub struct WireReader<'a> {
    /// The whole buffer being decoded
    buf: &'a [u8],

    /// Offset of the next unread byte
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Offset of the next unread byte
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Length of the underlying buffer
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes left to read
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// True once every byte has been consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Run `read`, rewinding the cursor if it fails
    fn atomically<T>(&mut self, read: impl FnOnce(&mut Self) -> DecodeResult<T>) -> DecodeResult<T> {
        let start = self.pos;
        let result = read(self);
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    /// Decode one varint
    pub fn read_varint(&mut self) -> DecodeResult<u64> {
        let mut value = 0u64;
        let mut pos = self.pos;

        for group in 0..MAX_VARINT_LEN {
            let byte = *self.buf.get(pos).ok_or(DecodeError::UnexpectedEndOfInput)?;
            pos += 1;
            value |= ((byte & 0x7F) as u64) << (group * 7);
            if byte < 0x80 {
                self.pos = pos;
                return Ok(value);
            }
        }

        Err(DecodeError::IntegerOverflow)
    }

    /// Decode a tag, rejecting a group-end marker
    pub fn read_tag(&mut self) -> DecodeResult<Tag> {
        self.atomically(|r| {
            let raw = r.read_varint()?;
            let tag = Tag::from_raw(raw)?;
            if tag.wire_type == WireType::EndGroup {
                return Err(DecodeError::InvalidTag {
                    field_number: tag.field_number as u64,
                    wire_type: WireType::EndGroup.code(),
                });
            }
            Ok(tag)
        })
    }

    /// Decode a tag, allowing a group-end marker
    pub(crate) fn read_raw_tag(&mut self) -> DecodeResult<Tag> {
        self.atomically(|r| Tag::from_raw(r.read_varint()?))
    }

    /// Take exactly `len` bytes
    pub fn read_bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(DecodeError::InvalidLength)?;
        if end > self.buf.len() {
            return Err(DecodeError::UnexpectedEndOfInput);
        }
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Decode a varint length prefix and return the bytes it covers
    pub fn read_length_delimited(&mut self) -> DecodeResult<&'a [u8]> {
        self.atomically(|r| {
            let len = r.read_varint()?;
            if (len as i64) < 0 {
                return Err(DecodeError::InvalidLength);
            }
            let len = usize::try_from(len).map_err(|_| DecodeError::InvalidLength)?;
            r.read_bytes(len)
        })
    }

    pub fn read_fixed32(&mut self) -> DecodeResult<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_fixed64(&mut self) -> DecodeResult<u64> {
        let bytes = self.read_bytes(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }

    // =========================================================================
    // Typed field values
    // =========================================================================

    /// Fail unless `tag` carries the wire type a known field requires
    pub fn expect_wire_type(tag: Tag, expected: WireType) -> DecodeResult<()> {
        if tag.wire_type != expected {
            return Err(DecodeError::WireTypeMismatch {
                field_number: tag.field_number,
                expected,
                actual: tag.wire_type,
            });
        }
        Ok(())
    }

    /// Signed 64-bit value stored as the plain varint of its bit pattern
    pub fn read_int64(&mut self, tag: Tag) -> DecodeResult<i64> {
        Self::expect_wire_type(tag, WireType::Varint)?;
        Ok(self.read_varint()? as i64)
    }

    /// Signed 32-bit value; upper bits of the varint are discarded
    pub fn read_int32(&mut self, tag: Tag) -> DecodeResult<i32> {
        Self::expect_wire_type(tag, WireType::Varint)?;
        Ok(self.read_varint()? as i32)
    }

    /// Raw bytes of a length-delimited field
    pub fn read_bytes_field(&mut self, tag: Tag) -> DecodeResult<&'a [u8]> {
        Self::expect_wire_type(tag, WireType::LengthDelimited)?;
        self.read_length_delimited()
    }

    /// UTF-8 string field
    pub fn read_string(&mut self, tag: Tag) -> DecodeResult<String> {
        self.atomically(|r| {
            let bytes = r.read_bytes_field(tag)?;
            std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|_| DecodeError::InvalidUtf8 {
                    field_number: tag.field_number,
                })
        })
    }

    /// Embedded message field, merged into `target`
    ///
    /// A recurring field merges into the value already held. `target` is
    /// only replaced once the nested decode has succeeded.
    pub fn read_message<M: Message>(&mut self, tag: Tag, target: &mut Option<M>) -> DecodeResult<()> {
        self.atomically(|r| {
            let payload = r.read_bytes_field(tag)?;
            let mut message = target.clone().unwrap_or_default();
            message.merge(payload)?;
            *target = Some(message);
            Ok(())
        })
    }
}
