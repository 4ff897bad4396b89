//! Unknown field skipping
//!
//! Consumes a field's encoded value without interpreting it. Legacy groups
//! are walked by recursive descent so nested groups close at the right level
//! and no byte of a sibling field is consumed.

use crate::error::{DecodeError, DecodeResult};

use super::reader::WireReader;
use super::tag::{Tag, WireType};

/// Deepest group nesting accepted while skipping
pub const MAX_GROUP_DEPTH: usize = 64;

impl<'a> WireReader<'a> {
    /// Discard the value belonging to `tag`, whose tag bytes were already read
    pub fn skip_field(&mut self, tag: Tag) -> DecodeResult<()> {
        let start = self.position();
        let mut cursor = *self;
        cursor.skip_value(tag, 0)?;
        tracing::trace!(
            "Skipped unknown field {} ({} bytes)",
            tag,
            cursor.position() - start
        );
        *self = cursor;
        Ok(())
    }

    fn skip_value(&mut self, tag: Tag, depth: usize) -> DecodeResult<()> {
        match tag.wire_type {
            WireType::Varint => {
                self.read_varint()?;
            }
            WireType::Fixed64 => {
                self.read_bytes(8)?;
            }
            WireType::LengthDelimited => {
                self.read_length_delimited()?;
            }
            WireType::Fixed32 => {
                self.read_bytes(4)?;
            }
            WireType::StartGroup => self.skip_group(depth + 1)?,
            WireType::EndGroup => {
                return Err(DecodeError::InvalidTag {
                    field_number: tag.field_number as u64,
                    wire_type: WireType::EndGroup.code(),
                });
            }
        }
        Ok(())
    }

    /// Skip group members until the group-end at this nesting level
    fn skip_group(&mut self, depth: usize) -> DecodeResult<()> {
        if depth > MAX_GROUP_DEPTH {
            return Err(DecodeError::RecursionLimitExceeded);
        }

        loop {
            // read_raw_tag reports UnexpectedEndOfInput once the buffer runs out
            let inner = self.read_raw_tag()?;
            if inner.wire_type == WireType::EndGroup {
                return Ok(());
            }
            self.skip_value(inner, depth)?;
        }
    }
}
