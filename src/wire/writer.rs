//! Field encoders and their size functions
//!
//! Each `*_len` function returns exactly the number of bytes the matching
//! `encode_*` function writes, so a message can size itself without
//! building its encoded form.

use bytes::BufMut;

use crate::message::Message;

use super::tag::{Tag, WireType};
use super::varint::{encode_varint, varint_len};

// =============================================================================
// Encoders
// =============================================================================

pub fn encode_tag<B: BufMut>(field_number: u32, wire_type: WireType, buf: &mut B) {
    encode_varint(Tag::new(field_number, wire_type).to_raw(), buf);
}

pub fn encode_varint_field<B: BufMut>(field_number: u32, value: u64, buf: &mut B) {
    encode_tag(field_number, WireType::Varint, buf);
    encode_varint(value, buf);
}

/// Signed 64-bit field, bit pattern as a plain varint (no zigzag)
pub fn encode_int64_field<B: BufMut>(field_number: u32, value: i64, buf: &mut B) {
    encode_varint_field(field_number, value as u64, buf);
}

/// Signed 32-bit field; negative values are sign-extended to 10 bytes
pub fn encode_int32_field<B: BufMut>(field_number: u32, value: i32, buf: &mut B) {
    encode_varint_field(field_number, value as i64 as u64, buf);
}

pub fn encode_bytes_field<B: BufMut>(field_number: u32, data: &[u8], buf: &mut B) {
    encode_tag(field_number, WireType::LengthDelimited, buf);
    encode_varint(data.len() as u64, buf);
    buf.put_slice(data);
}

pub fn encode_string_field<B: BufMut>(field_number: u32, value: &str, buf: &mut B) {
    encode_bytes_field(field_number, value.as_bytes(), buf);
}

/// Embedded message: length prefix from `encoded_len`, then the payload
pub fn encode_message_field<M: Message, B: BufMut>(field_number: u32, message: &M, buf: &mut B) {
    encode_tag(field_number, WireType::LengthDelimited, buf);
    encode_varint(message.encoded_len() as u64, buf);
    message.encode_raw(buf);
}

// =============================================================================
// Sizes
// =============================================================================

pub fn tag_len(field_number: u32) -> usize {
    varint_len((field_number as u64) << 3)
}

pub fn bytes_field_len(field_number: u32, len: usize) -> usize {
    tag_len(field_number) + varint_len(len as u64) + len
}

pub fn int64_field_len(field_number: u32, value: i64) -> usize {
    tag_len(field_number) + varint_len(value as u64)
}

pub fn int32_field_len(field_number: u32, value: i32) -> usize {
    tag_len(field_number) + varint_len(value as i64 as u64)
}

pub fn message_field_len<M: Message>(field_number: u32, message: &M) -> usize {
    bytes_field_len(field_number, message.encoded_len())
}
