//! Tests for unknown field skipping
//!
//! These tests verify:
//! - Every wire type skips exactly its own bytes
//! - Nested legacy groups close at the right level
//! - Truncated and malformed groups fail

use cmdstream::wire::{
    encode_bytes_field, encode_tag, encode_varint_field, WireReader, WireType, MAX_GROUP_DEPTH,
};
use cmdstream::DecodeError;

/// Skip the first field in `buf`, returning the bytes left untouched
fn skip_first(buf: &[u8]) -> Result<usize, DecodeError> {
    let mut reader = WireReader::new(buf);
    let tag = reader.read_tag()?;
    reader.skip_field(tag)?;
    Ok(reader.remaining())
}

fn sentinel(buf: &mut Vec<u8>) {
    encode_varint_field(1, 42, buf);
}

// =============================================================================
// Scalar Wire Types
// =============================================================================

#[test]
fn test_skip_varint() {
    let mut buf = Vec::new();
    encode_varint_field(99, u64::MAX, &mut buf);
    sentinel(&mut buf);
    assert_eq!(skip_first(&buf).unwrap(), 2);
}

#[test]
fn test_skip_fixed64() {
    let mut buf = Vec::new();
    encode_tag(99, WireType::Fixed64, &mut buf);
    buf.extend_from_slice(&[0xAA; 8]);
    sentinel(&mut buf);
    assert_eq!(skip_first(&buf).unwrap(), 2);
}

#[test]
fn test_skip_fixed32() {
    let mut buf = Vec::new();
    encode_tag(99, WireType::Fixed32, &mut buf);
    buf.extend_from_slice(&[0xBB; 4]);
    sentinel(&mut buf);
    assert_eq!(skip_first(&buf).unwrap(), 2);
}

#[test]
fn test_skip_length_delimited() {
    let mut buf = Vec::new();
    encode_bytes_field(99, &[0x08, 0x96, 0x01, 0xFF], &mut buf);
    sentinel(&mut buf);
    assert_eq!(skip_first(&buf).unwrap(), 2);
}

#[test]
fn test_skip_truncated_fixed64() {
    let mut buf = Vec::new();
    encode_tag(99, WireType::Fixed64, &mut buf);
    buf.extend_from_slice(&[0x00; 7]);
    assert_eq!(skip_first(&buf), Err(DecodeError::UnexpectedEndOfInput));
}

// =============================================================================
// Group Tests
// =============================================================================

#[test]
fn test_skip_flat_group() {
    let mut buf = Vec::new();
    encode_tag(99, WireType::StartGroup, &mut buf);
    encode_varint_field(1, 7, &mut buf);
    encode_bytes_field(2, b"inside", &mut buf);
    encode_tag(99, WireType::EndGroup, &mut buf);
    sentinel(&mut buf);

    assert_eq!(skip_first(&buf).unwrap(), 2);
}

#[test]
fn test_skip_nested_groups() {
    let mut buf = Vec::new();
    encode_tag(10, WireType::StartGroup, &mut buf);
    encode_tag(11, WireType::StartGroup, &mut buf);
    encode_varint_field(1, 1, &mut buf);
    encode_tag(12, WireType::StartGroup, &mut buf);
    encode_tag(12, WireType::EndGroup, &mut buf);
    encode_tag(11, WireType::EndGroup, &mut buf);
    encode_bytes_field(2, b"after inner", &mut buf);
    encode_tag(10, WireType::EndGroup, &mut buf);
    sentinel(&mut buf);

    assert_eq!(skip_first(&buf).unwrap(), 2);
}

#[test]
fn test_group_end_hides_inside_length_delimited_payload() {
    // A group-end byte inside a bytes field must not close the group
    let mut buf = Vec::new();
    encode_tag(10, WireType::StartGroup, &mut buf);
    let mut fake_end = Vec::new();
    encode_tag(10, WireType::EndGroup, &mut fake_end);
    encode_bytes_field(1, &fake_end, &mut buf);
    encode_tag(10, WireType::EndGroup, &mut buf);
    sentinel(&mut buf);

    assert_eq!(skip_first(&buf).unwrap(), 2);
}

#[test]
fn test_unterminated_group() {
    let mut buf = Vec::new();
    encode_tag(99, WireType::StartGroup, &mut buf);
    encode_varint_field(1, 7, &mut buf);

    assert_eq!(skip_first(&buf), Err(DecodeError::UnexpectedEndOfInput));
}

#[test]
fn test_unterminated_inner_group() {
    let mut buf = Vec::new();
    encode_tag(10, WireType::StartGroup, &mut buf);
    encode_tag(11, WireType::StartGroup, &mut buf);
    encode_tag(10, WireType::EndGroup, &mut buf);

    assert_eq!(skip_first(&buf), Err(DecodeError::UnexpectedEndOfInput));
}

#[test]
fn test_group_nesting_limit() {
    let mut buf = Vec::new();
    for _ in 0..=MAX_GROUP_DEPTH {
        encode_tag(5, WireType::StartGroup, &mut buf);
    }
    for _ in 0..=MAX_GROUP_DEPTH {
        encode_tag(5, WireType::EndGroup, &mut buf);
    }

    assert_eq!(skip_first(&buf), Err(DecodeError::RecursionLimitExceeded));
}

#[test]
fn test_group_nesting_at_limit_is_accepted() {
    let mut buf = Vec::new();
    for _ in 0..MAX_GROUP_DEPTH {
        encode_tag(5, WireType::StartGroup, &mut buf);
    }
    for _ in 0..MAX_GROUP_DEPTH {
        encode_tag(5, WireType::EndGroup, &mut buf);
    }

    assert_eq!(skip_first(&buf).unwrap(), 0);
}

#[test]
fn test_group_with_invalid_member_tag() {
    let mut buf = Vec::new();
    encode_tag(99, WireType::StartGroup, &mut buf);
    buf.push(0x00);
    encode_tag(99, WireType::EndGroup, &mut buf);

    assert!(matches!(
        skip_first(&buf),
        Err(DecodeError::InvalidTag { field_number: 0, .. })
    ));
}
