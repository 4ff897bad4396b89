//! Tests for CommandResponse and Event

use cmdstream::wire::{encode_bytes_field, encode_varint_field, WireReader, WireType};
use cmdstream::{CommandResponse, DecodeError, DecodeResult, Event, Level, Message, Time};

fn full_event() -> Event {
    Event {
        time: Some(Time {
            seconds: 1_700_000_000,
            nanoseconds: 5,
        }),
        level: Level::Error,
        file: "vtctl.go".to_string(),
        line: 88,
        value: "tablet not found".to_string(),
    }
}

// =============================================================================
// Round-Trip and Size
// =============================================================================

#[test]
fn test_absent_event_encodes_to_nothing() {
    let response: CommandResponse = CommandResponse::default();
    assert!(response.encode_to_vec().is_empty());
    assert_eq!(CommandResponse::<Event>::decode(&[]).unwrap(), response);
}

#[test]
fn test_default_event_is_present_but_empty() {
    let response = CommandResponse::new(Event::default());
    let encoded = response.encode_to_vec();
    assert_eq!(encoded, vec![0x0A, 0x00]);

    let decoded = CommandResponse::<Event>::decode(&encoded).unwrap();
    assert_eq!(decoded.event, Some(Event::default()));
}

#[test]
fn test_full_event_roundtrip() {
    let response = CommandResponse::new(full_event());
    let encoded = response.encode_to_vec();
    assert_eq!(encoded.len(), response.encoded_len());
    assert_eq!(CommandResponse::decode(&encoded).unwrap(), response);
}

#[test]
fn test_simple_event_bytes() {
    let response = CommandResponse::new(Event::new(Level::Console, "ok"));
    assert_eq!(
        response.encode_to_vec(),
        vec![0x0A, 0x06, 0x10, 0x03, 0x2A, 0x02, b'o', b'k']
    );
}

#[test]
fn test_negative_nanoseconds_roundtrip() {
    let time = Time {
        seconds: -3,
        nanoseconds: -1,
    };
    let encoded = time.encode_to_vec();
    assert_eq!(encoded.len(), time.encoded_len());
    assert_eq!(Time::decode(&encoded).unwrap(), time);
}

#[test]
fn test_unknown_level_is_preserved() {
    let event = Event::new(Level::Other(42), "custom");
    let decoded = Event::decode(&event.encode_to_vec()).unwrap();
    assert_eq!(decoded.level, Level::Other(42));
    assert_eq!(decoded.level.as_i32(), 42);
}

// =============================================================================
// Decoding Semantics
// =============================================================================

#[test]
fn test_recurring_event_field_merges() {
    let mut buf = CommandResponse::new(Event::new(Level::Warning, "first")).encode_to_vec();
    let second = Event {
        line: 7,
        ..Event::default()
    };
    buf.extend(CommandResponse::new(second).encode_to_vec());

    let decoded = CommandResponse::<Event>::decode(&buf).unwrap();
    let event = decoded.event.unwrap();
    assert_eq!(event.level, Level::Warning);
    assert_eq!(event.value, "first");
    assert_eq!(event.line, 7);
}

#[test]
fn test_truncated_nested_event_is_rejected() {
    let mut encoded = CommandResponse::new(full_event()).encode_to_vec();
    encoded.pop();

    assert_eq!(
        CommandResponse::<Event>::decode(&encoded),
        Err(DecodeError::UnexpectedEndOfInput)
    );
}

#[test]
fn test_nested_error_surfaces_from_inner_decode() {
    // Event with field 3 (file) sent as a varint
    let mut inner = Vec::new();
    encode_varint_field(3, 1, &mut inner);
    let mut buf = Vec::new();
    encode_bytes_field(1, &inner, &mut buf);

    assert_eq!(
        CommandResponse::<Event>::decode(&buf),
        Err(DecodeError::WireTypeMismatch {
            field_number: 3,
            expected: WireType::LengthDelimited,
            actual: WireType::Varint,
        })
    );
}

#[test]
fn test_failed_merge_keeps_previous_event() {
    let mut response = CommandResponse::new(Event::new(Level::Info, "kept"));

    let mut inner = Vec::new();
    encode_bytes_field(5, b"overwritten", &mut inner);
    encode_varint_field(3, 1, &mut inner);
    let mut buf = Vec::new();
    encode_bytes_field(1, &inner, &mut buf);

    assert!(response.merge(&buf).is_err());
    assert_eq!(response.event.unwrap().value, "kept");
}

#[test]
fn test_unknown_response_fields_are_skipped() {
    let mut buf = Vec::new();
    encode_varint_field(99, 1, &mut buf);
    buf.extend(CommandResponse::new(Event::new(Level::Info, "hello")).encode_to_vec());
    encode_bytes_field(99, b"trailer", &mut buf);

    let decoded = CommandResponse::<Event>::decode(&buf).unwrap();
    assert_eq!(decoded.event.unwrap().value, "hello");
}

// =============================================================================
// Custom Embedded Message
// =============================================================================

/// Opaque payload kept as raw bytes of field 1
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Blob {
    data: Vec<u8>,
}

impl Message for Blob {
    fn encoded_len(&self) -> usize {
        if self.data.is_empty() {
            0
        } else {
            cmdstream::wire::bytes_field_len(1, self.data.len())
        }
    }

    fn encode_raw<B: bytes::BufMut>(&self, buf: &mut B) {
        if !self.data.is_empty() {
            encode_bytes_field(1, &self.data, buf);
        }
    }

    fn merge_field(&mut self, tag: cmdstream::wire::Tag, reader: &mut WireReader<'_>) -> DecodeResult<()> {
        match tag.field_number {
            1 => self.data = reader.read_bytes_field(tag)?.to_vec(),
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }
}

#[test]
fn test_response_with_custom_embedded_message() {
    let response = CommandResponse::new(Blob {
        data: vec![0x00, 0xFF, 0x80],
    });
    let encoded = response.encode_to_vec();
    assert_eq!(encoded, vec![0x0A, 0x05, 0x0A, 0x03, 0x00, 0xFF, 0x80]);
    assert_eq!(CommandResponse::<Blob>::decode(&encoded).unwrap(), response);
}

#[test]
fn test_response_display() {
    let response = CommandResponse::new(Event::new(Level::Warning, "slow shard"));
    assert_eq!(
        response.to_string(),
        "CommandResponse{event:[Warning] slow shard}"
    );
    assert_eq!(
        CommandResponse::<Event>::default().to_string(),
        "CommandResponse{event:nil}"
    );
}
