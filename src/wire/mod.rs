//! Wire Codec Module
//!
//! Tag/length/value encoding of message fields.
//!
//! ## Field Layout
//! ```text
//! ┌───────────────────────────┬──────────────────────────────┐
//! │ Tag (varint)              │ Value (depends on wire type) │
//! │ (field_number << 3) | wt  │                              │
//! └───────────────────────────┴──────────────────────────────┘
//! ```
//!
//! ### Wire Types
//! - 0: VARINT           - 7 bits per byte, high bit = continuation
//! - 1: FIXED64          - 8 bytes, little endian
//! - 2: LENGTH_DELIMITED - varint length + raw bytes
//! - 3: START_GROUP      - legacy, skipped only
//! - 4: END_GROUP        - legacy, terminates a skipped group
//! - 5: FIXED32          - 4 bytes, little endian

mod varint;
mod tag;
mod reader;
mod writer;
mod skip;

pub use varint::{encode_varint, varint_len, MAX_VARINT_LEN};
pub use tag::{Tag, WireType, MAX_FIELD_NUMBER};
pub use reader::WireReader;
pub use writer::{
    bytes_field_len, encode_bytes_field, encode_int32_field, encode_int64_field,
    encode_message_field, encode_string_field, encode_tag, encode_varint_field,
    int32_field_len, int64_field_len, message_field_len, tag_len,
};
pub use skip::MAX_GROUP_DEPTH;
