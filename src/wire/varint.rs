//! Varint encoding
//!
//! Least-significant 7-bit group first, continuation bit on all but the last byte.

use bytes::BufMut;

/// A u64 never needs more than 10 groups of 7 bits
pub const MAX_VARINT_LEN: usize = 10;

/// Encode `value` as a minimal varint
pub fn encode_varint<B: BufMut>(mut value: u64, buf: &mut B) {
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Number of bytes `encode_varint` writes for `value`
pub fn varint_len(value: u64) -> usize {
    // bits needed, with 0 counted as one bit
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}
