//! Message Model Module
//!
//! Concrete message shapes expressed in terms of the wire codec.
//!
//! ## Messages
//! ```text
//! CommandRequest   1: args            (string, repeated)
//!                  2: action_timeout  (int64, nanoseconds)
//!
//! CommandResponse  1: event           (embedded message)
//!
//! Event            1: time            (embedded Time)
//!                  2: level           (enum)
//!                  3: file            (string)
//!                  4: line            (int64)
//!                  5: value           (string)
//! ```
//!
//! Fields holding their zero value are not encoded.

mod request;
mod response;
mod event;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{DecodeError, DecodeResult};
use crate::wire::{Tag, WireReader};

pub use request::CommandRequest;
pub use response::CommandResponse;
pub use event::{Event, Level, Time};

/// A value the codec can size, encode and decode
///
/// Implementors supply the per-field parts; the decode loop shared by every
/// message lives in `merge`.
pub trait Message: Default + Clone + Send + Sized {
    /// Exact number of bytes `encode_raw` writes
    fn encoded_len(&self) -> usize;

    /// Write every non-default field
    fn encode_raw<B: BufMut>(&self, buf: &mut B);

    /// Decode one field whose tag has already been read
    ///
    /// Unknown field numbers must be handed to `WireReader::skip_field`.
    fn merge_field(&mut self, tag: Tag, reader: &mut WireReader<'_>) -> DecodeResult<()>;

    fn encode_to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_raw(&mut buf);
        buf
    }

    fn encode_to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_raw(&mut buf);
        buf.freeze()
    }

    /// Decode `buf` on top of the current contents
    ///
    /// Repeated fields append, scalar fields take the last occurrence.
    fn merge(&mut self, buf: &[u8]) -> DecodeResult<()> {
        let mut reader = WireReader::new(buf);
        while !reader.is_empty() {
            let tag = reader.read_tag()?;
            self.merge_field(tag, &mut reader)?;
        }

        if reader.position() > reader.len() {
            return Err(DecodeError::UnexpectedEndOfInput);
        }
        Ok(())
    }

    fn decode(buf: &[u8]) -> DecodeResult<Self> {
        let mut message = Self::default();
        message.merge(buf)?;
        Ok(message)
    }
}
