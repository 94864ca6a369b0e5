//! Core codec traits

use crate::error::Error;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Trait for types that can be written (encoded) to a buffer.
///
/// Implementations must write fields in a fixed order so that the output is
/// a deterministic function of the value.
pub trait Write {
    /// Encodes this value by writing to a buffer.
    fn write(&self, buf: &mut impl BufMut);
}

/// Trait for types that report the exact length of their encoding.
pub trait EncodeSize {
    /// Returns the number of bytes `write()` will produce for this value.
    fn encode_size(&self) -> usize;
}

/// Trait for types with a known, constant encoded length.
pub trait FixedSize {
    /// The length of the encoded value.
    const SIZE: usize;
}

// Every fixed-size type knows its encoded size.
impl<T: FixedSize> EncodeSize for T {
    fn encode_size(&self) -> usize {
        Self::SIZE
    }
}

/// Trait for types that can be encoded to a standalone buffer.
pub trait Encode: Write + EncodeSize {
    /// Encodes a value to a frozen buffer.
    ///
    /// Panics if the `write` implementation does not produce exactly
    /// `encode_size()` bytes.
    ///
    /// (Provided method).
    fn encode(&self) -> Bytes {
        let size = self.encode_size();
        let mut buffer = BytesMut::with_capacity(size);
        self.write(&mut buffer);
        assert_eq!(buffer.len(), size, "write() did not write expected bytes");
        buffer.freeze()
    }
}

// Automatically implement `Encode` for anything writable with a known size.
impl<T: Write + EncodeSize> Encode for T {}

/// Trait for types that can be read (decoded) from a buffer.
pub trait Read: Sized {
    /// Reads a value from the buffer, consuming the necessary bytes.
    ///
    /// Returns an error if decoding fails (e.g., invalid data, not enough
    /// bytes remaining).
    fn read(buf: &mut impl Buf) -> Result<Self, Error>;
}

/// Trait for types that can be decoded from a buffer, ensuring the entire
/// buffer is consumed.
pub trait Decode: Read {
    /// Decodes a value from a buffer, ensuring the buffer is fully consumed.
    ///
    /// (Provided method).
    fn decode_buf(mut buf: impl Buf) -> Result<Self, Error> {
        let result = Self::read(&mut buf)?;
        let remaining = buf.remaining();
        if remaining > 0 {
            return Err(Error::ExtraData(remaining));
        }
        Ok(result)
    }
}

// Automatically implement `Decode` for types that implement `Read`.
impl<T: Read> Decode for T {}

/// Extension trait providing an ergonomic full-buffer decode.
pub trait DecodeExt: Decode {
    /// Decodes a value from a buffer, consuming it entirely.
    fn decode(buf: impl Buf) -> Result<Self, Error> {
        Self::decode_buf(buf)
    }
}

// Automatically implement `DecodeExt` for types that implement `Decode`.
impl<T: Decode> DecodeExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_insufficient_buffer() {
        let mut reader = Bytes::from_static(&[0x01, 0x02]);
        assert!(matches!(u32::read(&mut reader), Err(Error::EndOfBuffer)));
    }

    #[test]
    fn test_extra_data() {
        let encoded = Bytes::from_static(&[0x01, 0x02]);
        assert!(matches!(u8::decode(encoded), Err(Error::ExtraData(1))));
    }

    #[test]
    fn test_encode_exact() {
        let value = 42u32;
        let encoded = value.encode();
        assert_eq!(encoded.len(), u32::SIZE);
        let decoded = u32::decode(encoded).unwrap();
        assert_eq!(value, decoded);
    }
}
