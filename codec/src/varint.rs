//! Variable-length integer encoding and decoding
//!
//! Implements Google's Protocol Buffers unsigned varint encoding: each byte
//! carries 7 bits of data and a continuation bit. Values are limited to
//! `u64`, the widest integer that appears on the wire.

use crate::error::Error;
use bytes::{Buf, BufMut};

const DATA_BITS_MASK: u8 = 0x7F;
const CONTINUATION_BIT_MASK: u8 = 0x80;

/// The maximum number of bytes a `u64` varint can occupy.
pub const MAX_LEN: usize = 10;

/// Encodes an unsigned 64-bit integer as a varint.
pub fn write(value: u64, buf: &mut impl BufMut) {
    let mut val = value;
    while val >= CONTINUATION_BIT_MASK as u64 {
        buf.put_u8((val as u8) | CONTINUATION_BIT_MASK);
        val >>= 7;
    }
    buf.put_u8(val as u8);
}

/// Decodes an unsigned 64-bit integer from a varint.
pub fn read(buf: &mut impl Buf) -> Result<u64, Error> {
    let mut result: u64 = 0;
    for index in 0..MAX_LEN {
        if !buf.has_remaining() {
            return Err(Error::EndOfBuffer);
        }
        let byte = buf.get_u8();

        // The tenth byte may only contribute the single remaining bit.
        if index == MAX_LEN - 1 && byte > 0x01 {
            return Err(Error::InvalidVarint);
        }
        result |= ((byte & DATA_BITS_MASK) as u64) << (7 * index);

        if byte & CONTINUATION_BIT_MASK == 0 {
            return Ok(result);
        }
    }
    Err(Error::InvalidVarint)
}

/// Calculates the number of bytes needed to encode a value as a varint.
pub fn size(value: u64) -> usize {
    let data_bits = (64 - value.leading_zeros()) as usize;
    usize::max(1, data_bits.div_ceil(7))
}
