//! Codec implementations for common types
//!
//! Unsigned integers encode as big-endian fixed-width values. Byte strings
//! and vectors carry a varint length prefix. `Option` presence is a single
//! tag byte. These rules keep every encoding canonical: no field-order
//! ambiguity and no representation choices left to the writer.

use crate::{
    codec::{FixedSize, Read, Write},
    error::Error,
    varint, EncodeSize,
};
use bytes::{Buf, BufMut, Bytes};

macro_rules! impl_uint {
    ($type:ty, $get:ident, $put:ident) => {
        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                buf.$put(*self);
            }
        }

        impl Read for $type {
            #[inline]
            fn read(buf: &mut impl Buf) -> Result<Self, Error> {
                if buf.remaining() < Self::SIZE {
                    return Err(Error::EndOfBuffer);
                }
                Ok(buf.$get())
            }
        }

        impl FixedSize for $type {
            const SIZE: usize = std::mem::size_of::<$type>();
        }
    };
}

impl_uint!(u8, get_u8, put_u8);
impl_uint!(u16, get_u16, put_u16);
impl_uint!(u32, get_u32, put_u32);
impl_uint!(u64, get_u64, put_u64);

impl Write for bool {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u8(if *self { 1 } else { 0 });
    }
}

impl Read for bool {
    #[inline]
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        match u8::read(buf)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::InvalidBool),
        }
    }
}

impl FixedSize for bool {
    const SIZE: usize = 1;
}

impl<const N: usize> Write for [u8; N] {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_slice(self);
    }
}

impl<const N: usize> Read for [u8; N] {
    #[inline]
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        if buf.remaining() < N {
            return Err(Error::EndOfBuffer);
        }
        let mut array = [0u8; N];
        buf.copy_to_slice(&mut array);
        Ok(array)
    }
}

impl<const N: usize> FixedSize for [u8; N] {
    const SIZE: usize = N;
}

/// Reads a varint length prefix, bounded by the bytes actually remaining in
/// the buffer so untrusted input cannot trigger an oversized allocation.
fn read_len(buf: &mut impl Buf) -> Result<usize, Error> {
    let len = varint::read(buf)?;
    if len > buf.remaining() as u64 {
        return Err(Error::InvalidLength(len));
    }
    Ok(len as usize)
}

impl Write for Bytes {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        varint::write(self.len() as u64, buf);
        buf.put_slice(self);
    }
}

impl Read for Bytes {
    #[inline]
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        let len = read_len(buf)?;
        Ok(buf.copy_to_bytes(len))
    }
}

impl EncodeSize for Bytes {
    #[inline]
    fn encode_size(&self) -> usize {
        varint::size(self.len() as u64) + self.len()
    }
}

impl<T: Write> Write for Vec<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        varint::write(self.len() as u64, buf);
        for item in self {
            item.write(buf);
        }
    }
}

impl<T: Read> Read for Vec<T> {
    #[inline]
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        // Bounded by the remaining byte count: every element consumes at
        // least one byte, so a hostile count cannot reserve more than that.
        let len = read_len(buf)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(T::read(buf)?);
        }
        Ok(items)
    }
}

impl<T: EncodeSize> EncodeSize for Vec<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        varint::size(self.len() as u64)
            + self.iter().map(EncodeSize::encode_size).sum::<usize>()
    }
}

impl<T: Write> Write for Option<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        match self {
            Some(inner) => {
                buf.put_u8(1);
                inner.write(buf);
            }
            None => buf.put_u8(0),
        }
    }
}

impl<T: Read> Read for Option<T> {
    #[inline]
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        match u8::read(buf)? {
            0 => Ok(None),
            1 => Ok(Some(T::read(buf)?)),
            _ => Err(Error::InvalidBool),
        }
    }
}

impl<T: EncodeSize> EncodeSize for Option<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        match self {
            Some(inner) => 1 + inner.encode_size(),
            None => 1,
        }
    }
}
