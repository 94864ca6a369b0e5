//! Typed on-chain values.
//!
//! Account nonces travel as a tagged value serialized through the canonical
//! codec rather than a raw fixed-width integer, so the nonce representation
//! can evolve without changing the wire contract.

use bytes::{Buf, BufMut, Bytes};
use mason_codec::{varint, DecodeExt, Encode, EncodeSize, Error as CodecError, Read, Write};

const UINT64: u8 = 0;

/// A tagged value as serialized on-chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value {
    /// An unsigned 64-bit integer, varint-encoded.
    Uint64(u64),
}

impl Value {
    /// Serializes a nonce counter to its wire form.
    pub fn nonce_bytes(nonce: u64) -> Bytes {
        Value::Uint64(nonce).encode()
    }

    /// Parses a nonce counter from its wire form.
    pub fn nonce_from_bytes(bytes: &[u8]) -> Result<u64, CodecError> {
        let Value::Uint64(nonce) = Value::decode(bytes)?;
        Ok(nonce)
    }
}

impl Write for Value {
    fn write(&self, buf: &mut impl BufMut) {
        match self {
            Value::Uint64(value) => {
                buf.put_u8(UINT64);
                varint::write(*value, buf);
            }
        }
    }
}

impl EncodeSize for Value {
    fn encode_size(&self) -> usize {
        match self {
            Value::Uint64(value) => 1 + varint::size(*value),
        }
    }
}

impl Read for Value {
    fn read(buf: &mut impl Buf) -> Result<Self, CodecError> {
        match u8::read(buf)? {
            UINT64 => Ok(Value::Uint64(varint::read(buf)?)),
            tag => Err(CodecError::UnknownVariant("value", tag)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_round_trip() {
        for nonce in [0u64, 1, 127, 128, 300, u64::MAX] {
            let bytes = Value::nonce_bytes(nonce);
            assert_eq!(Value::nonce_from_bytes(&bytes).unwrap(), nonce);
        }
    }

    #[test]
    fn test_nonce_is_tagged() {
        let bytes = Value::nonce_bytes(1);
        assert_eq!(bytes.as_ref(), &[UINT64, 0x01]);
    }

    #[test]
    fn test_unknown_tag() {
        assert!(matches!(
            Value::decode(Bytes::from_static(&[0x07, 0x01])),
            Err(CodecError::UnknownVariant("value", 0x07))
        ));
    }
}
