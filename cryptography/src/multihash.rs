//! Self-describing digest wrapper.
//!
//! Identifiers on the wire carry an algorithm tag and a length byte ahead of
//! the raw digest, so they remain verifiable without out-of-band knowledge
//! of the hash algorithm used. The only algorithm in use is SHA2-256
//! (tag `0x12`, length `0x20`).

use crate::{hex, sha256::DIGEST_LENGTH, Digest, Error};
use bytes::{Buf, BufMut, Bytes};
use mason_codec::{Error as CodecError, FixedSize, Read, Write};
use std::fmt::{Debug, Display};

/// Multihash algorithm tag for SHA2-256.
pub const SHA2_256: u8 = 0x12;

/// Encoded length of a SHA2-256 multihash: tag, length byte, digest.
pub const ENCODED_LENGTH: usize = 2 + DIGEST_LENGTH;

/// A digest prefixed with its algorithm tag and length.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Multihash(Digest);

impl Multihash {
    /// Wraps a raw digest with the SHA2-256 algorithm tag.
    pub fn wrap(digest: Digest) -> Self {
        Self(digest)
    }

    /// Returns the raw digest without the self-describing prefix.
    pub fn digest(&self) -> Digest {
        self.0
    }

    /// Serializes to the `[tag][length][digest]` wire form.
    pub fn encode(&self) -> Bytes {
        let mut out = Vec::with_capacity(ENCODED_LENGTH);
        out.push(SHA2_256);
        out.push(DIGEST_LENGTH as u8);
        out.extend_from_slice(self.0.as_ref());
        out.into()
    }

    /// Parses the `[tag][length][digest]` wire form, validating the tag and
    /// length against the payload.
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < 2 {
            return Err(Error::MalformedDigest("truncated"));
        }
        if bytes[0] != SHA2_256 {
            return Err(Error::MalformedDigest("unknown algorithm tag"));
        }
        if bytes[1] as usize != DIGEST_LENGTH {
            return Err(Error::MalformedDigest("unexpected digest length"));
        }
        if bytes.len() != ENCODED_LENGTH {
            return Err(Error::MalformedDigest("length does not match payload"));
        }
        let digest = Digest::try_from(&bytes[2..])?;
        Ok(Self(digest))
    }
}

impl From<Digest> for Multihash {
    fn from(digest: Digest) -> Self {
        Self::wrap(digest)
    }
}

impl Write for Multihash {
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u8(SHA2_256);
        buf.put_u8(DIGEST_LENGTH as u8);
        self.0.write(buf);
    }
}

impl Read for Multihash {
    fn read(buf: &mut impl Buf) -> Result<Self, CodecError> {
        let raw = <[u8; ENCODED_LENGTH]>::read(buf)?;
        Self::decode(&raw).map_err(|_| CodecError::UnknownVariant("multihash", raw[0]))
    }
}

impl FixedSize for Multihash {
    const SIZE: usize = ENCODED_LENGTH;
}

impl Debug for Multihash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.encode()))
    }
}

impl Display for Multihash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.encode()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash;

    #[test]
    fn test_round_trip() {
        let digest = hash(b"hello world");
        let wrapped = Multihash::wrap(digest);
        let encoded = wrapped.encode();
        assert_eq!(encoded.len(), ENCODED_LENGTH);
        assert_eq!(encoded[0], SHA2_256);
        assert_eq!(encoded[1] as usize, DIGEST_LENGTH);
        assert_eq!(&encoded[2..], digest.as_ref());

        let decoded = Multihash::decode(&encoded).unwrap();
        assert_eq!(decoded, wrapped);
        assert_eq!(decoded.digest(), digest);
    }

    #[test]
    fn test_known_encoding() {
        // multihash of sha256("")
        let expected = "1220e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
        assert_eq!(hex(&Multihash::wrap(hash(&[])).encode()), expected);
    }

    #[test]
    fn test_decode_rejects_bad_tag() {
        let mut encoded = Multihash::wrap(hash(b"x")).encode().to_vec();
        encoded[0] = 0x13;
        assert_eq!(
            Multihash::decode(&encoded),
            Err(Error::MalformedDigest("unknown algorithm tag"))
        );
    }

    #[test]
    fn test_decode_rejects_bad_length_byte() {
        let mut encoded = Multihash::wrap(hash(b"x")).encode().to_vec();
        encoded[1] = 0x1f;
        assert_eq!(
            Multihash::decode(&encoded),
            Err(Error::MalformedDigest("unexpected digest length"))
        );
    }

    #[test]
    fn test_decode_rejects_truncated_payload() {
        let encoded = Multihash::wrap(hash(b"x")).encode();
        assert_eq!(
            Multihash::decode(&encoded[..10]),
            Err(Error::MalformedDigest("length does not match payload"))
        );
        assert_eq!(
            Multihash::decode(&encoded[..1]),
            Err(Error::MalformedDigest("truncated"))
        );
    }
}
