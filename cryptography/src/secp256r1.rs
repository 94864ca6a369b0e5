//! Recoverable ECDSA over secp256r1.
//!
//! Public keys are kept in compressed form (SEC 1, Version 2.0, Section
//! 2.3.3). Signatures are deterministic per [RFC 6979](https://datatracker.ietf.org/doc/html/rfc6979),
//! normalized to a low `s` value, and carry a recovery byte so the signing
//! public key can be recovered from the signed payload — block producers are
//! identified this way from the block identifier alone.
//!
//! # Example
//! ```rust
//! use mason_cryptography::PrivateKey;
//! use rand::rngs::OsRng;
//!
//! let key = PrivateKey::from_rng(&mut OsRng);
//! let signature = key.sign(b"hello, world!").unwrap();
//! assert!(key.public_key().verify(b"hello, world!", &signature));
//! ```

use crate::{from_hex, hex, Digest, Error};
use ::ecdsa::RecoveryId;
use bytes::{Buf, BufMut, Bytes};
use mason_codec::{Error as CodecError, FixedSize, Read, Write};
use p256::{
    ecdsa::{
        signature::{hazmat::PrehashSigner, Signer, Verifier},
        Signature as EcdsaSignature, SigningKey, VerifyingKey,
    },
    elliptic_curve::scalar::IsHigh,
};
use rand::{rngs::StdRng, CryptoRng, Rng, SeedableRng};
use std::fmt::{Debug, Display};

/// Length of an encoded private key scalar.
pub const PRIVATE_KEY_LENGTH: usize = 32;
/// Length of a compressed public key: Y-parity || X.
pub const PUBLIC_KEY_LENGTH: usize = 33;
/// Length of a recoverable signature: recovery byte || R || S.
pub const SIGNATURE_LENGTH: usize = 65;

/// A secp256r1 signing key.
#[derive(Clone)]
pub struct PrivateKey {
    signer: SigningKey,
    verifier: VerifyingKey,
}

impl PrivateKey {
    /// Create a fresh [PrivateKey] using the supplied RNG.
    pub fn from_rng<R: Rng + CryptoRng>(rng: &mut R) -> Self {
        let signer = SigningKey::random(rng);
        let verifier = signer.verifying_key().to_owned();
        Self { signer, verifier }
    }

    /// Create a [PrivateKey] from a seed.
    ///
    /// # Warning
    ///
    /// This function is insecure and should only be used for examples
    /// and testing.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::from_rng(&mut rng)
    }

    /// Parse a [PrivateKey] from a raw 32-byte scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(Error::InvalidPrivateKey);
        }
        let signer = SigningKey::from_slice(bytes).map_err(|_| Error::InvalidPrivateKey)?;
        let verifier = signer.verifying_key().to_owned();
        Ok(Self { signer, verifier })
    }

    /// Parse a [PrivateKey] from a hex-encoded 32-byte scalar.
    pub fn from_hex(encoded: &str) -> Result<Self, Error> {
        Self::from_bytes(&from_hex(encoded)?)
    }

    /// Returns the raw private key scalar.
    pub fn to_bytes(&self) -> Bytes {
        self.signer.to_bytes().to_vec().into()
    }

    /// Returns the [PublicKey] corresponding to this key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            verifier: self.verifier,
        }
    }

    /// Returns the account address derived from this key's public key.
    pub fn address(&self) -> Bytes {
        self.public_key().address()
    }

    /// Sign a message, returning a recoverable signature.
    ///
    /// The message is hashed internally (SHA-256) before signing.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, Error> {
        let signature: EcdsaSignature = self.signer.sign(message);
        let signature = signature.normalize_s().unwrap_or(signature);
        let recovery = RecoveryId::trial_recovery_from_msg(&self.verifier, message, &signature)
            .map_err(|_| Error::SigningFailed)?;
        Ok(Signature::assemble(recovery, &signature))
    }

    /// Sign an already-computed digest, returning a recoverable signature.
    ///
    /// Used where the signed payload is itself a digest (e.g. a block
    /// identifier) and must not be hashed a second time implicitly by the
    /// caller's choice of message framing.
    pub fn sign_digest(&self, digest: &Digest) -> Result<Signature, Error> {
        let signature: EcdsaSignature = self
            .signer
            .sign_prehash(digest.as_ref())
            .map_err(|_| Error::SigningFailed)?;
        let signature = signature.normalize_s().unwrap_or(signature);
        let recovery =
            RecoveryId::trial_recovery_from_prehash(&self.verifier, digest.as_ref(), &signature)
                .map_err(|_| Error::SigningFailed)?;
        Ok(Signature::assemble(recovery, &signature))
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        write!(f, "PrivateKey({:?})", self.public_key())
    }
}

/// A secp256r1 public key in compressed form.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    verifier: VerifyingKey,
}

impl PublicKey {
    /// Parse a [PublicKey] from its compressed SEC 1 encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(Error::InvalidPublicKey);
        }
        let verifier =
            VerifyingKey::from_sec1_bytes(bytes).map_err(|_| Error::InvalidPublicKey)?;
        Ok(Self { verifier })
    }

    /// Returns the compressed SEC 1 encoding.
    pub fn to_bytes(&self) -> Bytes {
        self.verifier.to_encoded_point(true).to_bytes().to_vec().into()
    }

    /// Derives the account address: the SHA-256 digest of the compressed
    /// public key encoding.
    pub fn address(&self) -> Bytes {
        Bytes::copy_from_slice(crate::hash(&self.to_bytes()).as_ref())
    }

    /// Verify a recoverable signature over a message.
    ///
    /// Signatures with a high `s` value are rejected.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(parsed) = signature.parse() else {
            return false;
        };
        if parsed.s().is_high().into() {
            return false;
        }
        self.verifier.verify(message, &parsed).is_ok()
    }

    /// Recover the signing [PublicKey] from a message and signature.
    pub fn recover(message: &[u8], signature: &Signature) -> Result<Self, Error> {
        let parsed = signature.parse()?;
        let verifier =
            VerifyingKey::recover_from_msg(message, &parsed, signature.recovery_id()?)
                .map_err(|_| Error::InvalidSignature)?;
        Ok(Self { verifier })
    }

    /// Recover the signing [PublicKey] from a digest and signature produced
    /// by [PrivateKey::sign_digest].
    pub fn recover_digest(digest: &Digest, signature: &Signature) -> Result<Self, Error> {
        let parsed = signature.parse()?;
        let verifier = VerifyingKey::recover_from_prehash(
            digest.as_ref(),
            &parsed,
            signature.recovery_id()?,
        )
        .map_err(|_| Error::InvalidSignature)?;
        Ok(Self { verifier })
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.to_bytes()))
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.to_bytes()))
    }
}

/// A recoverable ECDSA signature: recovery byte, then `R || S`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    fn assemble(recovery: RecoveryId, signature: &EcdsaSignature) -> Self {
        let mut raw = [0u8; SIGNATURE_LENGTH];
        raw[0] = recovery.to_byte();
        raw[1..].copy_from_slice(&signature.to_bytes());
        Self(raw)
    }

    /// Parse a [Signature] from its 65-byte wire form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let raw: [u8; SIGNATURE_LENGTH] =
            bytes.try_into().map_err(|_| Error::InvalidSignature)?;
        if raw[0] > 3 {
            return Err(Error::InvalidSignature);
        }
        Ok(Self(raw))
    }

    fn parse(&self) -> Result<EcdsaSignature, Error> {
        EcdsaSignature::from_slice(&self.0[1..]).map_err(|_| Error::InvalidSignature)
    }

    fn recovery_id(&self) -> Result<RecoveryId, Error> {
        RecoveryId::from_byte(self.0[0]).ok_or(Error::InvalidSignature)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Write for Signature {
    fn write(&self, buf: &mut impl BufMut) {
        self.0.write(buf);
    }
}

impl Read for Signature {
    fn read(buf: &mut impl Buf) -> Result<Self, CodecError> {
        let raw = <[u8; SIGNATURE_LENGTH]>::read(buf)?;
        if raw[0] > 3 {
            return Err(CodecError::UnknownVariant("signature recovery", raw[0]));
        }
        Ok(Self(raw))
    }
}

impl FixedSize for Signature {
    const SIZE: usize = SIGNATURE_LENGTH;
}

impl Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.0))
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash;
    use rand::rngs::OsRng;

    // FIPS 186-4 keypair vector: qy ends in an odd byte, so the compressed
    // encoding carries the 0x03 prefix.
    const VECTOR_PRIVATE: &str =
        "c9806898a0334916c860748880a541f093b579a9b1f32934d86c363c39800357";
    const VECTOR_PUBLIC: &str =
        "03d0720dc691aa80096ba32fed1cb97c2b620690d06de0317b8618d5ce65eb728f";

    #[test]
    fn test_keypair_vector() {
        let key = PrivateKey::from_hex(VECTOR_PRIVATE).unwrap();
        assert_eq!(hex(&key.public_key().to_bytes()), VECTOR_PUBLIC);
        assert_eq!(hex(&key.to_bytes()), VECTOR_PRIVATE);
    }

    // RFC 6979 A.2.5 vector for P-256 with SHA-256, message "sample",
    // with `s` normalized to the lower half of the curve order.
    #[test]
    fn test_rfc6979() {
        let key = PrivateKey::from_hex(
            "c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721",
        )
        .unwrap();
        let signature = key.sign(b"sample").unwrap();
        assert_eq!(
            hex(&signature.as_ref()[1..]),
            "efd48b2aacb6a8fd1140dd9cd45e81d69d2c877b56aaf991c34d0ea84eaf3716\
             0834e36ad29a83bf2bc9385e491d6099c8fdf9d1ed67aa7ea5f51f93782857a9",
        );
    }

    #[test]
    fn test_sign_verify() {
        let key = PrivateKey::from_rng(&mut OsRng);
        let message = b"hello, world!";
        let signature = key.sign(message).unwrap();
        assert!(key.public_key().verify(message, &signature));
        assert!(!key.public_key().verify(b"hello, world?", &signature));
    }

    #[test]
    fn test_sign_twice_both_verify() {
        let key = PrivateKey::from_seed(42);
        let message = b"same header, same key";
        let first = key.sign(message).unwrap();
        let second = key.sign(message).unwrap();
        assert!(key.public_key().verify(message, &first));
        assert!(key.public_key().verify(message, &second));
    }

    #[test]
    fn test_recover() {
        let key = PrivateKey::from_seed(7);
        let message = b"recover me";
        let signature = key.sign(message).unwrap();
        let recovered = PublicKey::recover(message, &signature).unwrap();
        assert_eq!(recovered, key.public_key());
    }

    #[test]
    fn test_recover_digest() {
        let key = PrivateKey::from_seed(8);
        let digest = hash(b"block header bytes");
        let signature = key.sign_digest(&digest).unwrap();
        let recovered = PublicKey::recover_digest(&digest, &signature).unwrap();
        assert_eq!(recovered, key.public_key());
        // A different digest must not recover the same key.
        let other = hash(b"different header");
        match PublicKey::recover_digest(&other, &signature) {
            Ok(recovered) => assert_ne!(recovered, key.public_key()),
            Err(err) => assert_eq!(err, Error::InvalidSignature),
        }
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let key = PrivateKey::from_seed(9);
        let message = b"tamper";
        let signature = key.sign(message).unwrap();
        let mut raw = signature.as_ref().to_vec();
        raw[40] ^= 0x01;
        let tampered = Signature::from_bytes(&raw).unwrap();
        assert!(!key.public_key().verify(message, &tampered));
    }

    #[test]
    fn test_signature_wire_validation() {
        let key = PrivateKey::from_seed(10);
        let signature = key.sign(b"wire").unwrap();
        let mut raw = signature.as_ref().to_vec();
        raw[0] = 4;
        assert_eq!(
            Signature::from_bytes(&raw),
            Err(Error::InvalidSignature)
        );
        raw.push(0);
        assert_eq!(
            Signature::from_bytes(&raw),
            Err(Error::InvalidSignature)
        );
    }

    #[test]
    fn test_address_is_digest_of_compressed_key() {
        let key = PrivateKey::from_hex(VECTOR_PRIVATE).unwrap();
        let expected = hash(&from_hex(VECTOR_PUBLIC).unwrap());
        assert_eq!(key.address(), Bytes::copy_from_slice(expected.as_ref()));
        assert_eq!(key.address().len(), 32);
    }
}
