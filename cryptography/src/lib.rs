//! Digests, self-describing multihashes, and recoverable ECDSA signatures.
//!
//! Everything a client needs to identify and authorize chain structures:
//! SHA-256 hashing behind the [Hasher] trait, the multihash wrapper that
//! makes identifiers verifiable without out-of-band knowledge of the hash
//! algorithm, and a secp256r1 signing scheme whose signatures allow
//! public-key recovery.

use thiserror::Error;

pub mod multihash;
pub mod secp256r1;
pub mod sha256;

pub use secp256r1::{PrivateKey, PublicKey, Signature};
pub use multihash::Multihash;
pub use sha256::{hash, Digest, Sha256};

/// Errors that can occur when interacting with cryptographic primitives.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("invalid digest length")]
    InvalidDigestLength,
    #[error("malformed digest: {0}")]
    MalformedDigest(&'static str),
    #[error("invalid private key")]
    InvalidPrivateKey,
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("signing failed")]
    SigningFailed,
    #[error("invalid hex")]
    InvalidHex,
}

/// Interface for incremental hashing.
///
/// Implementations are not required to preserve hasher state across `clone`;
/// callers should `reset` a cloned hasher before use.
pub trait Hasher: Clone + Send + Sync + 'static {
    /// Digest generated by the hasher.
    type Digest;

    /// Create a new hasher.
    fn new() -> Self;

    /// Append message to previously recorded data.
    fn update(&mut self, message: &[u8]);

    /// Hash all recorded data and reset the hasher to the initial state.
    fn finalize(&mut self) -> Self::Digest;

    /// Reset the hasher without generating a hash.
    fn reset(&mut self);
}

/// Converts raw bytes to a lowercase hex string.
pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Converts a hex string to raw bytes.
pub fn from_hex(hex: &str) -> Result<Vec<u8>, Error> {
    if hex.len() % 2 != 0 {
        return Err(Error::InvalidHex);
    }
    (0..hex.len())
        .step_by(2)
        .map(|index| u8::from_str_radix(&hex[index..index + 2], 16).map_err(|_| Error::InvalidHex))
        .collect()
}
