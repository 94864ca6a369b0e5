//! Transaction assembly.
//!
//! A transaction commits to its operations through a Merkle root carried in
//! the header; the transaction identifier is the multihash of the header's
//! canonical encoding, and every signature is produced over those same
//! header bytes. Computing the identifier is the terminal step of
//! construction: the builder populates the header, applies the caller's
//! override hook, and only then derives the identifier and signs.

use crate::{merkle, operation::Operation, rpc::Client, value::Value, Error};
use bytes::{Buf, BufMut, Bytes};
use mason_codec::{Encode, EncodeSize, Error as CodecError, FixedSize, Read, Write};
use mason_cryptography::{hash, Digest, Hasher, Multihash, PrivateKey, Sha256, Signature};
use tracing::debug;

/// The signed portion of a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionHeader {
    /// Identifier of the chain this transaction is bound to.
    pub chain_id: Bytes,
    /// Resource credits the payer is willing to consume.
    pub rc_limit: u64,
    /// The payer's next nonce, serialized as a typed [Value].
    pub nonce: Bytes,
    /// Merkle root over the digests of the canonical operation encodings.
    pub operation_merkle_root: Multihash,
    /// Address of the account paying for the transaction.
    pub payer: Bytes,
}

impl Write for TransactionHeader {
    fn write(&self, buf: &mut impl BufMut) {
        self.chain_id.write(buf);
        self.rc_limit.write(buf);
        self.nonce.write(buf);
        self.operation_merkle_root.write(buf);
        self.payer.write(buf);
    }
}

impl EncodeSize for TransactionHeader {
    fn encode_size(&self) -> usize {
        self.chain_id.encode_size()
            + self.rc_limit.encode_size()
            + self.nonce.encode_size()
            + Multihash::SIZE
            + self.payer.encode_size()
    }
}

impl Read for TransactionHeader {
    fn read(buf: &mut impl Buf) -> Result<Self, CodecError> {
        let chain_id = Bytes::read(buf)?;
        let rc_limit = u64::read(buf)?;
        let nonce = Bytes::read(buf)?;
        let operation_merkle_root = Multihash::read(buf)?;
        let payer = Bytes::read(buf)?;
        Ok(Self {
            chain_id,
            rc_limit,
            nonce,
            operation_merkle_root,
            payer,
        })
    }
}

/// A transaction ready for submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub header: TransactionHeader,
    pub operations: Vec<Operation>,
    /// Multihash of the canonically-encoded header.
    pub id: Multihash,
    /// One signature per signer, in the order added.
    pub signatures: Vec<Signature>,
}

impl Transaction {
    /// Assembles and signs a transaction from a list of operations.
    ///
    /// The payer's current nonce, available resource credits, and the chain
    /// id are fetched from the node; the transaction's nonce is the fetched
    /// nonce plus one.
    pub fn build(
        client: &impl Client,
        key: &PrivateKey,
        operations: Vec<Operation>,
    ) -> Result<Self, Error> {
        Self::build_with(client, key, operations, |_| {})
    }

    /// Assembles and signs a transaction, letting the caller mutate the
    /// header after default population but before the identifier is
    /// computed and signed.
    ///
    /// This is how intentionally-malformed transactions (out-of-order
    /// nonces, forced resource limits) are produced without duplicating the
    /// builder.
    pub fn build_with(
        client: &impl Client,
        key: &PrivateKey,
        operations: Vec<Operation>,
        overrides: impl FnOnce(&mut TransactionHeader),
    ) -> Result<Self, Error> {
        let payer = key.address();
        let nonce = client.get_account_nonce(&payer).map_err(Error::Network)?;
        let rc_limit = client.get_account_rc(&payer).map_err(Error::Network)?;
        let chain_id = client.get_chain_id().map_err(Error::Network)?;

        let leaves: Vec<Digest> = operations.iter().map(Operation::digest).collect();
        let mut header = TransactionHeader {
            chain_id,
            rc_limit,
            nonce: Value::nonce_bytes(nonce + 1),
            operation_merkle_root: merkle::root(&leaves),
            payer,
        };
        overrides(&mut header);

        let header_bytes = header.encode();
        let id = Multihash::wrap(hash(&header_bytes));
        let signature = key.sign(&header_bytes)?;
        debug!(id = %id, operations = operations.len(), "built transaction");

        Ok(Self {
            header,
            operations,
            id,
            signatures: vec![signature],
        })
    }

    /// Appends an additional signer's signature over the canonical header
    /// encoding. Signature order is the order added.
    pub fn sign(&mut self, key: &PrivateKey) -> Result<(), Error> {
        let signature = key.sign(&self.header.encode())?;
        self.signatures.push(signature);
        Ok(())
    }

    /// Returns the digest of the concatenation of all signatures in
    /// signature-list order — the authorization leaf paired with the
    /// transaction id in a block's transaction Merkle root.
    pub fn signature_digest(&self) -> Digest {
        let mut hasher = Sha256::new();
        for signature in &self.signatures {
            hasher.update(signature.as_ref());
        }
        hasher.finalize()
    }
}

impl Write for Transaction {
    fn write(&self, buf: &mut impl BufMut) {
        self.header.write(buf);
        self.operations.write(buf);
        self.id.write(buf);
        self.signatures.write(buf);
    }
}

impl EncodeSize for Transaction {
    fn encode_size(&self) -> usize {
        self.header.encode_size()
            + self.operations.encode_size()
            + Multihash::SIZE
            + self.signatures.encode_size()
    }
}

impl Read for Transaction {
    fn read(buf: &mut impl Buf) -> Result<Self, CodecError> {
        let header = TransactionHeader::read(buf)?;
        let operations = Vec::<Operation>::read(buf)?;
        let id = Multihash::read(buf)?;
        let signatures = Vec::<Signature>::read(buf)?;
        Ok(Self {
            header,
            operations,
            id,
            signatures,
        })
    }
}
