//! Block assembly.
//!
//! A block's transaction Merkle root interleaves two leaves per
//! transaction: the raw digest behind the transaction id, then the digest
//! of that transaction's concatenated signatures. The root therefore
//! commits to both transaction content and its authorization at once.
//! Signing is a separate, explicit step — tests intentionally submit
//! unsigned or wrongly-signed blocks.

use crate::{clock::Clock, merkle, rpc::Client, transaction::Transaction, Error};
use bytes::{Buf, BufMut, Bytes};
use mason_codec::{Encode, EncodeSize, Error as CodecError, FixedSize, Read, Write};
use mason_cryptography::{hash, Digest, Multihash, PrivateKey, PublicKey, Signature};
use tracing::debug;

/// The signed portion of a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    /// Identifier of the previous block.
    pub previous: Multihash,
    /// Height of this block: previous height plus one.
    pub height: u64,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// State Merkle root as of the previous block.
    pub previous_state_merkle_root: Bytes,
    /// Merkle root over interleaved transaction id and signature digests.
    pub transaction_merkle_root: Multihash,
    /// Address of the block producer.
    pub signer: Bytes,
}

impl Write for BlockHeader {
    fn write(&self, buf: &mut impl BufMut) {
        self.previous.write(buf);
        self.height.write(buf);
        self.timestamp.write(buf);
        self.previous_state_merkle_root.write(buf);
        self.transaction_merkle_root.write(buf);
        self.signer.write(buf);
    }
}

impl EncodeSize for BlockHeader {
    fn encode_size(&self) -> usize {
        Multihash::SIZE
            + self.height.encode_size()
            + self.timestamp.encode_size()
            + self.previous_state_merkle_root.encode_size()
            + Multihash::SIZE
            + self.signer.encode_size()
    }
}

impl Read for BlockHeader {
    fn read(buf: &mut impl Buf) -> Result<Self, CodecError> {
        let previous = Multihash::read(buf)?;
        let height = u64::read(buf)?;
        let timestamp = u64::read(buf)?;
        let previous_state_merkle_root = Bytes::read(buf)?;
        let transaction_merkle_root = Multihash::read(buf)?;
        let signer = Bytes::read(buf)?;
        Ok(Self {
            previous,
            height,
            timestamp,
            previous_state_merkle_root,
            transaction_merkle_root,
            signer,
        })
    }
}

/// A block ready for submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
    /// Multihash of the canonically-encoded header.
    pub id: Multihash,
    /// The producer's signature, absent until [Block::sign] is called.
    pub signature: Option<Signature>,
}

impl Block {
    /// Assembles an unsigned block from a list of transactions, on top of
    /// the node's current head.
    pub fn build(
        client: &impl Client,
        clock: &impl Clock,
        transactions: Vec<Transaction>,
        producer: &PublicKey,
    ) -> Result<Self, Error> {
        let head = client.get_head_info().map_err(Error::Network)?;

        let mut leaves: Vec<Digest> = Vec::with_capacity(transactions.len() * 2);
        for transaction in &transactions {
            leaves.push(transaction.id.digest());
            leaves.push(transaction.signature_digest());
        }

        let header = BlockHeader {
            previous: head.id,
            height: head.height + 1,
            timestamp: clock.epoch_millis(),
            previous_state_merkle_root: head.state_merkle_root,
            transaction_merkle_root: merkle::root(&leaves),
            signer: producer.address(),
        };
        let id = Multihash::wrap(hash(&header.encode()));
        debug!(id = %id, height = header.height, transactions = transactions.len(), "built block");

        Ok(Self {
            header,
            transactions,
            id,
            signature: None,
        })
    }

    /// Signs the block with the producer key: a recoverable signature over
    /// the raw digest behind the block identifier, so the producer's public
    /// key can be recovered from the identifier alone.
    pub fn sign(&mut self, key: &PrivateKey) -> Result<(), Error> {
        self.signature = Some(key.sign_digest(&self.id.digest())?);
        Ok(())
    }
}

impl Write for Block {
    fn write(&self, buf: &mut impl BufMut) {
        self.header.write(buf);
        self.transactions.write(buf);
        self.id.write(buf);
        self.signature.write(buf);
    }
}

impl EncodeSize for Block {
    fn encode_size(&self) -> usize {
        self.header.encode_size()
            + self.transactions.encode_size()
            + Multihash::SIZE
            + self.signature.encode_size()
    }
}

impl Read for Block {
    fn read(buf: &mut impl Buf) -> Result<Self, CodecError> {
        let header = BlockHeader::read(buf)?;
        let transactions = Vec::<Transaction>::read(buf)?;
        let id = Multihash::read(buf)?;
        let signature = Option::<Signature>::read(buf)?;
        Ok(Self {
            header,
            transactions,
            id,
            signature,
        })
    }
}
