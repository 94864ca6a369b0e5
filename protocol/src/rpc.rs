//! The node-facing interface.
//!
//! Builders treat the node as an opaque collaborator behind the [Client]
//! trait: fetch chain metadata, submit assembled structures, read contract
//! state. Transport-level failures are propagated to callers unchanged as
//! [ClientError]; the core retries nothing except in the readiness waiter.

use crate::{block::Block, transaction::Transaction, Error};
use bytes::Bytes;
use mason_cryptography::Multihash;

/// A transport-level error, propagated unchanged from the client.
pub type ClientError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The node's current head, as reported by `get_head_info`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadInfo {
    /// Identifier of the head block.
    pub id: Multihash,
    /// Height of the head block.
    pub height: u64,
    /// Merkle root of the state as of the head block.
    pub state_merkle_root: Bytes,
}

/// Options for cursor-based contract reads.
///
/// Recognized options are enumerated explicitly and validated at
/// construction; there is no untyped grab-bag.
#[derive(Clone, Debug, PartialEq)]
pub struct Pagination {
    start_cursor: Bytes,
    limit: u64,
}

impl Pagination {
    /// Creates pagination options, rejecting a zero limit.
    pub fn new(start_cursor: Bytes, limit: u64) -> Result<Self, Error> {
        if limit == 0 {
            return Err(Error::InvalidPagination);
        }
        Ok(Self {
            start_cursor,
            limit,
        })
    }

    /// The cursor to resume from.
    pub fn start_cursor(&self) -> &Bytes {
        &self.start_cursor
    }

    /// The maximum number of records to return.
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

/// A connection to a running node.
///
/// All calls are synchronous and blocking from the caller's point of view.
pub trait Client {
    /// Returns the node's current head.
    fn get_head_info(&self) -> Result<HeadInfo, ClientError>;

    /// Returns the last nonce observed on-chain for an account.
    fn get_account_nonce(&self, address: &[u8]) -> Result<u64, ClientError>;

    /// Returns the resource credits currently available to an account.
    fn get_account_rc(&self, address: &[u8]) -> Result<u64, ClientError>;

    /// Returns the chain identifier.
    fn get_chain_id(&self) -> Result<Bytes, ClientError>;

    /// Submits a transaction to the node's mempool.
    fn submit_transaction(&self, transaction: &Transaction) -> Result<(), ClientError>;

    /// Submits a block to the node.
    fn submit_block(&self, block: &Block) -> Result<(), ClientError>;

    /// Reads a contract entry point, optionally resuming from a cursor.
    fn read_contract(
        &self,
        contract_id: &[u8],
        entry_point: u32,
        args: &[u8],
        page: Option<&Pagination>,
    ) -> Result<Bytes, ClientError>;
}
