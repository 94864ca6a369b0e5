//! Transaction and block assembly for integration testing against a running
//! node.
//!
//! # Overview
//!
//! Integration tests exercise a running node by uploading contracts,
//! invoking entry points, and asserting on the results. Everything those
//! tests submit flows through this crate: it assembles cryptographically
//! well-formed transactions and blocks from a set of operations, computes
//! Merkle roots over their constituent digests, derives content-addressed
//! identifiers as multihashes, signs them, and waits for node readiness
//! with bounded exponential backoff.
//!
//! The node itself is an external collaborator, reached through the
//! [Client] trait. Builders perform no internal concurrency and retain no
//! state across invocations; concurrent callers sharing one payer key must
//! serialize their submissions, since the nonce fetch is not atomic with
//! submission.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use mason_cryptography::PrivateKey;
//! use mason_protocol::{mocks, transaction::Transaction, Operation};
//!
//! let client = mocks::Client::default();
//! let key = PrivateKey::from_seed(0);
//! let operation = Operation::CallContract {
//!     contract_id: Bytes::from_static(b"token"),
//!     entry_point: 0x27f576ca,
//!     args: Bytes::from_static(b"transfer"),
//! };
//! let transaction = Transaction::build(&client, &key, vec![operation]).unwrap();
//! assert_eq!(transaction.signatures.len(), 1);
//! ```

use thiserror::Error;

pub mod block;
pub mod clock;
pub mod keyring;
pub mod merkle;
pub mod mocks;
pub mod operation;
pub mod rpc;
pub mod transaction;
pub mod value;
pub mod waiter;
pub mod watchdog;

pub use block::{Block, BlockHeader};
pub use clock::{Clock, SystemClock};
pub use keyring::Keyring;
pub use operation::Operation;
pub use rpc::{Client, HeadInfo, Pagination};
pub use transaction::{Transaction, TransactionHeader};
pub use value::Value;

/// Errors that can occur when assembling or submitting chain structures.
#[derive(Error, Debug)]
pub enum Error {
    #[error("network: {0}")]
    Network(#[source] rpc::ClientError),
    #[error("encoding: {0}")]
    Encoding(#[from] mason_codec::Error),
    #[error("cryptography: {0}")]
    Cryptography(#[from] mason_cryptography::Error),
    #[error("timed out awaiting chain readiness")]
    Timeout,
    #[error("pagination limit must be non-zero")]
    InvalidPagination,
    #[error("duplicate key name: {0}")]
    DuplicateKey(String),
    #[error("unknown key name: {0}")]
    UnknownKey(String),
}
