//! Test doubles for the node client and the clock.

use crate::{
    block::Block,
    rpc::{ClientError, HeadInfo, Pagination},
    transaction::Transaction,
};
use bytes::Bytes;
use mason_cryptography::{hash, Multihash};
use std::{
    cell::{Cell, RefCell},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// A scripted node client.
///
/// Serves fixed chain metadata, records everything submitted, and can be
/// told to fail a number of head-info calls (to exercise the readiness
/// waiter) or to fail metadata fetches outright.
pub struct Client {
    nonce: u64,
    rc: u64,
    chain_id: Bytes,
    head: HeadInfo,
    head_info_failures: Cell<usize>,
    fail_nonce: bool,
    transactions: RefCell<Vec<Transaction>>,
    blocks: RefCell<Vec<Block>>,
    reads: RefCell<Vec<(Bytes, u32, Bytes, Option<Pagination>)>>,
}

impl Default for Client {
    fn default() -> Self {
        Self {
            nonce: 0,
            rc: 10_000_000,
            chain_id: Bytes::from_static(b"mason-test-chain"),
            head: HeadInfo {
                id: Multihash::wrap(hash(b"genesis")),
                height: 0,
                state_merkle_root: Bytes::from_static(b"genesis-state"),
            },
            head_info_failures: Cell::new(0),
            fail_nonce: false,
            transactions: RefCell::new(Vec::new()),
            blocks: RefCell::new(Vec::new()),
            reads: RefCell::new(Vec::new()),
        }
    }
}

impl Client {
    /// Sets the nonce reported for every account.
    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Sets the resource credits reported for every account.
    pub fn with_rc(mut self, rc: u64) -> Self {
        self.rc = rc;
        self
    }

    /// Sets the reported head height.
    pub fn with_height(mut self, height: u64) -> Self {
        self.head.height = height;
        self
    }

    /// Fails the next `attempts` head-info calls before recovering.
    pub fn fail_head_info(self, attempts: usize) -> Self {
        self.head_info_failures.set(attempts);
        self
    }

    /// Fails every nonce fetch.
    pub fn fail_nonce(mut self) -> Self {
        self.fail_nonce = true;
        self
    }

    /// The chain id this client reports.
    pub fn chain_id(&self) -> Bytes {
        self.chain_id.clone()
    }

    /// The head id this client reports.
    pub fn head_id(&self) -> Multihash {
        self.head.id
    }

    /// Transactions submitted so far.
    pub fn submitted_transactions(&self) -> Vec<Transaction> {
        self.transactions.borrow().clone()
    }

    /// Blocks submitted so far.
    pub fn submitted_blocks(&self) -> Vec<Block> {
        self.blocks.borrow().clone()
    }

    /// Contract reads issued so far.
    pub fn contract_reads(&self) -> Vec<(Bytes, u32, Bytes, Option<Pagination>)> {
        self.reads.borrow().clone()
    }
}

impl crate::rpc::Client for Client {
    fn get_head_info(&self) -> Result<HeadInfo, ClientError> {
        let remaining = self.head_info_failures.get();
        if remaining > 0 {
            if remaining != usize::MAX {
                self.head_info_failures.set(remaining - 1);
            }
            return Err("connection refused".into());
        }
        Ok(self.head.clone())
    }

    fn get_account_nonce(&self, _address: &[u8]) -> Result<u64, ClientError> {
        if self.fail_nonce {
            return Err("nonce unavailable".into());
        }
        Ok(self.nonce)
    }

    fn get_account_rc(&self, _address: &[u8]) -> Result<u64, ClientError> {
        Ok(self.rc)
    }

    fn get_chain_id(&self) -> Result<Bytes, ClientError> {
        Ok(self.chain_id.clone())
    }

    fn submit_transaction(&self, transaction: &Transaction) -> Result<(), ClientError> {
        self.transactions.borrow_mut().push(transaction.clone());
        Ok(())
    }

    fn submit_block(&self, block: &Block) -> Result<(), ClientError> {
        self.blocks.borrow_mut().push(block.clone());
        Ok(())
    }

    fn read_contract(
        &self,
        contract_id: &[u8],
        entry_point: u32,
        args: &[u8],
        page: Option<&Pagination>,
    ) -> Result<Bytes, ClientError> {
        self.reads.borrow_mut().push((
            Bytes::copy_from_slice(contract_id),
            entry_point,
            Bytes::copy_from_slice(args),
            page.cloned(),
        ));
        Ok(Bytes::new())
    }
}

/// A manually-driven clock.
///
/// `sleep` records the requested duration and advances the current time by
/// it, so backoff schedules can be asserted without waiting on the wall
/// clock.
pub struct Clock {
    now: Cell<SystemTime>,
    sleeps: RefCell<Vec<Duration>>,
}

impl Clock {
    /// Creates a clock set to the given milliseconds since the Unix epoch.
    pub fn new(epoch_millis: u64) -> Self {
        Self {
            now: Cell::new(UNIX_EPOCH + Duration::from_millis(epoch_millis)),
            sleeps: RefCell::new(Vec::new()),
        }
    }

    /// Durations slept so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl crate::clock::Clock for Clock {
    fn current(&self) -> SystemTime {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.now.set(self.now.get() + duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::Clock as _, rpc::Client as _};

    #[test]
    fn test_client_failure_budget() {
        let client = Client::default().fail_head_info(2);
        assert!(client.get_head_info().is_err());
        assert!(client.get_head_info().is_err());
        assert!(client.get_head_info().is_ok());
    }

    #[test]
    fn test_clock_advances_on_sleep() {
        let clock = Clock::new(1_000);
        assert_eq!(clock.epoch_millis(), 1_000);
        clock.sleep(Duration::from_secs(2));
        assert_eq!(clock.epoch_millis(), 3_000);
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(2)]);
    }
}
