//! In-memory wallet + tip jar contract for driving WalletSession.

#![allow(dead_code)]

use alloy_primitives::{address, keccak256, Address, Bytes, TxHash, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use tipjar::{ITipJar, ProviderError, Signer, TransactionReceipt, TransactionRequest, WalletProvider};

pub const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

pub const OWNER: Address = address!("abcabcabcabcabcabcabcabcabcabcabcabcabca");
pub const STRANGER: Address = address!("5757575757575757575757575757575757575757");

/// Where a non-owner withdrawal blows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertAt {
    /// Wallet refuses to send (gas estimation hits the revert).
    Submission,
    /// Transaction is mined with a failed status.
    Mining,
}

pub struct MockWallet {
    pub accounts: RefCell<Vec<Address>>,
    pub connect_error: RefCell<Option<ProviderError>>,
    pub read_error: RefCell<Option<ProviderError>>,
    pub owner: Address,
    pub balance: Cell<U256>,
    pub revert_at: Cell<RevertAt>,
    /// Mine every transaction as reverted.
    pub revert_all: Cell<bool>,
    pub calls: RefCell<Vec<&'static str>>,
    pub submitted: RefCell<Vec<TransactionRequest>>,
    receipts: RefCell<HashMap<TxHash, TransactionReceipt>>,
    nonce: Cell<u64>,
}

impl MockWallet {
    pub fn new(account: Address) -> Self {
        Self {
            accounts: RefCell::new(vec![account]),
            connect_error: RefCell::new(None),
            read_error: RefCell::new(None),
            owner: OWNER,
            balance: Cell::new(U256::ZERO),
            revert_at: Cell::new(RevertAt::Mining),
            revert_all: Cell::new(false),
            calls: RefCell::new(Vec::new()),
            submitted: RefCell::new(Vec::new()),
            receipts: RefCell::new(HashMap::new()),
            nonce: Cell::new(0),
        }
    }

    pub fn with_balance(self, wei: u128) -> Self {
        self.balance.set(U256::from(wei));
        self
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls.borrow().iter().filter(|m| **m == method).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, method: &'static str) {
        self.calls.borrow_mut().push(method);
    }

    fn current(&self) -> Result<Address, ProviderError> {
        self.accounts
            .borrow()
            .first()
            .copied()
            .ok_or_else(|| ProviderError::rpc(4100, "no account is authorized"))
    }

    fn mine(&self, success: bool) -> TxHash {
        let nonce = self.nonce.get() + 1;
        self.nonce.set(nonce);
        let hash = keccak256(nonce.to_be_bytes());
        let receipt = TransactionReceipt { transaction_hash: hash, block_number: Some(100 + nonce), success };
        self.receipts.borrow_mut().insert(hash, receipt);
        hash
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.record("request_accounts");
        if let Some(err) = self.connect_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.accounts.borrow().clone())
    }

    async fn signer(&self) -> Result<Signer, ProviderError> {
        self.record("signer");
        Ok(Signer { address: self.current()? })
    }

    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes, ProviderError> {
        self.record("call");
        if let Some(err) = self.read_error.borrow().clone() {
            return Err(err);
        }
        assert_eq!(tx.data[..], ITipJar::getBalanceCall::SELECTOR[..], "only getBalance is a view");
        Ok(Bytes::from(self.balance.get().to_be_bytes::<32>().to_vec()))
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ProviderError> {
        self.record("send_transaction");
        self.submitted.borrow_mut().push(tx.clone());
        if self.revert_all.get() {
            return Ok(self.mine(false));
        }
        if tx.data.starts_with(&ITipJar::tipCall::SELECTOR) {
            let value = tx.value.unwrap_or_default();
            self.balance.set(self.balance.get() + value);
            Ok(self.mine(true))
        } else if tx.data.starts_with(&ITipJar::withdrawTipsCall::SELECTOR) {
            if tx.from != self.owner {
                return match self.revert_at.get() {
                    RevertAt::Submission => Err(ProviderError::rpc(-32603, "execution reverted: Only owner can withdraw")),
                    RevertAt::Mining => Ok(self.mine(false)),
                };
            }
            self.balance.set(U256::ZERO);
            Ok(self.mine(true))
        } else {
            Err(ProviderError::rpc(-32601, "unknown function"))
        }
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionReceipt, ProviderError> {
        self.record("wait_for_receipt");
        self.receipts
            .borrow()
            .get(&hash)
            .cloned()
            .ok_or_else(|| ProviderError::Other(format!("unknown transaction {}", hash)))
    }
}

pub fn block_on<F: Future>(future: F) -> F::Output {
    tipjar::logging::init_test_logging();
    let rt = tokio::runtime::Runtime::new().expect("runtime");
    rt.block_on(future)
}
