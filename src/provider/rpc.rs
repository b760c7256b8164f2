//! RpcWallet - WalletProvider over a raw EIP-1193 `request` transport.

use alloy_primitives::{Address, Bytes, TxHash, U64};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::config::TipJarConfig;

use super::{codes, ProviderError, Signer, TransactionReceipt, TransactionRequest, WalletProvider};

const REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
const ACCOUNTS: &str = "eth_accounts";
const CALL: &str = "eth_call";
const SEND_TRANSACTION: &str = "eth_sendTransaction";
const GET_RECEIPT: &str = "eth_getTransactionReceipt";

/// Raw provider: one JSON-RPC method in, one JSON result out.
#[async_trait(?Send)]
pub trait Transport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;

    /// Pause between receipt polls.
    async fn sleep(&self, duration: Duration);
}

pub struct RpcWallet<T> {
    transport: T,
    poll_interval: Duration,
}

impl<T: Transport> RpcWallet<T> {
    pub fn new(transport: T) -> Self { Self::from_config(transport, &TipJarConfig::default()) }

    /// Poll receipts at the interval the config asks for.
    pub fn from_config(transport: T, config: &TipJarConfig) -> Self {
        Self { transport, poll_interval: config.receipt_poll_interval }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self { self.poll_interval = interval; self }
    pub fn transport(&self) -> &T { &self.transport }
    pub fn poll_interval(&self) -> Duration { self.poll_interval }

    async fn request<R: DeserializeOwned>(&self, method: &str, params: Value) -> Result<R, ProviderError> {
        let raw = self.transport.request(method, params).await?;
        serde_json::from_value(raw).map_err(|e| ProviderError::Malformed { method: method.into(), reason: e.to_string() })
    }

    fn encode(method: &str, tx: &TransactionRequest) -> Result<Value, ProviderError> {
        serde_json::to_value(tx).map_err(|e| ProviderError::Malformed { method: method.into(), reason: e.to_string() })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: TxHash,
    #[serde(default)]
    block_number: Option<U64>,
    /// Absent on pre-Byzantium chains; treated as success there.
    #[serde(default)]
    status: Option<U64>,
}

impl From<RpcReceipt> for TransactionReceipt {
    fn from(r: RpcReceipt) -> Self {
        Self {
            transaction_hash: r.transaction_hash,
            block_number: r.block_number.map(|n| n.to::<u64>()),
            success: r.status.map_or(true, |s| s == U64::from(1)),
        }
    }
}

#[async_trait(?Send)]
impl<T: Transport> WalletProvider for RpcWallet<T> {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.request(REQUEST_ACCOUNTS, json!([])).await
    }

    async fn signer(&self) -> Result<Signer, ProviderError> {
        let accounts: Vec<Address> = self.request(ACCOUNTS, json!([])).await?;
        let address = accounts
            .first()
            .copied()
            .ok_or_else(|| ProviderError::rpc(codes::UNAUTHORIZED, "no account is authorized"))?;
        Ok(Signer { address })
    }

    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes, ProviderError> {
        self.request(CALL, json!([Self::encode(CALL, tx)?, "latest"])).await
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ProviderError> {
        self.request(SEND_TRANSACTION, json!([Self::encode(SEND_TRANSACTION, tx)?])).await
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionReceipt, ProviderError> {
        loop {
            let receipt: Option<RpcReceipt> = self.request(GET_RECEIPT, json!([hash])).await?;
            match receipt {
                Some(r) if r.block_number.is_some() => return Ok(r.into()),
                _ => {
                    debug!(tx = %hash, "receipt pending");
                    self.transport.sleep(self.poll_interval).await;
                }
            }
        }
    }
}
