//! Wallet provider capability
//!
//! The session never looks a provider up from the environment; a host hands
//! one in. Two layers:
//!
//! ```text
//! WalletProvider (typed capability)
//!     │  request_accounts, signer, call, send_transaction, wait_for_receipt
//!     │
//!     └── RpcWallet<T: Transport>
//!             │  eth_requestAccounts, eth_accounts, eth_call,
//!             │  eth_sendTransaction, eth_getTransactionReceipt (polled)
//!             ▼
//!         Transport (raw EIP-1193 `request` + `sleep`)
//!             └── wasm::BrowserTransport → window.ethereum
//! ```
//!
//! Futures are `?Send`: the browser provider lives on a single JS thread.

mod rpc;

pub use rpc::{RpcWallet, Transport};

use alloy_primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// EIP-1193 error codes the session cares about.
pub mod codes {
    pub const USER_REJECTED: i64 = 4001;
    pub const UNAUTHORIZED: i64 = 4100;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Error object returned by the wallet or node.
    #[error("{message}")]
    Rpc { code: i64, message: String },
    #[error("unexpected response to {method}: {reason}")]
    Malformed { method: String, reason: String },
    #[error("no wallet provider found")]
    Unavailable,
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        ProviderError::Rpc { code, message: message.into() }
    }

    pub fn is_user_rejection(&self) -> bool {
        matches!(self, ProviderError::Rpc { code: codes::USER_REJECTED, .. })
    }
}

/// An account the wallet will currently sign for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signer {
    pub address: Address,
}

/// Transaction or call request in JSON-RPC shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    pub data: Bytes,
}

/// Mined transaction outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    /// False when the transaction was mined but reverted.
    pub success: bool,
}

#[async_trait(?Send)]
pub trait WalletProvider {
    /// Ask the user to authorize accounts; yields them in wallet order.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// The signer for the wallet's currently selected account.
    async fn signer(&self) -> Result<Signer, ProviderError>;

    /// Read-only contract call against the latest block.
    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes, ProviderError>;

    /// Sign and broadcast; returns once the wallet has submitted it.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ProviderError>;

    /// Resolve once `hash` is mined. No timeout.
    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionReceipt, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_as_json_rpc_object() {
        let tx = TransactionRequest {
            from: Address::with_last_byte(1),
            to: Address::with_last_byte(2),
            value: Some(U256::from(500_000_000_000_000_000u128)),
            data: Bytes::from(vec![0xde, 0xad]),
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["from"], "0x0000000000000000000000000000000000000001");
        assert_eq!(json["value"], "0x6f05b59d3b20000");
        assert_eq!(json["data"], "0xdead");

        let call = TransactionRequest { value: None, ..tx };
        assert!(serde_json::to_value(&call).unwrap().get("value").is_none());
    }

    #[test]
    fn user_rejection_is_recognised() {
        assert!(ProviderError::rpc(codes::USER_REJECTED, "User rejected the request.").is_user_rejection());
        assert!(!ProviderError::rpc(-32000, "execution reverted").is_user_rejection());
        assert!(!ProviderError::Unavailable.is_user_rejection());
    }
}
