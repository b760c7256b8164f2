//! TipJarContract - the external contract bound to the current signer.
//!
//! A handle is cheap and short-lived: bind one right before each operation so
//! a signer change in the wallet is never missed.

use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_sol_types::{sol, SolCall};
use thiserror::Error;
use tracing::debug;

use crate::provider::{ProviderError, Signer, TransactionReceipt, TransactionRequest, WalletProvider};

sol! {
    /// Interface of the deployed tip jar.
    interface ITipJar {
        function getBalance() external view returns (uint256);
        function tip() external payable;
        function withdrawTips() external;
    }
}

#[derive(Debug, Error)]
pub enum ContractError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("could not decode {function} result: {source}")]
    Decode { function: &'static str, source: alloy_sol_types::Error },
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
}

pub struct TipJarContract<'a, P: ?Sized> {
    provider: &'a P,
    address: Address,
    signer: Signer,
}

impl<'a, P: WalletProvider + ?Sized> TipJarContract<'a, P> {
    /// Acquire the wallet's current signer and bind it to `address`.
    pub async fn bind(provider: &'a P, address: Address) -> Result<Self, ProviderError> {
        let signer = provider.signer().await?;
        debug!(contract = %address, signer = %signer.address, "bound contract handle");
        Ok(Self { provider, address, signer })
    }

    pub fn address(&self) -> Address { self.address }
    pub fn signer(&self) -> Signer { self.signer }

    fn request<C: SolCall>(&self, call: C, value: Option<U256>) -> TransactionRequest {
        TransactionRequest { from: self.signer.address, to: self.address, value, data: Bytes::from(call.abi_encode()) }
    }

    pub async fn get_balance(&self) -> Result<U256, ContractError> {
        let out = self.provider.call(&self.request(ITipJar::getBalanceCall {}, None)).await?;
        let ret = ITipJar::getBalanceCall::abi_decode_returns(&out, true)
            .map_err(|source| ContractError::Decode { function: ITipJar::getBalanceCall::SIGNATURE, source })?;
        Ok(ret._0)
    }

    pub async fn tip(&self, value: U256) -> Result<PendingTransaction<'a, P>, ContractError> {
        self.submit(self.request(ITipJar::tipCall {}, Some(value))).await
    }

    pub async fn withdraw_tips(&self) -> Result<PendingTransaction<'a, P>, ContractError> {
        self.submit(self.request(ITipJar::withdrawTipsCall {}, None)).await
    }

    async fn submit(&self, tx: TransactionRequest) -> Result<PendingTransaction<'a, P>, ContractError> {
        let hash = self.provider.send_transaction(&tx).await?;
        debug!(tx = %hash, from = %tx.from, "transaction submitted");
        Ok(PendingTransaction { provider: self.provider, hash })
    }
}

/// A broadcast transaction that has not been confirmed yet.
pub struct PendingTransaction<'a, P: ?Sized> {
    provider: &'a P,
    hash: TxHash,
}

impl<'a, P: WalletProvider + ?Sized> PendingTransaction<'a, P> {
    pub fn hash(&self) -> TxHash { self.hash }

    /// Wait until mined; a reverted receipt is an error.
    pub async fn wait(self) -> Result<TransactionReceipt, ContractError> {
        let receipt = self.provider.wait_for_receipt(self.hash).await?;
        if !receipt.success {
            return Err(ContractError::Reverted(self.hash));
        }
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;

    #[test]
    fn selectors_match_signatures() {
        for (sig, selector) in [
            ("getBalance()", ITipJar::getBalanceCall::SELECTOR),
            ("tip()", ITipJar::tipCall::SELECTOR),
            ("withdrawTips()", ITipJar::withdrawTipsCall::SELECTOR),
        ] {
            assert_eq!(keccak256(sig)[..4], selector, "{sig}");
        }
        assert_eq!(ITipJar::getBalanceCall::SELECTOR, [0x12, 0x06, 0x5f, 0xe0]);
    }

    #[test]
    fn calls_without_arguments_encode_to_selector() {
        assert_eq!(ITipJar::tipCall {}.abi_encode(), ITipJar::tipCall::SELECTOR.to_vec());
    }

    #[test]
    fn balance_return_decodes_uint256() {
        let word = U256::from(1_000_000_000_000_000_000u128).to_be_bytes::<32>();
        let ret = ITipJar::getBalanceCall::abi_decode_returns(&word, true).unwrap();
        assert_eq!(ret._0, U256::from(1_000_000_000_000_000_000u128));
        assert!(ITipJar::getBalanceCall::abi_decode_returns(&[0u8; 4], true).is_err());
    }
}
