//! WalletSession - mediates between the display surface and wallet + contract.
//!
//! # Operations
//!
//! | Operation | Provider calls | Success status |
//! |-----------|----------------|----------------|
//! | `connect` | request accounts, then one balance read | "Wallet connected" |
//! | `fetch_balance` | signer, `getBalance()` | "Balance updated" |
//! | `send_tip` | signer, `tip()` + wait, balance read | "Tip sent" |
//! | `withdraw` | signer, `withdrawTips()` + wait, balance read | "Tips withdrawn" |
//!
//! Every error is written to the status line and logged before it is
//! returned. Access control for `withdraw` belongs to the contract; the
//! session never pre-checks ownership.

mod exclusive;
mod state;

pub use exclusive::Exclusive;
pub use state::{ConnectionState, Session, SessionSnapshot};

use alloy_primitives::{Address, U256};
use tracing::{info, warn};

use crate::config::TipJarConfig;
use crate::contract::{ContractError, TipJarContract};
use crate::core::status::{messages, Operation, StatusLine};
use crate::core::units::parse_units;
use crate::error::SessionError;
use crate::provider::{ProviderError, TransactionReceipt, WalletProvider};

pub struct WalletSession<P> {
    provider: Option<P>,
    config: TipJarConfig,
    state: Session,
}

impl<P: WalletProvider> WalletSession<P> {
    /// `provider` is `None` when the host has no wallet capability.
    pub fn new(provider: Option<P>, config: TipJarConfig) -> Self {
        Self { provider, config, state: Session::default() }
    }

    pub fn state(&self) -> &Session { &self.state }
    pub fn config(&self) -> &TipJarConfig { &self.config }
    pub fn provider(&self) -> Option<&P> { self.provider.as_ref() }
    pub fn snapshot(&self) -> SessionSnapshot { self.state.snapshot(self.config.decimals) }

    /// Swap in a wallet that appeared (or went away) after construction.
    /// The session drops back to disconnected; the next `connect` uses it.
    pub fn set_provider(&mut self, provider: Option<P>) {
        info!(present = provider.is_some(), "wallet provider replaced");
        self.provider = provider;
        self.state.connection = ConnectionState::Disconnected;
        self.state.account = None;
    }

    pub async fn connect(&mut self) -> Result<Address, SessionError> {
        let account = match self.authorize().await {
            Ok(account) => account,
            Err(err) => return Err(self.fail(Operation::Connect, err)),
        };
        self.state.connection = ConnectionState::Connected;
        self.state.account = Some(account);
        self.state.status = StatusLine::success(messages::CONNECTED);
        info!(%account, "wallet connected");

        // a failed read reports itself; the connection stands
        let _ = self.refresh().await;
        Ok(account)
    }

    pub async fn fetch_balance(&mut self) -> Result<U256, SessionError> {
        let balance = self.refresh().await?;
        self.state.status = StatusLine::success(messages::BALANCE_UPDATED);
        Ok(balance)
    }

    pub async fn send_tip(&mut self, amount: &str) -> Result<TransactionReceipt, SessionError> {
        let value = match parse_units(amount, self.config.decimals) {
            Ok(value) => value,
            Err(err) => return Err(self.fail(Operation::SendTip, err.into())),
        };
        let receipt = match self.transact(Some(value)).await {
            Ok(receipt) => receipt,
            Err(err) => return Err(self.fail(Operation::SendTip, err)),
        };
        info!(tx = %receipt.transaction_hash, %value, "tip confirmed");
        self.state.status = StatusLine::success(messages::TIP_SENT);
        let _ = self.refresh().await;
        Ok(receipt)
    }

    pub async fn withdraw(&mut self) -> Result<TransactionReceipt, SessionError> {
        let receipt = match self.transact(None).await {
            Ok(receipt) => receipt,
            Err(err) => return Err(self.fail(Operation::Withdraw, err)),
        };
        info!(tx = %receipt.transaction_hash, "withdrawal confirmed");
        self.state.status = StatusLine::success(messages::WITHDRAWN);
        let _ = self.refresh().await;
        Ok(receipt)
    }

    async fn authorize(&self) -> Result<Address, SessionError> {
        let provider = self.provider.as_ref().ok_or_else(|| SessionError::ProviderUnavailable(ProviderError::Unavailable.to_string()))?;
        let accounts = provider.request_accounts().await.map_err(|e| match e {
            ProviderError::Unavailable => SessionError::ProviderUnavailable(e.to_string()),
            other => SessionError::ConnectionRejected(other.to_string()),
        })?;
        accounts.first().copied().ok_or_else(|| SessionError::ConnectionRejected("wallet returned no accounts".into()))
    }

    fn connected_provider(&self) -> Result<&P, SessionError> {
        let provider = self.provider.as_ref().ok_or_else(|| SessionError::ProviderUnavailable(ProviderError::Unavailable.to_string()))?;
        if !self.state.is_connected() {
            return Err(SessionError::ProviderUnavailable("wallet not connected".into()));
        }
        Ok(provider)
    }

    /// Read the balance with a fresh signer. Success commits balance and
    /// account but leaves the status to the caller.
    async fn refresh(&mut self) -> Result<U256, SessionError> {
        let read = async {
            let provider = self.connected_provider()?;
            let contract = TipJarContract::bind(provider, self.config.contract_address)
                .await
                .map_err(|e| SessionError::ReadFailure(e.to_string()))?;
            let balance = contract.get_balance().await.map_err(|e| SessionError::ReadFailure(e.to_string()))?;
            Ok::<_, SessionError>((contract.signer().address, balance))
        };
        let result = read.await;
        match result {
            Ok((signer, balance)) => {
                self.follow_signer(signer);
                self.state.balance = balance;
                info!(%balance, "balance updated");
                Ok(balance)
            }
            Err(err) => Err(self.fail(Operation::FetchBalance, err)),
        }
    }

    /// Submit with a freshly acquired signer and wait for confirmation.
    /// `Some(value)` tips, `None` withdraws.
    async fn transact(&mut self, value: Option<U256>) -> Result<TransactionReceipt, SessionError> {
        let provider = self.connected_provider()?;
        let failure = |e: ContractError| SessionError::TransactionFailure(e.to_string());
        let contract = TipJarContract::bind(provider, self.config.contract_address)
            .await
            .map_err(|e| failure(e.into()))?;
        let pending = match value {
            Some(value) => contract.tip(value).await,
            None => contract.withdraw_tips().await,
        }
        .map_err(failure)?;
        info!(tx = %pending.hash(), signer = %contract.signer().address, "waiting for confirmation");
        let receipt = pending.wait().await.map_err(failure)?;
        let signer = contract.signer().address;
        self.follow_signer(signer);
        Ok(receipt)
    }

    fn follow_signer(&mut self, signer: Address) {
        if self.state.account != Some(signer) {
            info!(previous = ?self.state.account, current = %signer, "wallet account changed");
            self.state.account = Some(signer);
        }
    }

    fn fail(&mut self, op: Operation, err: SessionError) -> SessionError {
        warn!(operation = op.as_str(), kind = err.kind(), error = %err, "operation failed");
        self.state.status = StatusLine::failure(op, &err);
        err
    }
}
