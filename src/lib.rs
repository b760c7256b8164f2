//! Tipjar: client core for a tip jar dapp. One session, four operations.
//!
//! # Architecture
//!
//! ```text
//! Display surface (TipJarApp in the browser, or any host)
//!   │  reads SessionSnapshot after each operation
//!   │
//!   └── WalletSession<P: WalletProvider>
//!         │  connect, fetch_balance, send_tip, withdraw
//!         │
//!         ├── TipJarContract (bound per operation to the current signer)
//!         │     └── ITipJar: getBalance() / tip() payable / withdrawTips()
//!         │
//!         └── P: WalletProvider (explicit dependency)
//!               └── RpcWallet<T: Transport> → window.ethereum
//! ```
//!
//! Balance accounting and withdrawal rights live in the deployed contract.
//! The session forwards calls and reports outcomes on one status line.
//!
//! # Features
//!
//! - `native` - tracing-subscriber log setup for native hosts and tests
//! - `wasm` - wasm-bindgen `TipJarApp` over the injected browser wallet
//!
//! # Usage
//!
//! ```ignore
//! use tipjar::{RpcWallet, TipJarConfig, WalletSession};
//!
//! let config = TipJarConfig::from_bundled()?;
//! let wallet = RpcWallet::from_config(transport, &config);
//! let mut session = WalletSession::new(Some(wallet), config);
//! session.connect().await?;
//! session.send_tip("0.01").await?;
//! println!("{}", session.snapshot().balance);
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod config;
pub mod contract;
pub mod core;
pub mod error;
pub mod provider;
pub mod session;

// =============================================================================
// Native-only modules
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports
// =============================================================================
pub use config::{ConfigError, TipJarConfig};
pub use contract::{ContractError, ITipJar, PendingTransaction, TipJarContract};
pub use crate::core::status::{Operation, StatusLine};
pub use crate::core::units::{format_ether, format_units, parse_ether, parse_units, AmountError};
pub use error::SessionError;
pub use provider::{ProviderError, RpcWallet, Signer, TransactionReceipt, TransactionRequest, Transport, WalletProvider};
pub use session::{ConnectionState, Exclusive, Session, SessionSnapshot, WalletSession};

#[cfg(feature = "wasm")]
pub use wasm::{BrowserTransport, TipJarApp};
