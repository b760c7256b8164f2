use thiserror::Error;

use crate::core::units::AmountError;

/// Every way a session operation can fail. All are recoverable by the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No wallet in the host, or no connected account yet.
    #[error("wallet provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("connection rejected: {0}")]
    ConnectionRejected(String),
    #[error("invalid amount: {0}")]
    ParseFailure(#[from] AmountError),
    /// Stale balance is kept.
    #[error("balance read failed: {0}")]
    ReadFailure(String),
    #[error("transaction failed: {0}")]
    TransactionFailure(String),
}

impl SessionError {
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::ProviderUnavailable(_) => "ProviderUnavailable",
            SessionError::ConnectionRejected(_) => "ConnectionRejected",
            SessionError::ParseFailure(_) => "ParseFailure",
            SessionError::ReadFailure(_) => "ReadFailure",
            SessionError::TransactionFailure(_) => "TransactionFailure",
        }
    }
}
