//! The single-line status channel shown after every operation.

use serde::Serialize;
use std::fmt;

/// Prefix that marks a failure on the status line.
pub const FAILURE_PREFIX: &str = "Error: ";

/// Success messages, one per operation.
pub mod messages {
    pub const CONNECTED: &str = "Wallet connected";
    pub const BALANCE_UPDATED: &str = "Balance updated";
    pub const TIP_SENT: &str = "Tip sent";
    pub const WITHDRAWN: &str = "Tips withdrawn";
}

/// User-triggered operations, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Connect,
    FetchBalance,
    SendTip,
    Withdraw,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Connect => "wallet connection",
            Operation::FetchBalance => "balance check",
            Operation::SendTip => "tip",
            Operation::Withdraw => "withdrawal",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "camelCase")]
pub enum StatusLine {
    #[default]
    Idle,
    Success(String),
    Failure(String),
}

impl StatusLine {
    pub fn success(message: impl Into<String>) -> Self {
        StatusLine::Success(message.into())
    }

    pub fn failure(op: Operation, error: impl fmt::Display) -> Self {
        StatusLine::Failure(format!("{} failed: {}", op.as_str(), error))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StatusLine::Failure(_))
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Idle => Ok(()),
            StatusLine::Success(msg) => f.write_str(msg),
            StatusLine::Failure(msg) => write!(f, "{}{}", FAILURE_PREFIX, msg),
        }
    }
}
