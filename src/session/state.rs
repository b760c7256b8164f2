//! Session state and the snapshot handed to the display layer.

use alloy_primitives::{Address, U256};
use serde::Serialize;

use crate::core::status::StatusLine;
use crate::core::units::format_units;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

/// Mutable session record. Replaced field by field only when an operation
/// completes, never mid-flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub connection: ConnectionState,
    pub account: Option<Address>,
    pub status: StatusLine,
    /// Last balance read, in the smallest unit.
    pub balance: U256,
}

impl Session {
    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Connected
    }

    pub fn snapshot(&self, decimals: u8) -> SessionSnapshot {
        SessionSnapshot {
            connected: self.is_connected(),
            account: self.account.map(|a| a.to_checksum(None)),
            balance: format_units(self.balance, decimals),
            balance_wei: self.balance.to_string(),
            status: self.status.to_string(),
            failed: self.status.is_failure(),
        }
    }
}

/// Everything the display surface renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub connected: bool,
    pub account: Option<String>,
    pub balance: String,
    pub balance_wei: String,
    pub status: String,
    pub failed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::status::{messages, Operation};

    #[test]
    fn fresh_session_is_disconnected() {
        let snap = Session::default().snapshot(18);
        assert!(!snap.connected);
        assert_eq!(snap.account, None);
        assert_eq!(snap.balance, "0.0");
        assert_eq!(snap.status, "");
        assert!(!snap.failed);
    }

    #[test]
    fn snapshot_formats_balance_and_status() {
        let session = Session {
            connection: ConnectionState::Connected,
            account: Some(Address::with_last_byte(0xab)),
            status: StatusLine::failure(Operation::Withdraw, "execution reverted"),
            balance: U256::from(1_500_000_000_000_000_000u128),
        };
        let snap = session.snapshot(18);
        let account = snap.account.clone().unwrap();
        assert!(account.eq_ignore_ascii_case("0x00000000000000000000000000000000000000ab"));
        assert_eq!(snap.balance, "1.5");
        assert_eq!(snap.balance_wei, "1500000000000000000");
        assert_eq!(snap.status, "Error: withdrawal failed: execution reverted");
        assert!(snap.failed);

        let ok = Session { status: StatusLine::success(messages::CONNECTED), ..session };
        assert!(!ok.snapshot(18).failed);
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let json = serde_json::to_value(Session::default().snapshot(18)).unwrap();
        assert_eq!(json["balanceWei"], "0");
        assert_eq!(json["connected"], false);
    }
}
