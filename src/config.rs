//! Fixed configuration, bundled at build time.
//!
//! The contract address may be overridden when building by setting
//! `TIPJAR_CONTRACT_ADDRESS`; there is no runtime lookup.

use alloy_primitives::{address, Address};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::core::units::ETHER_DECIMALS;

/// The deployed tip jar.
pub const DEFAULT_CONTRACT_ADDRESS: Address = address!("8d59149d4e008648dee9ff2789c39f265dacf436");

/// Build-time override, if any.
pub const BUNDLED_CONTRACT_ADDRESS: Option<&str> = option_env!("TIPJAR_CONTRACT_ADDRESS");

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid contract address {0:?}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipJarConfig {
    pub contract_address: Address,
    /// Fractional digits of the base currency.
    pub decimals: u8,
    /// Delay between receipt polls while waiting for confirmation.
    pub receipt_poll_interval: Duration,
}

impl Default for TipJarConfig {
    fn default() -> Self {
        Self {
            contract_address: DEFAULT_CONTRACT_ADDRESS,
            decimals: ETHER_DECIMALS,
            receipt_poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl TipJarConfig {
    /// Config for the contract this build was bundled with.
    pub fn from_bundled() -> Result<Self, ConfigError> {
        match BUNDLED_CONTRACT_ADDRESS {
            Some(addr) => Self::from_address(addr),
            None => Ok(Self::default()),
        }
    }

    /// Syntax check only; the checksum and deployment are not verified.
    pub fn from_address(addr: &str) -> Result<Self, ConfigError> {
        let contract_address = Address::from_str(addr.trim())
            .map_err(|_| ConfigError::InvalidAddress(addr.to_string()))?;
        Ok(Self { contract_address, ..Default::default() })
    }

    pub fn with_contract(mut self, address: Address) -> Self { self.contract_address = address; self }
    pub fn with_decimals(mut self, decimals: u8) -> Self { self.decimals = decimals; self }
    pub fn with_poll_interval(mut self, interval: Duration) -> Self { self.receipt_poll_interval = interval; self }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_deployed_contract() {
        let config = TipJarConfig::default();
        assert_eq!(
            config.contract_address,
            Address::from_str("0x8D59149D4E008648Dee9ff2789c39f265DAcF436").unwrap()
        );
        assert_eq!(config.decimals, 18);
    }

    #[test]
    fn from_address_checks_syntax_only() {
        let config = TipJarConfig::from_address(" 0x0000000000000000000000000000000000000001 ").unwrap();
        assert_eq!(config.contract_address, Address::with_last_byte(1));

        assert!(TipJarConfig::from_address("0x1234").is_err());
        assert!(TipJarConfig::from_address("not-an-address").is_err());
    }

    #[test]
    fn builders_override_fields() {
        let config = TipJarConfig::default()
            .with_decimals(6)
            .with_poll_interval(Duration::from_millis(5))
            .with_contract(Address::ZERO);
        assert_eq!(config.decimals, 6);
        assert_eq!(config.receipt_poll_interval, Duration::from_millis(5));
        assert_eq!(config.contract_address, Address::ZERO);
    }

    #[test]
    fn bundled_config_parses() {
        assert!(TipJarConfig::from_bundled().is_ok());
    }
}
