//! Decimal ⇄ smallest-unit conversion for the chain's base currency.
//!
//! Parsing is strict: plain decimal digits with an optional fractional part,
//! no sign, no exponent, no more fractional digits than the unit allows.
//! Formatting matches ethers' `formatUnits` (`"1.0"`, `"0.5"`, `"12.345"`).

use alloy_primitives::U256;
use thiserror::Error;

/// Decimal places between ether and wei.
pub const ETHER_DECIMALS: u8 = 18;

/// Largest decimals value whose scale factor fits in a U256.
const MAX_DECIMALS: u8 = 77;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount must not be negative: {0}")]
    Negative(String),
    #[error("not a decimal number: {0}")]
    Invalid(String),
    #[error("too many decimal places (max {max}): {input}")]
    TooPrecise { input: String, max: u8 },
    #[error("amount too large: {0}")]
    Overflow(String),
    #[error("unsupported unit decimals: {0}")]
    Decimals(u8),
}

/// Parse a decimal ether amount into wei.
pub fn parse_ether(input: &str) -> Result<U256, AmountError> {
    parse_units(input, ETHER_DECIMALS)
}

/// Format wei as a decimal ether amount.
pub fn format_ether(wei: U256) -> String {
    format_units(wei, ETHER_DECIMALS)
}

/// Parse `input` as a non-negative decimal with at most `decimals` fractional
/// digits and scale it to the smallest unit.
pub fn parse_units(input: &str, decimals: u8) -> Result<U256, AmountError> {
    if decimals > MAX_DECIMALS {
        return Err(AmountError::Decimals(decimals));
    }
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(AmountError::Negative(trimmed.to_string()));
    }

    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return Err(AmountError::Invalid(trimmed.to_string()));
    }
    if frac.len() > decimals as usize {
        return Err(AmountError::TooPrecise { input: trimmed.to_string(), max: decimals });
    }

    // whole ++ frac padded right to `decimals` is the smallest-unit integer
    let mut digits = String::with_capacity(whole.len() + decimals as usize);
    digits.push_str(whole);
    digits.push_str(frac);
    digits.extend(std::iter::repeat('0').take(decimals as usize - frac.len()));
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).map_err(|_| AmountError::Overflow(trimmed.to_string()))
}

/// Format a smallest-unit integer as a decimal with trailing zeros trimmed,
/// keeping at least one fractional digit.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return format!("{}.0", digits);
    }
    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
    } else {
        digits
    };
    let (whole, frac) = padded.split_at(padded.len() - decimals);
    let frac = frac.trim_end_matches('0');
    format!("{}.{}", whole, if frac.is_empty() { "0" } else { frac })
}
