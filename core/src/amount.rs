//! Decimal string <-> fixed-point integer conversion.
//!
//! Amounts typed by users ("25.5") become token base units
//! (`25_500_000` for a 6-decimal stablecoin) before they reach a contract call.

use std::fmt;

use alloy_primitives::U256;

use crate::error::{AmountError, AmountResult};

/// Decimals of the USDC stablecoin.
pub const USDC_DECIMALS: u8 = 6;

/// Parse a human decimal string into base units.
///
/// Accepts `123`, `123.45`, `.5` and `5.` (surrounding whitespace ignored).
/// Signs, exponents, zero, and more than `decimals` fractional digits are
/// rejected rather than rounded.
pub fn parse_units(input: &str, decimals: u8) -> AmountResult<U256> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return Err(AmountError::Malformed(trimmed.to_string()));
    }

    if frac.len() > decimals as usize {
        return Err(AmountError::TooManyDecimals { max: decimals });
    }

    let mut digits = String::with_capacity(whole.len() + decimals as usize);
    digits.push_str(whole);
    digits.push_str(frac);
    digits.extend(std::iter::repeat('0').take(decimals as usize - frac.len()));

    let value = U256::from_str_radix(&digits, 10).map_err(|_| AmountError::Overflow)?;
    if value.is_zero() {
        return Err(AmountError::NotPositive);
    }
    Ok(value)
}

/// Render base units as a decimal string without trailing zeros.
pub fn format_units(value: U256, decimals: u8) -> String {
    let raw = value.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return raw;
    }

    let padded = if raw.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - raw.len()), raw)
    } else {
        raw
    };

    let (whole, frac) = padded.split_at(padded.len() - decimals);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, frac)
    }
}

/// A positive USDC amount in base units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct UsdcAmount(U256);

impl UsdcAmount {
    /// Parse user input, e.g. `"25.5"`.
    pub fn parse(input: &str) -> AmountResult<Self> {
        parse_units(input, USDC_DECIMALS).map(Self)
    }

    pub fn raw(&self) -> U256 {
        self.0
    }
}

impl fmt::Display for UsdcAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} USDC", format_units(self.0, USDC_DECIMALS))
    }
}

/// Parse an NFT token id: a non-negative integer.
pub fn parse_token_id(input: &str) -> Option<U256> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    U256::from_str_radix(trimmed, 10).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deposit_amount() {
        assert_eq!(parse_units("25.5", 6), Ok(U256::from(25_500_000u64)));
        assert_eq!(parse_units("1", 6), Ok(U256::from(1_000_000u64)));
        assert_eq!(parse_units(" .5 ", 6), Ok(U256::from(500_000u64)));
        assert_eq!(parse_units("5.", 6), Ok(U256::from(5_000_000u64)));
        assert_eq!(parse_units("0.000001", 6), Ok(U256::from(1u64)));
    }

    #[test]
    fn test_parse_rejects_non_positive_and_garbage() {
        for bad in ["", "   ", "."] {
            assert!(parse_units(bad, 6).is_err(), "{:?} should fail", bad);
        }
        assert_eq!(parse_units("", 6), Err(AmountError::Empty));
        assert_eq!(parse_units("0", 6), Err(AmountError::NotPositive));
        assert_eq!(parse_units("0.000", 6), Err(AmountError::NotPositive));
        assert!(matches!(parse_units("-1", 6), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_units("+1", 6), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_units("1e5", 6), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_units("abc", 6), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_units("1.2.3", 6), Err(AmountError::Malformed(_))));
    }

    #[test]
    fn test_parse_precision_and_overflow() {
        assert_eq!(
            parse_units("0.0000001", 6),
            Err(AmountError::TooManyDecimals { max: 6 })
        );
        let huge = "9".repeat(80);
        assert_eq!(parse_units(&huge, 6), Err(AmountError::Overflow));
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(U256::from(25_500_000u64), 6), "25.5");
        assert_eq!(format_units(U256::from(1_000_000u64), 6), "1");
        assert_eq!(format_units(U256::from(1u64), 6), "0.000001");
        assert_eq!(format_units(U256::ZERO, 6), "0");
        assert_eq!(format_units(U256::from(42u64), 0), "42");
    }

    #[test]
    fn test_usdc_display() {
        let amount = UsdcAmount::parse("12.50").unwrap();
        assert_eq!(amount.to_string(), "12.5 USDC");
        assert_eq!(amount.raw(), U256::from(12_500_000u64));
    }

    #[test]
    fn test_token_id() {
        assert_eq!(parse_token_id("7"), Some(U256::from(7u64)));
        assert_eq!(parse_token_id("0"), Some(U256::ZERO));
        assert_eq!(parse_token_id(""), None);
        assert_eq!(parse_token_id("1.5"), None);
        assert_eq!(parse_token_id("-2"), None);
    }
}
