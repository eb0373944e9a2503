use num_bigint::BigUint;

use crate::error::QuoteError;

/// Decimal places of every amount exchanged with the quoters.
pub const DECIMALS: usize = 18;

/// Largest value an ABI `uint256` can carry, in bits.
const MAX_BITS: u64 = 256;

/// A token amount scaled by 10^18.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FixedPoint(BigUint);

impl FixedPoint {
    pub fn from_raw(raw: BigUint) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> &BigUint {
        &self.0
    }

    pub fn into_raw(self) -> BigUint {
        self.0
    }
}

impl From<u128> for FixedPoint {
    fn from(raw: u128) -> Self {
        Self(BigUint::from(raw))
    }
}

/// Parse a user-entered decimal string into a fixed-point amount.
///
/// Accepts an optional leading `+`, digits, and at most one `.`. Fractional
/// digits past the 18th place are truncated. Zero (including values that
/// truncate to zero) is rejected.
pub fn encode(input: &str) -> Result<FixedPoint, QuoteError> {
    let s = input.trim();
    let s = s.strip_prefix('+').unwrap_or(s);

    if s.is_empty() {
        return Err(QuoteError::InvalidAmount("empty amount".to_string()));
    }

    let (integer_part, fraction_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };

    if integer_part.is_empty() && fraction_part.is_empty() {
        return Err(QuoteError::InvalidAmount(format!("not a number: {input}")));
    }

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(integer_part) || !all_digits(fraction_part) {
        return Err(QuoteError::InvalidAmount(format!("not a number: {input}")));
    }

    let kept = &fraction_part[..fraction_part.len().min(DECIMALS)];
    let mut digits = String::with_capacity(integer_part.len() + DECIMALS);
    digits.push_str(integer_part);
    digits.push_str(kept);
    digits.extend(std::iter::repeat_n('0', DECIMALS - kept.len()));

    let value = BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| QuoteError::InvalidAmount(format!("not a number: {input}")))?;

    if value.bits() == 0 {
        return Err(QuoteError::InvalidAmount(format!(
            "amount must be greater than zero: {input}"
        )));
    }
    if value.bits() > MAX_BITS {
        return Err(QuoteError::InvalidAmount(format!("amount too large: {input}")));
    }

    Ok(FixedPoint(value))
}

/// Render a fixed-point amount as an exact decimal string.
///
/// Whole values keep a single fractional zero (`1.0`), trailing zeros are
/// otherwise trimmed.
pub fn decode(amount: &FixedPoint) -> String {
    let s = amount.0.to_string();

    let (integer_part, fraction_part) = if s.len() <= DECIMALS {
        let mut padded = String::with_capacity(DECIMALS);
        padded.extend(std::iter::repeat_n('0', DECIMALS - s.len()));
        padded.push_str(&s);
        ("0".to_string(), padded)
    } else {
        let (i, f) = s.split_at(s.len() - DECIMALS);
        (i.to_string(), f.to_string())
    };

    let trimmed = fraction_part.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{integer_part}.0")
    } else {
        format!("{integer_part}.{trimmed}")
    }
}
