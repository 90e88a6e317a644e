//! Token amount type shared by both custodied assets.
//!
//! Amounts are fixed-point integers (u128) to avoid floating-point errors.
//! The smallest unit is 1 raw; one whole token is [`TOKEN_UNIT`] raw.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places of every ledger token (ERC-20 convention).
pub const TOKEN_DECIMALS: u32 = 18;

/// 1 whole token in raw units.
pub const TOKEN_UNIT: u128 = 10u128.pow(TOKEN_DECIMALS);

/// A token amount in raw units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// An amount of whole tokens, e.g. `from_whole(2)` is `2 * TOKEN_UNIT` raw.
    pub fn from_whole(tokens: u128) -> Self {
        Self(tokens.saturating_mul(TOKEN_UNIT))
    }

    /// An amount of thousandths of a token, e.g. `from_milli(500)` is half a token.
    pub fn from_milli(milli: u128) -> Self {
        Self(milli.saturating_mul(TOKEN_UNIT / 1000))
    }

    pub fn raw(&self) -> u128 {
        self.0
    }
}

/// Formats as whole tokens with the fractional part trimmed, e.g. `0.5`.
impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / TOKEN_UNIT;
        let frac = self.0 % TOKEN_UNIT;
        if frac == 0 {
            return write!(f, "{}", whole);
        }
        let digits = format!("{:0width$}", frac, width = TOKEN_DECIMALS as usize);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_and_milli_units() {
        assert_eq!(TokenAmount::from_whole(1).raw(), TOKEN_UNIT);
        assert_eq!(TokenAmount::from_milli(500).raw(), TOKEN_UNIT / 2);
    }

    #[test]
    fn display_trims_fraction() {
        assert_eq!(TokenAmount::from_whole(100_000).to_string(), "100000");
        assert_eq!(TokenAmount::from_milli(500).to_string(), "0.5");
        assert_eq!(TokenAmount::new(1).to_string(), "0.000000000000000001");
    }
}
