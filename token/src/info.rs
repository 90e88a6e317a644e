//! Static token metadata.

use serde::{Deserialize, Serialize};

/// Name, symbol, decimals and supply cap of one ledger token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    /// Maximum total supply in raw units; `None` means uncapped.
    pub cap: Option<u128>,
}

impl TokenInfo {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals: lop_types::TOKEN_DECIMALS,
            cap: None,
        }
    }

    pub fn with_cap(mut self, cap: u128) -> Self {
        self.cap = Some(cap);
        self
    }

    /// The governance token ("Lottery of the People", `LOP`).
    pub fn governance() -> Self {
        Self::new("Lottery of the People", "LOP")
    }

    /// The vote-escrow companion token (`vLOP`).
    pub fn vote_escrow() -> Self {
        Self::new("Lottery of the People", "vLOP")
    }

    /// The stable asset held by the treasury.
    pub fn stable() -> Self {
        Self::new("USD Coin", "USDC")
    }
}
