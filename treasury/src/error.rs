//! Treasury-specific errors.

use crate::vault::Asset;
use lop_token::LedgerError;
use lop_types::AuthorityError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreasuryError {
    #[error(transparent)]
    Unauthorized(#[from] AuthorityError),

    #[error("swaps are disabled")]
    SwapDisabled,

    #[error("insufficient {asset:?} funds in vault: need {needed}, have {available}")]
    InsufficientFunds {
        asset: Asset,
        needed: u128,
        available: u128,
    },

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("vault account {0} cannot deposit into itself")]
    CustodyAccount(String),

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("ledger for {actual} does not hold asset {asset:?} ({expected})")]
    WrongAsset {
        asset: Asset,
        expected: String,
        actual: String,
    },

    #[error("arithmetic overflow in treasury accounting")]
    Overflow,

    #[error("ledger error: {0}")]
    Ledger(LedgerError),
}

impl From<LedgerError> for TreasuryError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance { needed, available } => {
                Self::InsufficientBalance { needed, available }
            }
            other => Self::Ledger(other),
        }
    }
}
