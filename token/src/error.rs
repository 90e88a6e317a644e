//! Ledger errors.

use lop_types::AuthorityError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, approved {available}")]
    InsufficientAllowance { needed: u128, available: u128 },

    #[error("{0} is not a minter")]
    NotMinter(String),

    #[error("mint of {requested} would exceed the supply cap of {cap}")]
    CapExceeded { cap: u128, requested: u128 },

    #[error("invalid account: {0}")]
    InvalidAccount(String),

    #[error("arithmetic overflow in ledger accounting")]
    Overflow,

    #[error(transparent)]
    Authority(#[from] AuthorityError),
}
