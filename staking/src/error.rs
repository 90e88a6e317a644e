//! Staking-specific errors.

use lop_token::LedgerError;
use lop_types::AuthorityError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StakingError {
    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient stake: need {needed}, staked {available}")]
    InsufficientStake { needed: u128, available: u128 },

    #[error("custody account {0} cannot stake")]
    CustodyAccount(String),

    #[error("track addresses have not been configured")]
    NotConfigured,

    #[error("track addresses are already configured")]
    AlreadyConfigured,

    #[error("{0} is not a configured track")]
    UnknownTrack(String),

    #[error("invalid track addresses: {0}")]
    InvalidTracks(String),

    #[error("arithmetic overflow in stake accounting")]
    Overflow,

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error(transparent)]
    Unauthorized(#[from] AuthorityError),

    #[error("ledger error: {0}")]
    Ledger(LedgerError),
}

impl From<LedgerError> for StakingError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance { needed, available } => {
                Self::InsufficientBalance { needed, available }
            }
            other => Self::Ledger(other),
        }
    }
}
