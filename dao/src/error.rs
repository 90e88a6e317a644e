use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaoError {
    #[error("staking error: {0}")]
    Staking(#[from] lop_staking::StakingError),

    #[error("governance error: {0}")]
    Governance(#[from] lop_governance::GovernanceError),

    #[error("treasury error: {0}")]
    Treasury(#[from] lop_treasury::TreasuryError),

    #[error("ledger error: {0}")]
    Ledger(#[from] lop_token::LedgerError),

    #[error(transparent)]
    Unauthorized(#[from] lop_types::AuthorityError),

    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(String),
}
