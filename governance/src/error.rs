use lop_staking::StakingError;
use lop_types::{AuthorityError, ProposalId};
use lop_utils::format_duration;
use thiserror::Error;

use crate::proposal::Status;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0} already has an open proposal")]
    ActiveProposalExists(String),

    #[error("proposal {0} not found")]
    NotFound(ProposalId),

    #[error("proposal {id} is {status:?}, expected Created")]
    InvalidState { id: ProposalId, status: Status },

    #[error("{account} has already voted on proposal {id}")]
    AlreadyVoted { account: String, id: ProposalId },

    #[error("voting on proposal {id} still in progress ({} remaining)", format_duration(*remaining_secs))]
    VotingInProgress { id: ProposalId, remaining_secs: u64 },

    #[error("{0} has already requested to join")]
    AlreadyRequested(String),

    #[error("no join request from {0}")]
    RequestNotFound(String),

    #[error("{0} is already a member")]
    AlreadyMember(String),

    #[error("payload does not match the track: {0}")]
    InvalidPayload(String),

    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("stake registry is not configured")]
    NotConfigured,

    #[error("arithmetic overflow in vote tally")]
    Overflow,

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("staking error: {0}")]
    Staking(StakingError),
}

impl From<StakingError> for GovernanceError {
    fn from(err: StakingError) -> Self {
        match err {
            StakingError::NotConfigured => Self::NotConfigured,
            other => Self::Staking(other),
        }
    }
}

impl From<AuthorityError> for GovernanceError {
    fn from(err: AuthorityError) -> Self {
        Self::Unauthorized(err.to_string())
    }
}
