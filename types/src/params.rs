//! Governance parameters consumed by the staking registry and the tracks.

use serde::{Deserialize, Serialize};

/// Seconds in one day.
pub const DAY_SECS: u64 = 24 * 3600;

/// Parameters shared by every proposal track.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoParams {
    /// Minimum share of total stake (whole percent) required to propose or vote.
    pub min_vote_percent: u8,

    /// Minimum participation, as basis points of total stake, for a proposal to pass.
    pub quorum_bps: u32,

    /// Time after creation before a proposal can be executed.
    pub voting_period_secs: u64,
}

impl DaoParams {
    /// Value used by the deployed contracts.
    pub const DEFAULT_MIN_VOTE_PERCENT: u8 = 5;
    pub const DEFAULT_QUORUM_BPS: u32 = 5000;
    pub const DEFAULT_VOTING_PERIOD_SECS: u64 = 14 * DAY_SECS;
}

impl Default for DaoParams {
    fn default() -> Self {
        Self {
            min_vote_percent: Self::DEFAULT_MIN_VOTE_PERCENT,
            quorum_bps: Self::DEFAULT_QUORUM_BPS,
            voting_period_secs: Self::DEFAULT_VOTING_PERIOD_SECS,
        }
    }
}
