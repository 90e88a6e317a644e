//! Proposals, their status and vote records.

use lop_types::{AccountId, ProposalId, Timestamp, TrackKind};
use serde::{Deserialize, Serialize};

/// Life-cycle status of a proposal id.
///
/// `None` is the implicit state of an id never created. `Cancelled` and
/// `Active` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    None,
    Created,
    Cancelled,
    Active,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Active)
    }
}

/// What a proposal asks for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// A budget request in raw token units (ShareHolder track).
    Budget { amount: u128 },
    /// Free-form metadata (Product track).
    Metadata { text: String },
    /// A development initiative tied to an approved budget and product proposal.
    Development {
        description: String,
        budget_proposal: ProposalId,
        product_proposal: ProposalId,
    },
}

/// A governance proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub owner: AccountId,
    pub track: TrackKind,
    pub payload: Payload,
    pub status: Status,
    /// Stake-weighted tallies.
    pub vote_yes: u128,
    pub vote_no: u128,
    pub created_at: Timestamp,
    pub executed_at: Option<Timestamp>,
}

impl Proposal {
    pub fn participation(&self) -> Option<u128> {
        self.vote_yes.checked_add(self.vote_no)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteChoice {
    Yes,
    No,
}

/// One account's vote on one proposal. At most one exists per pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub choice: VoteChoice,
    /// The voter's stake when the vote was cast; later unstakes do not change it.
    pub weight_at_vote: u128,
    pub cast_at: Timestamp,
}
