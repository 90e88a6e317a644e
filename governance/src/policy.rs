//! Track policies: the guard predicates that distinguish the three tracks.
//!
//! The life-cycle engine is shared; a policy only decides who may propose and
//! vote, how many open proposals an owner may hold, and which payload shape
//! the track accepts.

use crate::membership::MembershipRegistry;
use crate::proposal::Payload;
use lop_staking::StakeSnapshot;
use lop_types::{AccountId, TrackKind};
use serde::{Deserialize, Serialize};

/// How many `Created` proposals one owner may hold at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Multiplicity {
    SingleOpenPerOwner,
    Unbounded,
}

/// The payload shape a track accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadKind {
    Budget,
    Metadata,
    Development,
}

impl PayloadKind {
    pub fn matches(&self, payload: &Payload) -> bool {
        matches!(
            (self, payload),
            (Self::Budget, Payload::Budget { .. })
                | (Self::Metadata, Payload::Metadata { .. })
                | (Self::Development, Payload::Development { .. })
        )
    }
}

pub trait TrackPolicy {
    const KIND: TrackKind;

    fn multiplicity(&self) -> Multiplicity;

    fn payload_kind(&self) -> PayloadKind;

    /// Whether `account` may create proposals on and vote in this track.
    fn is_eligible(&self, account: &AccountId, stake: &StakeSnapshot) -> bool;
}

/// Budget proposals: stake share ≥ `min_vote_percent`, one open proposal per owner.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShareHolderPolicy;

impl TrackPolicy for ShareHolderPolicy {
    const KIND: TrackKind = TrackKind::ShareHolder;

    fn multiplicity(&self) -> Multiplicity {
        Multiplicity::SingleOpenPerOwner
    }

    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::Budget
    }

    fn is_eligible(&self, _account: &AccountId, stake: &StakeSnapshot) -> bool {
        stake.eligible
    }
}

/// Product proposals: an accepted member is eligible regardless of stake;
/// anyone else needs the stake share.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProductPolicy {
    pub membership: MembershipRegistry,
}

impl TrackPolicy for ProductPolicy {
    const KIND: TrackKind = TrackKind::Product;

    fn multiplicity(&self) -> Multiplicity {
        Multiplicity::Unbounded
    }

    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::Metadata
    }

    fn is_eligible(&self, account: &AccountId, stake: &StakeSnapshot) -> bool {
        self.membership.is_member(account) || stake.eligible
    }
}

/// Development proposals: stake-gated, unbounded, linked to both upstream tracks.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DevelopmentPolicy;

impl TrackPolicy for DevelopmentPolicy {
    const KIND: TrackKind = TrackKind::Development;

    fn multiplicity(&self) -> Multiplicity {
        Multiplicity::Unbounded
    }

    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::Development
    }

    fn is_eligible(&self, _account: &AccountId, stake: &StakeSnapshot) -> bool {
        stake.eligible
    }
}
