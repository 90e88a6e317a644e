//! Proposal tracks for the LOP DAO.
//!
//! One life-cycle engine ([`ProposalTrack`]) is instantiated three times with a
//! track-specific [`TrackPolicy`]:
//! - ShareHolder: budget proposals, one open proposal per owner, stake-gated
//! - Product: metadata proposals, stake-gated or membership-gated
//! - Development: proposals linking an approved budget and an approved product proposal
//!
//! Per proposal id: None → Created → {Cancelled, Active}. Votes are weighted by
//! the voter's stake at the time of voting; execution is time-locked by the
//! voting period and requires quorum and a strict yes-majority.

pub mod engine;
pub mod error;
pub mod membership;
pub mod policy;
pub mod proposal;
pub mod tracks;

pub use engine::{ProposalTrack, TrackParams};
pub use error::GovernanceError;
pub use membership::{MembershipPolicy, MembershipRegistry, MembershipRequest};
pub use policy::{DevelopmentPolicy, Multiplicity, PayloadKind, ProductPolicy, ShareHolderPolicy, TrackPolicy};
pub use proposal::{Payload, Proposal, Status, VoteChoice, VoteRecord};
pub use tracks::{DevelopmentTrack, ProductTrack, ShareHolderTrack};
