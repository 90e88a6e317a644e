//! Stake registry: the eligibility source for every proposal track.
//!
//! Accounts lock governance tokens with the registry to gain proposal and
//! voting rights. The registry keeps:
//! - per-account stake records and an incrementally maintained total
//! - the addresses of the three tracks, wired once after construction
//! - eligibility answers (share of total stake against `min_vote_percent`)
//!
//! Invariant: `total_stake == Σ stake.amount` in every reachable state.

pub mod error;
pub mod registry;
pub mod stake;
pub mod tracks;

pub use error::StakingError;
pub use registry::{StakeRegistry, StakeSnapshot};
pub use stake::Stake;
pub use tracks::TrackAddresses;
