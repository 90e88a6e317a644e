//! Fundamental types for the LOP DAO.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account identifiers, token amounts, timestamps and the clock seam, governance
//! parameters, track identifiers, and the single-owner [`Authority`] gate.

pub mod address;
pub mod amount;
pub mod authority;
pub mod params;
pub mod time;
pub mod track;

pub use address::AccountId;
pub use amount::{TokenAmount, TOKEN_DECIMALS, TOKEN_UNIT};
pub use authority::{Authority, AuthorityError};
pub use params::DaoParams;
pub use time::{Clock, SystemClock, Timestamp};
pub use track::{ProposalId, TrackKind};
