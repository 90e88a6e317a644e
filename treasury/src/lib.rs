//! Treasury vault for the LOP DAO.
//!
//! Custodies two assets (A: the governance token, B: the stable token).
//! Deposits pull funds through the ledger's allowance model; rebalancing
//! between the two books is an owner-only, switchable, fixed 1:1 swap with no
//! price discovery.

pub mod error;
pub mod vault;

pub use error::TreasuryError;
pub use vault::{Asset, TreasuryVault};
