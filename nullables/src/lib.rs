//! Nullable infrastructure for deterministic testing.
//!
//! The DAO core reads time and moves funds only through the [`lop_types::Clock`]
//! and [`lop_token::TokenLedger`] seams. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem, network or a real ledger
//!
//! Usage: swap real implementations for nullables in tests and simulations.

pub mod clock;
pub mod ledger;

pub use clock::NullClock;
pub use ledger::NullLedger;
