//! The fungible-token ledger the DAO runs on top of.
//!
//! The ledger itself is an external collaborator: this crate only fixes the
//! capability contract the core consumes ([`TokenLedger`]) and its error type.
//! Balance storage, transfer and minting live behind the trait; an in-memory
//! implementation for tests and simulation is `lop_nullables::NullLedger`.
//!
//! The core never bypasses the allowance model: every pull of funds into DAO
//! custody goes through [`TokenLedger::transfer_from`].

pub mod error;
pub mod info;
pub mod ledger;

pub use error::LedgerError;
pub use info::TokenInfo;
pub use ledger::TokenLedger;
