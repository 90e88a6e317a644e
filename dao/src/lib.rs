//! LOP DAO: the orchestrator over every governance component.
//!
//! The DAO:
//! - builds the stake registry, the three proposal tracks and the treasury from [`DaoConfig`]
//! - performs the one-time late-bound wiring of the registry to the tracks
//! - reads time from an injected [`lop_types::Clock`] and funds from two
//!   [`lop_token::TokenLedger`]s (governance token and stable token)
//! - exposes every operation as a single all-or-nothing call

pub mod config;
pub mod dao;
pub mod error;
pub mod logging;

pub use config::DaoConfig;
pub use dao::Dao;
pub use error::DaoError;
pub use logging::{init_logging, LogFormat};
