//! Shared utilities for the LOP DAO.

pub mod bps;
pub mod logging;
pub mod time;

pub use bps::{meets_bps, share_bps, BPS_DENOMINATOR};
pub use logging::init_tracing;
pub use time::format_duration;
