//! Per-account stake record.

use lop_types::{AccountId, Timestamp};
use serde::{Deserialize, Serialize};

/// Governance tokens an account has locked with the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stake {
    pub account: AccountId,
    pub amount: u128,
    /// When the account first staked; unchanged by top-ups and partial unstakes.
    pub since: Timestamp,
}
