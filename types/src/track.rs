//! Identifiers for the three proposal tracks and their proposals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequential, dense proposal id assigned by the owning track, starting at 0.
pub type ProposalId = u64;

/// One of the three parallel proposal life-cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrackKind {
    /// Strategic / budget proposals, one open proposal per owner.
    ShareHolder,
    /// Product initiatives, open to accepted members.
    Product,
    /// Development initiatives bridging the other two tracks.
    Development,
}

impl TrackKind {
    pub const ALL: [TrackKind; 3] = [Self::ShareHolder, Self::Product, Self::Development];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ShareHolder => "shareholder",
            Self::Product => "product",
            Self::Development => "development",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
