//! Addresses of the three proposal tracks, late-bound into the registry.

use crate::error::StakingError;
use lop_types::{AccountId, TrackKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackAddresses {
    pub shareholder: AccountId,
    pub product: AccountId,
    pub development: AccountId,
}

impl TrackAddresses {
    pub fn get(&self, kind: TrackKind) -> &AccountId {
        match kind {
            TrackKind::ShareHolder => &self.shareholder,
            TrackKind::Product => &self.product,
            TrackKind::Development => &self.development,
        }
    }

    /// Which track, if any, lives at `address`.
    pub fn kind_of(&self, address: &AccountId) -> Option<TrackKind> {
        TrackKind::ALL
            .into_iter()
            .find(|kind| self.get(*kind) == address)
    }

    /// All three addresses must be well-formed and distinct.
    pub fn validate(&self) -> Result<(), StakingError> {
        for kind in TrackKind::ALL {
            if !self.get(kind).is_valid() {
                return Err(StakingError::InvalidTracks(format!(
                    "{} track address is empty",
                    kind
                )));
            }
        }
        if self.shareholder == self.product
            || self.shareholder == self.development
            || self.product == self.development
        {
            return Err(StakingError::InvalidTracks(
                "track addresses must be distinct".to_string(),
            ));
        }
        Ok(())
    }
}
