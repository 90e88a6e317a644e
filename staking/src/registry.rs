//! Core stake registry.

use crate::error::StakingError;
use crate::stake::Stake;
use crate::tracks::TrackAddresses;
use lop_token::TokenLedger;
use lop_types::{AccountId, Authority, Timestamp, TokenAmount, TrackKind};
use lop_utils::{meets_bps, share_bps};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a track learns about an account when it asks the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakeSnapshot {
    /// The account's locked stake.
    pub stake: u128,
    /// Total locked stake across all accounts.
    pub total_stake: u128,
    /// `stake / total_stake` in basis points, rounded down.
    pub share_bps: u32,
    /// Whether the share meets `min_vote_percent` (compared exactly, not rounded).
    pub eligible: bool,
}

/// The stake registry: custodies locked tokens and answers eligibility queries.
///
/// Funds move with checks-effects-interactions ordering: the registry validates
/// and updates its own books first, then calls the ledger, and restores the
/// previous books if the ledger call fails.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakeRegistry {
    /// Custody account holding every staked token on the ledger.
    address: AccountId,
    min_vote_percent: u8,
    stakes: BTreeMap<AccountId, Stake>,
    total_stake: u128,
    tracks: Option<TrackAddresses>,
}

impl StakeRegistry {
    pub fn new(address: AccountId, min_vote_percent: u8) -> Self {
        Self {
            address,
            min_vote_percent: min_vote_percent.min(100),
            stakes: BTreeMap::new(),
            total_stake: 0,
            tracks: None,
        }
    }

    pub fn address(&self) -> &AccountId {
        &self.address
    }

    pub fn min_vote_percent(&self) -> u8 {
        self.min_vote_percent
    }

    /// Wire the three track addresses. Privileged and one-time.
    pub fn configure_tracks(
        &mut self,
        authority: &Authority,
        caller: &AccountId,
        tracks: TrackAddresses,
    ) -> Result<(), StakingError> {
        authority.ensure_owner(caller)?;
        if self.tracks.is_some() {
            return Err(StakingError::AlreadyConfigured);
        }
        tracks.validate()?;
        tracing::info!(
            shareholder = %tracks.shareholder,
            product = %tracks.product,
            development = %tracks.development,
            "stake registry wired to tracks"
        );
        self.tracks = Some(tracks);
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.tracks.is_some()
    }

    pub fn track_addresses(&self) -> Option<&TrackAddresses> {
        self.tracks.as_ref()
    }

    /// Lock `amount` of the caller's tokens. Requires a prior ledger approval
    /// of the registry address. Returns the caller's new stake.
    pub fn stake<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: &AccountId,
        amount: u128,
        now: Timestamp,
    ) -> Result<u128, StakingError> {
        if amount == 0 {
            return Err(StakingError::ZeroAmount);
        }
        if caller == &self.address {
            return Err(StakingError::CustodyAccount(caller.to_string()));
        }
        ledger.ensure_can_pull(&self.address, caller, amount)?;

        let previous = self.stakes.get(caller).cloned();
        let current = previous.as_ref().map_or(0, |s| s.amount);
        let new_amount = current
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;
        let new_total = self
            .total_stake
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;

        let since = previous.as_ref().map_or(now, |s| s.since);
        self.stakes.insert(
            caller.clone(),
            Stake {
                account: caller.clone(),
                amount: new_amount,
                since,
            },
        );
        self.total_stake = new_total;

        if let Err(err) = ledger.transfer_from(&self.address, caller, &self.address, amount) {
            self.restore(caller, previous, new_total - amount);
            tracing::debug!(account = %caller, amount, error = %err, "stake transfer failed, books restored");
            return Err(err.into());
        }

        tracing::info!(
            account = %caller,
            amount = %TokenAmount::new(amount),
            stake = %TokenAmount::new(new_amount),
            total_stake = %TokenAmount::new(new_total),
            "stake recorded"
        );
        Ok(new_amount)
    }

    /// Release `amount` of the caller's stake back to its ledger balance.
    /// Returns the caller's remaining stake.
    ///
    /// Votes already cast keep the weight they were recorded with.
    pub fn unstake<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: &AccountId,
        amount: u128,
    ) -> Result<u128, StakingError> {
        if amount == 0 {
            return Err(StakingError::ZeroAmount);
        }
        let previous = self.stakes.get(caller).cloned();
        let current = previous.as_ref().map_or(0, |s| s.amount);
        if current < amount {
            return Err(StakingError::InsufficientStake {
                needed: amount,
                available: current,
            });
        }
        let remaining = current - amount;
        let new_total = self
            .total_stake
            .checked_sub(amount)
            .ok_or(StakingError::Overflow)?;

        match &previous {
            Some(record) if remaining > 0 => {
                self.stakes.insert(
                    caller.clone(),
                    Stake {
                        amount: remaining,
                        ..record.clone()
                    },
                );
            }
            _ => {
                self.stakes.remove(caller);
            }
        }
        self.total_stake = new_total;

        if let Err(err) = ledger.transfer(&self.address, caller, amount) {
            self.restore(caller, previous, new_total + amount);
            tracing::warn!(account = %caller, amount, error = %err, "unstake transfer failed, books restored");
            return Err(err.into());
        }

        tracing::info!(
            account = %caller,
            amount = %TokenAmount::new(amount),
            stake = %TokenAmount::new(remaining),
            total_stake = %TokenAmount::new(new_total),
            "stake released"
        );
        Ok(remaining)
    }

    fn restore(&mut self, account: &AccountId, previous: Option<Stake>, total: u128) {
        match previous {
            Some(record) => {
                self.stakes.insert(account.clone(), record);
            }
            None => {
                self.stakes.remove(account);
            }
        }
        self.total_stake = total;
    }

    pub fn stake_of(&self, account: &AccountId) -> u128 {
        self.stakes.get(account).map_or(0, |s| s.amount)
    }

    pub fn stake_record(&self, account: &AccountId) -> Option<&Stake> {
        self.stakes.get(account)
    }

    pub fn total_stake(&self) -> u128 {
        self.total_stake
    }

    /// Every account with a non-zero stake, in account order.
    pub fn stakers(&self) -> impl Iterator<Item = &Stake> {
        self.stakes.values()
    }

    /// The account's share of total stake, in basis points.
    pub fn eligibility_share(&self, account: &AccountId) -> Result<u32, StakingError> {
        if !self.is_configured() {
            return Err(StakingError::NotConfigured);
        }
        Ok(share_bps(self.stake_of(account), self.total_stake))
    }

    /// Answer a track's eligibility question about `account`.
    ///
    /// Fails with `NotConfigured` before `configure_tracks`, and with
    /// `UnknownTrack` if `track` is not one of the wired addresses.
    pub fn query(
        &self,
        track: &AccountId,
        account: &AccountId,
    ) -> Result<StakeSnapshot, StakingError> {
        self.track_kind(track)?;
        let stake = self.stake_of(account);
        let min_bps = u32::from(self.min_vote_percent) * 100;
        Ok(StakeSnapshot {
            stake,
            total_stake: self.total_stake,
            share_bps: share_bps(stake, self.total_stake),
            eligible: stake > 0 && meets_bps(stake, self.total_stake, min_bps),
        })
    }

    /// Resolve a wired track address to its kind.
    pub fn track_kind(&self, track: &AccountId) -> Result<TrackKind, StakingError> {
        let tracks = self.tracks.as_ref().ok_or(StakingError::NotConfigured)?;
        tracks
            .kind_of(track)
            .ok_or_else(|| StakingError::UnknownTrack(track.to_string()))
    }

    /// Recompute the total from the per-account records.
    pub fn recomputed_total(&self) -> Option<u128> {
        self.stakes
            .values()
            .try_fold(0u128, |acc, s| acc.checked_add(s.amount))
    }
}

impl StakeRegistry {
    /// Serialize the registry for persistence.
    pub fn save_state(&self) -> Result<Vec<u8>, StakingError> {
        bincode::serialize(self).map_err(|e| StakingError::Snapshot(e.to_string()))
    }

    /// Restore a registry from serialized bytes, re-checking the stake-sum invariant.
    pub fn load_state(data: &[u8]) -> Result<Self, StakingError> {
        let registry: Self =
            bincode::deserialize(data).map_err(|e| StakingError::Snapshot(e.to_string()))?;
        if registry.recomputed_total() != Some(registry.total_stake) {
            return Err(StakingError::Snapshot(
                "total stake does not match per-account records".to_string(),
            ));
        }
        Ok(registry)
    }
}
