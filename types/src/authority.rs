//! Single-owner gate for privileged operations.
//!
//! An [`Authority`] is an explicit record handed by reference to every privileged
//! call, so independent instances (one per token ledger, one for the DAO) never
//! share hidden global state.

use crate::address::AccountId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorityError {
    #[error("{caller} is not the owner")]
    Unauthorized { caller: String },
}

/// The owner of a set of privileged operations plus the minter role list it manages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    owner: AccountId,
    minters: BTreeSet<AccountId>,
}

impl Authority {
    /// A new authority owned by `owner`, with no minters.
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            minters: BTreeSet::new(),
        }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn is_owner(&self, account: &AccountId) -> bool {
        &self.owner == account
    }

    /// Fail with [`AuthorityError::Unauthorized`] unless `caller` is the owner.
    pub fn ensure_owner(&self, caller: &AccountId) -> Result<(), AuthorityError> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(AuthorityError::Unauthorized {
                caller: caller.to_string(),
            })
        }
    }

    /// Hand ownership to `new_owner` in a single step.
    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> Result<(), AuthorityError> {
        self.ensure_owner(caller)?;
        self.owner = new_owner;
        Ok(())
    }

    pub fn is_minter(&self, account: &AccountId) -> bool {
        self.minters.contains(account)
    }

    pub fn minters(&self) -> impl Iterator<Item = &AccountId> {
        self.minters.iter()
    }

    /// Grant the minter role. Returns `false` if `account` already held it.
    pub fn add_minter(
        &mut self,
        caller: &AccountId,
        account: AccountId,
    ) -> Result<bool, AuthorityError> {
        self.ensure_owner(caller)?;
        Ok(self.minters.insert(account))
    }

    /// Revoke the minter role. Returns `false` if `account` did not hold it.
    pub fn remove_minter(
        &mut self,
        caller: &AccountId,
        account: &AccountId,
    ) -> Result<bool, AuthorityError> {
        self.ensure_owner(caller)?;
        Ok(self.minters.remove(account))
    }
}
