//! Nullable token ledger: an in-memory account-balance ledger.
//!
//! Behaves like a capped ERC-20 with an owner-managed minter list: the deployer
//! owns the ledger, is the first minter, and receives the initial supply.

use lop_token::{LedgerError, TokenInfo, TokenLedger};
use lop_types::{AccountId, Authority};
use std::collections::HashMap;

/// An in-memory [`TokenLedger`] for tests and simulation.
pub struct NullLedger {
    info: TokenInfo,
    authority: Authority,
    balances: HashMap<AccountId, u128>,
    allowances: HashMap<(AccountId, AccountId), u128>,
    total_supply: u128,
    /// Error returned by the next transfer or transfer_from instead of moving funds.
    injected_failure: Option<LedgerError>,
}

impl NullLedger {
    /// Deploy a ledger owned by `deployer`, minting `initial_supply` to it.
    pub fn deploy(
        info: TokenInfo,
        deployer: &AccountId,
        initial_supply: u128,
    ) -> Result<Self, LedgerError> {
        let mut authority = Authority::new(deployer.clone());
        authority.add_minter(deployer, deployer.clone())?;
        let mut ledger = Self {
            info,
            authority,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            total_supply: 0,
            injected_failure: None,
        };
        if initial_supply > 0 {
            ledger.mint(deployer, deployer, initial_supply)?;
        }
        tracing::debug!(
            symbol = %ledger.info.symbol,
            owner = %deployer,
            supply = ledger.total_supply,
            "null ledger deployed"
        );
        Ok(ledger)
    }

    /// Make the next transfer or transfer_from fail with `error`.
    pub fn fail_next_transfer(&mut self, error: LedgerError) {
        self.injected_failure = Some(error);
    }

    pub fn owner(&self) -> &AccountId {
        self.authority.owner()
    }

    /// Hand ledger ownership (and with it minter administration) to `new_owner`.
    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> Result<(), LedgerError> {
        self.authority.transfer_ownership(caller, new_owner)?;
        Ok(())
    }

    fn move_balance(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if let Some(err) = self.injected_failure.take() {
            return Err(err);
        }
        if !to.is_valid() {
            return Err(LedgerError::InvalidAccount(to.to_string()));
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(from.clone(), available - amount);
        self.balances.insert(to.clone(), credited);
        Ok(())
    }
}

impl TokenLedger for NullLedger {
    fn info(&self) -> &TokenInfo {
        &self.info
    }

    fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn total_supply(&self) -> u128 {
        self.total_supply
    }

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        self.move_balance(from, to, amount)
    }

    fn approve(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if !spender.is_valid() {
            return Err(LedgerError::InvalidAccount(spender.to_string()));
        }
        self.allowances
            .insert((owner.clone(), spender.clone()), amount);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let approved = self.allowance(from, spender);
        if approved < amount {
            return Err(LedgerError::InsufficientAllowance {
                needed: amount,
                available: approved,
            });
        }
        self.move_balance(from, to, amount)?;
        self.allowances
            .insert((from.clone(), spender.clone()), approved - amount);
        Ok(())
    }

    fn mint(
        &mut self,
        minter: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if !self.authority.is_minter(minter) {
            return Err(LedgerError::NotMinter(minter.to_string()));
        }
        if !to.is_valid() {
            return Err(LedgerError::InvalidAccount(to.to_string()));
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        if let Some(cap) = self.info.cap {
            if supply > cap {
                return Err(LedgerError::CapExceeded {
                    cap,
                    requested: amount,
                });
            }
        }
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(to.clone(), credited);
        self.total_supply = supply;
        Ok(())
    }

    fn is_minter(&self, account: &AccountId) -> bool {
        self.authority.is_minter(account)
    }

    fn add_minter(&mut self, caller: &AccountId, account: &AccountId) -> Result<(), LedgerError> {
        self.authority.add_minter(caller, account.clone())?;
        Ok(())
    }

    fn remove_minter(
        &mut self,
        caller: &AccountId,
        account: &AccountId,
    ) -> Result<(), LedgerError> {
        self.authority.remove_minter(caller, account)?;
        Ok(())
    }
}
