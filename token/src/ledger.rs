//! The capability contract of an account-balance token ledger.

use crate::error::LedgerError;
use crate::info::TokenInfo;
use lop_types::AccountId;

/// A conventional account-balance ledger with allowances and minter-gated minting.
///
/// Every mutating call is all-or-nothing: on `Err` no balance, allowance or
/// supply has changed.
pub trait TokenLedger {
    fn info(&self) -> &TokenInfo;

    fn balance_of(&self, account: &AccountId) -> u128;

    fn total_supply(&self) -> u128;

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128;

    /// Move `amount` from `from` to `to`, authorized by `from` itself.
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError>;

    /// Set the amount `spender` may pull from `owner`.
    fn approve(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError>;

    /// Move `amount` from `from` to `to` on behalf of `spender`, consuming allowance.
    fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError>;

    /// Create `amount` new tokens for `to`. `minter` must hold the minter role.
    fn mint(&mut self, minter: &AccountId, to: &AccountId, amount: u128)
        -> Result<(), LedgerError>;

    fn is_minter(&self, account: &AccountId) -> bool;

    /// Grant the minter role; only the ledger owner may call this.
    fn add_minter(&mut self, caller: &AccountId, account: &AccountId) -> Result<(), LedgerError>;

    /// Revoke the minter role; only the ledger owner may call this.
    fn remove_minter(&mut self, caller: &AccountId, account: &AccountId)
        -> Result<(), LedgerError>;

    /// Check, without mutating, that `spender` can pull `amount` from `from`.
    ///
    /// Custodians call this before updating their own books so that the later
    /// `transfer_from` is expected to succeed.
    fn ensure_can_pull(
        &self,
        spender: &AccountId,
        from: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        let approved = self.allowance(from, spender);
        if approved < amount {
            return Err(LedgerError::InsufficientAllowance {
                needed: amount,
                available: approved,
            });
        }
        Ok(())
    }
}
