//! The treasury vault.

use crate::error::TreasuryError;
use lop_token::TokenLedger;
use lop_types::{AccountId, Authority, TokenAmount};
use serde::{Deserialize, Serialize};

/// One of the two custodied assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    /// The governance token.
    A,
    /// The stable token.
    B,
}

impl Asset {
    pub fn other(&self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryVault {
    /// Custody account on both ledgers.
    address: AccountId,
    symbol_a: String,
    symbol_b: String,
    balance_a: u128,
    balance_b: u128,
    swap_enabled: bool,
}

impl TreasuryVault {
    /// A vault holding `symbol_a` and `symbol_b`, with swaps disabled.
    pub fn new(address: AccountId, symbol_a: impl Into<String>, symbol_b: impl Into<String>) -> Self {
        Self {
            address,
            symbol_a: symbol_a.into(),
            symbol_b: symbol_b.into(),
            balance_a: 0,
            balance_b: 0,
            swap_enabled: false,
        }
    }

    pub fn address(&self) -> &AccountId {
        &self.address
    }

    pub fn symbol(&self, asset: Asset) -> &str {
        match asset {
            Asset::A => &self.symbol_a,
            Asset::B => &self.symbol_b,
        }
    }

    pub fn balance(&self, asset: Asset) -> u128 {
        match asset {
            Asset::A => self.balance_a,
            Asset::B => self.balance_b,
        }
    }

    pub fn balance_a(&self) -> u128 {
        self.balance_a
    }

    pub fn balance_b(&self) -> u128 {
        self.balance_b
    }

    pub fn swap_enabled(&self) -> bool {
        self.swap_enabled
    }

    fn balance_mut(&mut self, asset: Asset) -> &mut u128 {
        match asset {
            Asset::A => &mut self.balance_a,
            Asset::B => &mut self.balance_b,
        }
    }

    /// Pull `amount` of `asset` from the caller into the vault.
    ///
    /// The caller must have approved the vault address on `ledger`, and
    /// `ledger` must be the ledger of `asset`. Returns the new vault balance.
    pub fn deposit<L: TokenLedger + ?Sized>(
        &mut self,
        asset: Asset,
        ledger: &mut L,
        caller: &AccountId,
        amount: u128,
    ) -> Result<u128, TreasuryError> {
        if amount == 0 {
            return Err(TreasuryError::ZeroAmount);
        }
        if caller == &self.address {
            return Err(TreasuryError::CustodyAccount(caller.to_string()));
        }
        let actual = ledger.info().symbol.as_str();
        if actual != self.symbol(asset) {
            return Err(TreasuryError::WrongAsset {
                asset,
                expected: self.symbol(asset).to_string(),
                actual: actual.to_string(),
            });
        }
        ledger.ensure_can_pull(&self.address, caller, amount)?;

        let previous = self.balance(asset);
        let updated = previous.checked_add(amount).ok_or(TreasuryError::Overflow)?;
        *self.balance_mut(asset) = updated;

        if let Err(err) = ledger.transfer_from(&self.address, caller, &self.address, amount) {
            *self.balance_mut(asset) = previous;
            tracing::debug!(?asset, depositor = %caller, amount, error = %err, "deposit transfer failed, books restored");
            return Err(err.into());
        }
        tracing::info!(
            ?asset,
            depositor = %caller,
            amount = %TokenAmount::new(amount),
            balance = %TokenAmount::new(updated),
            "treasury deposit"
        );
        Ok(updated)
    }

    pub fn deposit_a<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: &AccountId,
        amount: u128,
    ) -> Result<u128, TreasuryError> {
        self.deposit(Asset::A, ledger, caller, amount)
    }

    pub fn deposit_b<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: &AccountId,
        amount: u128,
    ) -> Result<u128, TreasuryError> {
        self.deposit(Asset::B, ledger, caller, amount)
    }

    /// Turn rebalancing on or off. Owner only.
    pub fn set_swap_enabled(
        &mut self,
        authority: &Authority,
        caller: &AccountId,
        enabled: bool,
    ) -> Result<(), TreasuryError> {
        authority.ensure_owner(caller)?;
        self.swap_enabled = enabled;
        tracing::info!(enabled, by = %caller, "treasury swap toggled");
        Ok(())
    }

    /// Move `amount` from the `from` book to the other book at 1:1. Owner only.
    pub fn swap(
        &mut self,
        authority: &Authority,
        caller: &AccountId,
        from: Asset,
        amount: u128,
    ) -> Result<(), TreasuryError> {
        authority.ensure_owner(caller)?;
        if !self.swap_enabled {
            return Err(TreasuryError::SwapDisabled);
        }
        if amount == 0 {
            return Err(TreasuryError::ZeroAmount);
        }
        let to = from.other();
        let available = self.balance(from);
        if available < amount {
            return Err(TreasuryError::InsufficientFunds {
                asset: from,
                needed: amount,
                available,
            });
        }
        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or(TreasuryError::Overflow)?;

        *self.balance_mut(from) = available - amount;
        *self.balance_mut(to) = credited;
        tracing::info!(?from, ?to, amount = %TokenAmount::new(amount), by = %caller, "treasury rebalanced");
        Ok(())
    }

    pub fn swap_a_to_b(
        &mut self,
        authority: &Authority,
        caller: &AccountId,
        amount: u128,
    ) -> Result<(), TreasuryError> {
        self.swap(authority, caller, Asset::A, amount)
    }

    pub fn swap_b_to_a(
        &mut self,
        authority: &Authority,
        caller: &AccountId,
        amount: u128,
    ) -> Result<(), TreasuryError> {
        self.swap(authority, caller, Asset::B, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lop_nullables::NullLedger;
    use lop_token::{LedgerError, TokenInfo};
    use lop_types::TOKEN_UNIT;

    fn account(name: &str) -> AccountId {
        AccountId::new(format!("0x{:0>40}", name))
    }

    struct Fixture {
        owner: AccountId,
        authority: Authority,
        lop: NullLedger,
        usdc: NullLedger,
        vault: TreasuryVault,
    }

    fn setup() -> Fixture {
        let owner = account("owner");
        let lop = NullLedger::deploy(TokenInfo::governance(), &owner, 100_000 * TOKEN_UNIT).unwrap();
        let usdc = NullLedger::deploy(TokenInfo::stable(), &owner, 100_000 * TOKEN_UNIT).unwrap();
        Fixture {
            authority: Authority::new(owner.clone()),
            vault: TreasuryVault::new(account("treasury"), "LOP", "USDC"),
            owner,
            lop,
            usdc,
        }
    }

    fn fund(f: &mut Fixture, amount: u128) {
        let vault = f.vault.address().clone();
        f.lop.approve(&f.owner, &vault, amount).unwrap();
        f.usdc.approve(&f.owner, &vault, amount).unwrap();
        f.vault.deposit_a(&mut f.lop, &f.owner, amount).unwrap();
        f.vault.deposit_b(&mut f.usdc, &f.owner, amount).unwrap();
    }

    #[test]
    fn test_deposit_moves_funds_into_custody() {
        let mut f = setup();
        fund(&mut f, TOKEN_UNIT);
        assert_eq!(f.vault.balance_a(), TOKEN_UNIT);
        assert_eq!(f.vault.balance_b(), TOKEN_UNIT);
        assert_eq!(f.lop.balance_of(f.vault.address()), TOKEN_UNIT);
        assert_eq!(f.usdc.balance_of(f.vault.address()), TOKEN_UNIT);
    }

    #[test]
    fn test_deposit_requires_allowance() {
        let mut f = setup();
        let result = f.vault.deposit_a(&mut f.lop, &f.owner, 5);
        assert!(matches!(
            result,
            Err(TreasuryError::Ledger(LedgerError::InsufficientAllowance { .. }))
        ));
        assert_eq!(f.vault.balance_a(), 0);
    }

    #[test]
    fn test_deposit_rejects_wrong_ledger() {
        let mut f = setup();
        let vault = f.vault.address().clone();
        f.usdc.approve(&f.owner, &vault, 5).unwrap();
        assert!(matches!(
            f.vault.deposit_a(&mut f.usdc, &f.owner, 5),
            Err(TreasuryError::WrongAsset { asset: Asset::A, .. })
        ));
    }

    #[test]
    fn test_vault_cannot_deposit_its_own_funds() {
        let mut f = setup();
        fund(&mut f, TOKEN_UNIT);
        let vault = f.vault.address().clone();
        f.lop.approve(&vault, &vault, TOKEN_UNIT).unwrap();

        assert_eq!(
            f.vault.deposit_a(&mut f.lop, &vault, TOKEN_UNIT),
            Err(TreasuryError::CustodyAccount(vault.to_string()))
        );
        assert_eq!(f.vault.balance_a(), TOKEN_UNIT);
        assert_eq!(f.lop.balance_of(&vault), f.vault.balance_a());
    }

    #[test]
    fn test_failed_ledger_transfer_restores_balance() {
        let mut f = setup();
        let vault = f.vault.address().clone();
        f.lop.approve(&f.owner, &vault, 5).unwrap();
        f.lop.fail_next_transfer(LedgerError::Overflow);
        assert_eq!(
            f.vault.deposit_a(&mut f.lop, &f.owner, 5),
            Err(TreasuryError::Ledger(LedgerError::Overflow))
        );
        assert_eq!(f.vault.balance_a(), 0);
    }

    #[test]
    fn test_swap_half_unit() {
        let mut f = setup();
        fund(&mut f, TOKEN_UNIT);
        f.vault
            .set_swap_enabled(&f.authority, &f.owner, true)
            .unwrap();

        let half = TokenAmount::from_milli(500).raw();
        f.vault.swap_a_to_b(&f.authority, &f.owner, half).unwrap();
        assert_eq!(f.vault.balance_a(), TOKEN_UNIT - half);
        assert_eq!(f.vault.balance_b(), TOKEN_UNIT + half);

        f.vault.swap_b_to_a(&f.authority, &f.owner, half).unwrap();
        assert_eq!(f.vault.balance_a(), TOKEN_UNIT);
        assert_eq!(f.vault.balance_b(), TOKEN_UNIT);
    }

    #[test]
    fn test_swap_disabled_by_default() {
        let mut f = setup();
        fund(&mut f, TOKEN_UNIT);
        assert_eq!(
            f.vault.swap_a_to_b(&f.authority, &f.owner, 1),
            Err(TreasuryError::SwapDisabled)
        );
        assert_eq!(
            f.vault.swap_b_to_a(&f.authority, &f.owner, 1),
            Err(TreasuryError::SwapDisabled)
        );
    }

    #[test]
    fn test_swap_is_owner_only() {
        let mut f = setup();
        fund(&mut f, TOKEN_UNIT);
        let stranger = account("a1");
        assert!(matches!(
            f.vault.set_swap_enabled(&f.authority, &stranger, true),
            Err(TreasuryError::Unauthorized(_))
        ));
        f.vault
            .set_swap_enabled(&f.authority, &f.owner, true)
            .unwrap();
        assert!(matches!(
            f.vault.swap_a_to_b(&f.authority, &stranger, 1),
            Err(TreasuryError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_swap_beyond_balance_fails_atomically() {
        let mut f = setup();
        fund(&mut f, 10);
        f.vault
            .set_swap_enabled(&f.authority, &f.owner, true)
            .unwrap();
        assert_eq!(
            f.vault.swap_a_to_b(&f.authority, &f.owner, 11),
            Err(TreasuryError::InsufficientFunds {
                asset: Asset::A,
                needed: 11,
                available: 10
            })
        );
        assert_eq!(f.vault.balance_a(), 10);
        assert_eq!(f.vault.balance_b(), 10);
    }
}
