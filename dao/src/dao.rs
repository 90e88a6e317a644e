//! The DAO orchestrator.

use lop_governance::{
    DevelopmentTrack, ProductTrack, ShareHolderTrack, Status, TrackParams,
};
use lop_staking::StakeRegistry;
use lop_token::TokenLedger;
use lop_treasury::{Asset, TreasuryVault};
use lop_types::{AccountId, Authority, Clock, ProposalId, Timestamp, TrackKind};

use crate::config::DaoConfig;
use crate::DaoError;

/// Every governance component of one deployment, owned in one place.
///
/// `L` is the ledger type for both the governance token (treasury asset A,
/// the staked token) and the stable token (treasury asset B). `C` supplies
/// the current time for every time-dependent operation.
pub struct Dao<L, C> {
    clock: C,
    authority: Authority,
    governance_token: L,
    stable_token: L,
    registry: StakeRegistry,
    shareholder: ShareHolderTrack,
    product: ProductTrack,
    development: DevelopmentTrack,
    treasury: TreasuryVault,
}

impl<L: TokenLedger, C: Clock> Dao<L, C> {
    /// Construct every component without wiring the registry to the tracks.
    ///
    /// Queries that need the wiring fail with `NotConfigured` until
    /// [`Dao::configure_tracks`] is called.
    pub fn deploy(
        config: &DaoConfig,
        owner: AccountId,
        governance_token: L,
        stable_token: L,
        clock: C,
    ) -> Result<Self, DaoError> {
        config.validate()?;
        let params = TrackParams::from(&config.params());
        let treasury = TreasuryVault::new(
            config.treasury_address.clone(),
            governance_token.info().symbol.clone(),
            stable_token.info().symbol.clone(),
        );
        tracing::info!(
            owner = %owner,
            min_vote_percent = config.min_vote_percent,
            quorum_bps = config.quorum_bps,
            voting_period_secs = config.voting_period_secs,
            "dao deployed"
        );
        Ok(Self {
            clock,
            authority: Authority::new(owner),
            governance_token,
            stable_token,
            registry: StakeRegistry::new(config.staking_address.clone(), config.min_vote_percent),
            shareholder: ShareHolderTrack::shareholder(config.shareholder_address.clone(), params),
            product: ProductTrack::product(
                config.product_address.clone(),
                params,
                config.membership_policy,
            ),
            development: DevelopmentTrack::development(config.development_address.clone(), params),
            treasury,
        })
    }

    /// Deploy and wire in one step, as the deployment owner.
    pub fn new(
        config: &DaoConfig,
        owner: AccountId,
        governance_token: L,
        stable_token: L,
        clock: C,
    ) -> Result<Self, DaoError> {
        let mut dao = Self::deploy(config, owner.clone(), governance_token, stable_token, clock)?;
        dao.configure_tracks(&owner)?;
        Ok(dao)
    }

    /// Wire the registry to the three tracks. Owner only, once.
    pub fn configure_tracks(&mut self, caller: &AccountId) -> Result<(), DaoError> {
        let tracks = lop_staking::TrackAddresses {
            shareholder: self.shareholder.address().clone(),
            product: self.product.address().clone(),
            development: self.development.address().clone(),
        };
        self.registry
            .configure_tracks(&self.authority, caller, tracks)?;
        Ok(())
    }

    fn now(&self) -> Timestamp {
        self.clock.now()
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn registry(&self) -> &StakeRegistry {
        &self.registry
    }

    pub fn shareholder(&self) -> &ShareHolderTrack {
        &self.shareholder
    }

    pub fn product(&self) -> &ProductTrack {
        &self.product
    }

    pub fn development(&self) -> &DevelopmentTrack {
        &self.development
    }

    pub fn treasury(&self) -> &TreasuryVault {
        &self.treasury
    }

    pub fn governance_token(&self) -> &L {
        &self.governance_token
    }

    /// Direct ledger access for account holders (approvals, transfers).
    pub fn governance_token_mut(&mut self) -> &mut L {
        &mut self.governance_token
    }

    pub fn stable_token(&self) -> &L {
        &self.stable_token
    }

    pub fn stable_token_mut(&mut self) -> &mut L {
        &mut self.stable_token
    }

    /// Status of `id` on the given track; `None` for unknown ids.
    pub fn status(&self, track: TrackKind, id: ProposalId) -> Status {
        match track {
            TrackKind::ShareHolder => self.shareholder.status(id),
            TrackKind::Product => self.product.status(id),
            TrackKind::Development => self.development.status(id),
        }
    }

    // ── Ownership ──────────────────────────────────────────────────────

    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> Result<(), DaoError> {
        self.authority.transfer_ownership(caller, new_owner)?;
        Ok(())
    }

    // ── Staking ────────────────────────────────────────────────────────

    pub fn stake(&mut self, caller: &AccountId, amount: u128) -> Result<u128, DaoError> {
        let now = self.now();
        Ok(self
            .registry
            .stake(&mut self.governance_token, caller, amount, now)?)
    }

    pub fn unstake(&mut self, caller: &AccountId, amount: u128) -> Result<u128, DaoError> {
        Ok(self
            .registry
            .unstake(&mut self.governance_token, caller, amount)?)
    }

    // ── Proposals ──────────────────────────────────────────────────────

    pub fn create_budget_proposal(
        &mut self,
        caller: &AccountId,
        amount: u128,
    ) -> Result<ProposalId, DaoError> {
        let now = self.now();
        Ok(self
            .shareholder
            .create_proposal(&self.registry, caller, amount, now)?)
    }

    pub fn create_product_proposal(
        &mut self,
        caller: &AccountId,
        metadata: impl Into<String>,
    ) -> Result<ProposalId, DaoError> {
        let now = self.now();
        Ok(self
            .product
            .create_proposal(&self.registry, caller, metadata, now)?)
    }

    pub fn create_development_proposal(
        &mut self,
        caller: &AccountId,
        description: impl Into<String>,
        budget_proposal: ProposalId,
        product_proposal: ProposalId,
    ) -> Result<ProposalId, DaoError> {
        let now = self.now();
        Ok(self.development.create_proposal(
            &self.registry,
            &self.shareholder,
            &self.product,
            caller,
            description,
            budget_proposal,
            product_proposal,
            now,
        )?)
    }

    pub fn vote_yes(
        &mut self,
        track: TrackKind,
        caller: &AccountId,
        id: ProposalId,
    ) -> Result<u128, DaoError> {
        let now = self.now();
        let weight = match track {
            TrackKind::ShareHolder => self.shareholder.vote_yes(&self.registry, caller, id, now)?,
            TrackKind::Product => self.product.vote_yes(&self.registry, caller, id, now)?,
            TrackKind::Development => self.development.vote_yes(&self.registry, caller, id, now)?,
        };
        Ok(weight)
    }

    pub fn vote_no(
        &mut self,
        track: TrackKind,
        caller: &AccountId,
        id: ProposalId,
    ) -> Result<u128, DaoError> {
        let now = self.now();
        let weight = match track {
            TrackKind::ShareHolder => self.shareholder.vote_no(&self.registry, caller, id, now)?,
            TrackKind::Product => self.product.vote_no(&self.registry, caller, id, now)?,
            TrackKind::Development => self.development.vote_no(&self.registry, caller, id, now)?,
        };
        Ok(weight)
    }

    /// Close proposal `id` on `track`. Anyone may call once the voting period elapsed.
    pub fn execute(
        &mut self,
        track: TrackKind,
        caller: &AccountId,
        id: ProposalId,
    ) -> Result<Status, DaoError> {
        let now = self.now();
        let status = match track {
            TrackKind::ShareHolder => self.shareholder.execute(&self.registry, caller, id, now)?,
            TrackKind::Product => self.product.execute(&self.registry, caller, id, now)?,
            TrackKind::Development => self.development.execute(&self.registry, caller, id, now)?,
        };
        Ok(status)
    }

    // ── Membership ─────────────────────────────────────────────────────

    pub fn request_to_join(&mut self, caller: &AccountId) -> Result<(), DaoError> {
        let now = self.now();
        Ok(self.product.request_to_join(caller, now)?)
    }

    pub fn accept_join_request(
        &mut self,
        caller: &AccountId,
        account: &AccountId,
    ) -> Result<(), DaoError> {
        let now = self.now();
        Ok(self
            .product
            .accept_join_request(&self.authority, caller, account, now)?)
    }

    // ── Treasury ───────────────────────────────────────────────────────

    pub fn deposit(
        &mut self,
        asset: Asset,
        caller: &AccountId,
        amount: u128,
    ) -> Result<u128, DaoError> {
        let ledger = match asset {
            Asset::A => &mut self.governance_token,
            Asset::B => &mut self.stable_token,
        };
        Ok(self.treasury.deposit(asset, ledger, caller, amount)?)
    }

    pub fn deposit_a(&mut self, caller: &AccountId, amount: u128) -> Result<u128, DaoError> {
        self.deposit(Asset::A, caller, amount)
    }

    pub fn deposit_b(&mut self, caller: &AccountId, amount: u128) -> Result<u128, DaoError> {
        self.deposit(Asset::B, caller, amount)
    }

    pub fn set_swap_enabled(&mut self, caller: &AccountId, enabled: bool) -> Result<(), DaoError> {
        Ok(self
            .treasury
            .set_swap_enabled(&self.authority, caller, enabled)?)
    }

    pub fn swap_a_to_b(&mut self, caller: &AccountId, amount: u128) -> Result<(), DaoError> {
        Ok(self.treasury.swap_a_to_b(&self.authority, caller, amount)?)
    }

    pub fn swap_b_to_a(&mut self, caller: &AccountId, amount: u128) -> Result<(), DaoError> {
        Ok(self.treasury.swap_b_to_a(&self.authority, caller, amount)?)
    }

    // ── Minting ────────────────────────────────────────────────────────

    /// Grant the governance-token minter role. Token owner only.
    pub fn add_minter(&mut self, caller: &AccountId, account: &AccountId) -> Result<(), DaoError> {
        self.governance_token.add_minter(caller, account)?;
        tracing::info!(minter = %account, by = %caller, "minter added");
        Ok(())
    }

    pub fn remove_minter(&mut self, caller: &AccountId, account: &AccountId) -> Result<(), DaoError> {
        self.governance_token.remove_minter(caller, account)?;
        tracing::info!(minter = %account, by = %caller, "minter removed");
        Ok(())
    }

    pub fn mint(&mut self, minter: &AccountId, to: &AccountId, amount: u128) -> Result<(), DaoError> {
        self.governance_token.mint(minter, to, amount)?;
        Ok(())
    }
}
