//! End-to-end scenarios against a fully wired DAO over in-memory ledgers.

use std::rc::Rc;

use lop_dao::{Dao, DaoConfig, DaoError};
use lop_governance::{GovernanceError, Status};
use lop_nullables::{NullClock, NullLedger};
use lop_staking::StakingError;
use lop_token::{LedgerError, TokenInfo, TokenLedger};
use lop_treasury::{Asset, TreasuryError};
use lop_types::{AccountId, AuthorityError, TokenAmount, TrackKind, TOKEN_UNIT};

const TWO_WEEKS: u64 = 60 * 60 * 24 * 7 * 2;

struct Harness {
    dao: Dao<NullLedger, Rc<NullClock>>,
    clock: Rc<NullClock>,
    owner: AccountId,
    config: DaoConfig,
}

fn harness(min_vote_percent: u8) -> Harness {
    lop_utils::init_tracing();
    let owner = AccountId::new("owner");
    let supply = TokenAmount::from_whole(100_000).raw();
    let lop = NullLedger::deploy(TokenInfo::governance(), &owner, supply).unwrap();
    let usdc = NullLedger::deploy(TokenInfo::stable(), &owner, supply).unwrap();
    let clock = Rc::new(NullClock::new(1_700_000_000));
    let config = DaoConfig {
        min_vote_percent,
        ..DaoConfig::default()
    };
    let dao = Dao::new(&config, owner.clone(), lop, usdc, Rc::clone(&clock)).unwrap();
    Harness {
        dao,
        clock,
        owner,
        config,
    }
}

impl Harness {
    fn stake(&mut self, account: &AccountId, whole: u128) -> u128 {
        let amount = whole * TOKEN_UNIT;
        let staking = self.config.staking_address.clone();
        self.dao
            .governance_token_mut()
            .approve(account, &staking, amount)
            .unwrap();
        self.dao.stake(account, amount).unwrap()
    }

    fn fund(&mut self, account: &AccountId, whole: u128) {
        let owner = self.owner.clone();
        self.dao
            .governance_token_mut()
            .transfer(&owner, account, whole * TOKEN_UNIT)
            .unwrap();
    }

    fn approve_treasury(&mut self, asset: Asset, amount: u128) {
        let owner = self.owner.clone();
        let treasury = self.config.treasury_address.clone();
        let ledger = match asset {
            Asset::A => self.dao.governance_token_mut(),
            Asset::B => self.dao.stable_token_mut(),
        };
        ledger.approve(&owner, &treasury, amount).unwrap();
    }
}

#[test]
fn stake_gated_voting_with_membership_substitute() {
    let mut h = harness(65);
    let owner = h.owner.clone();
    let alice = AccountId::new("alice");

    h.stake(&owner, 2);
    let id = h.dao.create_product_proposal(&owner, "test metadata").unwrap();
    assert_eq!(id, 0);
    h.dao.vote_yes(TrackKind::Product, &owner, 0).unwrap();
    assert!(h.dao.product().has_voted(&owner, 0));

    h.fund(&alice, 2);
    h.stake(&alice, 1);
    // One third of the stake: below the 65% threshold.
    assert!(!h.dao.registry().query(h.dao.product().address(), &alice).unwrap().eligible);
    assert!(matches!(
        h.dao.create_product_proposal(&alice, "too small"),
        Err(DaoError::Governance(GovernanceError::Unauthorized(_)))
    ));

    h.dao.request_to_join(&alice).unwrap();
    h.dao.accept_join_request(&owner, &alice).unwrap();
    assert!(h.dao.product().membership().is_member(&alice));

    let id = h.dao.create_product_proposal(&alice, "member idea").unwrap();
    assert_eq!(id, 1);
    let weight = h.dao.vote_no(TrackKind::Product, &alice, 1).unwrap();
    assert_eq!(weight, TOKEN_UNIT);
    assert!(h.dao.product().has_voted(&alice, 1));
    assert_eq!(h.dao.product().proposal(1).unwrap().vote_no, TOKEN_UNIT);
}

#[test]
fn membership_does_not_extend_to_other_tracks() {
    let mut h = harness(65);
    let owner = h.owner.clone();
    let alice = AccountId::new("alice");
    h.stake(&owner, 2);
    h.fund(&alice, 1);
    h.stake(&alice, 1);
    h.dao.request_to_join(&alice).unwrap();
    h.dao.accept_join_request(&owner, &alice).unwrap();

    assert!(matches!(
        h.dao.create_budget_proposal(&alice, TOKEN_UNIT),
        Err(DaoError::Governance(GovernanceError::Unauthorized(_)))
    ));
}

#[test]
fn execute_respects_timelock() {
    let mut h = harness(5);
    let owner = h.owner.clone();
    h.stake(&owner, 10);
    let id = h.dao.create_budget_proposal(&owner, 500 * TOKEN_UNIT).unwrap();
    h.dao.vote_yes(TrackKind::ShareHolder, &owner, id).unwrap();

    h.clock.advance(TWO_WEEKS - 1);
    assert!(matches!(
        h.dao.execute(TrackKind::ShareHolder, &owner, id),
        Err(DaoError::Governance(GovernanceError::VotingInProgress { remaining_secs: 1, .. }))
    ));

    h.clock.advance(1);
    let status = h.dao.execute(TrackKind::ShareHolder, &owner, id).unwrap();
    assert_eq!(status, Status::Active);
    assert_eq!(h.dao.status(TrackKind::ShareHolder, id), Status::Active);

    assert!(matches!(
        h.dao.execute(TrackKind::ShareHolder, &owner, id),
        Err(DaoError::Governance(GovernanceError::InvalidState { .. }))
    ));
}

#[test]
fn anyone_may_execute_after_the_voting_period() {
    let mut h = harness(5);
    let owner = h.owner.clone();
    h.stake(&owner, 10);
    let id = h.dao.create_product_proposal(&owner, "roadmap").unwrap();
    h.clock.advance(TWO_WEEKS);

    let stranger = AccountId::new("stranger");
    // Nobody voted: no quorum.
    let status = h.dao.execute(TrackKind::Product, &stranger, id).unwrap();
    assert_eq!(status, Status::Cancelled);
}

#[test]
fn development_proposal_links_active_upstream_proposals() {
    let mut h = harness(5);
    let owner = h.owner.clone();
    h.stake(&owner, 10);
    let budget = h.dao.create_budget_proposal(&owner, 1_000 * TOKEN_UNIT).unwrap();
    let product = h.dao.create_product_proposal(&owner, "wallet app").unwrap();

    assert!(matches!(
        h.dao.create_development_proposal(&owner, "build it", budget, product),
        Err(DaoError::Governance(GovernanceError::InvalidReference(_)))
    ));

    h.dao.vote_yes(TrackKind::ShareHolder, &owner, budget).unwrap();
    h.dao.vote_yes(TrackKind::Product, &owner, product).unwrap();
    h.clock.advance(TWO_WEEKS);
    h.dao.execute(TrackKind::ShareHolder, &owner, budget).unwrap();
    h.dao.execute(TrackKind::Product, &owner, product).unwrap();

    let id = h
        .dao
        .create_development_proposal(&owner, "build it", budget, product)
        .unwrap();
    assert_eq!(h.dao.status(TrackKind::Development, id), Status::Created);
}

#[test]
fn unwired_dao_rejects_proposals() {
    let owner = AccountId::new("owner");
    let supply = TokenAmount::from_whole(100).raw();
    let lop = NullLedger::deploy(TokenInfo::governance(), &owner, supply).unwrap();
    let usdc = NullLedger::deploy(TokenInfo::stable(), &owner, supply).unwrap();
    let config = DaoConfig::default();
    let mut dao = Dao::deploy(&config, owner.clone(), lop, usdc, NullClock::new(0)).unwrap();

    dao.governance_token_mut()
        .approve(&owner, &config.staking_address, TOKEN_UNIT)
        .unwrap();
    dao.stake(&owner, TOKEN_UNIT).unwrap();
    assert!(matches!(
        dao.create_budget_proposal(&owner, 1),
        Err(DaoError::Governance(GovernanceError::NotConfigured))
    ));

    let mallory = AccountId::new("mallory");
    assert!(matches!(
        dao.configure_tracks(&mallory),
        Err(DaoError::Staking(StakingError::Unauthorized(_)))
    ));
    dao.configure_tracks(&owner).unwrap();
    assert!(matches!(
        dao.configure_tracks(&owner),
        Err(DaoError::Staking(StakingError::AlreadyConfigured))
    ));
    assert_eq!(dao.create_budget_proposal(&owner, 1).unwrap(), 0);
}

#[test]
fn treasury_swap_moves_half_a_unit() {
    let mut h = harness(5);
    let owner = h.owner.clone();
    let half = TokenAmount::from_milli(500).raw();

    h.approve_treasury(Asset::A, TOKEN_UNIT);
    h.approve_treasury(Asset::B, TOKEN_UNIT);
    h.dao.deposit_a(&owner, TOKEN_UNIT).unwrap();
    h.dao.deposit_b(&owner, TOKEN_UNIT).unwrap();

    assert!(matches!(
        h.dao.swap_a_to_b(&owner, half),
        Err(DaoError::Treasury(TreasuryError::SwapDisabled))
    ));
    assert!(matches!(
        h.dao.swap_b_to_a(&owner, half),
        Err(DaoError::Treasury(TreasuryError::SwapDisabled))
    ));

    h.dao.set_swap_enabled(&owner, true).unwrap();
    h.dao.swap_a_to_b(&owner, half).unwrap();
    assert_eq!(h.dao.treasury().balance_a(), TOKEN_UNIT - half);
    assert_eq!(h.dao.treasury().balance_b(), TOKEN_UNIT + half);

    h.dao.swap_b_to_a(&owner, half).unwrap();
    assert_eq!(h.dao.treasury().balance_a(), TOKEN_UNIT);
    assert_eq!(h.dao.treasury().balance_b(), TOKEN_UNIT);

    let treasury = h.config.treasury_address.clone();
    assert_eq!(h.dao.governance_token().balance_of(&treasury), TOKEN_UNIT);
    assert_eq!(h.dao.stable_token().balance_of(&treasury), TOKEN_UNIT);
}

#[test]
fn treasury_controls_are_owner_only() {
    let mut h = harness(5);
    let mallory = AccountId::new("mallory");
    assert!(matches!(
        h.dao.set_swap_enabled(&mallory, true),
        Err(DaoError::Treasury(TreasuryError::Unauthorized(_)))
    ));

    let owner = h.owner.clone();
    let new_owner = AccountId::new("council");
    h.dao.transfer_ownership(&owner, new_owner.clone()).unwrap();
    assert!(matches!(
        h.dao.set_swap_enabled(&owner, true),
        Err(DaoError::Treasury(TreasuryError::Unauthorized(_)))
    ));
    h.dao.set_swap_enabled(&new_owner, true).unwrap();
    assert!(h.dao.treasury().swap_enabled());
}

#[test]
fn minter_role_management() {
    let mut h = harness(5);
    let owner = h.owner.clone();
    let mallory = AccountId::new("mallory");
    let minter = AccountId::new("minter");

    assert!(matches!(
        h.dao.add_minter(&mallory, &minter),
        Err(DaoError::Ledger(LedgerError::Authority(AuthorityError::Unauthorized { .. })))
    ));

    h.dao.add_minter(&owner, &minter).unwrap();
    assert!(h.dao.governance_token().is_minter(&minter));
    h.dao.mint(&minter, &mallory, TOKEN_UNIT).unwrap();
    assert_eq!(h.dao.governance_token().balance_of(&mallory), TOKEN_UNIT);

    h.dao.remove_minter(&owner, &minter).unwrap();
    assert!(!h.dao.governance_token().is_minter(&minter));
    assert!(matches!(
        h.dao.mint(&minter, &mallory, TOKEN_UNIT),
        Err(DaoError::Ledger(LedgerError::NotMinter(_)))
    ));
}

#[test]
fn unstake_returns_tokens_and_keeps_recorded_votes() {
    let mut h = harness(5);
    let owner = h.owner.clone();
    h.stake(&owner, 10);
    let id = h.dao.create_budget_proposal(&owner, TOKEN_UNIT).unwrap();
    h.dao.vote_yes(TrackKind::ShareHolder, &owner, id).unwrap();

    let before = h.dao.governance_token().balance_of(&owner);
    let remaining = h.dao.unstake(&owner, 4 * TOKEN_UNIT).unwrap();
    assert_eq!(remaining, 6 * TOKEN_UNIT);
    assert_eq!(h.dao.governance_token().balance_of(&owner), before + 4 * TOKEN_UNIT);
    assert_eq!(h.dao.shareholder().proposal(id).unwrap().vote_yes, 10 * TOKEN_UNIT);

    assert!(matches!(
        h.dao.unstake(&owner, 100 * TOKEN_UNIT),
        Err(DaoError::Staking(StakingError::InsufficientStake { .. }))
    ));
}
