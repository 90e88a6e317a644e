//! The three concrete tracks and their track-specific entry points.

use crate::engine::{ProposalTrack, TrackParams};
use crate::error::GovernanceError;
use crate::membership::{MembershipPolicy, MembershipRegistry};
use crate::policy::{DevelopmentPolicy, ProductPolicy, ShareHolderPolicy};
use crate::proposal::{Payload, Status};
use lop_staking::StakeRegistry;
use lop_types::{AccountId, Authority, ProposalId, Timestamp};

pub type ShareHolderTrack = ProposalTrack<ShareHolderPolicy>;
pub type ProductTrack = ProposalTrack<ProductPolicy>;
pub type DevelopmentTrack = ProposalTrack<DevelopmentPolicy>;

impl ProposalTrack<ShareHolderPolicy> {
    pub fn shareholder(address: AccountId, params: TrackParams) -> Self {
        Self::new(address, params, ShareHolderPolicy)
    }

    /// Propose a budget of `amount` raw units.
    pub fn create_proposal(
        &mut self,
        registry: &StakeRegistry,
        caller: &AccountId,
        amount: u128,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        self.open_proposal(registry, caller, Payload::Budget { amount }, now)
    }
}

impl ProposalTrack<ProductPolicy> {
    pub fn product(address: AccountId, params: TrackParams, policy: MembershipPolicy) -> Self {
        Self::new(
            address,
            params,
            ProductPolicy {
                membership: MembershipRegistry::new(policy),
            },
        )
    }

    /// Propose a product initiative described by `metadata`.
    pub fn create_proposal(
        &mut self,
        registry: &StakeRegistry,
        caller: &AccountId,
        metadata: impl Into<String>,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        let payload = Payload::Metadata {
            text: metadata.into(),
        };
        self.open_proposal(registry, caller, payload, now)
    }

    pub fn membership(&self) -> &MembershipRegistry {
        &self.policy().membership
    }

    pub fn request_to_join(
        &mut self,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        self.policy_mut().membership.request_to_join(caller, now)
    }

    pub fn accept_join_request(
        &mut self,
        authority: &Authority,
        caller: &AccountId,
        account: &AccountId,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        self.policy_mut()
            .membership
            .accept_join_request(authority, caller, account, now)
    }
}

impl ProposalTrack<DevelopmentPolicy> {
    pub fn development(address: AccountId, params: TrackParams) -> Self {
        Self::new(address, params, DevelopmentPolicy)
    }

    /// Propose a development initiative delivering an approved product
    /// proposal under an approved budget.
    ///
    /// The caller must be eligible, then both referenced proposals must be
    /// `Active` in their tracks.
    #[allow(clippy::too_many_arguments)]
    pub fn create_proposal(
        &mut self,
        registry: &StakeRegistry,
        shareholder: &ShareHolderTrack,
        product: &ProductTrack,
        caller: &AccountId,
        description: impl Into<String>,
        budget_proposal: ProposalId,
        product_proposal: ProposalId,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        self.ensure_eligible(registry, caller)?;
        let budget_status = shareholder.status(budget_proposal);
        if budget_status != Status::Active {
            return Err(GovernanceError::InvalidReference(format!(
                "budget proposal {} is {:?}, expected Active",
                budget_proposal, budget_status
            )));
        }
        let product_status = product.status(product_proposal);
        if product_status != Status::Active {
            return Err(GovernanceError::InvalidReference(format!(
                "product proposal {} is {:?}, expected Active",
                product_proposal, product_status
            )));
        }
        let payload = Payload::Development {
            description: description.into(),
            budget_proposal,
            product_proposal,
        };
        self.open_proposal(registry, caller, payload, now)
    }
}
