//! Membership registry: the Product track's join-request flow.
//!
//! An accepted member satisfies the Product track's eligibility rule without
//! holding the minimum stake share.

use crate::error::GovernanceError;
use lop_types::{AccountId, Authority, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Who may accept a pending join request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipPolicy {
    /// Only the authority owner.
    #[default]
    OwnerOnly,
    /// The authority owner or any already accepted member.
    OwnerOrMember,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRequest {
    pub requested_at: Timestamp,
    pub accepted_at: Option<Timestamp>,
}

impl MembershipRequest {
    pub fn is_accepted(&self) -> bool {
        self.accepted_at.is_some()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MembershipRegistry {
    policy: MembershipPolicy,
    requests: BTreeMap<AccountId, MembershipRequest>,
}

impl MembershipRegistry {
    pub fn new(policy: MembershipPolicy) -> Self {
        Self {
            policy,
            requests: BTreeMap::new(),
        }
    }

    pub fn policy(&self) -> MembershipPolicy {
        self.policy
    }

    /// File a pending join request for `caller`.
    pub fn request_to_join(
        &mut self,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        if self.requests.contains_key(caller) {
            return Err(GovernanceError::AlreadyRequested(caller.to_string()));
        }
        self.requests.insert(
            caller.clone(),
            MembershipRequest {
                requested_at: now,
                accepted_at: None,
            },
        );
        tracing::info!(account = %caller, "membership requested");
        Ok(())
    }

    /// Accept `account`'s pending request. Privileged per [`MembershipPolicy`].
    pub fn accept_join_request(
        &mut self,
        authority: &Authority,
        caller: &AccountId,
        account: &AccountId,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        match self.policy {
            MembershipPolicy::OwnerOnly => authority.ensure_owner(caller)?,
            MembershipPolicy::OwnerOrMember => {
                if !authority.is_owner(caller) && !self.is_member(caller) {
                    return Err(GovernanceError::Unauthorized(format!(
                        "{} is neither the owner nor a member",
                        caller
                    )));
                }
            }
        }
        let request = self
            .requests
            .get_mut(account)
            .ok_or_else(|| GovernanceError::RequestNotFound(account.to_string()))?;
        if request.is_accepted() {
            return Err(GovernanceError::AlreadyMember(account.to_string()));
        }
        request.accepted_at = Some(now);
        tracing::info!(account = %account, accepted_by = %caller, "membership accepted");
        Ok(())
    }

    pub fn is_member(&self, account: &AccountId) -> bool {
        self.requests
            .get(account)
            .is_some_and(MembershipRequest::is_accepted)
    }

    pub fn is_pending(&self, account: &AccountId) -> bool {
        self.requests
            .get(account)
            .is_some_and(|r| !r.is_accepted())
    }

    pub fn request(&self, account: &AccountId) -> Option<&MembershipRequest> {
        self.requests.get(account)
    }

    /// Accounts with a request not yet accepted, in account order.
    pub fn pending_requests(&self) -> impl Iterator<Item = &AccountId> {
        self.requests
            .iter()
            .filter(|(_, r)| !r.is_accepted())
            .map(|(account, _)| account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &str) -> AccountId {
        AccountId::new(format!("0x{:0>40}", name))
    }

    #[test]
    fn request_then_accept() {
        let owner = account("owner");
        let applicant = account("a1");
        let authority = Authority::new(owner.clone());
        let mut registry = MembershipRegistry::default();

        registry.request_to_join(&applicant, Timestamp::new(1)).unwrap();
        assert!(registry.is_pending(&applicant));
        assert!(!registry.is_member(&applicant));
        assert_eq!(registry.pending_requests().count(), 1);

        registry
            .accept_join_request(&authority, &owner, &applicant, Timestamp::new(2))
            .unwrap();
        assert!(registry.is_member(&applicant));
        assert_eq!(registry.pending_requests().count(), 0);
        assert_eq!(
            registry.request(&applicant).unwrap().accepted_at,
            Some(Timestamp::new(2))
        );
    }

    #[test]
    fn duplicate_request_rejected() {
        let applicant = account("a1");
        let mut registry = MembershipRegistry::default();
        registry.request_to_join(&applicant, Timestamp::new(1)).unwrap();
        assert_eq!(
            registry.request_to_join(&applicant, Timestamp::new(2)),
            Err(GovernanceError::AlreadyRequested(applicant.to_string()))
        );
    }

    #[test]
    fn accept_requires_owner_and_a_request() {
        let owner = account("owner");
        let applicant = account("a1");
        let authority = Authority::new(owner.clone());
        let mut registry = MembershipRegistry::default();

        assert_eq!(
            registry.accept_join_request(&authority, &owner, &applicant, Timestamp::new(1)),
            Err(GovernanceError::RequestNotFound(applicant.to_string()))
        );

        registry.request_to_join(&applicant, Timestamp::new(1)).unwrap();
        assert!(matches!(
            registry.accept_join_request(&authority, &applicant, &applicant, Timestamp::new(2)),
            Err(GovernanceError::Unauthorized(_))
        ));
        registry
            .accept_join_request(&authority, &owner, &applicant, Timestamp::new(2))
            .unwrap();
        assert_eq!(
            registry.accept_join_request(&authority, &owner, &applicant, Timestamp::new(3)),
            Err(GovernanceError::AlreadyMember(applicant.to_string()))
        );
    }

    #[test]
    fn members_may_accept_under_owner_or_member_policy() {
        let owner = account("owner");
        let first = account("a1");
        let second = account("a2");
        let authority = Authority::new(owner.clone());
        let mut registry = MembershipRegistry::new(MembershipPolicy::OwnerOrMember);

        registry.request_to_join(&first, Timestamp::new(1)).unwrap();
        registry.request_to_join(&second, Timestamp::new(1)).unwrap();
        assert!(registry
            .accept_join_request(&authority, &second, &first, Timestamp::new(2))
            .is_err());

        registry
            .accept_join_request(&authority, &owner, &first, Timestamp::new(2))
            .unwrap();
        registry
            .accept_join_request(&authority, &first, &second, Timestamp::new(3))
            .unwrap();
        assert!(registry.is_member(&second));
    }
}
