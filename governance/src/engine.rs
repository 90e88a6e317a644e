//! The proposal life-cycle engine shared by all three tracks.

use crate::error::GovernanceError;
use crate::policy::{Multiplicity, TrackPolicy};
use crate::proposal::{Payload, Proposal, Status, VoteChoice, VoteRecord};
use lop_staking::StakeRegistry;
use lop_types::{AccountId, DaoParams, ProposalId, Timestamp, TrackKind};
use lop_utils::meets_bps;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Quorum and timelock settings of one track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackParams {
    /// Minimum `(yes + no) / total_stake`, in basis points.
    pub quorum_bps: u32,
    /// Seconds after creation before `execute` may run.
    pub voting_period_secs: u64,
}

impl From<&DaoParams> for TrackParams {
    fn from(params: &DaoParams) -> Self {
        Self {
            quorum_bps: params.quorum_bps,
            voting_period_secs: params.voting_period_secs,
        }
    }
}

impl Default for TrackParams {
    fn default() -> Self {
        Self::from(&DaoParams::default())
    }
}

/// One proposal track: an append-only arena of proposals indexed by dense id,
/// the vote records cast on them, and the policy guarding both.
///
/// Every operation validates fully before mutating, so a failed call leaves
/// the track unchanged.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProposalTrack<P> {
    address: AccountId,
    params: TrackParams,
    policy: P,
    /// `proposals[i].id == i`.
    proposals: Vec<Proposal>,
    votes: BTreeMap<(AccountId, ProposalId), VoteRecord>,
    /// Owner → ids still in `Created`.
    open: BTreeMap<AccountId, BTreeSet<ProposalId>>,
}

impl<P: TrackPolicy> ProposalTrack<P> {
    pub fn new(address: AccountId, params: TrackParams, policy: P) -> Self {
        Self {
            address,
            params,
            policy,
            proposals: Vec::new(),
            votes: BTreeMap::new(),
            open: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> TrackKind {
        P::KIND
    }

    pub fn address(&self) -> &AccountId {
        &self.address
    }

    pub fn params(&self) -> &TrackParams {
        &self.params
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub(crate) fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    /// Check eligibility and multiplicity, then append a new `Created` proposal.
    pub(crate) fn open_proposal(
        &mut self,
        registry: &StakeRegistry,
        caller: &AccountId,
        payload: Payload,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        if !self.policy.payload_kind().matches(&payload) {
            return Err(GovernanceError::InvalidPayload(format!(
                "{} track expects {:?}",
                P::KIND,
                self.policy.payload_kind()
            )));
        }
        self.ensure_eligible(registry, caller)?;
        if self.policy.multiplicity() == Multiplicity::SingleOpenPerOwner
            && self.open_proposals_of(caller).next().is_some()
        {
            return Err(GovernanceError::ActiveProposalExists(caller.to_string()));
        }

        let id = self.proposals.len() as ProposalId;
        self.proposals.push(Proposal {
            id,
            owner: caller.clone(),
            track: P::KIND,
            payload,
            status: Status::Created,
            vote_yes: 0,
            vote_no: 0,
            created_at: now,
            executed_at: None,
        });
        self.open.entry(caller.clone()).or_default().insert(id);
        tracing::info!(track = %P::KIND, id, owner = %caller, "proposal created");
        Ok(id)
    }

    /// Vote in favour of proposal `id`. Returns the weight recorded.
    pub fn vote_yes(
        &mut self,
        registry: &StakeRegistry,
        caller: &AccountId,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<u128, GovernanceError> {
        self.vote(registry, caller, id, VoteChoice::Yes, now)
    }

    /// Vote against proposal `id`. Returns the weight recorded.
    pub fn vote_no(
        &mut self,
        registry: &StakeRegistry,
        caller: &AccountId,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<u128, GovernanceError> {
        self.vote(registry, caller, id, VoteChoice::No, now)
    }

    fn vote(
        &mut self,
        registry: &StakeRegistry,
        caller: &AccountId,
        id: ProposalId,
        choice: VoteChoice,
        now: Timestamp,
    ) -> Result<u128, GovernanceError> {
        let proposal = self.created_proposal(id)?;
        let stake = self.ensure_eligible(registry, caller)?;
        let key = (caller.clone(), id);
        if self.votes.contains_key(&key) {
            return Err(GovernanceError::AlreadyVoted {
                account: caller.to_string(),
                id,
            });
        }

        let weight = stake.stake;
        let (vote_yes, vote_no) = match choice {
            VoteChoice::Yes => (
                proposal
                    .vote_yes
                    .checked_add(weight)
                    .ok_or(GovernanceError::Overflow)?,
                proposal.vote_no,
            ),
            VoteChoice::No => (
                proposal.vote_yes,
                proposal
                    .vote_no
                    .checked_add(weight)
                    .ok_or(GovernanceError::Overflow)?,
            ),
        };

        let proposal = &mut self.proposals[id as usize];
        proposal.vote_yes = vote_yes;
        proposal.vote_no = vote_no;
        self.votes.insert(
            key,
            VoteRecord {
                choice,
                weight_at_vote: weight,
                cast_at: now,
            },
        );
        tracing::info!(track = %P::KIND, id, voter = %caller, ?choice, weight, "vote recorded");
        Ok(weight)
    }

    /// Close proposal `id` once its voting period has elapsed.
    ///
    /// Quorum (`(yes + no) / total_stake >= quorum_bps`) and a strict yes-majority
    /// make it `Active`; otherwise it becomes `Cancelled`. Either way the id is final.
    pub fn execute(
        &mut self,
        registry: &StakeRegistry,
        caller: &AccountId,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<Status, GovernanceError> {
        let proposal = self.created_proposal(id)?;
        let elapsed = proposal.created_at.elapsed_since(now);
        if elapsed < self.params.voting_period_secs {
            return Err(GovernanceError::VotingInProgress {
                id,
                remaining_secs: self.params.voting_period_secs - elapsed,
            });
        }
        registry.track_kind(&self.address)?;

        let participation = proposal.participation().ok_or(GovernanceError::Overflow)?;
        let total_stake = registry.total_stake();
        let quorum = meets_bps(participation, total_stake, self.params.quorum_bps);
        let majority = proposal.vote_yes > proposal.vote_no;
        let outcome = if quorum && majority {
            Status::Active
        } else {
            Status::Cancelled
        };

        let owner = proposal.owner.clone();
        let proposal = &mut self.proposals[id as usize];
        proposal.status = outcome;
        proposal.executed_at = Some(now);
        if let Some(ids) = self.open.get_mut(&owner) {
            ids.remove(&id);
            if ids.is_empty() {
                self.open.remove(&owner);
            }
        }
        tracing::info!(
            track = %P::KIND,
            id,
            executor = %caller,
            participation,
            total_stake,
            quorum,
            majority,
            status = ?outcome,
            "proposal executed"
        );
        Ok(outcome)
    }

    fn created_proposal(&self, id: ProposalId) -> Result<&Proposal, GovernanceError> {
        let proposal = self.proposal(id).ok_or(GovernanceError::NotFound(id))?;
        if proposal.status != Status::Created {
            return Err(GovernanceError::InvalidState {
                id,
                status: proposal.status,
            });
        }
        Ok(proposal)
    }

    pub(crate) fn ensure_eligible(
        &self,
        registry: &StakeRegistry,
        caller: &AccountId,
    ) -> Result<lop_staking::StakeSnapshot, GovernanceError> {
        let stake = registry.query(&self.address, caller)?;
        if !self.policy.is_eligible(caller, &stake) {
            tracing::debug!(track = %P::KIND, account = %caller, share_bps = stake.share_bps, "not eligible");
            return Err(GovernanceError::Unauthorized(format!(
                "{} is not eligible on the {} track",
                caller,
                P::KIND
            )));
        }
        Ok(stake)
    }

    pub fn proposal(&self, id: ProposalId) -> Option<&Proposal> {
        usize::try_from(id).ok().and_then(|i| self.proposals.get(i))
    }

    /// Status of `id`; `Status::None` for ids never created.
    pub fn status(&self, id: ProposalId) -> Status {
        self.proposal(id).map_or(Status::None, |p| p.status)
    }

    pub fn proposal_count(&self) -> u64 {
        self.proposals.len() as u64
    }

    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.iter()
    }

    pub fn vote_record(&self, account: &AccountId, id: ProposalId) -> Option<&VoteRecord> {
        self.votes.get(&(account.clone(), id))
    }

    pub fn has_voted(&self, account: &AccountId, id: ProposalId) -> bool {
        self.vote_record(account, id).is_some()
    }

    /// Ids owned by `owner` that are still `Created`, ascending.
    pub fn open_proposals_of(&self, owner: &AccountId) -> impl Iterator<Item = ProposalId> + '_ {
        self.open.get(owner).into_iter().flatten().copied()
    }
}

impl<P> ProposalTrack<P>
where
    P: TrackPolicy + Serialize + DeserializeOwned,
{
    /// Serialize the track for persistence.
    pub fn save_state(&self) -> Result<Vec<u8>, GovernanceError> {
        bincode::serialize(self).map_err(|e| GovernanceError::Snapshot(e.to_string()))
    }

    /// Restore a track, re-checking the dense-id and open-index invariants.
    pub fn load_state(data: &[u8]) -> Result<Self, GovernanceError> {
        let track: Self =
            bincode::deserialize(data).map_err(|e| GovernanceError::Snapshot(e.to_string()))?;
        for (index, proposal) in track.proposals.iter().enumerate() {
            if proposal.id != index as ProposalId || proposal.track != P::KIND {
                return Err(GovernanceError::Snapshot(format!(
                    "proposal at index {} is malformed",
                    index
                )));
            }
            let indexed = track
                .open
                .get(&proposal.owner)
                .is_some_and(|ids| ids.contains(&proposal.id));
            if indexed != (proposal.status == Status::Created) {
                return Err(GovernanceError::Snapshot(format!(
                    "open index disagrees with proposal {}",
                    proposal.id
                )));
            }
        }
        Ok(track)
    }
}
