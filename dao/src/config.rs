//! DAO configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use lop_governance::MembershipPolicy;
use lop_staking::TrackAddresses;
use lop_types::{AccountId, DaoParams};

use crate::logging::LogFormat;
use crate::DaoError;

/// Configuration for a LOP DAO deployment.
///
/// Can be loaded from a TOML file via [`DaoConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DaoConfig {
    /// Minimum share of total stake (whole percent) needed to propose or vote.
    #[serde(default = "default_min_vote_percent")]
    pub min_vote_percent: u8,

    /// Quorum as basis points of total stake.
    #[serde(default = "default_quorum_bps")]
    pub quorum_bps: u32,

    /// Time-lock between proposal creation and execution.
    #[serde(default = "default_voting_period_secs")]
    pub voting_period_secs: u64,

    /// Who may accept Product-track membership requests.
    #[serde(default)]
    pub membership_policy: MembershipPolicy,

    /// Custody account of the stake registry.
    #[serde(default = "default_staking_address")]
    pub staking_address: AccountId,

    /// Custody account of the treasury vault.
    #[serde(default = "default_treasury_address")]
    pub treasury_address: AccountId,

    #[serde(default = "default_shareholder_address")]
    pub shareholder_address: AccountId,

    #[serde(default = "default_product_address")]
    pub product_address: AccountId,

    #[serde(default = "default_development_address")]
    pub development_address: AccountId,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_min_vote_percent() -> u8 {
    DaoParams::DEFAULT_MIN_VOTE_PERCENT
}

fn default_quorum_bps() -> u32 {
    DaoParams::DEFAULT_QUORUM_BPS
}

fn default_voting_period_secs() -> u64 {
    DaoParams::DEFAULT_VOTING_PERIOD_SECS
}

fn default_staking_address() -> AccountId {
    AccountId::new("lop_staking")
}

fn default_treasury_address() -> AccountId {
    AccountId::new("lop_treasury")
}

fn default_shareholder_address() -> AccountId {
    AccountId::new("lop_shareholder_dao")
}

fn default_product_address() -> AccountId {
    AccountId::new("lop_product_dao")
}

fn default_development_address() -> AccountId {
    AccountId::new("lop_development_dao")
}

fn default_log_format() -> LogFormat {
    LogFormat::Human
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DaoConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DaoError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DaoError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, DaoError> {
        toml::from_str(s).map_err(|e| DaoError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, DaoError> {
        toml::to_string_pretty(self).map_err(|e| DaoError::Config(e.to_string()))
    }

    /// Reject parameter combinations no deployment could run with.
    pub fn validate(&self) -> Result<(), DaoError> {
        if self.min_vote_percent > 100 {
            return Err(DaoError::Config(format!(
                "min_vote_percent must be at most 100, got {}",
                self.min_vote_percent
            )));
        }
        if self.quorum_bps > 10_000 {
            return Err(DaoError::Config(format!(
                "quorum_bps must be at most 10000, got {}",
                self.quorum_bps
            )));
        }
        if self.voting_period_secs == 0 {
            return Err(DaoError::Config("voting_period_secs must be non-zero".into()));
        }

        let addresses = [
            &self.staking_address,
            &self.treasury_address,
            &self.shareholder_address,
            &self.product_address,
            &self.development_address,
        ];
        if let Some(empty) = addresses.iter().find(|a| !a.is_valid()) {
            return Err(DaoError::Config(format!("invalid address {:?}", empty.as_str())));
        }
        let distinct: BTreeSet<_> = addresses.iter().collect();
        if distinct.len() != addresses.len() {
            return Err(DaoError::Config("component addresses must be distinct".into()));
        }
        Ok(())
    }

    pub fn params(&self) -> DaoParams {
        DaoParams {
            min_vote_percent: self.min_vote_percent,
            quorum_bps: self.quorum_bps,
            voting_period_secs: self.voting_period_secs,
        }
    }

    pub fn track_addresses(&self) -> TrackAddresses {
        TrackAddresses {
            shareholder: self.shareholder_address.clone(),
            product: self.product_address.clone(),
            development: self.development_address.clone(),
        }
    }
}

impl Default for DaoConfig {
    fn default() -> Self {
        Self {
            min_vote_percent: default_min_vote_percent(),
            quorum_bps: default_quorum_bps(),
            voting_period_secs: default_voting_period_secs(),
            membership_policy: MembershipPolicy::default(),
            staking_address: default_staking_address(),
            treasury_address: default_treasury_address(),
            shareholder_address: default_shareholder_address(),
            product_address: default_product_address(),
            development_address: default_development_address(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
