//! Branch Classification
//!
//! Applies the protection/exclusion policy and the staleness decision for a
//! single branch. Exclusion rules are evaluated in order (provider flag,
//! exact name, prefix); the rules are disjoint in practice so the order is
//! not semantically significant, but first match wins.

use crate::core::calendar::months_between;
use crate::core::config::ScanConfig;
use crate::github::{BranchInfo, CommitDetail};
use crate::scanner::types::StaleRecord;
use chrono::DateTime;
use chrono_tz::Tz;

/// Outcome of the protection policy for one branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchDisposition {
    /// Provider reports the branch as protected
    ProviderProtected,
    /// Exact match against the configured protected names
    ProtectedName,
    /// Name carries the configured protected prefix
    ProtectedPrefix,
    /// Unprotected; proceeds to commit lookup
    Eligible,
}

impl BranchDisposition {
    pub fn is_protected(&self) -> bool {
        !matches!(self, BranchDisposition::Eligible)
    }
}

/// Outcome of the staleness decision for an eligible branch
#[derive(Debug, Clone, PartialEq)]
pub enum AgeOutcome {
    Stale(StaleRecord),
    Fresh,
    /// Commit carries no author date; the branch is skipped, not failed
    MissingAuthorDate,
}

/// Apply the exclusion policy to a branch.
pub fn classify(branch: &BranchInfo, config: &ScanConfig) -> BranchDisposition {
    if branch.protected {
        return BranchDisposition::ProviderProtected;
    }
    if config.protected_branches.contains(&branch.name) {
        return BranchDisposition::ProtectedName;
    }
    if branch.name.starts_with(&config.protected_prefix) {
        return BranchDisposition::ProtectedPrefix;
    }
    BranchDisposition::Eligible
}

/// Decide staleness for an eligible branch from its tip commit.
///
/// The commit's UTC author date is converted into the reporting timezone
/// first; the branch is stale iff that local timestamp is at or before the
/// cutoff. Age is the whole-calendar-month difference between `now` and the
/// local commit time.
pub fn evaluate_commit(
    repository: &str,
    branch_name: &str,
    detail: &CommitDetail,
    now: &DateTime<Tz>,
    cutoff: &DateTime<Tz>,
    config: &ScanConfig,
) -> AgeOutcome {
    let Some(author_date) = detail.author_date() else {
        return AgeOutcome::MissingAuthorDate;
    };

    let commit_local = author_date.with_timezone(&config.timezone);
    if commit_local > *cutoff {
        return AgeOutcome::Fresh;
    }

    // The cutoff is itself a month boundary, so a commit at or before it is
    // always at least `months` whole months old; the clamp is for form.
    let age_months = months_between(now, &commit_local).max(0) as u32;

    AgeOutcome::Stale(StaleRecord {
        repository: repository.to_string(),
        branch: branch_name.to_string(),
        last_commit_local: commit_local,
        age_months,
        author_name: detail.author_name().to_string(),
        author_email: detail.author_email().to_string(),
    })
}
