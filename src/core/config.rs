//! Immutable scan configuration
//!
//! Every knob the scan consumes (organization, filters, threshold,
//! protection policy, retry limits, concurrency) is bundled here once at
//! startup and threaded explicitly through the components. Nothing reads
//! module-level mutable state.

use crate::core::retry::RetryPolicy;
use chrono_tz::Tz;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// All reports are rendered in US Eastern time.
pub const REPORTING_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Immutable configuration for one audit run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// GitHub organization to audit
    pub organization: String,
    /// Uppercased repository-name filter substrings. Matching is
    /// case-insensitive: repository names are uppercased before the
    /// substring test.
    pub repo_filters: Vec<String>,
    /// Staleness threshold in whole calendar months
    pub months: u32,
    /// Directory report artifacts are written into (created lazily, only
    /// when at least one stale record exists)
    pub output_dir: PathBuf,
    /// Reporting timezone for commit timestamps and age math
    pub timezone: Tz,
    /// Exact branch names excluded from staleness reporting
    pub protected_branches: BTreeSet<String>,
    /// Branch-name prefix excluded from staleness reporting
    pub protected_prefix: String,
    /// Retry policy applied to every outbound API call
    pub retry: RetryPolicy,
    /// Bound on concurrent per-branch commit fetches within a repository
    pub commit_concurrency: usize,
}

impl ScanConfig {
    /// Build a config with default protection policy and retry limits.
    ///
    /// `filters` is the raw comma-separated filter list from the command
    /// line; entries are trimmed, uppercased, and empties dropped.
    pub fn new(
        organization: impl Into<String>,
        filters: &str,
        months: u32,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            organization: organization.into(),
            repo_filters: normalize_filters(filters),
            months,
            output_dir: output_dir.into(),
            timezone: REPORTING_TIMEZONE,
            protected_branches: default_protected_branches(),
            protected_prefix: "release/".to_string(),
            retry: RetryPolicy::default(),
            commit_concurrency: 4,
        }
    }

    /// True when the repository name contains at least one configured
    /// filter substring, compared case-insensitively.
    pub fn matches_filter(&self, repo_name: &str) -> bool {
        let upper = repo_name.to_uppercase();
        self.repo_filters.iter().any(|itap| upper.contains(itap))
    }
}

/// Branch names every organization treats as permanent
pub fn default_protected_branches() -> BTreeSet<String> {
    ["main", "master", "develop", "prod"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn normalize_filters(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|itap| itap.trim().to_uppercase())
        .filter(|itap| !itap.is_empty())
        .collect()
}
