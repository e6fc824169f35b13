//! Scanner Types
//!
//! Shared types produced by the scan: the stale-branch records that feed
//! the report aggregator and the counters used for progress logging.

use chrono::DateTime;
use chrono_tz::Tz;

/// One unprotected branch whose last commit is at or before the cutoff
#[derive(Debug, Clone, PartialEq)]
pub struct StaleRecord {
    pub repository: String,
    pub branch: String,
    /// Last commit timestamp converted to the reporting timezone
    pub last_commit_local: DateTime<Tz>,
    /// Whole-calendar-month age; always at least the configured threshold
    pub age_months: u32,
    /// `"unknown"` when the provider omitted the field
    pub author_name: String,
    /// `"unknown"` when the provider omitted the field
    pub author_email: String,
}

impl StaleRecord {
    /// Timestamp rendering shared by every report artifact
    pub fn last_commit_display(&self) -> String {
        self.last_commit_local
            .format("%Y-%m-%d %I:%M %p %Z")
            .to_string()
    }
}

/// Counters accumulated over one scan, for progress logging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanStats {
    pub repositories_seen: usize,
    pub repositories_matched: usize,
    pub branches_seen: usize,
    pub branches_protected: usize,
    /// Branches skipped for incomplete provider data (no commit locator or
    /// no author date)
    pub branches_incomplete: usize,
    pub stale_found: usize,
}

/// Result of a completed scan
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Stale records in discovery order (repository enumeration order, then
    /// branch enumeration order)
    pub records: Vec<StaleRecord>,
    pub stats: ScanStats,
}
