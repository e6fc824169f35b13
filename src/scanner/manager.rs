//! Scan Orchestration
//!
//! Walks the organization repository by repository, branch by branch,
//! composing the client, classifier, and calendar math into the ordered
//! stale-record sequence the report aggregator consumes.
//!
//! A permanent API failure anywhere aborts the whole scan; there is no
//! partial-success isolation between repositories. That is a deliberate
//! simplicity/robustness trade-off (a governance report must not silently
//! omit repositories), not a silent-loss bug.

use crate::core::calendar::cutoff_boundary;
use crate::core::config::ScanConfig;
use crate::github::GitHubClient;
use crate::scanner::classifier::{classify, evaluate_commit, AgeOutcome};
use crate::scanner::error::{ScanError, ScanResult};
use crate::scanner::types::{ScanOutcome, ScanStats, StaleRecord};
use chrono::DateTime;
use chrono_tz::Tz;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Central coordination for one audit run
pub struct ScannerManager {
    client: Arc<GitHubClient>,
    config: ScanConfig,
}

impl ScannerManager {
    pub fn new(client: Arc<GitHubClient>, config: ScanConfig) -> Self {
        Self { client, config }
    }

    /// Run the full scan.
    ///
    /// `now` is injected so the cutoff and ages are reproducible; two scans
    /// against unchanged remote state with the same `now` yield identical
    /// record sequences.
    pub async fn scan(&self, now: DateTime<Tz>) -> ScanResult<ScanOutcome> {
        let cutoff = cutoff_boundary(&now, self.config.months);
        log::info!(
            "Scan started for organization: {}",
            self.config.organization
        );
        log::info!("Cutoff date: {}", cutoff.format("%Y-%m-%d %Z"));

        let mut stats = ScanStats::default();

        let repos = self
            .client
            .list_org_repos(&self.config.organization)
            .await
            .map_err(|e| ScanError::from_api("repository list", None, None, e))?;
        stats.repositories_seen = repos.len();
        log::info!("Total repositories fetched: {}", repos.len());

        let mut records = Vec::new();
        for repo in &repos {
            if !self.config.matches_filter(&repo.name) {
                continue;
            }
            stats.repositories_matched += 1;
            self.scan_repository(&repo.name, &now, &cutoff, &mut stats, &mut records)
                .await?;
        }

        stats.stale_found = records.len();
        log::info!(
            "Scan complete: {} stale branches across {} matched repositories ({} protected, {} incomplete skipped)",
            stats.stale_found,
            stats.repositories_matched,
            stats.branches_protected,
            stats.branches_incomplete
        );

        Ok(ScanOutcome { records, stats })
    }

    async fn scan_repository(
        &self,
        repository: &str,
        now: &DateTime<Tz>,
        cutoff: &DateTime<Tz>,
        stats: &mut ScanStats,
        records: &mut Vec<StaleRecord>,
    ) -> ScanResult<()> {
        log::info!("Scanning repository: {}", repository);

        let branches = self
            .client
            .list_branches(&self.config.organization, repository)
            .await
            .map_err(|e| ScanError::from_api("branch list", Some(repository), None, e))?;
        stats.branches_seen += branches.len();

        let mut eligible = Vec::new();
        for branch in &branches {
            let disposition = classify(branch, &self.config);
            if disposition.is_protected() {
                stats.branches_protected += 1;
                log::debug!(
                    "Excluding protected branch {}/{} ({:?})",
                    repository,
                    branch.name,
                    disposition
                );
                continue;
            }

            match &branch.commit {
                Some(commit_ref) if !commit_ref.url.is_empty() => {
                    eligible.push((branch.name.clone(), commit_ref.url.clone()));
                }
                _ => {
                    stats.branches_incomplete += 1;
                    log::info!(
                        "Skipping {}/{}: branch has no commit locator",
                        repository,
                        branch.name
                    );
                }
            }
        }

        // Bounded commit fetches. `buffered` preserves input order, so ties
        // in the report sort keep branch discovery order; the shared
        // cooldown gate inside the client quiesces all of these together
        // when any one of them observes a rate limit.
        let fetches = stream::iter(eligible.into_iter().map(|(branch_name, commit_url)| {
            let client = self.client.clone();
            let repository = repository.to_string();
            async move {
                let resource = format!("commit for {}/{}", repository, branch_name);
                let detail = client.get_commit(&resource, &commit_url).await;
                (branch_name, detail)
            }
        }))
        .buffered(self.config.commit_concurrency.max(1));

        let mut fetches = Box::pin(fetches);
        while let Some((branch_name, detail)) = fetches.next().await {
            let detail = detail.map_err(|e| {
                ScanError::from_api("commit", Some(repository), Some(branch_name.as_str()), e)
            })?;

            match evaluate_commit(repository, &branch_name, &detail, now, cutoff, &self.config) {
                AgeOutcome::Stale(record) => {
                    log::debug!(
                        "Stale: {}/{} last commit {} ({} months)",
                        repository,
                        record.branch,
                        record.last_commit_display(),
                        record.age_months
                    );
                    records.push(record);
                }
                AgeOutcome::Fresh => {}
                AgeOutcome::MissingAuthorDate => {
                    stats.branches_incomplete += 1;
                    log::info!(
                        "Skipping {}/{}: commit has no author date",
                        repository,
                        branch_name
                    );
                }
            }
        }

        Ok(())
    }
}
