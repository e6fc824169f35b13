//! Resilient paginated GitHub API client
//!
//! Every outbound call runs the same per-request state machine: send, then
//! either return the decoded body, wait out a provider rate limit on the
//! shared cooldown gate (retry budget untouched, may recur indefinitely),
//! or back off exponentially until the bounded attempt budget is exhausted
//! and the failure becomes permanent. Pagination is one reusable
//! empty-page-terminates cursor shared by repository and branch
//! enumeration; single-item fetches are the same primitive on a
//! non-paginated resource.

use super::error::{ApiError, ApiResult};
use super::models::{BranchInfo, CommitDetail, RepoInfo};
use super::transport::Transport;
use crate::core::retry::RetryPolicy;
use crate::core::shutdown::ShutdownCoordinator;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::broadcast;
use tokio::time::{sleep, Instant};

/// Base URL of the GitHub REST API
pub const GITHUB_API: &str = "https://api.github.com";

/// Page size requested from paginated collections
const PER_PAGE: usize = 100;

/// Shared cooldown gate serializing rate-limit waits across all workers.
///
/// The worker that observes a rate-limit signal sleeps while holding the
/// gate; every other request acquires the gate before sending, so the whole
/// scan quiesces together instead of burning quota in parallel. A worker
/// arriving after the deadline has passed acquires and proceeds without an
/// extra wait.
#[derive(Clone, Default)]
pub struct CooldownGate {
    deadline: Arc<tokio::sync::Mutex<Option<Instant>>>,
}

impl CooldownGate {
    /// Block until no cooldown is in progress.
    pub async fn ready(&self) {
        let _guard = self.deadline.lock().await;
    }

    /// Hold the gate until `target`, quiescing all other requests.
    ///
    /// A second observer of the same signal acquires the gate after the
    /// first released it; its own target is already in the past by then and
    /// it proceeds without sleeping again.
    pub async fn pause_until(&self, target: Instant) {
        let mut guard = self.deadline.lock().await;
        let target = match *guard {
            Some(existing) if existing > target => existing,
            _ => target,
        };
        *guard = Some(target);

        let now = Instant::now();
        if target > now {
            sleep(target - now).await;
        }

        *guard = None;
    }
}

/// GitHub API client applying one retry policy to every outbound call
pub struct GitHubClient {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
    gate: CooldownGate,
    base_url: String,
    shutdown_flag: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
}

impl GitHubClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        policy: RetryPolicy,
        coordinator: &ShutdownCoordinator,
    ) -> Self {
        Self {
            transport,
            policy,
            gate: CooldownGate::default(),
            base_url: GITHUB_API.to_string(),
            shutdown_flag: coordinator.shutdown_requested.clone(),
            shutdown_tx: coordinator.shutdown_tx.clone(),
        }
    }

    /// List all repositories of an organization, across all pages.
    pub async fn list_org_repos(&self, organization: &str) -> ApiResult<Vec<RepoInfo>> {
        let url = format!("{}/orgs/{}/repos", self.base_url, organization);
        self.paged(format!("repository list for {}", organization), url)
            .fetch_all()
            .await
    }

    /// List all branches of a repository, across all pages.
    pub async fn list_branches(
        &self,
        organization: &str,
        repository: &str,
    ) -> ApiResult<Vec<BranchInfo>> {
        let url = format!(
            "{}/repos/{}/{}/branches",
            self.base_url, organization, repository
        );
        self.paged(format!("branch list for {}", repository), url)
            .fetch_all()
            .await
    }

    /// Fetch one commit through the branch-supplied locator URL.
    pub async fn get_commit(&self, resource: &str, commit_url: &str) -> ApiResult<CommitDetail> {
        self.get_json(resource, commit_url).await
    }

    /// Start a page cursor over a collection endpoint.
    pub fn paged<T: DeserializeOwned>(&self, resource: String, base_url: String) -> PageCursor<'_, T> {
        PageCursor {
            client: self,
            resource,
            base_url,
            page: 1,
            done: false,
            _items: PhantomData,
        }
    }

    /// GET a resource and decode its JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, resource: &str, url: &str) -> ApiResult<T> {
        let body = self.get_with_policy(resource, url).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// One call through the full retry/rate-limit state machine.
    async fn get_with_policy(&self, resource: &str, url: &str) -> ApiResult<String> {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let mut attempt: u32 = 0;

        loop {
            if self.shutdown_flag.load(Ordering::Acquire) {
                return Err(ApiError::Cancelled);
            }

            // Quiesce while any worker is waiting out a rate limit.
            self.gate.ready().await;

            let outcome = tokio::select! {
                result = self.transport.get(url) => result,
                _ = shutdown_rx.recv() => return Err(ApiError::Cancelled),
            };

            let failure = match outcome {
                Ok(response) if response.is_rate_limited() => {
                    let wait = self.policy.rate_limit_wait(until_epoch(response.rate_limit_reset));
                    log::warn!(
                        "Rate limit reached on {}; pausing {}s before resuming",
                        resource,
                        wait.as_secs()
                    );
                    let target = Instant::now() + wait;
                    tokio::select! {
                        _ = self.gate.pause_until(target) => {}
                        _ = shutdown_rx.recv() => return Err(ApiError::Cancelled),
                    }
                    // Rate limits never consume the attempt budget.
                    continue;
                }
                Ok(response) if response.is_success() => return Ok(response.body),
                Ok(response) => ApiError::Status {
                    status: response.status,
                    url: url.to_string(),
                },
                Err(error) => error,
            };

            attempt += 1;
            if attempt >= self.policy.max_attempts {
                return Err(ApiError::RetriesExhausted {
                    resource: resource.to_string(),
                    attempts: attempt,
                    source: Box::new(failure),
                });
            }

            let delay = self.policy.backoff_delay(attempt);
            log::warn!(
                "API call for {} failed (attempt {}/{}), retrying in {:?}: {}",
                resource,
                attempt,
                self.policy.max_attempts,
                delay,
                failure
            );
            tokio::select! {
                _ = sleep(delay) => {}
                _ = shutdown_rx.recv() => return Err(ApiError::Cancelled),
            }
        }
    }
}

/// Duration until an epoch-seconds reset timestamp, zero when absent or past
fn until_epoch(reset: Option<u64>) -> Duration {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs();
    Duration::from_secs(reset.unwrap_or(0).saturating_sub(now))
}

/// Lazy cursor over a paginated collection.
///
/// Pages are requested as `per_page=100&page=N`; an empty page terminates
/// the sequence. Each page fetch runs the full retry policy, so a transient
/// failure restarts only the page it interrupted.
pub struct PageCursor<'a, T> {
    client: &'a GitHubClient,
    resource: String,
    base_url: String,
    page: usize,
    done: bool,
    _items: PhantomData<T>,
}

impl<T: DeserializeOwned> PageCursor<'_, T> {
    /// Fetch the next page, or `None` once the provider returns an empty one.
    pub async fn next_page(&mut self) -> ApiResult<Option<Vec<T>>> {
        if self.done {
            return Ok(None);
        }

        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        let url = format!(
            "{}{}per_page={}&page={}",
            self.base_url, separator, PER_PAGE, self.page
        );

        let items: Vec<T> = self.client.get_json(&self.resource, &url).await?;
        if items.is_empty() {
            self.done = true;
            return Ok(None);
        }

        self.page += 1;
        Ok(Some(items))
    }

    /// Drain the cursor, concatenating pages in provider order.
    pub async fn fetch_all(mut self) -> ApiResult<Vec<T>> {
        let mut all = Vec::new();
        while let Some(mut page) = self.next_page().await? {
            all.append(&mut page);
        }
        Ok(all)
    }
}
