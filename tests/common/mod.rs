//! Shared fixtures for integration tests: a routed mock of the GitHub API
//! plus client/config helpers tuned for fast test runs.

use async_trait::async_trait;
use branchaudit::core::config::ScanConfig;
use branchaudit::core::retry::RetryPolicy;
use branchaudit::core::shutdown::ShutdownCoordinator;
use branchaudit::github::transport::{RawResponse, Transport};
use branchaudit::github::{ApiResult, GitHubClient};
use branchaudit::scanner::manager::ScannerManager;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock GitHub API: canned responses by exact URL, with an optional prelude
/// of responses served before routing starts (for rate-limit and failure
/// scripting). Unknown URLs return 404 so missing fixtures fail loudly.
pub struct MockGitHub {
    routes: HashMap<String, (u16, String)>,
    prelude: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<String>>,
}

impl MockGitHub {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            prelude: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn route(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(url.to_string(), (200, body.to_string()));
        self
    }

    pub fn route_status(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(url.to_string(), (status, String::new()));
        self
    }

    /// Queue a response served before any routing, regardless of URL.
    pub fn prelude_response(self, response: RawResponse) -> Self {
        self.prelude.lock().unwrap().push_back(response);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockGitHub {
    async fn get(&self, url: &str) -> ApiResult<RawResponse> {
        self.requests.lock().unwrap().push(url.to_string());

        if let Some(response) = self.prelude.lock().unwrap().pop_front() {
            return Ok(response);
        }

        let (status, body) = self
            .routes
            .get(url)
            .cloned()
            .unwrap_or((404, "no fixture for url".to_string()));
        Ok(RawResponse {
            status,
            body,
            rate_limit_remaining: Some(5000),
            rate_limit_reset: None,
        })
    }
}

/// A 403 response carrying the provider's rate-limit indicator.
pub fn rate_limit_response() -> RawResponse {
    RawResponse {
        status: 403,
        body: "API rate limit exceeded".to_string(),
        rate_limit_remaining: Some(0),
        rate_limit_reset: None,
    }
}

/// Retry policy with delays short enough for tests.
pub fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 2,
        base_delay: Duration::from_millis(1),
        rate_limit_floor: Duration::from_millis(50),
    }
}

/// Manager over the mock transport, with its shutdown coordinator exposed
/// for cancellation tests.
pub fn manager_with_coordinator(
    transport: Arc<MockGitHub>,
    config: ScanConfig,
) -> (ScannerManager, ShutdownCoordinator) {
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let client = Arc::new(GitHubClient::new(transport, fast_policy(), &coordinator));
    (ScannerManager::new(client, config), coordinator)
}

pub fn manager(transport: Arc<MockGitHub>, config: ScanConfig) -> ScannerManager {
    manager_with_coordinator(transport, config).0
}

fn commit_body(name: &str, email: &str, date: &str) -> String {
    format!(
        r#"{{"commit": {{"author": {{"name": "{}", "email": "{}", "date": "{}"}}}}}}"#,
        name, email, date
    )
}

/// Two matching repositories with protected, stale, and fresh branches.
///
/// With `now` = 2024-01-15 09:00 ET and a two-month threshold, the stale
/// set in age order is: feature/ancient (24), task/old (7), feature/mid (3).
pub fn org_fixture() -> MockGitHub {
    MockGitHub::new()
        .route(
            "https://api.github.com/orgs/acme/repos?per_page=100&page=1",
            r#"[{"name": "ITAP-alpha"}, {"name": "unrelated-repo"}, {"name": "ITAP-beta"}]"#,
        )
        .route(
            "https://api.github.com/orgs/acme/repos?per_page=100&page=2",
            "[]",
        )
        .route(
            "https://api.github.com/repos/acme/ITAP-alpha/branches?per_page=100&page=1",
            r#"[
                {"name": "main", "protected": true,
                 "commit": {"sha": "m", "url": "https://api.github.com/repos/acme/ITAP-alpha/commits/m"}},
                {"name": "feature/mid", "protected": false,
                 "commit": {"sha": "a1", "url": "https://api.github.com/repos/acme/ITAP-alpha/commits/a1"}},
                {"name": "feature/ancient", "protected": false,
                 "commit": {"sha": "a2", "url": "https://api.github.com/repos/acme/ITAP-alpha/commits/a2"}},
                {"name": "feature/fresh", "protected": false,
                 "commit": {"sha": "a3", "url": "https://api.github.com/repos/acme/ITAP-alpha/commits/a3"}}
            ]"#,
        )
        .route(
            "https://api.github.com/repos/acme/ITAP-alpha/branches?per_page=100&page=2",
            "[]",
        )
        .route(
            "https://api.github.com/repos/acme/ITAP-beta/branches?per_page=100&page=1",
            r#"[
                {"name": "task/old", "protected": false,
                 "commit": {"sha": "b1", "url": "https://api.github.com/repos/acme/ITAP-beta/commits/b1"}}
            ]"#,
        )
        .route(
            "https://api.github.com/repos/acme/ITAP-beta/branches?per_page=100&page=2",
            "[]",
        )
        .route(
            "https://api.github.com/repos/acme/ITAP-alpha/commits/a1",
            &commit_body("Mid Author", "mid@example.com", "2023-10-20T00:00:00Z"),
        )
        .route(
            "https://api.github.com/repos/acme/ITAP-alpha/commits/a2",
            &commit_body("Ancient Author", "ancient@example.com", "2022-01-10T12:00:00Z"),
        )
        .route(
            "https://api.github.com/repos/acme/ITAP-alpha/commits/a3",
            &commit_body("Fresh Author", "fresh@example.com", "2024-01-10T12:00:00Z"),
        )
        .route(
            "https://api.github.com/repos/acme/ITAP-beta/commits/b1",
            &commit_body("Old Author", "old@example.com", "2023-06-15T12:00:00Z"),
        )
}

/// The `now` every integration scan is pinned to.
pub fn scan_now() -> chrono::DateTime<chrono_tz::Tz> {
    use chrono::TimeZone;
    chrono_tz::America::New_York
        .with_ymd_and_hms(2024, 1, 15, 9, 0, 0)
        .unwrap()
}

pub fn scan_config(months: u32, out: &std::path::Path) -> ScanConfig {
    ScanConfig::new("acme", "ITAP", months, out)
}
