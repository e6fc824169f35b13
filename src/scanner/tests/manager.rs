//! Scan orchestration tests against a routed mock transport

use crate::core::config::ScanConfig;
use crate::core::retry::RetryPolicy;
use crate::core::shutdown::ShutdownCoordinator;
use crate::github::transport::{RawResponse, Transport};
use crate::github::{ApiResult, GitHubClient};
use crate::scanner::error::ScanError;
use crate::scanner::manager::ScannerManager;
use async_trait::async_trait;
use chrono::TimeZone;
use chrono_tz::America::New_York;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Transport that serves canned responses by exact URL; unknown URLs get a
/// 404 so a missing fixture fails loudly through the retry path.
struct RouteTransport {
    routes: HashMap<String, (u16, String)>,
    requests: Mutex<Vec<String>>,
}

impl RouteTransport {
    fn new() -> Self {
        Self {
            routes: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn route(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(url.to_string(), (200, body.to_string()));
        self
    }

    fn route_status(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(url.to_string(), (status, String::new()));
        self
    }

    fn requested(&self, url_fragment: &str) -> bool {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .any(|url| url.contains(url_fragment))
    }
}

#[async_trait]
impl Transport for RouteTransport {
    async fn get(&self, url: &str) -> ApiResult<RawResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        let (status, body) = self
            .routes
            .get(url)
            .cloned()
            .unwrap_or((404, "no fixture".to_string()));
        Ok(RawResponse {
            status,
            body,
            rate_limit_remaining: Some(5000),
            rate_limit_reset: None,
        })
    }
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 2,
        base_delay: Duration::from_millis(1),
        rate_limit_floor: Duration::from_millis(1),
    }
}

fn manager_for(transport: Arc<RouteTransport>, config: ScanConfig) -> ScannerManager {
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let client = Arc::new(GitHubClient::new(transport, fast_policy(), &coordinator));
    ScannerManager::new(client, config)
}

fn commit_body(name: &str, email: &str, date: Option<&str>) -> String {
    let date = match date {
        Some(date) => format!(r#""{}""#, date),
        None => "null".to_string(),
    };
    format!(
        r#"{{"commit": {{"author": {{"name": "{}", "email": "{}", "date": {}}}}}}}"#,
        name, email, date
    )
}

/// Two matching repositories, one filtered out; protected, stale, fresh,
/// and incomplete branches spread across them.
fn org_fixture() -> RouteTransport {
    RouteTransport::new()
        .route(
            "https://api.github.com/orgs/acme/repos?per_page=100&page=1",
            r#"[{"name": "ITAP1-app"}, {"name": "billing-core"}, {"name": "itap2-svc"}]"#,
        )
        .route(
            "https://api.github.com/orgs/acme/repos?per_page=100&page=2",
            "[]",
        )
        .route(
            "https://api.github.com/repos/acme/ITAP1-app/branches?per_page=100&page=1",
            r#"[
                {"name": "main", "protected": true,
                 "commit": {"sha": "m1", "url": "https://api.github.com/repos/acme/ITAP1-app/commits/m1"}},
                {"name": "develop", "protected": false,
                 "commit": {"sha": "d1", "url": "https://api.github.com/repos/acme/ITAP1-app/commits/d1"}},
                {"name": "release/1.0", "protected": false,
                 "commit": {"sha": "r1", "url": "https://api.github.com/repos/acme/ITAP1-app/commits/r1"}},
                {"name": "feature/old", "protected": false,
                 "commit": {"sha": "c1", "url": "https://api.github.com/repos/acme/ITAP1-app/commits/c1"}},
                {"name": "feature/new", "protected": false,
                 "commit": {"sha": "c2", "url": "https://api.github.com/repos/acme/ITAP1-app/commits/c2"}},
                {"name": "feature/no-date", "protected": false,
                 "commit": {"sha": "c3", "url": "https://api.github.com/repos/acme/ITAP1-app/commits/c3"}}
            ]"#,
        )
        .route(
            "https://api.github.com/repos/acme/ITAP1-app/branches?per_page=100&page=2",
            "[]",
        )
        .route(
            "https://api.github.com/repos/acme/itap2-svc/branches?per_page=100&page=1",
            r#"[
                {"name": "stale-two", "protected": false,
                 "commit": {"sha": "c4", "url": "https://api.github.com/repos/acme/itap2-svc/commits/c4"}}
            ]"#,
        )
        .route(
            "https://api.github.com/repos/acme/itap2-svc/branches?per_page=100&page=2",
            "[]",
        )
        .route(
            "https://api.github.com/repos/acme/ITAP1-app/commits/c1",
            &commit_body("Old Author", "old@example.com", Some("2023-06-15T12:00:00Z")),
        )
        .route(
            "https://api.github.com/repos/acme/ITAP1-app/commits/c2",
            &commit_body("New Author", "new@example.com", Some("2024-01-10T12:00:00Z")),
        )
        .route(
            "https://api.github.com/repos/acme/ITAP1-app/commits/c3",
            &commit_body("No Date", "nodate@example.com", None),
        )
        .route(
            "https://api.github.com/repos/acme/itap2-svc/commits/c4",
            &commit_body("Second Author", "second@example.com", Some("2023-10-20T00:00:00Z")),
        )
}

fn scan_now() -> chrono::DateTime<chrono_tz::Tz> {
    New_York.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
}

#[tokio::test]
async fn test_full_scan_collects_stale_records_in_discovery_order() {
    let transport = Arc::new(org_fixture());
    let config = ScanConfig::new("acme", "ITAP", 2, "/tmp/branchaudit-test");
    let manager = manager_for(transport.clone(), config);

    let outcome = manager.scan(scan_now()).await.unwrap();

    let summary: Vec<(&str, &str, u32)> = outcome
        .records
        .iter()
        .map(|r| (r.repository.as_str(), r.branch.as_str(), r.age_months))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("ITAP1-app", "feature/old", 7),
            ("itap2-svc", "stale-two", 3),
        ]
    );

    assert_eq!(outcome.stats.repositories_seen, 3);
    assert_eq!(outcome.stats.repositories_matched, 2);
    assert_eq!(outcome.stats.branches_seen, 7);
    assert_eq!(outcome.stats.branches_protected, 3);
    assert_eq!(outcome.stats.branches_incomplete, 1);
    assert_eq!(outcome.stats.stale_found, 2);

    // Protected branches never reach commit lookup.
    assert!(!transport.requested("/commits/m1"));
    assert!(!transport.requested("/commits/d1"));
    assert!(!transport.requested("/commits/r1"));
    // The filtered-out repository is never enumerated.
    assert!(!transport.requested("billing-core"));
}

#[tokio::test]
async fn test_filter_is_case_insensitive() {
    let transport = Arc::new(org_fixture());
    // Lowercase filter still matches both mixed-case repository names.
    let config = ScanConfig::new("acme", "itap", 2, "/tmp/branchaudit-test");
    let manager = manager_for(transport, config);

    let outcome = manager.scan(scan_now()).await.unwrap();
    assert_eq!(outcome.stats.repositories_matched, 2);
}

#[tokio::test]
async fn test_non_matching_filter_scans_nothing() {
    let transport = Arc::new(org_fixture());
    let config = ScanConfig::new("acme", "NOPE", 2, "/tmp/branchaudit-test");
    let manager = manager_for(transport.clone(), config);

    let outcome = manager.scan(scan_now()).await.unwrap();

    assert_eq!(outcome.stats.repositories_matched, 0);
    assert!(outcome.records.is_empty());
    assert!(!transport.requested("/branches"));
}

#[tokio::test]
async fn test_branch_list_failure_aborts_scan_with_context() {
    let transport = Arc::new(
        org_fixture().route_status(
            "https://api.github.com/repos/acme/ITAP1-app/branches?per_page=100&page=1",
            500,
        ),
    );
    let config = ScanConfig::new("acme", "ITAP", 2, "/tmp/branchaudit-test");
    let manager = manager_for(transport, config);

    match manager.scan(scan_now()).await {
        Err(ScanError::Api {
            resource,
            repository,
            ..
        }) => {
            assert_eq!(resource, "branch list");
            assert_eq!(repository.as_deref(), Some("ITAP1-app"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_commit_failure_carries_branch_context() {
    let transport = Arc::new(
        org_fixture()
            .route_status("https://api.github.com/repos/acme/ITAP1-app/commits/c1", 502),
    );
    let config = ScanConfig::new("acme", "ITAP", 2, "/tmp/branchaudit-test");
    let manager = manager_for(transport, config);

    match manager.scan(scan_now()).await {
        Err(ScanError::Api {
            resource,
            repository,
            branch,
            ..
        }) => {
            assert_eq!(resource, "commit");
            assert_eq!(repository.as_deref(), Some("ITAP1-app"));
            assert_eq!(branch.as_deref(), Some("feature/old"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_scan_is_idempotent_against_unchanged_remote_state() {
    let config = ScanConfig::new("acme", "ITAP", 2, "/tmp/branchaudit-test");

    let first = manager_for(Arc::new(org_fixture()), config.clone())
        .scan(scan_now())
        .await
        .unwrap();
    let second = manager_for(Arc::new(org_fixture()), config)
        .scan(scan_now())
        .await
        .unwrap();

    assert_eq!(first.records, second.records);
    assert_eq!(first.stats, second.stats);
}
