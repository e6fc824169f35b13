//! GitHub API Access
//!
//! Resilient, read-only access to the three provider endpoints the audit
//! consumes: list organization repositories, list repository branches, get
//! commit by reference. All calls share one retry policy and one rate-limit
//! cooldown gate; pagination is a single reusable cursor.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{CooldownGate, GitHubClient, PageCursor, GITHUB_API};
pub use error::{ApiError, ApiResult};
pub use models::{BranchInfo, CommitDetail, CommitRef, RepoInfo, UNKNOWN_AUTHOR};
pub use transport::{HttpTransport, RawResponse, Transport, CLIENT_USER_AGENT};
