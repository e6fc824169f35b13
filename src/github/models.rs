//! Typed views of GitHub API responses
//!
//! Decoded defensively at the provider boundary: every field the provider
//! may omit is optional or defaulted here, so the rest of the scan never
//! touches raw JSON. Missing author identity defaults to the literal
//! `"unknown"`; a missing author date is a skip condition, not an error.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Placeholder for absent author name/email in reports
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// One repository from "list organization repositories"
#[derive(Debug, Clone, Deserialize)]
pub struct RepoInfo {
    /// Repository name within the organization. An unnamed entry decodes to
    /// an empty string and then never matches a filter.
    #[serde(default)]
    pub name: String,
}

/// One branch from "list repository branches"
#[derive(Debug, Clone, Deserialize)]
pub struct BranchInfo {
    #[serde(default)]
    pub name: String,
    /// Provider-reported protection flag
    #[serde(default)]
    pub protected: bool,
    /// Locator for the branch tip commit
    pub commit: Option<CommitRef>,
}

/// Opaque commit locator carried on a branch
#[derive(Debug, Clone, Deserialize)]
pub struct CommitRef {
    #[serde(default)]
    pub sha: String,
    /// API URL for the full commit object
    #[serde(default)]
    pub url: String,
}

/// Response of "get commit by reference"
#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub commit: Option<CommitPayload>,
}

/// The git-level commit inside a `CommitDetail`
#[derive(Debug, Clone, Deserialize)]
pub struct CommitPayload {
    pub author: Option<CommitIdent>,
}

/// Author identity on a commit; all fields optional on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct CommitIdent {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl CommitDetail {
    /// UTC author date, when the provider supplied one
    pub fn author_date(&self) -> Option<DateTime<Utc>> {
        self.commit
            .as_ref()
            .and_then(|payload| payload.author.as_ref())
            .and_then(|author| author.date)
    }

    /// Author name, defaulting to [`UNKNOWN_AUTHOR`]
    pub fn author_name(&self) -> &str {
        self.ident_field(|ident| ident.name.as_deref())
    }

    /// Author email, defaulting to [`UNKNOWN_AUTHOR`]
    pub fn author_email(&self) -> &str {
        self.ident_field(|ident| ident.email.as_deref())
    }

    fn ident_field<'a>(&'a self, get: impl Fn(&'a CommitIdent) -> Option<&'a str>) -> &'a str {
        self.commit
            .as_ref()
            .and_then(|payload| payload.author.as_ref())
            .and_then(get)
            .filter(|value| !value.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
    }
}
