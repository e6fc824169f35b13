//! HTTP transport seam for the GitHub API
//!
//! The retry/rate-limit policy lives in the client; the transport's job is
//! one authenticated GET returning the minimal response view the policy
//! needs. Tests substitute scripted transports behind the same trait.

use super::error::{ApiError, ApiResult};
use async_trait::async_trait;
use std::time::Duration;

/// Client header sent on every outbound call
pub const CLIENT_USER_AGENT: &str = "branchaudit-org-audit";

/// Per-request timeout at the HTTP layer
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Minimal view of an HTTP response consumed by the client policy
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    /// `X-RateLimit-Remaining`, when present
    pub rate_limit_remaining: Option<u64>,
    /// `X-RateLimit-Reset` epoch seconds, when present
    pub rate_limit_reset: Option<u64>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Provider rate-limit signal: 403/429 carrying either an exhausted
    /// quota header or a rate-limit marker in the body.
    pub fn is_rate_limited(&self) -> bool {
        (self.status == 403 || self.status == 429)
            && (self.rate_limit_remaining == Some(0)
                || self.body.to_lowercase().contains("rate limit"))
    }
}

/// One authenticated GET against the provider
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> ApiResult<RawResponse>;
}

/// Production transport over `reqwest` with bearer credential and fixed
/// client header
pub struct HttpTransport {
    http: reqwest::Client,
    token: String,
}

impl HttpTransport {
    pub fn new(token: String) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport {
                url: String::new(),
                message: format!("could not build HTTP client: {}", e),
            })?;

        Ok(Self { http, token })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> ApiResult<RawResponse> {
        let response = self
            .http
            .get(url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", CLIENT_USER_AGENT)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let rate_limit_remaining = header_u64(&response, "x-ratelimit-remaining");
        let rate_limit_reset = header_u64(&response, "x-ratelimit-reset");

        let body = response.text().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(RawResponse {
            status,
            body,
            rate_limit_remaining,
            rate_limit_reset,
        })
    }
}

fn header_u64(response: &reqwest::Response, name: &str) -> Option<u64> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}
