//! GitHub API Error Types

/// Errors surfaced by the API client.
///
/// Rate-limit signals never appear here: they are handled inside the client
/// by waiting out the cooldown. `RetriesExhausted` is the only terminal
/// shape a transient failure can take.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("transport failure for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("{resource} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        resource: String,
        attempts: u32,
        #[source]
        source: Box<ApiError>,
    },

    #[error("operation cancelled by shutdown request")]
    Cancelled,
}

impl crate::core::error_handling::ContextualError for ApiError {
    fn is_user_actionable(&self) -> bool {
        // API failures are system conditions; nothing here is fixable by
        // editing arguments.
        false
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

/// Result type for API client operations
pub type ApiResult<T> = Result<T, ApiError>;
