//! Scanner Error Types

use crate::github::ApiError;
use std::fmt;

/// Scanner error types
#[derive(Debug)]
pub enum ScanError {
    /// Invalid or missing configuration
    Configuration { message: String },
    /// Permanent API failure, with enough context to diagnose
    Api {
        resource: String,
        repository: Option<String>,
        branch: Option<String>,
        source: ApiError,
    },
    /// Scan interrupted by a shutdown request
    Cancelled,
}

impl ScanError {
    pub(crate) fn from_api(
        resource: &str,
        repository: Option<&str>,
        branch: Option<&str>,
        source: ApiError,
    ) -> Self {
        if matches!(source, ApiError::Cancelled) {
            return ScanError::Cancelled;
        }
        ScanError::Api {
            resource: resource.to_string(),
            repository: repository.map(String::from),
            branch: branch.map(String::from),
            source,
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Configuration { message } => write!(f, "Configuration error: {}", message),
            ScanError::Api {
                resource,
                repository,
                branch,
                source,
            } => {
                write!(f, "API error fetching {}", resource)?;
                if let Some(repository) = repository {
                    write!(f, " (repository {}", repository)?;
                    if let Some(branch) = branch {
                        write!(f, ", branch {}", branch)?;
                    }
                    write!(f, ")")?;
                }
                write!(f, ": {}", source)
            }
            ScanError::Cancelled => write!(f, "Scan cancelled before completion"),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Api { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl crate::core::error_handling::ContextualError for ScanError {
    fn is_user_actionable(&self) -> bool {
        match self {
            ScanError::Configuration { .. } => true, // User can fix config issues
            ScanError::Api { .. } => false,          // Provider/network issues
            ScanError::Cancelled => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ScanError::Configuration { message } => Some(message),
            _ => None,
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
