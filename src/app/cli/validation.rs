//! Scan configuration validation
//!
//! Cross-field checks that clap cannot express, run after the config file
//! overrides are folded in and before any network activity.

use crate::core::config::ScanConfig;
use crate::scanner::error::{ScanError, ScanResult};

/// Validate the assembled configuration for consistency and constraints.
pub fn validate_config(config: &ScanConfig) -> ScanResult<()> {
    if config.organization.trim().is_empty() {
        return Err(ScanError::Configuration {
            message: "Organization name cannot be empty".to_string(),
        });
    }

    if config.repo_filters.is_empty() {
        return Err(ScanError::Configuration {
            message: "No repository filters given; --itaps must contain at least one non-empty entry"
                .to_string(),
        });
    }

    if config.retry.max_attempts == 0 {
        return Err(ScanError::Configuration {
            message: "max_retry_attempts must be greater than 0".to_string(),
        });
    }

    if config.commit_concurrency == 0 {
        return Err(ScanError::Configuration {
            message: "commit_concurrency must be greater than 0".to_string(),
        });
    }

    Ok(())
}
