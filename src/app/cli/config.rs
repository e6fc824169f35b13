//! TOML configuration file loading
//!
//! The config file carries the policy knobs that rarely change per run
//! (protection policy, retry limits, concurrency); the command line carries
//! the per-run arguments and always wins. An explicitly passed file must
//! exist; the default location is optional.

use crate::core::config::ScanConfig;
use crate::scanner::error::{ScanError, ScanResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Optional overrides loadable from `branchaudit.toml`
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Exact branch names excluded from reporting
    pub protected_branches: Option<Vec<String>>,
    /// Branch-name prefix excluded from reporting
    pub protected_prefix: Option<String>,
    /// Attempts before a transient API failure becomes permanent
    pub max_retry_attempts: Option<u32>,
    /// Backoff before the second attempt, in seconds
    pub retry_base_delay_secs: Option<u64>,
    /// Minimum rate-limit wait, in seconds
    pub rate_limit_floor_secs: Option<u64>,
    /// Bound on concurrent commit fetches
    pub commit_concurrency: Option<usize>,
}

impl FileConfig {
    /// Default config location under the user configuration directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("branchaudit").join("branchaudit.toml"))
    }

    /// Load the config file.
    ///
    /// `config_file` from the command line must exist; with no explicit
    /// path the default location is used only when present.
    pub fn load(config_file: Option<&Path>) -> ScanResult<Self> {
        let path = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ScanError::Configuration {
                        message: format!(
                            "The specified configuration file does not exist: {}",
                            path.display()
                        ),
                    });
                }
                path.to_path_buf()
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let contents = std::fs::read_to_string(&path).map_err(|e| ScanError::Configuration {
            message: format!("Error reading configuration file {}: {}", path.display(), e),
        })?;

        toml::from_str(&contents).map_err(|e| ScanError::Configuration {
            message: format!("Error parsing configuration file {}: {}", path.display(), e),
        })
    }

    /// Fold the file overrides into a scan config built from CLI arguments.
    pub fn apply(self, config: &mut ScanConfig) {
        if let Some(names) = self.protected_branches {
            config.protected_branches = names.into_iter().collect();
        }
        if let Some(prefix) = self.protected_prefix {
            config.protected_prefix = prefix;
        }
        if let Some(attempts) = self.max_retry_attempts {
            config.retry.max_attempts = attempts;
        }
        if let Some(secs) = self.retry_base_delay_secs {
            config.retry.base_delay = Duration::from_secs(secs);
        }
        if let Some(secs) = self.rate_limit_floor_secs {
            config.retry.rate_limit_floor = Duration::from_secs(secs);
        }
        if let Some(concurrency) = self.commit_concurrency {
            config.commit_concurrency = concurrency;
        }
    }
}
