//! Application startup
//!
//! Wires the pieces together in the required order: logging first, then
//! configuration assembly and validation, then the credential check, and
//! only after all of that any network activity. Fatal paths log one
//! `FATAL:` line and exit non-zero; a scan that finds nothing exits zero.

use crate::app::cli::{validate_config, Args, FileConfig};
use crate::core::config::ScanConfig;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::core::shutdown::ShutdownCoordinator;
use crate::github::{GitHubClient, HttpTransport};
use crate::report::{self, ReportMeta};
use crate::scanner::error::{ScanError, ScanResult};
use crate::scanner::manager::ScannerManager;
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;

/// Environment variable holding the bearer credential
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Initialize application startup
pub fn startup() {
    let args = Args::parse();

    let use_color = (args.color || std::io::stdout().is_terminal()) && !args.no_color;
    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        args.log_file.as_ref().and_then(|p| p.to_str()),
        use_color,
    ) {
        eprintln!("Error initialising logging: {}", e);
        std::process::exit(1);
    }

    log::info!("branchaudit: stale branch audit starting");

    let config = match assemble_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log_error_with_context(&e, "Configuration loading");
            std::process::exit(1);
        }
    };

    // Credential check happens before the runtime even spins up; no network
    // activity without it.
    let token = match read_token() {
        Ok(token) => token,
        Err(e) => {
            log_error_with_context(&e, "Credential loading");
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("FATAL: could not start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_scan(config, token)) {
        log_error_with_context(&e, "Stale branch scan");
        std::process::exit(1);
    }
}

/// Build the immutable scan config: CLI arguments first, config-file
/// overrides folded in, then validated as a whole.
fn assemble_config(args: &Args) -> ScanResult<ScanConfig> {
    let file_config = FileConfig::load(args.config_file.as_deref())?;

    let mut config = ScanConfig::new(&args.org, &args.itaps, args.months, &args.out);
    file_config.apply(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Read the bearer credential from the environment.
fn read_token() -> ScanResult<String> {
    match std::env::var(TOKEN_ENV_VAR) {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(ScanError::Configuration {
            message: format!("{} environment variable is not set", TOKEN_ENV_VAR),
        }),
    }
}

/// Run the scan under shutdown coordination and write the artifacts.
async fn run_scan(config: ScanConfig, token: String) -> ScanResult<()> {
    ShutdownCoordinator::guard_with_coordinator(|coordinator, mut shutdown_rx| async move {
        let transport =
            HttpTransport::new(token).map_err(|e| ScanError::from_api("HTTP client", None, None, e))?;
        let client = Arc::new(GitHubClient::new(
            Arc::new(transport),
            config.retry.clone(),
            &coordinator,
        ));
        let manager = ScannerManager::new(client, config.clone());

        let now = chrono::Utc::now().with_timezone(&config.timezone);

        let outcome = tokio::select! {
            outcome = manager.scan(now) => outcome?,
            _ = shutdown_rx.recv() => return Err(ScanError::Cancelled),
        };

        let meta = ReportMeta {
            organization: config.organization.clone(),
            scan_time: now,
            months: config.months,
        };
        report::write_reports(&meta, &outcome.records, &config.output_dir).map_err(|e| {
            ScanError::Configuration {
                message: format!(
                    "could not write report to {}: {}",
                    config.output_dir.display(),
                    e
                ),
            }
        })?;

        Ok(())
    })
    .await
}
