//! Orchestrator wiring.
//!
//! Turns the loaded configuration and command line into [`StartupSettings`]
//! and starts the flow over the collaborator ports supplied by the host.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use gs_app::{StartupDeps, StartupOrchestrator, StartupSettings};
use gs_core::StartupConfig;

use super::cli::CliOptions;
use super::config::{load_config, resolve_remote};

/// Time the UI gets to leave the get-started route before a fatal daemon
/// error is handed to the error page.
pub const DEFAULT_ERROR_PAGE_GRACE: Duration = Duration::from_millis(500);

/// Configuration named on the command line, or an empty one.
pub fn load_startup_config(cli: &CliOptions) -> anyhow::Result<StartupConfig> {
    match &cli.config {
        Some(path) => load_config(path.clone()),
        None => Ok(StartupConfig::empty()),
    }
}

pub fn build_startup_settings(config: &StartupConfig, cli: &CliOptions) -> StartupSettings {
    let appdata = if config.appdata.as_os_str().is_empty() {
        None
    } else {
        Some(config.appdata.clone())
    };

    StartupSettings {
        cli_remote: resolve_remote(config, cli),
        flags: config.flags(),
        appdata,
        error_page_grace: config
            .error_page_grace_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_ERROR_PAGE_GRACE),
    }
}

/// Build the orchestrator and dispatch the first event.
///
/// Must run inside a tokio runtime; effect tasks are spawned on it.
pub async fn start_startup_flow(
    deps: StartupDeps,
    config: &StartupConfig,
    cli: &CliOptions,
) -> anyhow::Result<Arc<StartupOrchestrator>> {
    let settings = build_startup_settings(config, cli);
    info!(
        mode = ?settings.flags.daemon_mode(),
        remote = settings.cli_remote.is_some(),
        testnet = settings.flags.is_testnet,
        "starting get-started flow"
    );

    let orchestrator = StartupOrchestrator::new(deps, settings);
    let snapshot = orchestrator
        .start()
        .await
        .context("Failed to start get-started flow")?;
    info!(phase = snapshot.phase_name(), "get-started flow running");

    Ok(orchestrator)
}
