//! User directory entry-point: loads settings, wires the HTTP adapter and
//! runs one CLI command.

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

use user_directory::DirectorySettings;
use user_directory::inbound::cli::{self, Cli, StdinConfirmation, TerminalNotifier};
use user_directory::outbound::directory_http::HttpDirectoryService;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    // Command-line arguments belong to clap; settings come from env and files.
    let settings = DirectorySettings::load_from_iter([OsString::from("user-directory")])
        .map_err(|error| eyre!("failed to load directory settings: {error}"))?;
    let endpoints = settings
        .endpoints()
        .wrap_err("invalid directory settings")?;
    debug!(
        list_url = %endpoints.list_url,
        api_base_url = %endpoints.api_base_url,
        "directory endpoints resolved"
    );
    let service = HttpDirectoryService::new(endpoints, settings.request_timeout())
        .wrap_err("failed to build HTTP client")?;

    let mut stdout = io::stdout().lock();
    cli::run(
        &cli,
        Arc::new(service),
        Arc::new(TerminalNotifier),
        &StdinConfirmation,
        &mut stdout,
    )
    .await?;
    Ok(())
}
