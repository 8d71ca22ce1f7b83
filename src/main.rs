use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use portal_state::config::Config;
use portal_state::logging;
use portal_state::modules::activity::{self, ActivityState};
use portal_state::modules::error_modal::{self, ErrorModalState};
use portal_state::Portal;

/// Drive the portal state engine against a live API.
#[derive(Debug, Parser)]
#[command(name = "portal-state", version, about)]
struct Cli {
    /// Config file (default: the user config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Device scope for activity requests (serialNumberKey).
    #[arg(long)]
    scope: Option<String>,

    /// Number of additional activity pages to request.
    #[arg(long, default_value_t = 0)]
    more: u32,

    /// Paths to navigate to, in order.
    #[arg(required = true)]
    paths: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    logging::init_tracing(&config.logging);

    let portal = Portal::from_config(&config).context("Failed to assemble portal")?;

    for path in &cli.paths {
        let navigated = portal
            .navigate(path)
            .await
            .with_context(|| format!("Navigation to '{path}' failed"))?;
        navigated.mounted.settled().await;
        if let Err(err) = navigated.token.token().await {
            tracing::warn!(error = %err, "Security token unavailable");
        }
    }

    for _ in 0..cli.more {
        let dispatched = portal.fetch_more_activities(cli.scope.clone())?;
        if !matches!(dispatched, portal_state::store::Dispatched::Task(_)) {
            break;
        }
        dispatched.settled().await;
    }

    // Let trailing telemetry beacons leave before the runtime shuts down.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let state = portal.store().get_state();
    let summary = serde_json::json!({
        "activity": state.slice::<ActivityState>(activity::SLICE_KEY),
        "errorModal": state.slice::<ErrorModalState>(error_modal::SLICE_KEY),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
