//! Non-interactive bulk import

use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::api::{Gateway, GatewayError, NewTemple, StoredTemple, SupabaseGateway};
use crate::cli::display;
use crate::config::Config;
use crate::import;
use crate::import::driver::{ImportOptions, run_import};

pub async fn handle_import(file: &Path, delay_ms: u64, dry_run: bool) -> Result<()> {
    let grid = import::load_workbook(file)?;
    if grid.is_empty() {
        bail!("No rows found in {}", file.display());
    }
    display::print_stats(grid.stats());
    println!();

    let options = ImportOptions {
        delay: Duration::from_millis(delay_ms),
        dry_run,
    };

    let report = if dry_run {
        // The driver skips all network calls in dry-run mode, so no
        // credentials are needed and the gateway is never invoked
        run_import(&DisconnectedGateway, grid.records(), &options).await
    } else {
        let config = Config::load()?;
        let gateway = SupabaseGateway::new(&config);
        run_import(&gateway, grid.records(), &options).await
    };

    display::print_report(&report);
    Ok(())
}

/// Placeholder gateway for dry runs; every call is a bug
struct DisconnectedGateway;

#[async_trait]
impl Gateway for DisconnectedGateway {
    async fn resolve_tradition(&self, _name: &str) -> Result<String, GatewayError> {
        Err(GatewayError::Transport("no network in dry-run".to_string()))
    }

    async fn resolve_state(&self, _name_or_abbr: &str) -> Result<String, GatewayError> {
        Err(GatewayError::Transport("no network in dry-run".to_string()))
    }

    async fn insert_temple(&self, _temple: NewTemple) -> Result<StoredTemple, GatewayError> {
        Err(GatewayError::Transport("no network in dry-run".to_string()))
    }
}
