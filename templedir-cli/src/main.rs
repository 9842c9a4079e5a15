mod api;
mod cli;
mod config;
mod import;

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;

use cli::{Cli, Commands, commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Check { file } => commands::check::handle_check(&file),
        Commands::Review {
            file,
            name,
            tradition,
            status,
            state,
        } => commands::review::handle_review(&file, name, tradition, status, state).await,
        Commands::Export { file, output } => commands::export::handle_export(&file, &output),
        Commands::Import {
            file,
            delay_ms,
            dry_run,
        } => commands::import::handle_import(&file, delay_ms, dry_run).await,
    }
}
