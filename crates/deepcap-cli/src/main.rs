mod cli;
mod commands;
mod completions;
mod error;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use deepcap_core::{AppCore, paths};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Commands::Completions { shell } = cli.command {
        completions::generate_completions(shell);
        return;
    }

    if let Err(err) = run(cli).await {
        error::handle_error(err);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let db_path = match &cli.db_path {
        Some(path) => path.clone(),
        None => paths::ensure_database_path_string()?,
    };
    tracing::debug!("using database at {db_path}");
    let core = Arc::new(AppCore::new(&db_path)?);

    match cli.command {
        Commands::Completions { .. } => unreachable!("handled before core setup"),
        Commands::Config { command } => commands::config::run(core, command, cli.format).await,
        Commands::Capture(args) => commands::capture::run(core, args, cli.format).await,
    }
}
