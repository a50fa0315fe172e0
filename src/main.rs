// Neuromuscle - exercise recommendations for individual muscle regions
//
// Command-line front end over the library:
// - regions: the registry as a table
// - query:   one pipeline run through a Session, same path a renderer uses
// - prompt:  the request a query would send
// - config:  config file management (runs before logging is set up)

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use neuromuscle::config::Config;
use neuromuscle::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config management must work even when the file is broken
    if let Commands::Config {
        show,
        reset,
        edit,
        update,
        path,
    } = cli.command
    {
        cli::handle_config(cli.config.as_ref(), show, reset, edit, update, path);
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    if cli.config.is_none() {
        Config::ensure_config_exists();
    }
    let config = cli::load_config_or_exit(cli.config.as_ref());

    // Precedence: RUST_LOG env var > NEUROMUSCLE_LOG_LEVEL > config file > "info"
    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard = logging::init_tracing(&config.logging);

    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }
    tracing::debug!(
        endpoint = %config.provider.endpoint_url(),
        model = %config.provider.model,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Regions { group, all } => cli::handle_regions(group.as_deref(), all),
        Commands::Query { region, json } => cli::handle_query(&config, &region, json).await,
        Commands::Prompt { region } => cli::handle_prompt(&config, &region),
        Commands::Config { .. } => Ok(()),
    }
}
