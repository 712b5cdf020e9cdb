//! Pennywise CLI - Gamified spending insights
//!
//! Usage:
//!   pennywise analyze --file tx.json     Analyze a transaction file
//!   pennywise serve --port 5001          Start the analytics API
//!   pennywise model-status               Show prediction oracle state
//!   pennywise config                     Print the resolved configuration

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            file,
            format,
            model,
            pretty,
        } => commands::cmd_analyze(&config, &file, format, model.as_deref(), pretty),
        Commands::Serve { host, port, model } => {
            commands::cmd_serve(config, host, port, model).await
        }
        Commands::ModelStatus { model } => commands::cmd_model_status(&config, model.as_deref()),
        Commands::Config => commands::cmd_config(&config),
    }
}
