//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Pennywise - Turn your transactions into money stories
#[derive(Parser)]
#[command(name = "pennywise")]
#[command(about = "Gamified personal finance insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the data dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a transaction file and print the insights as JSON
    Analyze {
        /// JSON or CSV file with transactions
        #[arg(short, long)]
        file: PathBuf,

        /// Input format (inferred from the file extension if not specified)
        #[arg(long, value_enum)]
        format: Option<InputFormat>,

        /// Oracle model bundle (overrides config)
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Start the analytics API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Oracle model bundle (overrides config)
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Show whether a prediction oracle can be loaded
    ModelStatus {
        /// Oracle model bundle (overrides config)
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Print the resolved configuration as TOML
    Config,
}

/// Transaction file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Infer from the file extension; anything but `.csv` is read as JSON
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
            _ => InputFormat::Json,
        }
    }
}
