//! Analyze command implementation

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use pennywise_core::{ingest, AnalyticsEngine, AppConfig};
use pennywise_server::AnalyzeResponse;

use super::open_oracle;
use crate::cli::InputFormat;

/// Run the pipeline over a transaction file, producing the same payload as
/// `POST /analyze`
pub fn run_analyze(
    config: &AppConfig,
    file: &Path,
    format: Option<InputFormat>,
    model: Option<&Path>,
) -> Result<AnalyzeResponse> {
    let format = format.unwrap_or_else(|| InputFormat::from_path(file));
    let reader = BufReader::new(
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?,
    );

    let records = match format {
        InputFormat::Json => ingest::parse_json(reader),
        InputFormat::Csv => ingest::parse_csv(reader),
    }
    .with_context(|| format!("Failed to read transactions from {}", file.display()))?;

    info!(count = records.len(), file = %file.display(), "Loaded transactions");

    let (_, oracle) = open_oracle(config, model);
    let engine = AnalyticsEngine::new(oracle);
    let report = engine
        .analyze(&records)
        .context("Transaction analysis failed")?;

    Ok(AnalyzeResponse::from_report(report, &engine))
}

pub fn cmd_analyze(
    config: &AppConfig,
    file: &Path,
    format: Option<InputFormat>,
    model: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let response = run_analyze(config, file, format, model)?;

    let output = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", output);

    Ok(())
}
