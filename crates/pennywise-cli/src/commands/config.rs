//! Config command implementation

use anyhow::{Context, Result};

use pennywise_core::AppConfig;

pub fn cmd_config(config: &AppConfig) -> Result<()> {
    let text = config.to_toml().context("Failed to render configuration")?;
    print!("{}", text);
    Ok(())
}
