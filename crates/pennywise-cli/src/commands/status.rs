//! Oracle status command

use std::path::Path;

use anyhow::Result;

use pennywise_core::AppConfig;
use pennywise_server::ModelStatusResponse;

use super::open_oracle;

/// Collect oracle state for the given (or configured) model path
pub fn model_status(config: &AppConfig, model: Option<&Path>) -> ModelStatusResponse {
    let (path, oracle) = open_oracle(config, model);
    ModelStatusResponse {
        model_loaded: oracle.is_loaded(),
        model_path: path.display().to_string(),
        version: oracle.version().map(str::to_string),
        categories: oracle.categories().to_vec(),
    }
}

pub fn cmd_model_status(config: &AppConfig, model: Option<&Path>) -> Result<()> {
    let status = model_status(config, model);

    println!("🤖 Prediction Oracle");
    println!("   Model path: {}", status.model_path);
    if status.model_loaded {
        println!("   Status:     Loaded ✅");
        if let Some(version) = &status.version {
            println!("   Version:    {}", version);
        }
        println!("   Categories: {}", status.categories.join(", "));
    } else {
        println!("   Status:     Not loaded ❌ (rule-based analysis)");
    }

    Ok(())
}
