//! Server command implementation

use std::path::PathBuf;

use anyhow::Result;

use pennywise_core::AppConfig;

use super::open_oracle;

pub async fn cmd_serve(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
    model: Option<PathBuf>,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let (model_path, oracle) = open_oracle(&config, model.as_deref());
    config.oracle.model_path = model_path;

    println!("🚀 Starting Pennywise analytics server...");
    println!("   Listening: http://{}", config.bind_address());
    println!("   Model: {}", config.oracle.model_path.display());
    match oracle.version() {
        Some(version) => println!("   🤖 Oracle: loaded (v{})", version),
        None => println!("   📏 Oracle: not loaded, rule-based analysis only"),
    }
    if !config.server.allowed_origins.is_empty() {
        println!("   CORS origins: {}", config.server.allowed_origins.join(", "));
    }
    println!();

    pennywise_server::serve(config, oracle).await
}
