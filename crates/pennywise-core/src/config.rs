//! Application configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, else the override in the data dir
//!    (~/.local/share/pennywise/config.toml) if it exists
//! 2. Embedded defaults (compiled into binary)
//!
//! Every key is optional in the override file; missing keys keep the embedded
//! default. `PENNYWISE_MODEL_PATH` overrides the oracle model path.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/pennywise.toml");

/// Environment variable overriding `[oracle] model_path`
pub const MODEL_PATH_ENV: &str = "PENNYWISE_MODEL_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleSettings {
    /// Location of the model bundle; a missing file means rule-based analysis
    pub model_path: PathBuf,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/spend_oracle_v1.json"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub oracle: OracleSettings,
}

impl AppConfig {
    /// Resolve configuration from `path`, the default override location, or
    /// the embedded defaults, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = load_config(path)?;
        if let Some(model_path) = std::env::var_os(MODEL_PATH_ENV) {
            config.oracle.model_path = PathBuf::from(model_path);
        }
        Ok(config)
    }

    /// The embedded defaults, with no file or environment lookups
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Parse a config document layered over the embedded defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// `host:port` for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pennywise").join("config.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<AppConfig> {
    let path = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|p| p.exists()),
    };

    let Some(path) = path else {
        return AppConfig::embedded();
    };

    let content = fs::read_to_string(&path).map_err(|e| {
        Error::Config(format!("Failed to read config {}: {}", path.display(), e))
    })?;
    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    server: Option<RawServer>,
    oracle: Option<RawOracle>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
    allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOracle {
    model_path: Option<PathBuf>,
}

/// Parse config from TOML content, starting from the built-in defaults
fn parse_config(content: &str) -> Result<AppConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AppConfig::default();

    if let Some(server) = raw.server {
        if let Some(host) = server.host {
            config.server.host = host;
        }
        if let Some(port) = server.port {
            config.server.port = port;
        }
        if let Some(origins) = server.allowed_origins {
            config.server.allowed_origins = origins;
        }
    }

    if let Some(oracle) = raw.oracle {
        if let Some(model_path) = oracle.model_path {
            config.oracle.model_path = model_path;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_embedded_config_parses() {
        let config = AppConfig::embedded().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_address(), "127.0.0.1:5001");
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_toml(
            r#"
[server]
port = 8080
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.allowed_origins.len(), 2);
        assert_eq!(
            config.oracle.model_path,
            PathBuf::from("models/spend_oracle_v1.json")
        );
    }

    #[test]
    fn test_invalid_toml() {
        let err = AppConfig::from_toml("[server\nport = 1").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = AppConfig::from_toml("[server]\nprot = 1").unwrap_err();
        assert!(err.to_string().contains("Invalid config TOML"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[oracle]\nmodel_path = \"/opt/models/oracle.json\"\n\n[server]\nallowed_origins = [\"https://app.example\"]"
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(
            config.oracle.model_path,
            PathBuf::from("/opt/models/oracle.json")
        );
        assert_eq!(config.server.allowed_origins, vec!["https://app.example"]);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("[server]"));
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }
}
