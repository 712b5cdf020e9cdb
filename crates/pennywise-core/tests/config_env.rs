//! Environment override tests for `AppConfig::load`
//!
//! Kept in their own test binary: they mutate process environment, which
//! would race with any other test that resolves configuration.

use std::io::Write;
use std::path::PathBuf;

use pennywise_core::{config::MODEL_PATH_ENV, AppConfig};
use tempfile::NamedTempFile;

#[test]
fn test_model_path_env_overrides_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[oracle]\nmodel_path = \"from-file.json\"").unwrap();
    writeln!(file, "[server]\nport = 7000").unwrap();

    std::env::remove_var(MODEL_PATH_ENV);
    let from_file = AppConfig::load(Some(file.path())).unwrap();
    assert_eq!(from_file.oracle.model_path, PathBuf::from("from-file.json"));

    std::env::set_var(MODEL_PATH_ENV, "/srv/pennywise/from-env.json");
    let result = AppConfig::load(Some(file.path()));
    std::env::remove_var(MODEL_PATH_ENV);

    let config = result.unwrap();
    assert_eq!(
        config.oracle.model_path,
        PathBuf::from("/srv/pennywise/from-env.json")
    );
    // Only the model path is overridden
    assert_eq!(config.server.port, 7000);
}
