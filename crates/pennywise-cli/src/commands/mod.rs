//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Analyze a transaction file
//! - `config` - Print the resolved configuration
//! - `core` - Shared utilities (config loading, oracle resolution)
//! - `serve` - Web server command
//! - `status` - Oracle status command

pub mod analyze;
pub mod config;
pub mod core;
pub mod serve;
pub mod status;

// Re-export command functions for main.rs
pub use analyze::*;
pub use config::*;
pub use core::*;
pub use serve::*;
pub use status::*;
