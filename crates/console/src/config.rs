//! Console configuration
//!
//! A small TOML file configures the console at startup. Every key has a
//! default so a missing file is not an error for the demo binary.

use serde::{Deserialize, Serialize};
use shopdesk_core::{OpsError, OpsResult};
use std::path::Path;

/// Runtime configuration for the console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base URL stored objects are served under
    pub storage_base_url: String,
    /// Default tracing filter (overridden by `RUST_LOG`)
    pub log_filter: String,
    /// Seed the in-memory stores with sample rows on startup
    pub seed_demo_data: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            storage_base_url: "memory://bucket".to_string(),
            log_filter: "info".to_string(),
            seed_demo_data: true,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> OpsResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| OpsError::config(format!("cannot read '{}': {e}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|e| OpsError::config(format!("cannot parse '{}': {e}", path.display())))
    }

    /// Load from a file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            match Self::from_file(path) {
                Ok(config) => return config,
                Err(err) => {
                    tracing::warn!("ignoring bad config: {err}");
                }
            }
        }
        Self::default()
    }
}

// ============================================================================
// Tests
// ============================================================================
