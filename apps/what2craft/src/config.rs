//! # Configuration
//!
//! Settings come from four layers, highest precedence first:
//!
//! 1. Command-line flags
//! 2. Environment (`WHAT2CRAFT_ITEMS_DIR`, `WHAT2CRAFT_EDITION`)
//! 3. A TOML file given with `--config`
//! 4. Built-in defaults
//!
//! ```toml
//! items_dir = "data/items"
//! edition = "nh"
//! host = "0.0.0.0"
//! port = 8080
//! static_dir = "web"
//! warm_on_start = true
//! ```

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use what2craft_core::DEFAULT_EDITION;

/// Environment variable overriding `items_dir`.
pub const ENV_ITEMS_DIR: &str = "WHAT2CRAFT_ITEMS_DIR";
/// Environment variable overriding `edition`.
pub const ENV_EDITION: &str = "WHAT2CRAFT_EDITION";

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding one record file per item.
    pub items_dir: PathBuf,
    /// Edition key whose items are served.
    pub edition: String,
    /// Host to bind the HTTP server to.
    pub host: String,
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Directory with the front-end assets (`index.html`), if any.
    pub static_dir: Option<PathBuf>,
    /// Build the closure right after the server starts instead of on the
    /// first request.
    pub warm_on_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            items_dir: PathBuf::from("items"),
            edition: DEFAULT_EDITION.to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: None,
            warm_on_start: true,
        }
    }
}

impl Config {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, AppError> {
        toml::from_str(contents).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Defaults, or the given file when present.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply environment overrides using `lookup` (normally `std::env::var`).
    #[must_use]
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_ITEMS_DIR).filter(|v| !v.is_empty()) {
            self.items_dir = PathBuf::from(dir);
        }
        if let Some(edition) = lookup(ENV_EDITION).filter(|v| !v.is_empty()) {
            self.edition = edition;
        }
        self
    }

    /// `host:port` for the listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// TESTS
// =============================================================================
