//! # Application Errors

use thiserror::Error;
use what2craft_core::CatalogError;

/// Errors surfaced by the CLI and server.
#[derive(Debug, Error)]
pub enum AppError {
    /// The configuration file is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The item catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Binding, serving or writing output failed.
    #[error("I/O error: {0}")]
    Io(String),
}
