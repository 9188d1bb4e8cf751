//! # API Response Types
//!
//! JSON bodies for the HTTP API. Items are served as
//! [`what2craft_core::Item`] directly.

use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Edition key whose items are served.
    pub edition: String,
    /// Whether the crafting closure has been computed.
    pub ready: bool,
}

impl HealthResponse {
    #[must_use]
    pub fn new(edition: impl Into<String>, ready: bool) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            edition: edition.into(),
            ready,
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Error body. Never carries paths or internal details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
