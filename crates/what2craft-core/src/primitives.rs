//! # Engine Constants

/// Edition key honored when no other is configured (New Horizons).
pub const DEFAULT_EDITION: &str = "nh";
