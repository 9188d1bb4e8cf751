//! # what2craft
//!
//! Server and CLI around `what2craft-core`. Exposed as a library so the
//! integration tests can drive the router directly.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
