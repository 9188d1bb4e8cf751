//! # what2craft-core
//!
//! The catalog engine for what2craft - THE ENGINE.
//!
//! Answers one question for a crafting game: given the full catalog of
//! items, which ones matter for crafting, and what does each one need?
//!
//! ## Pipeline
//!
//! ```text
//! RecordSource ──► CatalogLoader ──► Catalog ──► build_closure ──► CraftingClosure
//!  (records)        (edition filter,   (id → Item)   (craftable items +
//!                    projection)                       their ingredients)
//! ```
//!
//! [`ClosureCache`] runs the pipeline at most once per process and shares
//! the result.
//!
//! ## Architectural Constraints
//!
//! - Has NO async, NO network dependencies (pure Rust)
//! - Never writes to the record source
//! - Deterministic: closures iterate in item id order

// =============================================================================
// MODULES
// =============================================================================

pub mod cache;
pub mod catalog;
pub mod closure;
pub mod primitives;
pub mod record;
pub mod source;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Catalog, CatalogError, CraftingClosure, Item, Recipe};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use cache::{ClosureCache, ClosureOutcome};
pub use catalog::CatalogLoader;
pub use closure::{CatalogSummary, ClosureReport, build_closure, build_closure_report};
pub use primitives::DEFAULT_EDITION;
pub use source::{DirectorySource, MemorySource, RecordDocument, RecordSource};
