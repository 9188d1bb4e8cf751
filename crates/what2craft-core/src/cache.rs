//! # Closure Cache
//!
//! Process-wide memoized crafting closure.
//!
//! The first call to [`ClosureCache::get`] loads the catalog and builds the
//! closure; every later call, sequential or concurrent, gets the stored
//! outcome. Callers that arrive while the first computation is running
//! block until it finishes and then see the same result.
//!
//! ## Failure Policy
//!
//! A failed computation is stored like a successful one. Every later call
//! returns the same error and the source is never read again. Restart the
//! process to retry.

use crate::catalog::CatalogLoader;
use crate::closure::build_closure;
use crate::source::RecordSource;
use crate::{CatalogError, CraftingClosure};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Shared closure outcome.
pub type ClosureOutcome = Result<Arc<CraftingClosure>, CatalogError>;

/// At-most-once loader of the crafting closure.
pub struct ClosureCache {
    source: Box<dyn RecordSource>,
    loader: CatalogLoader,
    outcome: OnceLock<ClosureOutcome>,
}

impl ClosureCache {
    /// Create a cache over `source`. Nothing is read until the first `get`.
    pub fn new(source: impl RecordSource + 'static, loader: CatalogLoader) -> Self {
        Self {
            source: Box::new(source),
            loader,
            outcome: OnceLock::new(),
        }
    }

    /// The crafting closure, computing it on first use.
    ///
    /// Blocks while the first computation runs. Async callers should invoke
    /// this from a blocking worker.
    pub fn get(&self) -> ClosureOutcome {
        self.outcome.get_or_init(|| self.compute()).clone()
    }

    /// True once an outcome (success or failure) is stored.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// The edition this cache serves.
    #[must_use]
    pub fn edition(&self) -> &str {
        self.loader.edition()
    }

    fn compute(&self) -> ClosureOutcome {
        tracing::info!(source = %self.source.describe(), "building crafting closure");
        match self.loader.load(&self.source) {
            Ok(catalog) => Ok(Arc::new(build_closure(&catalog))),
            Err(e) => {
                tracing::error!(error = %e, "catalog load failed; closure unavailable");
                Err(e)
            }
        }
    }
}

impl fmt::Debug for ClosureCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureCache")
            .field("source", &self.source.describe())
            .field("edition", &self.loader.edition())
            .field("ready", &self.is_ready())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
