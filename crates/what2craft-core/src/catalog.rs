//! # Catalog Loader
//!
//! Reads every record from a [`RecordSource`], keeps the ones that carry a
//! sub-tree for the target edition, and projects each into an [`Item`].
//!
//! - Records of other editions are dropped silently (routine, not an error)
//! - Any read or parse failure aborts the whole load
//! - Duplicate ids resolve last-write-wins in source order

use crate::primitives::DEFAULT_EDITION;
use crate::record::RawRecord;
use crate::source::RecordSource;
use crate::{Catalog, CatalogError};

/// Loads the [`Catalog`] for one edition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLoader {
    edition: String,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new(DEFAULT_EDITION)
    }
}

impl CatalogLoader {
    /// Create a loader for `edition` (e.g. `"nh"`).
    #[must_use]
    pub fn new(edition: impl Into<String>) -> Self {
        Self {
            edition: edition.into(),
        }
    }

    /// The edition key this loader keeps.
    #[must_use]
    pub fn edition(&self) -> &str {
        &self.edition
    }

    /// Load every item of the target edition from `source`.
    pub fn load<S: RecordSource + ?Sized>(&self, source: &S) -> Result<Catalog, CatalogError> {
        let documents = source.records()?;
        let total = documents.len();

        let mut catalog = Catalog::new();
        for document in documents {
            let record = RawRecord::from_slice(&document.origin, &document.bytes)?;
            let Some(item) = record.into_item(&document.origin, &self.edition)? else {
                tracing::trace!(origin = %document.origin, "record not in edition, skipped");
                continue;
            };
            if let Some(previous) = catalog.insert(item.id.clone(), item) {
                tracing::debug!(
                    id = %previous.id,
                    origin = %document.origin,
                    "duplicate item id, keeping the later record"
                );
            }
        }

        tracing::info!(
            source = %source.describe(),
            edition = %self.edition,
            records = total,
            items = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}

// =============================================================================
// TESTS
// =============================================================================
