//! # Record Sources
//!
//! Where item records come from. The engine only needs "every record, with
//! a name to blame when it is broken"; how records are stored is up to the
//! source.
//!
//! - [`DirectorySource`]: one file per record in a flat directory
//! - [`MemorySource`]: records held in memory

use crate::CatalogError;
use std::path::PathBuf;

/// A single record document and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDocument {
    /// Human-readable origin (file path, test label).
    pub origin: String,
    /// Raw document bytes.
    pub bytes: Vec<u8>,
}

impl RecordDocument {
    #[must_use]
    pub fn new(origin: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            origin: origin.into(),
            bytes: bytes.into(),
        }
    }
}

/// Trait over record stores.
///
/// Sources are read-only. Any failure to enumerate or read must be returned
/// as an error; skipping unreadable records is not allowed.
pub trait RecordSource: Send + Sync {
    /// Short description for logs.
    fn describe(&self) -> String;

    /// Every record in the source.
    fn records(&self) -> Result<Vec<RecordDocument>, CatalogError>;
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn records(&self) -> Result<Vec<RecordDocument>, CatalogError> {
        (**self).records()
    }
}

// =============================================================================
// DIRECTORY SOURCE
// =============================================================================

/// Flat directory of record files.
///
/// Only the top level is read; sub-directories are skipped. Every other
/// entry is treated as a record regardless of extension. Entries are
/// returned in path order.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl RecordSource for DirectorySource {
    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }

    fn records(&self) -> Result<Vec<RecordDocument>, CatalogError> {
        let root = self.root.display().to_string();
        let entries =
            std::fs::read_dir(&self.root).map_err(|e| CatalogError::io(root.as_str(), &e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CatalogError::io(root.as_str(), &e))?;
            let path = entry.path();
            // Follows symlinks, matching how the file would be opened.
            let metadata = std::fs::metadata(&path)
                .map_err(|e| CatalogError::io(path.display().to_string(), &e))?;
            if !metadata.is_dir() {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .into_iter()
            .map(|path| {
                let origin = path.display().to_string();
                std::fs::read(&path)
                    .map(|bytes| RecordDocument::new(origin.as_str(), bytes))
                    .map_err(|e| CatalogError::io(origin, &e))
            })
            .collect()
    }
}

// =============================================================================
// MEMORY SOURCE
// =============================================================================

/// Records held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Vec<RecordDocument>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record document.
    #[must_use]
    pub fn with_record(mut self, origin: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.documents.push(RecordDocument::new(origin, bytes));
        self
    }

    /// Add a record given as a JSON value.
    #[must_use]
    pub fn with_json(self, origin: impl Into<String>, value: &serde_json::Value) -> Self {
        self.with_record(origin, value.to_string())
    }
}

impl RecordSource for MemorySource {
    fn describe(&self) -> String {
        format!("memory ({} records)", self.documents.len())
    }

    fn records(&self) -> Result<Vec<RecordDocument>, CatalogError> {
        Ok(self.documents.clone())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn directory_skips_subdirectories() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("b.json"), "{}").expect("write");
        std::fs::write(dir.path().join("a.json"), "{}").expect("write");
        std::fs::create_dir(dir.path().join("nested")).expect("mkdir");
        std::fs::write(dir.path().join("nested").join("c.json"), "{}").expect("write");

        let records = DirectorySource::new(dir.path()).records().expect("records");
        let names: Vec<_> = records
            .iter()
            .map(|r| {
                Path::new(&r.origin)
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(str::to_string)
            })
            .collect();
        assert_eq!(
            names,
            vec![Some("a.json".to_string()), Some("b.json".to_string())]
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = DirectorySource::new(dir.path().join("absent"));
        assert!(matches!(source.records(), Err(CatalogError::Io { .. })));
    }

    #[test]
    fn memory_source_returns_documents_in_insertion_order() {
        let source = MemorySource::new()
            .with_record("one", "{}")
            .with_json("two", &serde_json::json!({"id": "x"}));
        let records = source.records().expect("records");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].origin, "one");
        assert_eq!(records[1].origin, "two");
    }
}
