//! The accumulated catalog of downloaded books (`books.json`).
//!
//! Records keep discovery order and are unique by [`BookId`]. The file is
//! always rewritten whole, via a temporary file and a rename.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize as _;

use crate::artifact_store::write_atomic;
use crate::book_id::BookId;
use crate::error::CatalogError;
use crate::formats::BookRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<BookRecord>,
    ids: HashSet<BookId>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a previous run's catalog; a missing file is an empty catalog.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no catalog yet; starting empty");
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(CatalogError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let records: Vec<BookRecord> =
            serde_json::from_slice(&bytes).map_err(|err| CatalogError::Corrupt {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        let mut catalog = Self::new();
        for record in records {
            let id = record.id;
            if !catalog.append(record) {
                return Err(CatalogError::Corrupt {
                    path: path.to_path_buf(),
                    reason: format!("duplicate book id {id}"),
                });
            }
        }
        Ok(catalog)
    }

    pub fn contains(&self, id: BookId) -> bool {
        self.ids.contains(&id)
    }

    /// Adds `record` unless its id is already present; returns whether it was added.
    pub fn append(&mut self, record: BookRecord) -> bool {
        if !self.ids.insert(record.id) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Rewrites `path` with the whole catalog: 4-space indented JSON,
    /// non-ASCII text unescaped.
    pub fn flush(&self, path: &Path) -> Result<(), CatalogError> {
        let mut data = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut data, formatter);
        self.records.serialize(&mut serializer)?;

        write_atomic(path, &data).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
