//! core::metadata::store
//!
//! File-backed persistence for patch-set metadata.
//!
//! # Architecture
//!
//! One store manages one metadata document at a fixed path, typically inside
//! the build tree (e.g. `<build>/patches/metadata.json`). The engine loads
//! the document before a patch run and may persist an updated instance after
//! a successful run; the store itself holds no open resources, so every
//! operation is a complete read or write.
//!
//! # Atomicity
//!
//! Writes go to a temp file in the target directory first and are renamed
//! into place, so a crashed run never leaves a half-written document behind.
//!
//! # Example
//!
//! ```no_run
//! use patchmeta::core::metadata::store::MetadataStore;
//! use patchmeta::core::metadata::schema::PatchSetMetadataV1;
//!
//! # fn main() -> Result<(), patchmeta::core::metadata::store::StoreError> {
//! let store = MetadataStore::new("build/patches/metadata.json");
//!
//! let meta = match store.try_load()? {
//!     Some(existing) => existing,
//!     None => PatchSetMetadataV1::builder().build(),
//! };
//!
//! store.save(&meta)?;
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::schema::{parse_metadata, MetadataError, PatchSetMetadataV1};

/// Errors from metadata persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read the metadata file.
    #[error("failed to read metadata file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the metadata file.
    #[error("failed to write metadata file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document was read but is not valid patch-set metadata.
    #[error("invalid metadata: {0}")]
    Metadata(#[from] MetadataError),
}

/// File-backed store for one patch-set metadata document.
///
/// The document is canonical JSON as produced by
/// [`PatchSetMetadataV1::to_canonical_json`] and parsed with the strict
/// [`parse_metadata`] entry point, so a document that loads is always a fully
/// validated instance.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    /// Path to the metadata document
    path: PathBuf,
}

impl MetadataStore {
    /// Create a store for the document at the given path.
    ///
    /// The path does not need to exist yet; [`save`](Self::save) creates
    /// missing parent directories.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the metadata document.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ReadError`] if the file cannot be read (including
    ///   when it does not exist; use [`try_load`](Self::try_load) when an
    ///   absent document is an expected state)
    /// - [`StoreError::Metadata`] if the document fails to parse or validate
    pub fn load(&self) -> Result<PatchSetMetadataV1, StoreError> {
        let json = fs::read_to_string(&self.path).map_err(|source| StoreError::ReadError {
            path: self.path.clone(),
            source,
        })?;

        let metadata = parse_metadata(&json)?;

        debug!(
            path = %self.path.display(),
            patches = metadata.patches().len(),
            relocations = metadata.relocations().len(),
            "loaded patch-set metadata"
        );

        Ok(metadata)
    }

    /// Load the metadata document if it exists.
    ///
    /// Returns `Ok(None)` when the file is absent (e.g. the first run of a
    /// fresh build tree). All other failures are reported as in
    /// [`load`](Self::load).
    pub fn try_load(&self) -> Result<Option<PatchSetMetadataV1>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        self.load().map(Some)
    }

    /// Persist the metadata document atomically.
    ///
    /// Serializes to canonical JSON, writes to a temp file next to the
    /// target, then renames into place. Parent directories are created as
    /// needed.
    ///
    /// # Errors
    ///
    /// - [`StoreError::WriteError`] for any I/O failure
    /// - [`StoreError::Metadata`] if serialization fails
    pub fn save(&self, metadata: &PatchSetMetadataV1) -> Result<(), StoreError> {
        let json = metadata.to_canonical_json()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::WriteError {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        // Write to a temp file first for atomicity
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, json.as_bytes()).map_err(|source| StoreError::WriteError {
            path: temp_path.clone(),
            source,
        })?;

        fs::rename(&temp_path, &self.path).map_err(|source| StoreError::WriteError {
            path: self.path.clone(),
            source,
        })?;

        debug!(
            path = %self.path.display(),
            patches = metadata.patches().len(),
            relocations = metadata.relocations().len(),
            "saved patch-set metadata"
        );

        Ok(())
    }
}
