//! core::metadata::schema
//!
//! Patch-set metadata schema (v1).
//!
//! # Schema Design
//!
//! Patch-set metadata is:
//! - Self-describing with `kind` and `schema_version`
//! - Strictly parsed (unknown fields rejected)
//! - Immutable once constructed: the three collections are exposed only as
//!   read-only views, and a new instance must be built to represent change
//!
//! # What This Layer Does Not Do
//!
//! The schema stores fingerprints; it never computes them. It stores
//! relocation rules; it never applies them. It stores exclude patterns; it
//! never matches them against a file tree. Cross-field validation (duplicate
//! patch names, overlapping relocations, excludes naming real files) is the
//! patch-application engine's responsibility.
//!
//! # Example
//!
//! ```
//! use patchmeta::core::metadata::schema::{parse_metadata, PatchSetMetadataV1, METADATA_KIND};
//! use patchmeta::core::metadata::schema::{PatchRecord, RelocationRule};
//!
//! let meta = PatchSetMetadataV1::builder()
//!     .patch(PatchRecord::new("Foo.java", "h1", "h2", "h3"))
//!     .relocation(RelocationRule::new("com.a", "com.b", true))
//!     .copy_exclude("LICENSE.txt")
//!     .build();
//! assert_eq!(meta.kind(), METADATA_KIND);
//!
//! // Serialize and parse back
//! let json = meta.to_canonical_json().unwrap();
//! let parsed = parse_metadata(&json).unwrap();
//! assert_eq!(meta, parsed);
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{ContentHash, PackagePath};

/// The kind identifier for patch-set metadata.
pub const METADATA_KIND: &str = "patchmeta.patch-set";

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from metadata operations.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to parse metadata: {0}")]
    ParseError(String),

    #[error("invalid kind '{found}', expected '{}'", METADATA_KIND)]
    InvalidKind { found: String },

    #[error("unsupported schema version {0}, supported: {SCHEMA_VERSION}")]
    UnsupportedVersion(u32),
}

/// Envelope for version dispatch before full parsing.
///
/// This allows us to check the schema version before attempting
/// to parse the full metadata structure.
#[derive(Debug, Deserialize)]
struct MetadataEnvelope {
    kind: String,
    schema_version: u32,
}

/// Parse metadata JSON with version dispatch.
///
/// This function checks the schema version and dispatches to the
/// appropriate parser. Currently only v1 is supported.
///
/// # Errors
///
/// Returns an error if:
/// - The JSON is malformed or missing a required collection
/// - The `kind` field doesn't match `METADATA_KIND`
/// - The `schema_version` is not supported
///
/// # Example
///
/// ```
/// use patchmeta::core::metadata::schema::parse_metadata;
///
/// let json = r#"{
///     "kind": "patchmeta.patch-set",
///     "schema_version": 1,
///     "patches": [
///         {
///             "name": "Foo.java",
///             "original_hash": "h1",
///             "target_hash": "h2",
///             "patch_hash": "h3"
///         }
///     ],
///     "relocations": [
///         { "from": "com/a", "to": "com/b", "include_sub_packages": true }
///     ],
///     "copy_excludes": ["LICENSE.txt"]
/// }"#;
///
/// let meta = parse_metadata(json).unwrap();
/// assert_eq!(meta.patches().len(), 1);
/// ```
pub fn parse_metadata(json: &str) -> Result<PatchSetMetadataV1, MetadataError> {
    // First, extract envelope to check version
    let envelope: MetadataEnvelope =
        serde_json::from_str(json).map_err(|e| MetadataError::ParseError(e.to_string()))?;

    // Validate kind
    if envelope.kind != METADATA_KIND {
        return Err(MetadataError::InvalidKind {
            found: envelope.kind,
        });
    }

    // Dispatch based on version
    match envelope.schema_version {
        1 => {
            let meta: PatchSetMetadataV1 =
                serde_json::from_str(json).map_err(|e| MetadataError::ParseError(e.to_string()))?;
            meta.validate()?;
            Ok(meta)
        }
        v => Err(MetadataError::UnsupportedVersion(v)),
    }
}

/// Patch-set metadata (v1).
///
/// The aggregate a patch-application engine loads before a run: the named
/// patches with their integrity fingerprints, the package relocation rules,
/// and the patterns for files that are copied verbatim instead of patched.
///
/// Collections are deduplicated by value at construction and held in ordered
/// sets, so the serialized form is deterministic regardless of how the
/// instance was assembled. The fields are private and the accessors hand out
/// shared references only; there is no way to add, remove, or replace an
/// element after construction.
///
/// The instance is a pure value after construction (no interior mutability),
/// so it can be shared across concurrent readers freely.
///
/// Use [`parse_metadata`] to parse from JSON with validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PatchSetMetadataV1 {
    /// Kind identifier (always "patchmeta.patch-set")
    kind: String,

    /// Schema version (always 1 for this struct)
    schema_version: u32,

    /// Named patches and their integrity fingerprints
    patches: BTreeSet<PatchRecord>,

    /// Package relocation rules
    relocations: BTreeSet<RelocationRule>,

    /// Path patterns excluded from the raw-copy step
    copy_excludes: BTreeSet<String>,
}

impl PatchSetMetadataV1 {
    /// Create metadata from the three collections.
    ///
    /// Duplicate entries are deduplicated by value; insertion order is
    /// irrelevant. Empty collections are valid. No cross-field validation is
    /// performed (a relocation's `from` need not correspond to any patch).
    ///
    /// # Example
    ///
    /// ```
    /// use patchmeta::core::metadata::schema::{PatchRecord, PatchSetMetadataV1, RelocationRule};
    ///
    /// let meta = PatchSetMetadataV1::new(
    ///     [PatchRecord::new("Foo.java", "h1", "h2", "h3")],
    ///     [RelocationRule::new("com.a", "com.b", true)],
    ///     ["LICENSE.txt"],
    /// );
    /// assert_eq!(meta.patches().len(), 1);
    /// ```
    pub fn new<P, R, C>(patches: P, relocations: R, copy_excludes: C) -> Self
    where
        P: IntoIterator<Item = PatchRecord>,
        R: IntoIterator<Item = RelocationRule>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            kind: METADATA_KIND.to_string(),
            schema_version: SCHEMA_VERSION,
            patches: patches.into_iter().collect(),
            relocations: relocations.into_iter().collect(),
            copy_excludes: copy_excludes.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a builder for assembling metadata incrementally.
    pub fn builder() -> PatchSetBuilder {
        PatchSetBuilder::default()
    }

    /// The kind identifier.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The schema version.
    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    /// Named patches and their integrity fingerprints.
    ///
    /// Read-only view. Any indexing (e.g. "find record by name") is the
    /// consuming engine's responsibility.
    pub fn patches(&self) -> &BTreeSet<PatchRecord> {
        &self.patches
    }

    /// Package relocation rules. Read-only view.
    pub fn relocations(&self) -> &BTreeSet<RelocationRule> {
        &self.relocations
    }

    /// Path patterns excluded from the raw-copy step. Read-only view.
    ///
    /// Pattern semantics (glob vs. literal vs. prefix) are defined by the
    /// consuming engine, not by this model.
    pub fn copy_excludes(&self) -> &BTreeSet<String> {
        &self.copy_excludes
    }

    /// Validate the metadata structure.
    ///
    /// This checks that:
    /// - `kind` matches `METADATA_KIND`
    /// - `schema_version` equals `SCHEMA_VERSION`
    ///
    /// Instances built through [`new`](Self::new) or the builder always pass;
    /// this guards documents that arrived through deserialization.
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.kind != METADATA_KIND {
            return Err(MetadataError::InvalidKind {
                found: self.kind.clone(),
            });
        }

        if self.schema_version != SCHEMA_VERSION {
            return Err(MetadataError::UnsupportedVersion(self.schema_version));
        }

        Ok(())
    }

    /// Serialize to canonical JSON (compact, deterministic).
    ///
    /// The ordered sets serialize in a stable order regardless of insertion
    /// order, so equal instances produce byte-equal output suitable for
    /// fingerprinting by the engine.
    pub fn to_canonical_json(&self) -> Result<String, MetadataError> {
        serde_json::to_string(self).map_err(|e| MetadataError::ParseError(e.to_string()))
    }
}

/// Builder for assembling patch-set metadata incrementally.
///
/// # Example
///
/// ```
/// use patchmeta::core::metadata::schema::{PatchRecord, PatchSetMetadataV1, RelocationRule};
///
/// let meta = PatchSetMetadataV1::builder()
///     .patch(PatchRecord::new("Foo.java", "h1", "h2", "h3"))
///     .relocation(RelocationRule::new("com.a", "com.b", false))
///     .copy_exclude("META-INF/MANIFEST.MF")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct PatchSetBuilder {
    patches: BTreeSet<PatchRecord>,
    relocations: BTreeSet<RelocationRule>,
    copy_excludes: BTreeSet<String>,
}

impl PatchSetBuilder {
    /// Add a patch record. Duplicates by value are absorbed.
    pub fn patch(mut self, record: PatchRecord) -> Self {
        self.patches.insert(record);
        self
    }

    /// Add a relocation rule. Duplicates by value are absorbed.
    pub fn relocation(mut self, rule: RelocationRule) -> Self {
        self.relocations.insert(rule);
        self
    }

    /// Add a copy-exclude pattern. Duplicates are absorbed.
    pub fn copy_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.copy_excludes.insert(pattern.into());
        self
    }

    /// Build the metadata.
    pub fn build(self) -> PatchSetMetadataV1 {
        PatchSetMetadataV1 {
            kind: METADATA_KIND.to_string(),
            schema_version: SCHEMA_VERSION,
            patches: self.patches,
            relocations: self.relocations,
            copy_excludes: self.copy_excludes,
        }
    }
}

/// One named patch and its integrity fingerprints.
///
/// The three digests let the engine classify a target file before applying
/// the patch: matches `original_hash` (apply), matches `target_hash` (already
/// applied, skip), matches neither (drift, fail). `patch_hash` fingerprints
/// the patch artifact itself so edits to the patch file are detected
/// independently of the target.
///
/// Two records are equal iff all four fields are equal. The aggregate does
/// not enforce `name` uniqueness: duplicate names with different hashes are
/// representable and are an integrity error for the engine to report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchRecord {
    /// Patch identifier, e.g. a relative file path or logical patch name.
    /// Not validated here: non-empty and unique are caller responsibilities.
    pub name: String,

    /// Fingerprint of the file before any patch in this set is applied
    pub original_hash: ContentHash,

    /// Fingerprint of the file after this patch is applied
    pub target_hash: ContentHash,

    /// Fingerprint of the patch artifact itself
    pub patch_hash: ContentHash,
}

impl PatchRecord {
    /// Create a patch record from a name and three precomputed digests.
    ///
    /// # Example
    ///
    /// ```
    /// use patchmeta::core::metadata::schema::PatchRecord;
    ///
    /// let record = PatchRecord::new("net/minecraft/server/Main.java", "a1", "b2", "c3");
    /// assert_eq!(record.original_hash.as_str(), "a1");
    /// ```
    pub fn new(
        name: impl Into<String>,
        original_hash: impl Into<ContentHash>,
        target_hash: impl Into<ContentHash>,
        patch_hash: impl Into<ContentHash>,
    ) -> Self {
        Self {
            name: name.into(),
            original_hash: original_hash.into(),
            target_hash: target_hash.into(),
            patch_hash: patch_hash.into(),
        }
    }
}

/// A package-rename rule.
///
/// Rewrites references under `from` to `to`; with `include_sub_packages` set,
/// the rule also covers every package nested under `from`. Both endpoints are
/// held as [`PackagePath`], so dot-delimited input is canonicalized to slash
/// form at construction and an un-normalized rule is unrepresentable, even
/// through deserialization.
///
/// Two rules are equal iff `from`, `to`, and `include_sub_packages` are all
/// equal, and the serialized form is plain data: stable and reconstructible
/// across process and persistence boundaries.
///
/// # Example
///
/// ```
/// use patchmeta::core::metadata::schema::RelocationRule;
///
/// let rule = RelocationRule::new("com.example.foo", "shaded.example.foo", true);
/// assert_eq!(rule.from.as_str(), "com/example/foo");
/// assert_eq!(rule.to.as_str(), "shaded/example/foo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelocationRule {
    /// Source package path (slash form)
    pub from: PackagePath,

    /// Destination package path (slash form)
    pub to: PackagePath,

    /// Whether the rule also applies to packages nested under `from`
    pub include_sub_packages: bool,
}

impl RelocationRule {
    /// Create a relocation rule, canonicalizing both endpoints.
    pub fn new(
        from: impl Into<PackagePath>,
        to: impl Into<PackagePath>,
        include_sub_packages: bool,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            include_sub_packages,
        }
    }
}
