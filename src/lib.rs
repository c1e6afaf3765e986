//! Patchmeta - patch-set metadata model for source-patching pipelines
//!
//! Patchmeta is the metadata layer of a build tool that decompiles, patches,
//! and repackages a target codebase. It describes which named patches exist
//! and the content fingerprints that let the pipeline detect drift between
//! expected and actual file states, which package relocations must be
//! applied, and which files bypass patching and are copied verbatim.
//!
//! The model is purely passive data: an external patch-application engine
//! loads it before a run, consults it to decide which files to patch,
//! relocate, or exclude, and may persist an updated instance after a
//! successful run. Fingerprint computation, diffing, patch application, and
//! file-tree traversal all live in that engine, not here.
//!
//! # Architecture
//!
//! - [`core::types`] - Strong domain types (package paths, content digests)
//! - [`core::metadata`] - The versioned schema and its file-backed store
//!
//! # Correctness Invariants
//!
//! 1. A constructed instance is immutable: collections are exposed only as
//!    read-only views, and representing change means building a new instance
//! 2. Relocation endpoints are always in slash-delimited form; dot notation
//!    is canonicalized exactly once, at construction
//! 3. Persisted documents are self-describing (`kind`, `schema_version`) and
//!    strictly parsed, so version drift fails loudly instead of silently
//! 4. Construction is all-or-nothing: no partially valid instance is ever
//!    observable
//!
//! # Example
//!
//! ```
//! use patchmeta::core::metadata::{parse_metadata, PatchRecord, PatchSetMetadataV1, RelocationRule};
//!
//! let meta = PatchSetMetadataV1::new(
//!     [PatchRecord::new("Foo.java", "h1", "h2", "h3")],
//!     [RelocationRule::new("com.a", "com.b", true)],
//!     ["LICENSE.txt"],
//! );
//!
//! let rule = meta.relocations().iter().next().unwrap();
//! assert_eq!(rule.from.as_str(), "com/a");
//!
//! let parsed = parse_metadata(&meta.to_canonical_json().unwrap()).unwrap();
//! assert_eq!(meta, parsed);
//! ```

pub mod core;
