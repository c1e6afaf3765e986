//! core::metadata
//!
//! Patch-set metadata schema and storage.
//!
//! # Modules
//!
//! - [`schema`] - Metadata schema types (v1)
//! - [`store`] - File-backed persistence
//!
//! # Schema Design
//!
//! - Self-describing: includes `kind` and `schema_version`
//! - Immutable after construction: collections are exposed as read-only views
//! - Strict parsing: unknown fields are rejected
//!
//! # Example
//!
//! ```
//! use patchmeta::core::metadata::schema::{parse_metadata, PatchRecord, PatchSetMetadataV1};
//!
//! let meta = PatchSetMetadataV1::builder()
//!     .patch(PatchRecord::new("Foo.java", "h1", "h2", "h3"))
//!     .build();
//! let json = meta.to_canonical_json().unwrap();
//! let parsed = parse_metadata(&json).unwrap();
//! assert_eq!(meta, parsed);
//! ```

pub mod schema;
pub mod store;

// Re-export commonly used types
pub use schema::{
    parse_metadata, MetadataError, PatchRecord, PatchSetBuilder, PatchSetMetadataV1,
    RelocationRule, METADATA_KIND, SCHEMA_VERSION,
};
pub use store::{MetadataStore, StoreError};
