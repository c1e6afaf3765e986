//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`PackagePath`] - Slash-delimited package path, canonicalized from dot notation
//! - [`ContentHash`] - Opaque content digest recorded for drift detection
//!
//! # Validation
//!
//! Unlike most schema layers, these types deliberately do NOT validate their
//! contents. Digest computation and format belong to the patch-application
//! engine, and package segments are unchecked by contract. What the newtypes
//! carry is the normalization invariant (a `PackagePath` is always in slash
//! form) and value semantics for use in sets.
//!
//! # Examples
//!
//! ```
//! use patchmeta::core::types::{ContentHash, PackagePath};
//!
//! // Dot notation is rewritten to slash form at construction
//! let path = PackagePath::new("com.example.foo");
//! assert_eq!(path.as_str(), "com/example/foo");
//!
//! // Digests are stored verbatim
//! let hash = ContentHash::new("9f86d081884c7d65");
//! assert_eq!(hash.as_str(), "9f86d081884c7d65");
//! ```

use serde::{Deserialize, Serialize};

/// A slash-delimited package path.
///
/// Package paths arrive in dot-delimited notation (`com.example.foo`) and are
/// stored in the slash-delimited form (`com/example/foo`) used by the rest of
/// the pipeline. The rewrite happens exactly once, at construction: every `.`
/// becomes `/` and no other character is altered.
///
/// Input that is already slash-delimited passes through unchanged, so the
/// transformation cannot produce an un-normalized value. No other validation
/// is performed; whether the segments name a real package is the consuming
/// engine's concern.
///
/// # Example
///
/// ```
/// use patchmeta::core::types::PackagePath;
///
/// let path = PackagePath::new("net.minecraft.server");
/// assert_eq!(path.as_str(), "net/minecraft/server");
///
/// // Slash form is a no-op
/// let same = PackagePath::new("net/minecraft/server");
/// assert_eq!(path, same);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PackagePath(String);

impl PackagePath {
    /// Create a package path, rewriting dot notation to slash form.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into().replace('.', "/"))
    }

    /// Get the slash-delimited path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PackagePath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for PackagePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<PackagePath> for String {
    fn from(path: PackagePath) -> Self {
        path.0
    }
}

impl AsRef<str> for PackagePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackagePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque content digest.
///
/// Records the expected state of a file (or of a patch artifact) so the
/// patch-application engine can detect drift. The digest is stored verbatim:
/// this layer knows nothing about how it was computed, how long it is, or
/// what alphabet it uses.
///
/// # Example
///
/// ```
/// use patchmeta::core::types::ContentHash;
///
/// let hash = ContentHash::new("e3b0c44298fc1c14");
/// assert_eq!(hash.to_string(), "e3b0c44298fc1c14");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ContentHash(String);

impl ContentHash {
    /// Create a content hash from a precomputed digest string.
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Get the digest as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ContentHash {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ContentHash {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<ContentHash> for String {
    fn from(hash: ContentHash) -> Self {
        hash.0
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
