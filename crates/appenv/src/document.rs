//! Environment document reading and validation.
//!
//! Responsibilities:
//! - Read an environment file fully into memory.
//! - Parse the content as a top-level JSON object.
//! - Validate the presence of the `mappings` property.
//!
//! Does NOT handle:
//! - Resolving application identifiers or keys (see `resolver`).
//! - Validating the shape of `mappings` or environment blocks; those are
//!   checked lazily at lookup time.
//!
//! Invariants:
//! - A `Document` always holds the exact bytes it was parsed from.
//! - A top-level JSON value that is not an object is a parse error.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::constants::MAPPINGS_KEY;
use crate::error::EnvError;

/// Errors that can occur when reading the environment file.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to read environment file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse environment file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A parsed environment document.
#[derive(Debug, Clone)]
pub struct Document {
    origin: PathBuf,
    root: Map<String, Value>,
    raw: Vec<u8>,
}

impl Document {
    /// Parses a document from raw bytes. `origin` is only used for diagnostics.
    pub fn from_slice(raw: Vec<u8>, origin: impl Into<PathBuf>) -> Result<Self, DocumentError> {
        let origin = origin.into();
        match serde_json::from_slice::<Map<String, Value>>(&raw) {
            Ok(root) => Ok(Self { origin, root, raw }),
            Err(source) => Err(DocumentError::Parse {
                path: origin,
                source,
            }),
        }
    }

    /// Requires the top-level `mappings` property.
    pub fn validate(&self) -> Result<(), EnvError> {
        if self.root.contains_key(MAPPINGS_KEY) {
            Ok(())
        } else {
            Err(EnvError::MissingMappings)
        }
    }

    /// Where the document was loaded from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// The parsed top-level object.
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// The bytes the document was parsed from.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }
}

/// Reads and parses the environment file at `path`.
pub(crate) fn read_document(path: &Path) -> Result<Document, DocumentError> {
    let raw = std::fs::read(path).map_err(|e| DocumentError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    Document::from_slice(raw, path)
}
