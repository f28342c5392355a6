//! Error types for document loading and environment lookups.
//!
//! Responsibilities:
//! - Define error variants for every load and lookup failure.
//! - Classify each variant into one of the four failure categories
//!   (I/O, parse, schema, not found).
//! - Provide conversion from the lower-level `DocumentError`.
//!
//! Does NOT handle:
//! - Deciding on fallback values (callers choose what to do on a miss).
//!
//! Invariants:
//! - All variants carry enough context (path, environment, app id) to debug
//!   a misconfigured document without re-reading it.
//! - `DocumentError` is converted to `EnvError` for unified error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::document::DocumentError;

/// Broad category of an [`EnvError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The document file could not be opened or read.
    Io,
    /// The document (or a retrieved value) is not valid for the requested shape.
    Parse,
    /// The document is missing required structure or is self-inconsistent.
    Schema,
    /// The key is absent from both the matched and the default environment.
    NotFound,
}

/// Errors that can occur while loading a document or resolving a key.
#[derive(Error, Debug)]
pub enum EnvError {
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

    #[error("No environment document is loaded")]
    NotLoaded,

    #[error("JSON malformed: missing top level property named 'mappings'")]
    MissingMappings,

    #[error("JSON malformed: 'mappings' {reason}")]
    MalformedMappings { reason: String },

    #[error(
        "JSON malformed: missing top level property named '{environment}' associated with app id '{app_id}'"
    )]
    MissingEnvironment { environment: String, app_id: String },

    #[error("JSON malformed: environment '{environment}' is not an object")]
    MalformedEnvironment { environment: String },

    #[error("Missing field '{key}' for environment '{environment}' with app id '{app_id}'")]
    KeyNotFound {
        key: String,
        environment: String,
        app_id: String,
    },

    #[error("Value of '{key}' does not match the requested type: {source}")]
    Convert {
        key: String,
        source: serde_json::Error,
    },
}

impl EnvError {
    /// Returns the failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnvError::Read { .. } => ErrorKind::Io,
            EnvError::Parse { .. } | EnvError::Convert { .. } => ErrorKind::Parse,
            EnvError::NotLoaded
            | EnvError::MissingMappings
            | EnvError::MalformedMappings { .. }
            | EnvError::MissingEnvironment { .. }
            | EnvError::MalformedEnvironment { .. } => ErrorKind::Schema,
            EnvError::KeyNotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// True when the key was simply absent after default fallback.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl From<DocumentError> for EnvError {
    fn from(error: DocumentError) -> Self {
        match error {
            DocumentError::Read { path, source } => EnvError::Read { path, source },
            DocumentError::Parse { path, source } => EnvError::Parse { path, source },
        }
    }
}
