//! Environment resolver holding the current document.
//!
//! Responsibilities:
//! - Own the single loaded document and replace it wholesale on `load`.
//! - Expose key lookups, environment naming and the `is` check for a
//!   caller-supplied application identifier.
//!
//! Does NOT handle:
//! - Obtaining the application identifier; callers pass it in (see `scope`).
//! - Choosing a value when a key is missing; callers decide.
//!
//! Invariants / Assumptions:
//! - `load` holds the write lock for the whole read-parse-validate step, so
//!   lookups never observe a half-loaded or mixed document.
//! - A failed `load` leaves the resolver empty, not holding the previous document.
//! - Lookups never mutate the document.

mod lookup;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::constants::{DEFAULT_ENVIRONMENT, MEMORY_ORIGIN};
use crate::document::{Document, DocumentError, read_document};
use crate::error::EnvError;
use crate::scope::{AppIdentity, EnvScope};

/// Resolves configuration values for an application identifier.
///
/// The resolver is `Send + Sync`; share it behind an `Arc` or a `static`
/// when several threads perform lookups.
#[derive(Debug, Default)]
pub struct EnvResolver {
    document: RwLock<Option<Document>>,
}

impl EnvResolver {
    /// Creates an empty resolver. Every lookup fails until `load` succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver and loads the environment file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let resolver = Self::new();
        resolver.load(path)?;
        Ok(resolver)
    }

    /// Loads the environment file at `path`, replacing the current document.
    ///
    /// # Errors
    /// Returns `EnvError::Read` if the file cannot be read, `EnvError::Parse`
    /// if it is not a JSON object, and `EnvError::MissingMappings` if the
    /// `mappings` property is absent. On error the resolver is left empty.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(), EnvError> {
        let path = path.as_ref();
        self.replace_with(path, || read_document(path))
    }

    /// Loads a document from an in-memory JSON string.
    pub fn load_str(&self, json: &str) -> Result<(), EnvError> {
        self.load_slice(json.as_bytes())
    }

    /// Loads a document from in-memory JSON bytes.
    pub fn load_slice(&self, json: &[u8]) -> Result<(), EnvError> {
        let origin = Path::new(MEMORY_ORIGIN);
        self.replace_with(origin, || Document::from_slice(json.to_vec(), origin))
    }

    /// Loads the environment file at `path`, panicking on any error.
    ///
    /// Intended for process startup, where a missing or malformed
    /// environment file is unrecoverable.
    #[track_caller]
    pub fn must_load(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Err(e) = self.load(path) {
            panic!("Unable to load {}: {}", path.display(), e);
        }
    }

    /// Whether a document is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.read().is_some()
    }

    /// Resolves the environment name for `app_id`.
    ///
    /// Unmapped identifiers resolve to `"default"`.
    pub fn environment_name(&self, app_id: &str) -> Result<String, EnvError> {
        let guard = self.read();
        let doc = guard.as_ref().ok_or(EnvError::NotLoaded)?;
        lookup::environment_name(doc, app_id)
    }

    /// Retrieves `key` for `app_id`, falling back to the default environment.
    pub fn get(&self, app_id: &str, key: &str) -> Result<Value, EnvError> {
        let guard = self.read();
        let doc = guard.as_ref().ok_or(EnvError::NotLoaded)?;
        lookup::resolve_key(doc, app_id, key)
    }

    /// Retrieves `key` for `app_id`, returning `None` on any failure.
    pub fn get_ok(&self, app_id: &str, key: &str) -> Option<Value> {
        self.get(app_id, key).ok()
    }

    /// Retrieves `key` for `app_id` and deserializes it into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, app_id: &str, key: &str) -> Result<T, EnvError> {
        let value = self.get(app_id, key)?;
        serde_json::from_value(value).map_err(|source| EnvError::Convert {
            key: key.to_string(),
            source,
        })
    }

    /// Returns the environment name for `app_id`.
    ///
    /// Errors are suppressed and reported as `"default"`, which cannot be
    /// told apart from an identifier that legitimately resolves to the
    /// default environment. Use `environment_name` to see the error.
    pub fn name(&self, app_id: &str) -> String {
        self.environment_name(app_id).unwrap_or_else(|e| {
            tracing::debug!(app_id, error = %e, "Environment name unavailable, reporting default");
            DEFAULT_ENVIRONMENT.to_string()
        })
    }

    /// Whether `app_id` runs in the environment called `name`.
    pub fn is(&self, app_id: &str, name: &str) -> bool {
        self.name(app_id) == name
    }

    /// Names of the environment blocks in the loaded document, sorted.
    pub fn environments(&self) -> Vec<String> {
        self.read()
            .as_ref()
            .map(lookup::environment_names)
            .unwrap_or_default()
    }

    /// The bytes of the loaded document.
    pub fn raw(&self) -> Option<Vec<u8>> {
        self.read().as_ref().map(|doc| doc.raw().to_vec())
    }

    /// Binds this resolver to a single application identifier.
    pub fn scope<'a>(&'a self, app_id: &'a str) -> EnvScope<'a> {
        EnvScope::new(self, app_id)
    }

    /// Binds this resolver to the identifier reported by `identity`.
    pub fn scope_for<'a, I>(&'a self, identity: &'a I) -> EnvScope<'a>
    where
        I: AppIdentity + ?Sized,
    {
        EnvScope::new(self, identity.app_id())
    }

    fn replace_with<F>(&self, origin: &Path, parse: F) -> Result<(), EnvError>
    where
        F: FnOnce() -> Result<Document, DocumentError>,
    {
        let mut guard = self.write();
        *guard = None;

        let result = parse().map_err(EnvError::from).and_then(|doc| {
            doc.validate()?;
            Ok(doc)
        });

        match result {
            Ok(doc) => {
                tracing::debug!(
                    path = %origin.display(),
                    environments = lookup::environment_names(&doc).len(),
                    "Environment document loaded"
                );
                *guard = Some(doc);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    path = %origin.display(),
                    error = %e,
                    "Failed to load environment document"
                );
                Err(e)
            }
        }
    }

    // Readers only ever see a whole document, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, Option<Document>> {
        self.document.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Document>> {
        self.document.write().unwrap_or_else(PoisonError::into_inner)
    }
}
