//! Environment-specific configuration keyed by application identifier.
//!
//! This crate loads a JSON environment document, maps the running
//! application's identifier to a named environment through the `mappings`
//! table, and resolves keys in that environment with fallback to the
//! `default` environment.
//!
//! ```rust,ignore
//! let resolver = appenv::EnvResolver::from_path("environment.json")?;
//! let message = resolver.get("my-app-prod", "message")?;
//! let tolerance: f64 = resolver.get_as("my-app-prod", "tolerance")?;
//! ```

pub mod constants;
mod document;
mod error;
mod resolver;
mod scope;

pub use document::{Document, DocumentError};
pub use error::{EnvError, ErrorKind};
pub use resolver::EnvResolver;
pub use scope::{AppIdentity, EnvScope};
