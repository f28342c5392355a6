//! Two-level lookup over a loaded document.
//!
//! Responsibilities:
//! - Map an application identifier to an environment name via `mappings`.
//! - Resolve a key in the matched environment block, falling back to the
//!   `default` block on a miss.
//!
//! Does NOT handle:
//! - Locking or document lifetime (see `EnvResolver`).
//!
//! Invariants:
//! - Unmapped identifiers resolve to `default`; that is not an error.
//! - When several environments map to the same identifier, the
//!   lexicographically smallest environment name wins.
//! - A missing `default` block is a miss, never a schema error.
//! - A missing non-default block named by `mappings` is a schema error.

use serde_json::{Map, Value};

use crate::constants::{DEFAULT_ENVIRONMENT, MAPPINGS_KEY};
use crate::document::Document;
use crate::error::EnvError;

/// Resolves the environment name for `app_id`.
pub(super) fn environment_name(doc: &Document, app_id: &str) -> Result<String, EnvError> {
    let mappings = match doc.root().get(MAPPINGS_KEY) {
        Some(Value::Object(mappings)) => mappings,
        Some(_) => {
            return Err(EnvError::MalformedMappings {
                reason: "is not an object".to_string(),
            });
        }
        None => return Err(EnvError::MissingMappings),
    };

    let mut matched: Option<&str> = None;
    for (environment, mapped) in mappings {
        let Some(mapped) = mapped.as_str() else {
            return Err(EnvError::MalformedMappings {
                reason: format!("entry '{environment}' is not a string"),
            });
        };
        if mapped == app_id && matched.is_none_or(|current| environment.as_str() < current) {
            matched = Some(environment);
        }
    }

    Ok(matched.unwrap_or(DEFAULT_ENVIRONMENT).to_string())
}

/// Resolves `key` for `app_id`, consulting the default block on a miss.
pub(super) fn resolve_key(doc: &Document, app_id: &str, key: &str) -> Result<Value, EnvError> {
    let environment = environment_name(doc, app_id)?;

    let block = environment_block(doc, &environment, app_id)?;
    if let Some(value) = block.and_then(|b| b.get(key)) {
        return Ok(value.clone());
    }

    if environment != DEFAULT_ENVIRONMENT {
        tracing::trace!(
            key,
            environment = %environment,
            app_id,
            "Key not in environment block, trying default"
        );
        let fallback = environment_block(doc, DEFAULT_ENVIRONMENT, app_id)?;
        if let Some(value) = fallback.and_then(|b| b.get(key)) {
            return Ok(value.clone());
        }
    }

    Err(EnvError::KeyNotFound {
        key: key.to_string(),
        environment,
        app_id: app_id.to_string(),
    })
}

/// Names of all environment blocks in the document, sorted.
pub(super) fn environment_names(doc: &Document) -> Vec<String> {
    let mut names: Vec<String> = doc
        .root()
        .keys()
        .filter(|name| name.as_str() != MAPPINGS_KEY)
        .cloned()
        .collect();
    names.sort();
    names
}

/// Returns `Ok(None)` only for an absent `default` block.
fn environment_block<'a>(
    doc: &'a Document,
    environment: &str,
    app_id: &str,
) -> Result<Option<&'a Map<String, Value>>, EnvError> {
    let block = if environment == MAPPINGS_KEY {
        None
    } else {
        doc.root().get(environment)
    };

    match block {
        Some(Value::Object(block)) => Ok(Some(block)),
        Some(_) => Err(EnvError::MalformedEnvironment {
            environment: environment.to_string(),
        }),
        None if environment == DEFAULT_ENVIRONMENT => Ok(None),
        None => Err(EnvError::MissingEnvironment {
            environment: environment.to_string(),
            app_id: app_id.to_string(),
        }),
    }
}
