//! Tests for the environment resolver.
//!
//! Responsibilities:
//! - Test loading, reloading and failed loads.
//! - Test key resolution with default fallback.
//! - Test environment naming and the `is` check.
//! - Test concurrent lookups against a reloading writer.
//!
//! Invariants:
//! - Each test owns its resolver; there is no shared process state.
//! - Scratch files live in `tempfile` directories and are cleaned up automatically.

use std::path::PathBuf;

use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

use super::EnvResolver;

pub mod lookup_tests;

pub const SAMPLE_ENVIRONMENT: &str = r#"{
    "mappings": {
        "test": "App-Test",
        "production": "App-Prod"
    },
    "default": {
        "message": "I am a default Msg",
        "greeting": "default greeting",
        "tolerance": 0.5
    },
    "test": {
        "message": "I am a testing Msg",
        "tolerance": 0.14,
        "acceptableRank": ["8", "9", "10"]
    },
    "production": {
        "message": "I am a production Msg",
        "features": {"beta": false}
    }
}"#;

pub const MISSING_DEFAULT: &str = r#"{
    "mappings": {"test": "App-Test"},
    "test": {"message": "I am a testing Msg"}
}"#;

pub const MISSING_MAPPINGS: &str = r#"{
    "default": {"message": "I am a default Msg"}
}"#;

/// Installs a test-writer subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Writes `content` to `name` inside `dir` and returns the path.
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// A resolver loaded with `SAMPLE_ENVIRONMENT`.
pub fn sample_resolver() -> EnvResolver {
    init_tracing();
    let resolver = EnvResolver::new();
    resolver.load_str(SAMPLE_ENVIRONMENT).unwrap();
    resolver
}
