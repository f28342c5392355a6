//! Key resolution tests for the environment resolver.
//!
//! Responsibilities:
//! - Test direct hits in the matched environment.
//! - Test fallback to the default environment for unknown identifiers and
//!   for keys missing from the matched environment.
//! - Test hard misses and self-inconsistent documents.

use serde::Deserialize;
use serde_json::json;

use super::{MISSING_DEFAULT, sample_resolver};
use crate::error::{EnvError, ErrorKind};
use crate::resolver::EnvResolver;

#[test]
fn test_direct_hit() {
    let resolver = sample_resolver();
    assert_eq!(
        resolver.get("App-Test", "message").unwrap(),
        json!("I am a testing Msg")
    );
    assert_eq!(
        resolver.get("App-Prod", "message").unwrap(),
        json!("I am a production Msg")
    );
}

#[test]
fn test_json_types_are_preserved() {
    let resolver = sample_resolver();

    let tolerance = resolver.get("App-Test", "tolerance").unwrap();
    assert_eq!(tolerance.as_f64(), Some(0.14));

    let rank = resolver.get("App-Test", "acceptableRank").unwrap();
    assert_eq!(rank, json!(["8", "9", "10"]));

    let features = resolver.get("App-Prod", "features").unwrap();
    assert_eq!(features, json!({"beta": false}));
}

#[test]
fn test_unknown_identifier_uses_default() {
    let resolver = sample_resolver();
    assert_eq!(
        resolver.get("Unknown-AppId", "message").unwrap(),
        json!("I am a default Msg")
    );
}

#[test]
fn test_missing_key_falls_back_to_default() {
    let resolver = sample_resolver();
    assert_eq!(
        resolver.get("App-Test", "greeting").unwrap(),
        json!("default greeting")
    );
}

#[test]
fn test_environment_value_overrides_default() {
    let resolver = sample_resolver();
    // Both blocks define `tolerance`; the matched environment wins.
    assert_eq!(resolver.get_as::<f64>("App-Test", "tolerance").unwrap(), 0.14);
    assert_eq!(resolver.get_as::<f64>("Unknown-AppId", "tolerance").unwrap(), 0.5);
}

#[test]
fn test_hard_miss() {
    let resolver = sample_resolver();

    let err = resolver.get("App-Test", "UnknownVar").unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        err,
        EnvError::KeyNotFound { ref key, ref environment, ref app_id }
            if key == "UnknownVar" && environment == "test" && app_id == "App-Test"
    ));
    assert!(resolver.get_ok("App-Test", "UnknownVar").is_none());
}

#[test]
fn test_missing_default_block() {
    let resolver = EnvResolver::new();
    resolver.load_str(MISSING_DEFAULT).unwrap();

    assert_eq!(
        resolver.get("App-Test", "message").unwrap(),
        json!("I am a testing Msg")
    );
    assert!(resolver.get("App-Test", "greeting").unwrap_err().is_not_found());
    assert!(resolver.get("Unknown-AppId", "message").unwrap_err().is_not_found());
    assert!(resolver.get_ok("Unknown-AppId", "message").is_none());
}

#[test]
fn test_mapped_environment_without_block() {
    let resolver = EnvResolver::new();
    resolver
        .load_str(
            r#"{
                "mappings": {"staging": "App-Staging"},
                "default": {"message": "I am a default Msg"}
            }"#,
        )
        .unwrap();

    let err = resolver.get("App-Staging", "message").unwrap_err();
    assert!(matches!(
        err,
        EnvError::MissingEnvironment { ref environment, .. } if environment == "staging"
    ));
    assert_eq!(err.kind(), ErrorKind::Schema);
}

#[test]
fn test_environment_block_not_an_object() {
    let resolver = EnvResolver::new();
    resolver
        .load_str(r#"{"mappings": {"test": "App-Test"}, "test": "oops"}"#)
        .unwrap();

    assert!(matches!(
        resolver.get("App-Test", "message"),
        Err(EnvError::MalformedEnvironment { .. })
    ));
}

#[test]
fn test_malformed_mappings_detected_at_lookup() {
    let resolver = EnvResolver::new();
    resolver
        .load_str(r#"{"mappings": ["App-Test"], "default": {"message": "hi"}}"#)
        .unwrap();

    let err = resolver.get("App-Test", "message").unwrap_err();
    assert!(matches!(err, EnvError::MalformedMappings { .. }));
    assert_eq!(err.kind(), ErrorKind::Schema);
}

#[test]
fn test_get_as_struct() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Features {
        beta: bool,
    }

    let resolver = sample_resolver();
    let features: Features = resolver.get_as("App-Prod", "features").unwrap();
    assert_eq!(features, Features { beta: false });

    let ranks: Vec<String> = resolver.get_as("App-Test", "acceptableRank").unwrap();
    assert_eq!(ranks, vec!["8", "9", "10"]);
}

#[test]
fn test_get_as_type_mismatch() {
    let resolver = sample_resolver();

    let err = resolver.get_as::<u64>("App-Test", "message").unwrap_err();
    assert!(matches!(err, EnvError::Convert { ref key, .. } if key == "message"));
    assert_eq!(err.kind(), ErrorKind::Parse);
}
