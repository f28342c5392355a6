//! Centralized constants for the appenv document format.
//!
//! These names are part of the on-disk JSON contract and are shared by the
//! document reader and the resolver.

// =============================================================================
// Reserved Top-Level Keys
// =============================================================================

/// Top-level property mapping environment names to application identifiers.
pub const MAPPINGS_KEY: &str = "mappings";

/// Environment used for unmapped identifiers and for keys missing from the
/// matched environment block.
pub const DEFAULT_ENVIRONMENT: &str = "default";

// =============================================================================
// Diagnostics
// =============================================================================

/// Origin reported for documents loaded from memory rather than a file.
pub const MEMORY_ORIGIN: &str = "<memory>";
