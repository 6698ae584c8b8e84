//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn source() -> PathBuf {
        "Article".into()
    }

    pub fn output() -> PathBuf {
        ".".into()
    }

    pub fn index_file() -> String {
        "index.json".into()
    }

    pub fn tags_file() -> String {
        "tags.json".into()
    }

    pub fn exclude() -> Vec<String> {
        vec!["README.md".into()]
    }

    pub fn excerpt_length() -> usize {
        200
    }

    pub fn path_prefix() -> Option<String> {
        None
    }
}
