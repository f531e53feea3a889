//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [source] Section Defaults
// ============================================================================

pub mod source {
    use std::path::PathBuf;

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn tree() -> Option<PathBuf> {
        None
    }

    pub fn extensions() -> Vec<String> {
        vec!["md".into(), "mdx".into()]
    }
}

// ============================================================================
// [access] Section Defaults
// ============================================================================

pub mod access {
    use crate::access::{DEFAULT_CLIENT_ROOT, MatchPolicy};

    pub fn client_root() -> String {
        DEFAULT_CLIENT_ROOT.into()
    }

    pub fn default_match() -> MatchPolicy {
        MatchPolicy::Any
    }
}
