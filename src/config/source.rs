//! `[source]` section configuration.
//!
//! Where pages and the page tree come from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `[source]` section in docgate.toml.
///
/// # Example
/// ```toml
/// [source]
/// content = "docs"
/// tree = "docs/nav.json"
/// extensions = ["md", "mdx"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Content directory scanned for pages.
    #[serde(default = "defaults::source::content")]
    #[educe(Default = defaults::source::content())]
    pub content: PathBuf,

    /// Explicit page tree (JSON). Derived from the content directory when unset.
    #[serde(default = "defaults::source::tree")]
    #[educe(Default = defaults::source::tree())]
    pub tree: Option<PathBuf>,

    /// File extensions treated as pages, without the dot.
    #[serde(default = "defaults::source::extensions")]
    #[educe(Default = defaults::source::extensions())]
    pub extensions: Vec<String>,
}

impl SourceConfig {
    /// Whether `path` has one of the configured page extensions.
    pub fn is_page(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}
