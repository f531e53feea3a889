//! Front-matter index: normalized page path to declared rule.

use super::rule::AccessRule;
use crate::utils::path::{self, ROOT_INDEX};
use rustc_hash::FxHashMap;

/// A page as seen by the index builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Page path as provided by the content source (normalized on insert).
    pub path: String,
    pub rule: Option<AccessRule>,
}

impl PageRecord {
    pub fn new(path: impl Into<String>, rule: Option<AccessRule>) -> Self {
        Self {
            path: path.into(),
            rule,
        }
    }
}

/// Declared rules keyed by normalized path.
///
/// Pages without a rule are absent. A folder's index page is stored under the
/// folder's own path, so `clients/index` and `clients` share a key.
#[derive(Debug, Clone, Default)]
pub struct FrontMatterIndex {
    rules: FxHashMap<String, AccessRule>,
}

impl FrontMatterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from a page collection. Later duplicates win.
    pub fn build<I>(pages: I) -> Self
    where
        I: IntoIterator<Item = PageRecord>,
    {
        pages.into_iter().collect()
    }

    /// Record a page's rule under its normalized path.
    pub fn insert(&mut self, page_path: &str, rule: AccessRule) {
        self.rules.insert(path::normalize(page_path), rule);
    }

    /// Rule declared at an already normalized key.
    pub fn get(&self, key: &str) -> Option<&AccessRule> {
        self.rules.get(key)
    }

    /// Like [`get`](Self::get), also returning the stored key.
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &AccessRule)> {
        self.rules.get_key_value(key).map(|(k, v)| (k.as_str(), v))
    }

    /// Rule declared by any spelling of a page path.
    pub fn lookup(&self, page_path: &str) -> Option<&AccessRule> {
        self.get(&path::normalize(page_path))
    }

    /// Rule declared by the root index page.
    pub fn root(&self) -> Option<&AccessRule> {
        self.get(ROOT_INDEX)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<PageRecord> for FrontMatterIndex {
    fn from_iter<I: IntoIterator<Item = PageRecord>>(iter: I) -> Self {
        let mut index = Self::new();
        for page in iter {
            if let Some(rule) = page.rule {
                index.insert(&page.path, rule);
            }
        }
        index
    }
}
