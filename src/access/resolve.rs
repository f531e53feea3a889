//! Effective-rule resolution with folder inheritance.
//!
//! # Order
//!
//! 1. The page's own rule, whatever its `inheritable` flag.
//! 2. The closest ancestor folder whose index rule is inheritable. A
//!    non-inheritable folder rule is skipped, not a barrier.
//! 3. The root index rule, if inheritable.
//! 4. No rule (public).
//!
//! Resolution depends only on the index, never on the viewer, so one
//! [`Resolver`] may serve several viewers over the same index.

use super::{index::FrontMatterIndex, rule::AccessRule};
use crate::utils::path::{self, ROOT_INDEX};
use rustc_hash::FxHashMap;
use std::fmt;

/// Where an effective rule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin<'a> {
    /// Declared by the page itself.
    Own,
    /// Inherited from this folder's index page.
    Inherited(&'a str),
    /// Inherited from the root index page.
    Root,
    /// Nothing applies.
    Default,
}

impl fmt::Display for Origin<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Own => f.write_str("own front matter"),
            Self::Inherited(folder) => write!(f, "inherited from `{folder}`"),
            Self::Root => f.write_str("inherited from root index"),
            Self::Default => f.write_str("no rule, public"),
        }
    }
}

/// An effective rule and its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub rule: Option<&'a AccessRule>,
    pub origin: Origin<'a>,
}

impl<'a> Resolution<'a> {
    const DEFAULT: Self = Self {
        rule: None,
        origin: Origin::Default,
    };

    const fn new(rule: &'a AccessRule, origin: Origin<'a>) -> Self {
        Self {
            rule: Some(rule),
            origin,
        }
    }
}

/// Memoizing rule resolver bound to one index.
#[derive(Debug)]
pub struct Resolver<'a> {
    index: &'a FrontMatterIndex,
    cache: FxHashMap<String, Resolution<'a>>,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a FrontMatterIndex) -> Self {
        Self {
            index,
            cache: FxHashMap::default(),
        }
    }

    /// Resolve the effective rule for any spelling of a page path.
    pub fn resolve(&mut self, page_path: &str) -> Resolution<'a> {
        let key = path::normalize(page_path);
        if let Some(hit) = self.cache.get(&key) {
            return *hit;
        }

        let resolution = self.compute(&key);
        self.cache.insert(key, resolution);
        resolution
    }

    /// Shorthand for `resolve(path).rule`.
    pub fn effective_rule(&mut self, page_path: &str) -> Option<&'a AccessRule> {
        self.resolve(page_path).rule
    }

    /// Number of memoized paths.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn compute(&self, key: &str) -> Resolution<'a> {
        let index = self.index;

        if let Some(rule) = index.get(key) {
            return Resolution::new(rule, Origin::Own);
        }

        for ancestor in path::ancestors(key) {
            if let Some((folder, rule)) = index.get_key_value(ancestor)
                && rule.inheritable
            {
                return Resolution::new(rule, Origin::Inherited(folder));
            }
        }

        if key != ROOT_INDEX
            && let Some(rule) = index.root()
            && rule.inheritable
        {
            return Resolution::new(rule, Origin::Root);
        }

        Resolution::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{AccessMode, PageRecord};

    fn index(pages: &[(&str, AccessRule)]) -> FrontMatterIndex {
        pages
            .iter()
            .map(|(path, rule)| PageRecord::new(*path, Some(rule.clone())))
            .collect()
    }

    #[test]
    fn test_own_rule_wins() {
        let index = index(&[
            ("clients/index", AccessRule::authenticated()),
            ("clients/acme", AccessRule::clients(["acme"])),
        ]);
        let mut resolver = Resolver::new(&index);

        let res = resolver.resolve("clients/acme");
        assert_eq!(res.origin, Origin::Own);
        assert_eq!(res.rule.map(|r| r.mode), Some(AccessMode::Client));
    }

    #[test]
    fn test_own_rule_not_overridden_by_more_permissive_ancestor() {
        let index = index(&[
            ("docs/index", AccessRule::public()),
            ("docs/secret", AccessRule::admin()),
        ]);
        let mut resolver = Resolver::new(&index);
        assert_eq!(resolver.effective_rule("docs/secret"), Some(&AccessRule::admin()));
    }

    #[test]
    fn test_own_non_inheritable_rule_still_applies() {
        let index = index(&[("ops", AccessRule::admin().not_inheritable())]);
        let mut resolver = Resolver::new(&index);
        assert_eq!(resolver.resolve("ops").origin, Origin::Own);
        assert_eq!(resolver.resolve("ops/index").origin, Origin::Own);
    }

    #[test]
    fn test_closest_ancestor_wins() {
        let index = index(&[
            ("a/index", AccessRule::authenticated()),
            ("a/b/index", AccessRule::admin()),
        ]);
        let mut resolver = Resolver::new(&index);

        let res = resolver.resolve("a/b/c/page");
        assert_eq!(res.origin, Origin::Inherited("a/b"));
        assert_eq!(res.rule, Some(&AccessRule::admin()));
    }

    #[test]
    fn test_non_inheritable_ancestor_is_skipped() {
        let index = index(&[
            ("x/index", AccessRule::admin().not_inheritable()),
            ("index", AccessRule::authenticated()),
        ]);
        let mut resolver = Resolver::new(&index);

        let res = resolver.resolve("x/y");
        assert_eq!(res.origin, Origin::Root);
        assert_eq!(res.rule, Some(&AccessRule::authenticated()));
    }

    #[test]
    fn test_non_inheritable_ancestor_falls_back_to_further_ancestor() {
        let index = index(&[
            ("p/index", AccessRule::authenticated()),
            ("p/x/index", AccessRule::admin().not_inheritable()),
        ]);
        let mut resolver = Resolver::new(&index);
        assert_eq!(resolver.resolve("p/x/y").origin, Origin::Inherited("p"));
    }

    #[test]
    fn test_non_inheritable_ancestor_falls_back_to_default() {
        let index = index(&[("x/index", AccessRule::admin().not_inheritable())]);
        let mut resolver = Resolver::new(&index);
        assert_eq!(resolver.resolve("x/y"), Resolution::DEFAULT);
    }

    #[test]
    fn test_non_inheritable_root_is_not_inherited() {
        let index = index(&[("index", AccessRule::authenticated().not_inheritable())]);
        let mut resolver = Resolver::new(&index);
        assert_eq!(resolver.resolve("guides").origin, Origin::Default);
        assert_eq!(resolver.resolve("").origin, Origin::Own);
    }

    #[test]
    fn test_folder_index_resolves_from_parent() {
        let index = index(&[("clients/index", AccessRule::authenticated())]);
        let mut resolver = Resolver::new(&index);
        assert_eq!(
            resolver.resolve("clients/acme/index").origin,
            Origin::Inherited("clients")
        );
    }

    #[test]
    fn test_memoized_per_normalized_path() {
        let index = index(&[("a/index", AccessRule::authenticated())]);
        let mut resolver = Resolver::new(&index);

        let first = resolver.resolve("a/b");
        let second = resolver.resolve("/a/b/");
        assert_eq!(first, second);
        assert_eq!(resolver.cached(), 1);
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(Origin::Own.to_string(), "own front matter");
        assert_eq!(Origin::Inherited("clients").to_string(), "inherited from `clients`");
        assert_eq!(Origin::Default.to_string(), "no rule, public");
    }
}
