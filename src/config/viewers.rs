//! `[viewers]` section configuration.
//!
//! Named viewer profiles let the CLI preview the tree as a given person
//! would see it. Every named viewer is signed in.

use crate::viewer::Directory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One named viewer.
///
/// # Example
/// ```toml
/// [viewers.alice]
/// clients = ["acme"]
///
/// [viewers.root]
/// admin = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewerProfile {
    #[serde(default)]
    pub admin: bool,

    #[serde(default)]
    pub clients: BTreeSet<String>,
}

/// All named viewers, keyed by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Viewers(BTreeMap<String, ViewerProfile>);

impl Viewers {
    pub fn get(&self, name: &str) -> Option<&ViewerProfile> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ViewerProfile)> for Viewers {
    fn from_iter<I: IntoIterator<Item = (String, ViewerProfile)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Directory for Viewers {
    fn is_admin(&self, subject: &str) -> bool {
        self.get(subject).is_some_and(|profile| profile.admin)
    }

    fn client_slugs(&self, subject: &str) -> BTreeSet<String> {
        self.get(subject)
            .map(|profile| profile.clients.clone())
            .unwrap_or_default()
    }
}
