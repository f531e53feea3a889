//! Viewer capabilities and how they are assembled.
//!
//! A [`ViewerContext`] is built once per request from the session subject and
//! a [`Directory`] that knows who is an admin and which clients a subject
//! belongs to. It is immutable afterwards.

use serde::Serialize;
use std::collections::BTreeSet;

/// What the current viewer is allowed to be treated as.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewerContext {
    pub authenticated: bool,
    /// Overrides every rule.
    pub admin: bool,
    /// Client slugs the viewer is a member of.
    pub clients: BTreeSet<String>,
}

impl ViewerContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Signed in, no admin rights, no client memberships.
    pub fn signed_in() -> Self {
        Self {
            authenticated: true,
            ..Self::default()
        }
    }

    pub fn admin() -> Self {
        Self {
            authenticated: true,
            admin: true,
            clients: BTreeSet::new(),
        }
    }

    /// Signed-in member of the given clients.
    pub fn member<I, S>(clients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            authenticated: true,
            admin: false,
            clients: clients.into_iter().map(Into::into).collect(),
        }
    }

    /// Assemble the context for a session subject.
    ///
    /// No subject means an anonymous viewer; the directory is not consulted.
    pub fn build(subject: Option<&str>, directory: &impl Directory) -> Self {
        let Some(subject) = subject else {
            return Self::anonymous();
        };

        Self {
            authenticated: true,
            admin: directory.is_admin(subject),
            clients: directory.client_slugs(subject),
        }
    }
}

/// Identity lookups backing [`ViewerContext::build`].
pub trait Directory {
    fn is_admin(&self, subject: &str) -> bool;

    /// Client slugs the subject belongs to through team membership.
    fn client_slugs(&self, subject: &str) -> BTreeSet<String>;
}
