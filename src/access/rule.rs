//! Access rules and the viewer predicate.
//!
//! # Decision table
//!
//! | Mode            | Allowed when                                        |
//! |-----------------|-----------------------------------------------------|
//! | *(no rule)*     | always                                              |
//! | `public`        | always                                              |
//! | `authenticated` | viewer is signed in                                 |
//! | `admin`         | viewer is an admin                                  |
//! | `client`        | viewer's client slugs match per [`MatchPolicy`]     |
//!
//! Admins pass every rule.

use crate::viewer::ViewerContext;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who a rule admits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    #[default]
    Public,
    Authenticated,
    Admin,
    /// Restricted to members of named client groups.
    Client,
}

impl AccessMode {
    /// Parse a front-matter mode string.
    ///
    /// Unrecognized values resolve to [`AccessMode::Public`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "authenticated" | "auth" | "signed-in" => Self::Authenticated,
            "admin" | "admins" => Self::Admin,
            "client" | "clients" | "client-scoped" | "client_scoped" => Self::Client,
            _ => Self::Public,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Authenticated => "authenticated",
            Self::Admin => "admin",
            Self::Client => "client",
        }
    }
}

/// How a client rule's slugs are matched against the viewer's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// At least one slug in common.
    #[default]
    Any,
    /// Viewer belongs to every listed client.
    All,
}

impl MatchPolicy {
    /// Parse a front-matter match string, `None` if unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Some(Self::Any),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

/// A page's declared access rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessRule {
    pub mode: AccessMode,
    /// Only meaningful for [`AccessMode::Client`]. Empty means "derive from path".
    pub clients: Vec<String>,
    pub match_policy: MatchPolicy,
    /// Only meaningful on a folder index page.
    pub inheritable: bool,
}

impl Default for AccessRule {
    fn default() -> Self {
        Self {
            mode: AccessMode::Public,
            clients: Vec::new(),
            match_policy: MatchPolicy::Any,
            inheritable: true,
        }
    }
}

impl AccessRule {
    pub fn new(mode: AccessMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn public() -> Self {
        Self::new(AccessMode::Public)
    }

    pub fn authenticated() -> Self {
        Self::new(AccessMode::Authenticated)
    }

    pub fn admin() -> Self {
        Self::new(AccessMode::Admin)
    }

    pub fn clients<I, S>(clients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode: AccessMode::Client,
            clients: clients.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn match_all(mut self) -> Self {
        self.match_policy = MatchPolicy::All;
        self
    }

    pub fn not_inheritable(mut self) -> Self {
        self.inheritable = false;
        self
    }

    /// Whether `ctx` passes this rule.
    ///
    /// `page_client` is the slug derived from the page's own path, used when
    /// a client rule lists no clients.
    pub fn permits(&self, ctx: &ViewerContext, page_client: Option<&str>) -> bool {
        if ctx.admin {
            return true;
        }

        match self.mode {
            AccessMode::Public => true,
            AccessMode::Authenticated => ctx.authenticated,
            AccessMode::Admin => false,
            AccessMode::Client => {
                if self.clients.is_empty() {
                    return page_client.is_some_and(|slug| ctx.clients.contains(slug));
                }
                match self.match_policy {
                    MatchPolicy::Any => self.clients.iter().any(|c| ctx.clients.contains(c)),
                    MatchPolicy::All => self.clients.iter().all(|c| ctx.clients.contains(c)),
                }
            }
        }
    }
}

impl fmt::Display for AccessRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode.name())?;
        if self.mode == AccessMode::Client {
            let policy = match self.match_policy {
                MatchPolicy::Any => "any",
                MatchPolicy::All => "all",
            };
            if self.clients.is_empty() {
                write!(f, " (from path)")?;
            } else {
                write!(f, " {policy} of [{}]", self.clients.join(", "))?;
            }
        }
        if !self.inheritable {
            f.write_str(", not inherited")?;
        }
        Ok(())
    }
}

/// Decide whether `ctx` may see a page governed by `rule`.
///
/// Pages without a rule are public.
pub fn is_allowed(rule: Option<&AccessRule>, ctx: &ViewerContext, page_client: Option<&str>) -> bool {
    if ctx.admin {
        return true;
    }
    rule.is_none_or(|rule| rule.permits(ctx, page_client))
}
