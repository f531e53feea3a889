//! Access rules declared in page front matter.
//!
//! Two block styles are recognised at the very top of a page:
//!
//! ```text
//! ---                         +++
//! access:                     [access]
//!   mode: client              mode = "client"
//!   clients: [acme]           clients = ["acme"]
//!   match: all                match = "all"
//!   inheritable: false        inheritable = false
//! ---                         +++
//! ```
//!
//! `access` may also be a bare mode string (`access: admin`), and the legacy
//! `public: true` flag is honoured when no `access` key is present.

use super::rule::{AccessMode, AccessRule, MatchPolicy};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Front-matter parsing errors.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("unterminated `{0}` front-matter block")]
    Unterminated(&'static str),

    #[error("invalid YAML front matter")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML front matter")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Toml,
}

impl Format {
    const fn fence(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawFrontMatter {
    #[serde(default)]
    public: Option<bool>,
    #[serde(default)]
    access: Option<RawAccess>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAccess {
    Mode(String),
    Table(RawAccessTable),
}

#[derive(Debug, Default, Deserialize)]
struct RawAccessTable {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    clients: Vec<String>,
    #[serde(default, rename = "match", alias = "matchPolicy", alias = "match_policy")]
    match_policy: Option<String>,
    #[serde(default, alias = "inherit")]
    inheritable: Option<bool>,
}

/// Accept `clients: acme` as well as `clients: [acme, beta]`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}

impl RawAccessTable {
    fn into_rule(self, default_match: MatchPolicy) -> AccessRule {
        let mode = match self.mode.as_deref() {
            Some(mode) => AccessMode::parse(mode),
            None if !self.clients.is_empty() => AccessMode::Client,
            None => AccessMode::Public,
        };

        AccessRule {
            mode,
            clients: self
                .clients
                .into_iter()
                .map(|c| c.trim().to_owned())
                .filter(|c| !c.is_empty())
                .collect(),
            match_policy: self
                .match_policy
                .as_deref()
                .and_then(MatchPolicy::parse)
                .unwrap_or(default_match),
            inheritable: self.inheritable.unwrap_or(true),
        }
    }
}

impl RawFrontMatter {
    fn into_rule(self, default_match: MatchPolicy) -> Option<AccessRule> {
        match self.access {
            Some(RawAccess::Mode(mode)) => Some(AccessRule {
                match_policy: default_match,
                ..AccessRule::new(AccessMode::parse(&mode))
            }),
            Some(RawAccess::Table(table)) => Some(table.into_rule(default_match)),
            None if self.public == Some(true) => Some(AccessRule::public()),
            None => None,
        }
    }
}

/// Locate the front-matter block at the top of `text`.
///
/// Returns the block format and its body without the fences.
fn split_block(text: &str) -> Result<Option<(Format, &str)>, FrontMatterError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Ok(None);
    };
    let format = match first.trim_end() {
        "---" => Format::Yaml,
        "+++" => Format::Toml,
        _ => return Ok(None),
    };

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == format.fence() {
            return Ok(Some((format, &text[start..offset])));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated(format.fence()))
}

/// Extract the access rule a page declares, if any.
///
/// `default_match` applies to client rules that do not name a match policy.
pub fn parse_rule(
    text: &str,
    default_match: MatchPolicy,
) -> Result<Option<AccessRule>, FrontMatterError> {
    let Some((format, body)) = split_block(text)? else {
        return Ok(None);
    };
    if body.trim().is_empty() {
        return Ok(None);
    }

    let raw: RawFrontMatter = match format {
        Format::Yaml => serde_yaml::from_str(body)?,
        Format::Toml => toml::from_str(body)?,
    };

    Ok(raw.into_rule(default_match))
}
