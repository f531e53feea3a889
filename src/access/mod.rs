//! Access rules: model, front-matter parsing, index and resolution.
//!
//! ```text
//! page files ──► parse_rule() ──► FrontMatterIndex ──► Resolver ──► is_allowed(ctx)
//!                (per page)       (path → rule)        (inherit)    (per viewer)
//! ```

mod front_matter;
mod index;
mod resolve;
mod rule;

pub use front_matter::{FrontMatterError, parse_rule};
pub use index::{FrontMatterIndex, PageRecord};
pub use resolve::{Origin, Resolution, Resolver};
pub use rule::{AccessMode, AccessRule, MatchPolicy, is_allowed};

/// Path segment under which client slugs are derived unless configured.
pub const DEFAULT_CLIENT_ROOT: &str = "clients";
