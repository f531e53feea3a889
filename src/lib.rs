//! docgate - access-controlled documentation trees.
//!
//! Given a page tree and the access rules pages declare in their front
//! matter, compute the part of the tree a viewer may see.
//!
//! ```ignore
//! use docgate::{FrontMatterIndex, PageRecord, ViewerContext, filter_tree};
//!
//! let index = FrontMatterIndex::build(pages.into_iter().map(PageRecord::from));
//! let visible = filter_tree(&root, &index, &ViewerContext::member(["acme"]));
//! ```

pub mod access;
pub mod cli;
pub mod config;
pub mod explain;
pub mod render;
pub mod source;
pub mod tree;
pub mod utils;
pub mod viewer;

pub use access::{
    AccessMode, AccessRule, FrontMatterIndex, MatchPolicy, Origin, PageRecord, Resolution,
    Resolver, is_allowed,
};
pub use tree::{PageNode, TreeFilter, filter_forest, filter_tree, prune_separators};
pub use viewer::{Directory, ViewerContext};
