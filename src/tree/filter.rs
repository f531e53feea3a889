//! Viewer-specific tree filtering.
//!
//! # Node decisions
//!
//! | Node      | Kept when                                                    |
//! |-----------|--------------------------------------------------------------|
//! | page      | its effective rule admits the viewer                         |
//! | folder    | its index admits the viewer, or any child survives           |
//! | separator | left in place, then settled by [`prune_separators`]          |
//! | unknown   | always                                                       |
//!
//! A folder without an index page never keeps itself: it survives only
//! through its children. The input tree is only borrowed; every kept node is
//! a fresh clone.

use super::{
    node::{Folder, PageNode},
    separator::prune_separators,
};
use crate::{
    access::{DEFAULT_CLIENT_ROOT, FrontMatterIndex, Resolver, is_allowed},
    utils::path,
    viewer::ViewerContext,
};

/// Filters trees for one viewer using a shared [`Resolver`].
pub struct TreeFilter<'r, 'a> {
    resolver: &'r mut Resolver<'a>,
    ctx: &'r ViewerContext,
    client_root: &'r str,
}

impl<'r, 'a> TreeFilter<'r, 'a> {
    pub fn new(resolver: &'r mut Resolver<'a>, ctx: &'r ViewerContext) -> Self {
        Self {
            resolver,
            ctx,
            client_root: DEFAULT_CLIENT_ROOT,
        }
    }

    /// Path segment client slugs are derived under.
    pub fn client_root(mut self, client_root: &'r str) -> Self {
        self.client_root = client_root;
        self
    }

    /// Filter a single node, `None` if nothing of it is visible.
    pub fn filter_node(&mut self, node: &PageNode) -> Option<PageNode> {
        match node {
            PageNode::Page(page) => self.allows(&page.path).then(|| node.clone()),
            PageNode::Folder(folder) => self.filter_folder(folder).map(PageNode::Folder),
            PageNode::Separator(_) | PageNode::Unknown(_) => Some(node.clone()),
        }
    }

    /// Filter an ordered sibling list and clean up its separators.
    pub fn filter_forest(&mut self, nodes: &[PageNode]) -> Vec<PageNode> {
        let kept = nodes.iter().filter_map(|node| self.filter_node(node)).collect();
        prune_separators(kept)
    }

    fn filter_folder(&mut self, folder: &Folder) -> Option<Folder> {
        let index_allowed = folder
            .index
            .as_deref()
            .is_some_and(|index| self.allows(index));
        let children = self.filter_forest(&folder.children);

        if !index_allowed && children.is_empty() {
            return None;
        }

        Some(Folder {
            path: folder.path.clone(),
            index: folder.index.clone(),
            children,
            attrs: folder.attrs.clone(),
        })
    }

    fn allows(&mut self, page_path: &str) -> bool {
        let key = path::normalize(page_path);
        let rule = self.resolver.effective_rule(&key);
        is_allowed(rule, self.ctx, path::client_slug(&key, self.client_root))
    }
}

/// Visible part of `root` for `ctx`, `None` if nothing is visible.
pub fn filter_tree(
    root: &PageNode,
    index: &FrontMatterIndex,
    ctx: &ViewerContext,
) -> Option<PageNode> {
    let mut resolver = Resolver::new(index);
    TreeFilter::new(&mut resolver, ctx).filter_node(root)
}

/// Visible part of a top-level forest for `ctx`.
pub fn filter_forest(
    nodes: &[PageNode],
    index: &FrontMatterIndex,
    ctx: &ViewerContext,
) -> Vec<PageNode> {
    let mut resolver = Resolver::new(index);
    TreeFilter::new(&mut resolver, ctx).filter_forest(nodes)
}
