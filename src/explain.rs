//! `docgate explain`: effective rule of each page and where it comes from.

use crate::{
    access::Resolver,
    config::DocsConfig,
    log,
    source::{Snapshot, load_snapshot},
    utils::path,
};
use anyhow::{Context, Result};
use rustc_hash::FxHashSet;

/// One explained page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub path: String,
    pub rule: String,
    pub origin: String,
}

/// Explain `paths`, or every scanned page when `paths` is empty.
///
/// Paths are normalized first; each key is explained once, in first-seen order.
pub fn explain(snapshot: &Snapshot, paths: &[String]) -> Vec<Explanation> {
    let targets: Vec<String> = if paths.is_empty() {
        snapshot.pages.iter().map(|page| path::normalize(&page.path)).collect()
    } else {
        paths.iter().map(|p| path::normalize(p)).collect()
    };

    let mut seen = FxHashSet::default();
    let mut resolver = Resolver::new(&snapshot.index);
    targets
        .into_iter()
        .filter(|target| seen.insert(target.clone()))
        .map(|target| {
            let resolution = resolver.resolve(&target);
            Explanation {
                rule: resolution
                    .rule
                    .map_or_else(|| "public".to_owned(), ToString::to_string),
                origin: resolution.origin.to_string(),
                path: target,
            }
        })
        .collect()
}

/// Print explanations as an aligned table on stdout.
pub fn explain_pages(config: &DocsConfig, paths: &[String]) -> Result<()> {
    let snapshot = load_snapshot(config).context("Failed to load content")?;
    let rows = explain(&snapshot, paths);

    let path_width = rows.iter().map(|row| row.path.len()).max().unwrap_or(0);
    let rule_width = rows.iter().map(|row| row.rule.len()).max().unwrap_or(0);
    for row in &rows {
        println!(
            "{:<path_width$}  {:<rule_width$}  ({})",
            row.path, row.rule, row.origin
        );
    }

    log!("explain"; "{} pages, {} declared rules", rows.len(), snapshot.index.len());
    Ok(())
}
