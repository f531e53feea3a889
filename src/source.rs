//! Content source: page records and the page tree.
//!
//! # Architecture
//!
//! ```text
//! content/ ──► collect_pages() ──► Vec<ScannedPage> ──► FrontMatterIndex
//!    │          (parallel parse)
//!    │
//!    └──────► derive_tree() ─────► Vec<PageNode>      (when no [source.tree])
//! nav.json ──► read_tree() ──────► Vec<PageNode>
//! ```
//!
//! # Path Mapping
//!
//! | File                          | Page path            |
//! |-------------------------------|----------------------|
//! | `content/index.md`            | `index`              |
//! | `content/clients/index.md`    | `clients/index`      |
//! | `content/clients/acme.mdx`    | `clients/acme`       |

use crate::{
    access::{AccessRule, FrontMatterIndex, MatchPolicy, PageRecord, parse_rule},
    config::{DocsConfig, SourceConfig},
    log,
    tree::PageNode,
    utils::path::{self, ROOT_INDEX},
};
use rayon::prelude::*;
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

/// Content source errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to walk content directory")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid page tree `{0}`")]
    Tree(PathBuf, #[source] serde_json::Error),

    #[error("`{0}` is not inside the content directory")]
    OutsideContent(PathBuf),
}

/// A page file and the rule its front matter declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedPage {
    /// Source file
    pub source: PathBuf,
    /// Page path, relative and without extension (e.g. `clients/acme`)
    pub path: String,
    pub rule: Option<AccessRule>,
}

impl From<ScannedPage> for PageRecord {
    fn from(page: ScannedPage) -> Self {
        PageRecord::new(page.path, page.rule)
    }
}

/// Everything one filtering pass needs, read from disk once.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub pages: Vec<ScannedPage>,
    pub index: FrontMatterIndex,
    pub tree: Vec<PageNode>,
}

/// Load pages, build the index and read or derive the page tree.
pub fn load_snapshot(config: &DocsConfig) -> Result<Snapshot, SourceError> {
    let pages = collect_pages(&config.source, config.access.default_match)?;
    let index = pages.iter().cloned().map(PageRecord::from).collect::<FrontMatterIndex>();
    log!("index"; "{} of {} pages declare a rule", index.len(), pages.len());

    let tree = match &config.source.tree {
        Some(tree_path) => read_tree(tree_path)?,
        None => derive_tree(&config.source)?,
    };

    Ok(Snapshot { pages, index, tree })
}

// ============================================================================
// Pages
// ============================================================================

/// Find every page file under the content directory, sorted by path.
fn page_files(source: &SourceConfig) -> Result<Vec<PathBuf>, SourceError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(&source.content).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file() && source.is_page(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Page path of a file under the content directory.
pub fn page_path(file: &Path, content: &Path) -> Result<String, SourceError> {
    relative_path(&file.with_extension(""), content)
}

/// Slash-separated path of `entry` relative to the content directory.
fn relative_path(entry: &Path, content: &Path) -> Result<String, SourceError> {
    let relative = entry
        .strip_prefix(content)
        .map_err(|_| SourceError::OutsideContent(entry.to_path_buf()))?;
    Ok(relative.to_string_lossy().replace('\\', "/"))
}

/// Read every page and parse its front matter in parallel.
///
/// A page that is not UTF-8 or whose front matter cannot be parsed is kept
/// without a rule and reported, so one broken file never hides the rest of
/// the site. Failing to read a file at all is still an error.
pub fn collect_pages(
    source: &SourceConfig,
    default_match: MatchPolicy,
) -> Result<Vec<ScannedPage>, SourceError> {
    let files = page_files(source)?;

    let pages = files
        .into_par_iter()
        .map(|file| -> Result<ScannedPage, SourceError> {
            let path = page_path(&file, &source.content)?;
            let bytes = fs::read(&file).map_err(|err| SourceError::Io(file.clone(), err))?;
            let rule = match String::from_utf8(bytes) {
                Ok(text) => parse_rule(&text, default_match).unwrap_or_else(|err| {
                    log!("error"; "{}: {err}, treating as no rule", file.display());
                    None
                }),
                Err(err) => {
                    log!(
                        "error";
                        "{}: not valid UTF-8 ({}), treating as no rule",
                        file.display(),
                        err.utf8_error()
                    );
                    None
                }
            };
            Ok(ScannedPage {
                source: file,
                path,
                rule,
            })
        })
        .collect::<Result<Vec<_>, SourceError>>()?;

    log!("scan"; "collected {} pages", pages.len());
    Ok(pages)
}

// ============================================================================
// Page Tree
// ============================================================================

/// Read an explicit page tree from JSON.
///
/// Accepts a forest (array) or a single root node.
pub fn read_tree(tree_path: &Path) -> Result<Vec<PageNode>, SourceError> {
    let text =
        fs::read_to_string(tree_path).map_err(|err| SourceError::Io(tree_path.to_path_buf(), err))?;
    parse_tree(&text).map_err(|err| SourceError::Tree(tree_path.to_path_buf(), err))
}

/// Parse a page tree from JSON text.
pub fn parse_tree(text: &str) -> Result<Vec<PageNode>, serde_json::Error> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(_) => serde_json::from_str(text),
        _ => Ok(vec![serde_json::from_str(text)?]),
    }
}

/// Derive the page tree from the content directory layout.
///
/// The root index page comes first, then folders, then pages, each sorted by
/// name. Directories without any page are left out.
pub fn derive_tree(source: &SourceConfig) -> Result<Vec<PageNode>, SourceError> {
    let mut nodes = Vec::new();
    if find_index(&source.content, source).is_some() {
        nodes.push(PageNode::page(ROOT_INDEX));
    }
    nodes.extend(dir_children(&source.content, source)?);
    Ok(nodes)
}

/// Index page file of a directory, if it has one.
fn find_index(dir: &Path, source: &SourceConfig) -> Option<PathBuf> {
    source
        .extensions
        .iter()
        .map(|ext| dir.join(format!("{ROOT_INDEX}.{}", ext.trim_start_matches('.'))))
        .find(|file| file.is_file())
}

fn dir_children(dir: &Path, source: &SourceConfig) -> Result<Vec<PageNode>, SourceError> {
    let mut folders = Vec::new();
    let mut pages = Vec::new();

    let entries = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in entries {
        let entry = entry?;
        let file = entry.path();

        if entry.file_type().is_dir() {
            if let Some(folder) = folder_node(file, source)? {
                folders.push(folder);
            }
        } else if source.is_page(file) && !is_index_file(file) {
            pages.push(PageNode::page(page_path(file, &source.content)?));
        }
    }

    folders.extend(pages);
    Ok(folders)
}

fn folder_node(dir: &Path, source: &SourceConfig) -> Result<Option<PageNode>, SourceError> {
    let folder_path = relative_path(dir, &source.content)?;
    let index = find_index(dir, source).map(|_| format!("{folder_path}/{ROOT_INDEX}"));
    let children = dir_children(dir, source)?;

    if index.is_none() && children.is_empty() {
        return Ok(None);
    }
    Ok(Some(PageNode::folder(
        path::normalize(&folder_path),
        index.as_deref(),
        children,
    )))
}

fn is_index_file(file: &Path) -> bool {
    file.file_stem().is_some_and(|stem| stem == ROOT_INDEX)
}
