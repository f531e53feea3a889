//! Documentation page tree and its per-viewer filter.

mod filter;
mod node;
mod separator;

pub use filter::{TreeFilter, filter_forest, filter_tree};
pub use node::{Folder, Page, PageNode, Separator, count_nodes};
pub use separator::prune_separators;
