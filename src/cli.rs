//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docgate: preview and audit access-controlled documentation trees
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: docgate.toml)
    #[arg(short = 'C', long, default_value = "docgate.toml")]
    pub config: PathBuf,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Page tree JSON file (relative to project root)
    #[arg(short, long)]
    pub tree: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Which viewer to filter for. Anonymous when nothing is given.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ViewerArgs {
    /// Named viewer from [viewers] in the config
    #[arg(short, long, conflicts_with_all = ["anonymous", "admin", "clients"])]
    pub viewer: Option<String>,

    /// Filter for a signed-out visitor
    #[arg(long, conflicts_with_all = ["admin", "clients"])]
    pub anonymous: bool,

    /// Filter for an admin (everything visible)
    #[arg(long, conflicts_with = "clients")]
    pub admin: bool,

    /// Filter for a signed-in member of these clients (comma separated)
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub clients: Option<Vec<String>>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the page tree visible to a viewer as JSON
    Tree {
        #[command(flatten)]
        viewer: ViewerArgs,

        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Show the effective access rule of pages and where it comes from
    Explain {
        /// Page paths to explain (default: every page in the content directory)
        paths: Vec<String>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_tree(&self) -> bool {
        matches!(self.command, Commands::Tree { .. })
    }
    pub const fn is_explain(&self) -> bool {
        matches!(self.command, Commands::Explain { .. })
    }
}
