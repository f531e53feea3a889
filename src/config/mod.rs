//! Configuration management for `docgate.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                      |
//! |--------------|----------------------------------------------|
//! | `[source]`   | Content directory, page tree, extensions     |
//! | `[access]`   | Client root segment, default match policy    |
//! | `[viewers]`  | Named viewer profiles for previews           |
//!
//! # Example
//!
//! ```toml
//! [source]
//! content = "docs"
//! tree = "docs/nav.json"
//!
//! [access]
//! client_root = "clients"
//!
//! [viewers.alice]
//! clients = ["acme"]
//! ```

mod access;
pub mod defaults;
mod error;
mod source;
mod viewers;

pub use access::AccessConfig;
pub use error::ConfigError;
pub use source::SourceConfig;
pub use viewers::{ViewerProfile, Viewers};

use crate::cli::Cli;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing docgate.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
    /// Project root (set from CLI)
    #[serde(skip)]
    pub root: Option<PathBuf>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Page sources
    #[serde(default)]
    pub source: SourceConfig,

    /// Rule interpretation
    #[serde(default)]
    pub access: AccessConfig,

    /// Named viewer profiles
    #[serde(default)]
    pub viewers: Viewers,
}

impl DocsConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: DocsConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.source.content, cli.content.as_ref());
        if cli.tree.is_some() {
            self.source.tree = cli.tree.clone();
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the root directory and normalize to absolute paths
    pub fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));
        self.source.content = Self::normalize_path(&root.join(expand_tilde(&self.source.content)));
        self.source.tree = self
            .source
            .tree
            .as_ref()
            .map(|tree| Self::normalize_path(&root.join(expand_tilde(tree))));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before running a command
    pub fn validate(&self) -> Result<()> {
        let client_root = &self.access.client_root;
        if client_root.trim().is_empty() {
            bail!(ConfigError::Validation("[access.client_root] must not be empty".into()));
        }
        if client_root.contains('/') {
            bail!(ConfigError::Validation(
                "[access.client_root] must be a single path segment".into()
            ));
        }

        if self.source.extensions.is_empty() {
            bail!(ConfigError::Validation(
                "[source.extensions] must list at least one extension".into()
            ));
        }

        if !self.source.content.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[source.content] `{}` is not a directory",
                self.source.content.display()
            )));
        }

        if let Some(tree) = &self.source.tree
            && !tree.is_file()
        {
            bail!(ConfigError::Validation(format!(
                "[source.tree] `{}` is not a file",
                tree.display()
            )));
        }

        Ok(())
    }
}

/// Expand a leading `~` to the home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn rooted(toml: &str, root: &Path) -> DocsConfig {
        let mut config = DocsConfig::from_str(toml).unwrap();
        config.update_path_with_root(root, Path::new("docgate.toml"));
        config
    }

    #[test]
    fn test_from_str() {
        let config = DocsConfig::from_str(r#"
            [source]
            content = "docs"

            [viewers.alice]
            clients = ["acme"]
        "#).unwrap();

        assert_eq!(config.source.content, PathBuf::from("docs"));
        assert!(config.viewers.contains("alice"));
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = DocsConfig::from_str("[source\ncontent = \"docs\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = DocsConfig::from_path(Path::new("/nonexistent/docgate.toml")).unwrap_err();
        assert!(err.to_string().contains("cannot read config file"));
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let result = DocsConfig::from_str(r#"
            [build]
            output = "public"
        "#);
        assert!(result.is_err());
    }

    #[test]
    fn test_get_root_default() {
        let config = DocsConfig::default();
        assert_eq!(config.get_root(), Path::new("./"));
    }

    #[test]
    fn test_paths_resolved_against_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("nav.json"), "[]").unwrap();

        let config = rooted("[source]\ncontent = \"docs\"\ntree = \"nav.json\"", dir.path());
        let root = dir.path().canonicalize().unwrap();

        assert_eq!(config.source.content, root.join("docs"));
        assert_eq!(config.source.tree, Some(root.join("nav.json")));
        assert_eq!(config.config_path, root.join("docgate.toml"));
    }

    #[test]
    fn test_validate_ok() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("content")).unwrap();

        let config = rooted("", dir.path());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_content() {
        let dir = TempDir::new().unwrap();
        let config = rooted("", dir.path());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[source.content]"));
    }

    #[test]
    fn test_validate_missing_tree() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("content")).unwrap();
        let config = rooted("[source]\ntree = \"nav.json\"", dir.path());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[source.tree]"));
    }

    #[test]
    fn test_validate_client_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("content")).unwrap();

        let config = rooted("[access]\nclient_root = \"a/b\"", dir.path());
        assert!(config.validate().unwrap_err().to_string().contains("single path segment"));

        let config = rooted("[access]\nclient_root = \"\"", dir.path());
        assert!(config.validate().unwrap_err().to_string().contains("must not be empty"));
    }

    #[test]
    fn test_validate_extensions() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("content")).unwrap();

        let config = rooted("[source]\nextensions = []", dir.path());
        assert!(config.validate().unwrap_err().to_string().contains("[source.extensions]"));
    }
}
