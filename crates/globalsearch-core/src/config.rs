//! Search configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for a single search.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct SearchConfig {
    /// Root directory to search under.
    pub root: PathBuf,

    /// Substring to look for, compared case-insensitively.
    ///
    /// An empty query is valid configuration: the search completes
    /// immediately with zero results and performs no traversal.
    #[builder(default)]
    #[serde(default)]
    pub query: String,

    /// Follow symbolic links during traversal.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Maximum directory depth to descend below the root (None = unlimited).
    /// A value of 0 searches only files directly under the root.
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Include hidden files and directories (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,
}

fn default_true() -> bool {
    true
}

impl SearchConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl SearchConfig {
    /// Create a new search config builder.
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }

    /// Create a simple config for searching a query under a root.
    pub fn new(root: impl Into<PathBuf>, query: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            query: query.into(),
            follow_symlinks: false,
            max_depth: None,
            include_hidden: true,
        }
    }

    /// Check if hidden entries should be skipped.
    pub fn should_skip_hidden(&self, name: &str) -> bool {
        !self.include_hidden && name.starts_with('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = SearchConfig::builder()
            .root("/home/user")
            .query("needle")
            .follow_symlinks(true)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.query, "needle");
        assert!(config.follow_symlinks);
        assert!(config.include_hidden);
    }

    #[test]
    fn test_config_simple() {
        let config = SearchConfig::new("/home/user", "hello");
        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.query, "hello");
        assert!(!config.follow_symlinks);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_builder_requires_root() {
        let result = SearchConfig::builder().query("hello").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_should_skip_hidden() {
        let mut config = SearchConfig::new("/test", "q");

        // By default, hidden entries are included
        assert!(!config.should_skip_hidden(".git"));

        config.include_hidden = false;
        assert!(config.should_skip_hidden(".git"));
        assert!(!config.should_skip_hidden("src"));
    }
}
