//! Configuration for a scan.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. an optional `.tdg.toml` in the scan root
//! 3. builder overrides (the CLI flags)
//!
//! # Example `.tdg.toml`
//!
//! ```toml
//! include = ['\.rs$', '\.go$']
//! exclude = ["**/generated/**"]
//! min_words = 2
//! min_chars = 20
//! max_concurrency = 8
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dedup::{Thresholds, DEFAULT_MIN_CHARS, DEFAULT_MIN_WORDS};
use crate::error::{Result, TdgError};

/// Name of the per-project settings file.
pub const CONFIG_FILE_NAME: &str = ".tdg.toml";

/// Directory names pruned from the walk unless overridden.
pub fn default_exclude_dirs() -> Vec<String> {
    [".git", ".hg", ".svn"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Everything a [`TodoGenerator`](crate::generator::TodoGenerator) needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory to scan. Never read from the settings file.
    #[serde(skip)]
    pub root: PathBuf,
    /// Regular expressions matched against full file paths. A file is
    /// scanned if any of them matches, or if the list is empty.
    pub include: Vec<String>,
    /// Glob patterns, relative to the root, for files to leave out.
    pub exclude: Vec<String>,
    /// Directory names never descended into.
    pub exclude_dirs: Vec<String>,
    /// Minimum number of words longer than two characters in a title.
    pub min_words: usize,
    /// Minimum title length in characters.
    pub min_chars: usize,
    /// Upper bound on files scanned at once. Defaults to the available
    /// parallelism.
    pub max_concurrency: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            include: Vec::new(),
            exclude: Vec::new(),
            exclude_dirs: default_exclude_dirs(),
            min_words: DEFAULT_MIN_WORDS,
            min_chars: DEFAULT_MIN_CHARS,
            max_concurrency: None,
        }
    }
}

impl ScanConfig {
    /// Defaults for scanning `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Load settings for `root`, reading `.tdg.toml` there when it exists.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::settings_path(root);
        let mut config = if path.is_file() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str::<ScanConfig>(&content).map_err(|e| {
                TdgError::config_with_path(format!("failed to parse: {}", e), path.clone())
            })?
        } else {
            Self::default()
        };
        config.root = root.to_path_buf();
        Ok(config)
    }

    /// Path of the settings file for a root.
    #[must_use]
    pub fn settings_path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE_NAME)
    }

    /// Replace the include filters.
    #[must_use]
    pub fn with_include(mut self, include: Vec<String>) -> Self {
        self.include = include;
        self
    }

    /// Replace the exclude globs.
    #[must_use]
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Replace the pruned directory names.
    #[must_use]
    pub fn with_exclude_dirs(mut self, dirs: Vec<String>) -> Self {
        self.exclude_dirs = dirs;
        self
    }

    #[must_use]
    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    #[must_use]
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Bound the number of files scanned at once.
    #[must_use]
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    /// Substantiveness thresholds for the deduplicator.
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.min_words, self.min_chars)
    }

    /// The concurrency bound actually used.
    #[must_use]
    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrency.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        })
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == Some(0) {
            return Err(TdgError::invalid_config(
                "max_concurrency",
                "must be at least 1",
            ));
        }
        if let Some(dir) = self.exclude_dirs.iter().find(|d| d.is_empty()) {
            return Err(TdgError::invalid_config(
                "exclude_dirs",
                format!("empty directory name '{}'", dir),
            ));
        }
        Ok(())
    }
}
