//! File discovery for a scan.
//!
//! Walks the root with `walkdir`, prunes excluded directory names, and keeps
//! the regular files that pass the include regexes and exclude globs. Errors
//! on individual entries are reported and skipped; only an unreadable root
//! fails the walk.

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::ScanConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{Result, TdgError};

/// Decides which files under a root get scanned.
#[derive(Debug, Clone)]
pub struct Traversal {
    root: PathBuf,
    filters: Vec<Regex>,
    exclude: GlobSet,
    exclude_dirs: HashSet<String>,
}

impl Traversal {
    /// Compile the filters in `config` for walking `root`.
    pub fn new(root: PathBuf, config: &ScanConfig) -> Result<Self> {
        Ok(Self {
            root,
            filters: compile_filters(&config.include)?,
            exclude: compile_globs(&config.exclude)?,
            exclude_dirs: config.exclude_dirs.iter().cloned().collect(),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check a full path against the include filters.
    ///
    /// An empty filter list matches everything.
    #[must_use]
    pub fn is_included(&self, path: &Path) -> bool {
        if self.filters.is_empty() {
            return true;
        }
        let path = path.to_string_lossy();
        self.filters.iter().any(|f| f.is_match(&path))
    }

    /// Check a path against the exclude globs, relative to the root.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude.is_match(relative)
    }

    fn is_pruned_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.exclude_dirs.contains(name))
    }

    /// Fail unless the root is a directory we can list.
    pub fn check_root(&self) -> Result<()> {
        let metadata = std::fs::metadata(&self.root)
            .map_err(|e| TdgError::traversal(&self.root, e.to_string()))?;
        if !metadata.is_dir() {
            return Err(TdgError::traversal(&self.root, "not a directory"));
        }
        std::fs::read_dir(&self.root).map_err(|e| TdgError::traversal(&self.root, e.to_string()))?;
        Ok(())
    }

    /// Walk the root and return every file that should be scanned.
    pub fn candidates(&self, sink: &DiagnosticSink) -> Result<Vec<PathBuf>> {
        self.check_root()?;

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| !self.is_pruned_dir(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    sink.emit(Diagnostic::EntrySkipped {
                        path: e.path().map(Path::to_path_buf).unwrap_or_default(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            tracing::debug!("Walking {}", entry.path().display());
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            if self.is_included(&path) && !self.is_excluded(&path) {
                files.push(path);
            }
        }
        Ok(files)
    }
}

fn compile_filters(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| TdgError::InvalidFilter {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

fn compile_globs(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| TdgError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| TdgError::InvalidGlob {
        pattern: patterns.join(", "),
        source,
    })
}
