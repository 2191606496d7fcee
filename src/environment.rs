//! Git-derived details used to decorate the report.
//!
//! None of this affects which records are found. Each value is computed on
//! first use and cached; a failing git command yields an empty string.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

/// Runs git queries. Abstracted so tests need no real repository.
pub trait GitQuery: Send + Sync {
    /// Run `git <args>` in `dir`, returning trimmed stdout on success.
    fn run(&self, dir: &Path, args: &[&str]) -> Option<String>;
}

/// [`GitQuery`] backed by the `git` executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit;

impl GitQuery for SystemGit {
    fn run(&self, dir: &Path, args: &[&str]) -> Option<String> {
        let mut command = Command::new("git");
        command.args(args).current_dir(dir);
        // GIT_DIR would override the working directory set above
        for (key, _) in std::env::vars_os() {
            if key
                .to_str()
                .is_some_and(|k| k.to_ascii_uppercase().starts_with("GIT_DIR"))
            {
                command.env_remove(&key);
            }
        }

        let output = match command.output() {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!("Command run error: {}", e);
                return None;
            }
        };
        if !output.status.success() {
            tracing::debug!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Repository information for a scan root.
pub struct Environment {
    root: PathBuf,
    git: Box<dyn GitQuery>,
    branch: OnceLock<String>,
    author: OnceLock<String>,
    project: OnceLock<String>,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("root", &self.root)
            .field("branch", &self.branch.get())
            .field("author", &self.author.get())
            .field("project", &self.project.get())
            .finish()
    }
}

impl Environment {
    /// Environment for `root` using the system `git`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_git(root, SystemGit)
    }

    /// Environment for `root` using a custom git runner.
    pub fn with_git(root: impl AsRef<Path>, git: impl GitQuery + 'static) -> Self {
        let root = root.as_ref();
        let root = std::path::absolute(root).unwrap_or_else(|e| {
            tracing::warn!("Error when setting env root: {}", e);
            root.to_path_buf()
        });
        Self {
            root,
            git: Box::new(git),
            branch: OnceLock::new(),
            author: OnceLock::new(),
            project: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Current branch name.
    pub fn branch(&self) -> &str {
        self.branch
            .get_or_init(|| self.query(&["rev-parse", "--abbrev-ref", "HEAD"]))
    }

    /// Configured git user name.
    pub fn author(&self) -> &str {
        self.author
            .get_or_init(|| self.query(&["config", "user.name"]))
    }

    /// Name of the repository's top-level directory.
    pub fn project(&self) -> &str {
        self.project.get_or_init(|| {
            let toplevel = self.query(&["rev-parse", "--show-toplevel"]);
            Path::new(&toplevel)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }

    /// Log every value, resolving them on the way.
    pub fn log_summary(&self) {
        tracing::debug!("Current root is {}", self.root.display());
        tracing::debug!("Current branch is {}", self.branch());
        tracing::debug!("Current author is {}", self.author());
        tracing::debug!("Current project is {}", self.project());
    }

    fn query(&self, args: &[&str]) -> String {
        self.git.run(&self.root, args).unwrap_or_default()
    }
}
