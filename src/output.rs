//! JSON report written at the end of a run.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::environment::Environment;
use crate::error::Result;
use crate::scanner::TaskRecord;

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub root: String,
    pub branch: String,
    pub author: String,
    pub project: String,
    pub comments: Vec<TaskRecord>,
}

impl Report {
    /// Build a report, ordering comments by file and line.
    ///
    /// Scans finish in arbitrary order; sorting keeps the output stable
    /// between runs over the same tree.
    #[must_use]
    pub fn new(env: &Environment, mut comments: Vec<TaskRecord>) -> Self {
        comments.sort_by(|a, b| a.file.cmp(&b.file).then(a.line.cmp(&b.line)));
        Self {
            root: env.root().to_string_lossy().into_owned(),
            branch: env.branch().to_string(),
            author: env.author().to_string(),
            project: env.project().to_string(),
            comments,
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        Ok(if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        })
    }

    /// Write JSON followed by a newline.
    pub fn write_to(&self, mut writer: impl Write, pretty: bool) -> Result<()> {
        writeln!(writer, "{}", self.to_json(pretty)?)?;
        writer.flush()?;
        Ok(())
    }

    /// Write JSON to a file, replacing it.
    pub fn write_file(&self, path: &Path, pretty: bool) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file), pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::GitQuery;
    use crate::scanner::Tag;
    use tempfile::TempDir;

    struct NoGit;

    impl GitQuery for NoGit {
        fn run(&self, _dir: &Path, args: &[&str]) -> Option<String> {
            (args == ["rev-parse", "--abbrev-ref", "HEAD"]).then(|| "dev".to_string())
        }
    }

    fn record(file: &str, line: usize) -> TaskRecord {
        TaskRecord {
            tag: Tag::Fixme,
            title: format!("title in {}", file),
            body: String::new(),
            file: file.to_string(),
            line,
            issue: None,
            category: None,
            estimate: Some(1.5),
        }
    }

    #[test]
    fn test_report_sorts_comments() {
        let env = Environment::with_git("/repo", NoGit);
        let report = Report::new(&env, vec![record("b.rs", 1), record("a.rs", 9), record("a.rs", 2)]);
        let order: Vec<_> = report
            .comments
            .iter()
            .map(|c| (c.file.as_str(), c.line))
            .collect();
        assert_eq!(order, vec![("a.rs", 2), ("a.rs", 9), ("b.rs", 1)]);
        assert_eq!(report.branch, "dev");
        assert_eq!(report.author, "");
    }

    #[test]
    fn test_json_shape() {
        let env = Environment::with_git("/repo", NoGit);
        let report = Report::new(&env, vec![record("a.rs", 3)]);
        let value: serde_json::Value = serde_json::from_str(&report.to_json(false).unwrap()).unwrap();

        assert_eq!(value["branch"], "dev");
        let comment = &value["comments"][0];
        assert_eq!(comment["type"], "FIXME");
        assert_eq!(comment["line"], 3);
        assert_eq!(comment["estimate"], 1.5);
        assert!(comment.get("issue").is_none());
    }

    #[test]
    fn test_write_file_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.json");
        let env = Environment::with_git("/repo", NoGit);
        let report = Report::new(&env, vec![record("a.rs", 3)]);

        report.write_file(&path, true).unwrap();
        let loaded: Report =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, report);
    }
}
