//! Turning raw blocks into task records.

use serde::{Deserialize, Serialize};

use super::block::RawBlock;
use super::metadata::{parse_metadata, ISSUE_KEY};
use super::title::Tag;
use crate::diagnostics::Diagnostic;

/// A task parsed from an annotated comment block.
///
/// `estimate` is in hours. Unset optional fields are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub title: String,
    pub body: String,
    /// Path relative to the scan root.
    pub file: String,
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<f64>,
}

impl TaskRecord {
    /// Deduplication key: hex MD5 of the title followed by the body.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut content = String::with_capacity(self.title.len() + self.body.len());
        content.push_str(&self.title);
        content.push_str(&self.body);
        format!("{:x}", md5::compute(content.as_bytes()))
    }
}

/// A record plus the non-fatal problems met while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRecord {
    pub record: TaskRecord,
    pub diagnostics: Vec<Diagnostic>,
}

/// Build a [`TaskRecord`] from a block found in `file`.
///
/// The first line is the title. When the second line parses as metadata it
/// is consumed; otherwise it stays in the body. Returns `None` for a block
/// without lines.
#[must_use]
pub fn build_record(file: &str, block: RawBlock) -> Option<BuiltRecord> {
    let RawBlock {
        tag,
        start_line,
        lines,
    } = block;
    let (title, rest) = lines.split_first()?;

    let mut record = TaskRecord {
        tag,
        title: title.clone(),
        body: String::new(),
        file: file.to_string(),
        line: start_line,
        issue: None,
        category: None,
        estimate: None,
    };
    let mut diagnostics = Vec::new();

    let Some(second) = rest.first() else {
        return Some(BuiltRecord {
            record,
            diagnostics,
        });
    };

    let body_lines = match parse_metadata(second) {
        Ok(meta) => {
            for rejected in meta.rejected {
                let diagnostic = if rejected.key == ISSUE_KEY {
                    Diagnostic::InvalidIssue {
                        file: file.to_string(),
                        line: start_line,
                        value: rejected.value,
                    }
                } else {
                    Diagnostic::InvalidEstimate {
                        file: file.to_string(),
                        line: start_line,
                        value: rejected.value,
                    }
                };
                diagnostics.push(diagnostic);
            }
            record.category = meta.category;
            record.issue = meta.issue;
            record.estimate = meta.estimate;
            &rest[1..]
        }
        Err(_) => rest,
    };
    record.body = body_lines.join("\n").trim().to_string();

    Some(BuiltRecord {
        record,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> RawBlock {
        RawBlock {
            tag: Tag::Todo,
            start_line: 4,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_block_is_discarded() {
        assert!(build_record("a.go", block(&[])).is_none());
    }

    #[test]
    fn test_title_only() {
        let built = build_record("a.go", block(&["refactor parser"])).unwrap();
        assert_eq!(built.record.title, "refactor parser");
        assert_eq!(built.record.body, "");
        assert_eq!(built.record.file, "a.go");
        assert_eq!(built.record.line, 4);
        assert!(built.diagnostics.is_empty());
    }

    #[test]
    fn test_metadata_line_is_consumed() {
        let built = build_record(
            "src/parser.go",
            block(&["refactor parser", "category=core issue=7", "needs cleanup"]),
        )
        .unwrap();
        let record = built.record;
        assert_eq!(record.tag, Tag::Todo);
        assert_eq!(record.title, "refactor parser");
        assert_eq!(record.category.as_deref(), Some("core"));
        assert_eq!(record.issue, Some(7));
        assert_eq!(record.estimate, None);
        assert_eq!(record.body, "needs cleanup");
    }

    #[test]
    fn test_non_metadata_second_line_stays_in_body() {
        let built = build_record("a.rs", block(&["title", "first line", "second line"])).unwrap();
        assert_eq!(built.record.body, "first line\nsecond line");
        assert_eq!(built.record.category, None);
    }

    #[test]
    fn test_metadata_only_on_second_line() {
        let built = build_record("a.rs", block(&["title", "text", "issue=5"])).unwrap();
        assert_eq!(built.record.issue, None);
        assert_eq!(built.record.body, "text\nissue=5");
    }

    #[test]
    fn test_body_is_trimmed() {
        let built = build_record("a.rs", block(&["title", "", "", "text", ""])).unwrap();
        assert_eq!(built.record.body, "text");
    }

    #[test]
    fn test_rejected_values_become_diagnostics() {
        let built =
            build_record("a.rs", block(&["title", "category=x issue=abc estimate=2d"])).unwrap();
        assert_eq!(built.record.category.as_deref(), Some("x"));
        assert_eq!(
            built.diagnostics,
            vec![
                Diagnostic::InvalidIssue {
                    file: "a.rs".into(),
                    line: 4,
                    value: "abc".into()
                },
                Diagnostic::InvalidEstimate {
                    file: "a.rs".into(),
                    line: 4,
                    value: "2d".into()
                },
            ]
        );
    }

    #[test]
    fn test_fingerprint_ignores_location() {
        let a = build_record("a.rs", block(&["same title", "same body"])).unwrap();
        let mut other = block(&["same title", "same body"]);
        other.start_line = 99;
        let b = build_record("b.rs", other).unwrap();
        assert_eq!(a.record.fingerprint(), b.record.fingerprint());
        assert_eq!(a.record.fingerprint().len(), 32);
    }

    #[test]
    fn test_fingerprint_differs_on_body() {
        let a = build_record("a.rs", block(&["title", "one"])).unwrap();
        let b = build_record("a.rs", block(&["title", "two"])).unwrap();
        assert_ne!(a.record.fingerprint(), b.record.fingerprint());
    }

    #[test]
    fn test_json_omits_unset_fields() {
        let built = build_record("a.rs", block(&["title"])).unwrap();
        let json = serde_json::to_value(&built.record).unwrap();
        assert_eq!(json["type"], "TODO");
        assert!(json.get("issue").is_none());
        assert!(json.get("category").is_none());
        assert!(json.get("estimate").is_none());

        let built = build_record("a.rs", block(&["title", "issue=3 estimate=1h"])).unwrap();
        let json = serde_json::to_value(&built.record).unwrap();
        assert_eq!(json["issue"], 3);
        assert_eq!(json["estimate"], 1.0);
    }
}
