//! The optional `key=value` line that follows a block title.
//!
//! ```text
//! // TODO: refactor parser
//! // category=core issue=7 estimate=30m
//! // needs cleanup
//! ```
//!
//! Unknown keys are ignored. A value that cannot be parsed for a known key
//! leaves that field unset and is reported in [`Metadata::rejected`] rather
//! than failing the whole line.

use super::estimate::parse_estimate;
use crate::error::ParseError;

/// Key holding a free-form category label.
pub const CATEGORY_KEY: &str = "category";
/// Key holding a numeric tracker issue id.
pub const ISSUE_KEY: &str = "issue";
/// Key holding a time estimate, see [`parse_estimate`].
pub const ESTIMATE_KEY: &str = "estimate";

/// Estimates below this many hours count as unset.
pub const ESTIMATE_EPSILON: f64 = 0.01;

/// Fields recovered from a metadata line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub category: Option<String>,
    pub issue: Option<u64>,
    pub estimate: Option<f64>,
    /// Known keys whose values were ignored.
    pub rejected: Vec<RejectedField>,
}

/// A known key whose value could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedField {
    pub key: String,
    pub value: String,
}

impl Metadata {
    fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.issue.is_none()
            && self.estimate.is_none_or(|e| e < ESTIMATE_EPSILON)
    }

    fn reject(&mut self, key: &str, value: &str) {
        self.rejected.push(RejectedField {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
}

/// Parse a metadata line.
///
/// Fails with [`ParseError::NotMetadata`] when the line has no `=` or when no
/// known field ends up set, so an unrelated `a=b` line stays part of the body.
///
/// # Example
///
/// ```
/// use tdg::scanner::parse_metadata;
///
/// let meta = parse_metadata("category=bug issue=42 estimate=2h").unwrap();
/// assert_eq!(meta.category.as_deref(), Some("bug"));
/// assert_eq!(meta.issue, Some(42));
/// assert_eq!(meta.estimate, Some(2.0));
/// ```
pub fn parse_metadata(line: &str) -> Result<Metadata, ParseError> {
    if !line.contains('=') {
        return Err(ParseError::NotMetadata);
    }

    let mut meta = Metadata::default();
    for (key, value) in line
        .split_whitespace()
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.trim(), v.trim()))
    {
        match key {
            CATEGORY_KEY if !value.is_empty() => meta.category = Some(value.to_string()),
            ISSUE_KEY => match value.parse::<u64>() {
                Ok(issue) if issue > 0 => meta.issue = Some(issue),
                _ => meta.reject(key, value),
            },
            ESTIMATE_KEY => match parse_estimate(value) {
                Ok(hours) => meta.estimate = Some(hours),
                Err(_) => meta.reject(key, value),
            },
            _ => {}
        }
    }

    if meta.is_empty() {
        return Err(ParseError::NotMetadata);
    }
    if meta.estimate.is_some_and(|e| e < ESTIMATE_EPSILON) {
        meta.estimate = None;
    }
    Ok(meta)
}
