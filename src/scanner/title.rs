//! Recognition of the tag line that opens an annotated block.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Annotation keyword that opens a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tag {
    Todo,
    Fixme,
    Bug,
    Hack,
    Urgent,
    Refs,
}

impl Tag {
    /// All tags, in matching order.
    pub const ALL: [Tag; 6] = [
        Tag::Todo,
        Tag::Fixme,
        Tag::Bug,
        Tag::Hack,
        Tag::Urgent,
        Tag::Refs,
    ];

    /// Upper-case keyword without punctuation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::Fixme => "FIXME",
            Self::Bug => "BUG",
            Self::Hack => "HACK",
            Self::Urgent => "URGENT",
            Self::Refs => "REFS",
        }
    }

    /// The prefix a comment must start with, e.g. `"TODO: "`.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Todo => "TODO: ",
            Self::Fixme => "FIXME: ",
            Self::Bug => "BUG: ",
            Self::Hack => "HACK: ",
            Self::Urgent => "URGENT: ",
            Self::Refs => "REFS: ",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Match the opening line of a block.
///
/// The comparison folds the text to upper case, so `todo: x` opens a `TODO`
/// block. There must be at least one character after the prefix. The title is
/// returned verbatim, including any extra leading spaces.
///
/// # Example
///
/// ```
/// use tdg::scanner::{match_title, Tag};
///
/// assert_eq!(match_title("TODO: fix this"), Some((Tag::Todo, "fix this")));
/// assert_eq!(match_title("TODO: "), None);
/// ```
#[must_use]
pub fn match_title(inner: &str) -> Option<(Tag, &str)> {
    let size = inner.chars().count();
    Tag::ALL.into_iter().find_map(|tag| {
        let prefix = tag.prefix();
        if size <= prefix.len() {
            return None;
        }
        folded_prefix_end(inner, prefix).map(|end| (tag, &inner[end..]))
    })
}

/// Compare the start of `s` with an upper-case ASCII prefix.
///
/// Returns the byte offset in `s` where the prefix ends.
fn folded_prefix_end(s: &str, prefix: &str) -> Option<usize> {
    let mut end = 0;
    let mut chars = s.chars();
    for p in prefix.chars() {
        let c = chars.next()?;
        if !c.to_uppercase().eq(std::iter::once(p)) {
            return None;
        }
        end += c.len_utf8();
    }
    Some(end)
}
