//! Language-agnostic comment detection.
//!
//! A line counts as a comment when, after optional indentation, it starts with
//! one or more characters from a small marker set. The set covers `//`, `/*`,
//! ` * `, `#`, `%`, `;` and friends without knowing the file's language. It
//! over-matches (a markdown `# Heading` is a "comment" too), which is accepted.

/// Characters that may open a comment line.
pub const COMMENT_MARKERS: &[char] = &['/', '#', '%', ';', '*'];

/// Check whether a character is a comment marker.
#[must_use]
pub fn is_comment_marker(c: char) -> bool {
    COMMENT_MARKERS.contains(&c)
}

/// Extract the trimmed inner text of a comment line.
///
/// Returns `None` when the line has no leading comment marker. A line made of
/// markers and whitespace only is still a comment and yields `Some("")`.
///
/// # Example
///
/// ```
/// use tdg::scanner::parse_comment;
///
/// assert_eq!(parse_comment("    // TODO: fix me  "), Some("TODO: fix me"));
/// assert_eq!(parse_comment("#"), Some(""));
/// assert_eq!(parse_comment("let x = 1;"), None);
/// ```
#[must_use]
pub fn parse_comment(line: &str) -> Option<&str> {
    let rest = line.trim_start();
    let after_markers = rest.trim_start_matches(is_comment_marker);
    if after_markers.len() == rest.len() {
        return None;
    }
    Some(after_markers.trim())
}
