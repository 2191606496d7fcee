//! Per-file state machine that groups comment lines into blocks.
//!
//! A block is a run of contiguous comment lines whose first line matches a
//! [`Tag`] prefix. It ends at the next tag line, at the first non-comment
//! line, or at end of input. Blank comment lines (a bare `//`) do not end a
//! block; they are kept as empty continuation lines.

use super::comment::parse_comment;
use super::title::{match_title, Tag};

/// A block as found in the source, before metadata is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub tag: Tag,
    /// Line number recorded for the block.
    ///
    /// Lines are counted from 1 and the block stores the title line's number
    /// minus one, so a title on the first line of a file records 0.
    pub start_line: usize,
    /// Title first, then continuation lines.
    pub lines: Vec<String>,
}

/// Feeds source lines one at a time and yields finished blocks.
///
/// # Example
///
/// ```
/// use tdg::scanner::{BlockAccumulator, Tag};
///
/// let mut acc = BlockAccumulator::new();
/// assert!(acc.push_line("// TODO: first").is_none());
/// assert!(acc.push_line("// more text").is_none());
///
/// let block = acc.push_line("let x = 1;").unwrap();
/// assert_eq!(block.tag, Tag::Todo);
/// assert_eq!(block.lines, vec!["first", "more text"]);
/// assert!(acc.finish().is_none());
/// ```
#[derive(Debug, Default)]
pub struct BlockAccumulator {
    /// `None` while idle.
    open: Option<RawBlock>,
    line_number: usize,
}

impl BlockAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Whether a block is currently open.
    #[must_use]
    pub fn in_block(&self) -> bool {
        self.open.is_some()
    }

    /// Consume the next line, returning the block it closes, if any.
    pub fn push_line(&mut self, line: &str) -> Option<RawBlock> {
        self.line_number += 1;

        let Some(inner) = parse_comment(line) else {
            return self.open.take();
        };

        if let Some((tag, title)) = match_title(inner) {
            let finished = self.open.take();
            self.open = Some(RawBlock {
                tag,
                start_line: self.line_number - 1,
                lines: vec![title.to_string()],
            });
            return finished;
        }

        if let Some(block) = self.open.as_mut() {
            block.lines.push(inner.to_string());
        }
        None
    }

    /// Close the input, returning the block still open at end of file.
    #[must_use]
    pub fn finish(self) -> Option<RawBlock> {
        self.open
    }
}

/// Run a whole line sequence through a fresh [`BlockAccumulator`].
pub fn collect_blocks<I, S>(lines: I) -> Vec<RawBlock>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut acc = BlockAccumulator::new();
    let mut blocks: Vec<RawBlock> = lines
        .into_iter()
        .filter_map(|line| acc.push_line(line.as_ref()))
        .collect();
    blocks.extend(acc.finish());
    blocks
}
