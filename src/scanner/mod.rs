//! Comment recognition and block accumulation.
//!
//! The pipeline for one file is:
//!
//! 1. [`parse_comment`] decides whether a line is a comment and extracts its text
//! 2. [`match_title`] spots lines that open a new block (`TODO: ...`)
//! 3. [`BlockAccumulator`] groups contiguous comment lines into [`RawBlock`]s
//! 4. [`build_record`] splits a block into title, metadata and body
//!
//! None of this knows about the language of the file being scanned.

pub mod block;
pub mod comment;
pub mod estimate;
pub mod metadata;
pub mod record;
pub mod title;

pub use block::{collect_blocks, BlockAccumulator, RawBlock};
pub use comment::{is_comment_marker, parse_comment, COMMENT_MARKERS};
pub use estimate::parse_estimate;
pub use metadata::{parse_metadata, Metadata, RejectedField};
pub use record::{build_record, BuiltRecord, TaskRecord};
pub use title::{match_title, Tag};
