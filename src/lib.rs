//! tdg - TODO comment task generator
//!
//! Scans a source tree for annotated comments (`TODO:`, `FIXME:`, `BUG:`,
//! `HACK:`, `URGENT:`, `REFS:`) and turns each into a [`TaskRecord`] with
//! optional category, issue and estimate metadata. Comment detection is
//! heuristic and works for any language that uses `//`, `#`, `;`, `%` or `*`
//! style comments.
//!
//! # Architecture
//!
//! - [`scanner`] - comment parsing, block accumulation and record building
//! - [`dedup`] - shared, thread-safe admission of records
//! - [`walk`] - file discovery and path filtering
//! - [`generator`] - concurrent scan orchestration
//! - [`diagnostics`] - non-fatal findings, optionally sent over a channel
//! - [`config`] - scan settings and the `.tdg.toml` file
//! - [`environment`] - git branch/author/project used to decorate output
//! - [`output`] - the JSON report
//! - [`error`] - error types
//!
//! # Example
//!
//! ```rust,ignore
//! use tdg::{DiagnosticSink, ScanConfig, TodoGenerator};
//!
//! let (sink, mut diagnostics) = DiagnosticSink::channel();
//! let generator = TodoGenerator::new(ScanConfig::new("."))?.with_diagnostics(sink);
//! let records = generator.generate().await?;
//! println!("{} tasks", records.len());
//! ```

pub mod config;
pub mod dedup;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod generator;
pub mod output;
pub mod scanner;
pub mod walk;

pub use error::{ParseError, Result, TdgError};

pub use config::ScanConfig;
pub use dedup::{Admission, Deduplicator, Thresholds};
pub use diagnostics::{Diagnostic, DiagnosticSink};
pub use environment::{Environment, GitQuery, SystemGit};
pub use generator::TodoGenerator;
pub use output::Report;
pub use scanner::{
    build_record, match_title, parse_comment, parse_estimate, parse_metadata, BlockAccumulator,
    Metadata, RawBlock, Tag, TaskRecord,
};
pub use walk::Traversal;
