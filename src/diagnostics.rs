//! Non-fatal findings reported while scanning.
//!
//! Nothing that goes wrong inside a single file aborts a run. Each such event
//! is logged and, when a receiver is attached, also sent over an unbounded
//! channel so callers (and tests) can inspect it without scraping logs.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// A non-fatal event raised during a scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An `issue=` value was not a positive integer.
    InvalidIssue {
        file: String,
        line: usize,
        value: String,
    },
    /// An `estimate=` value could not be parsed.
    InvalidEstimate {
        file: String,
        line: usize,
        value: String,
    },
    /// A candidate file could not be opened or read; its scan was abandoned.
    FileOpenFailure { path: PathBuf, message: String },
    /// A record with the same title and body was already admitted.
    DuplicateRecord {
        file: String,
        line: usize,
        fingerprint: String,
    },
    /// A record's title was too short to be worth reporting.
    InsubstantialRecord {
        file: String,
        line: usize,
        title: String,
    },
    /// The directory walk could not read an entry.
    EntrySkipped { path: PathBuf, message: String },
}

impl Diagnostic {
    /// Whether this is worth a warning rather than a debug line.
    ///
    /// Duplicate and insubstantial records are routine.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        !matches!(
            self,
            Self::DuplicateRecord { .. } | Self::InsubstantialRecord { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIssue { file, line, value } => {
                write!(f, "Ignoring invalid issue '{}' in {}:{}", value, file, line)
            }
            Self::InvalidEstimate { file, line, value } => {
                write!(f, "Ignoring invalid estimate '{}' in {}:{}", value, file, line)
            }
            Self::FileOpenFailure { path, message } => {
                write!(f, "Cannot read {}: {}", path.display(), message)
            }
            Self::DuplicateRecord { file, line, .. } => {
                write!(f, "Skipping comment duplicate in {}:{}", file, line)
            }
            Self::InsubstantialRecord { file, line, .. } => {
                write!(f, "Ignoring comment in {}:{}", file, line)
            }
            Self::EntrySkipped { path, message } => {
                write!(f, "Skipping {}: {}", path.display(), message)
            }
        }
    }
}

/// Where diagnostics go: always the log, optionally a channel.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    tx: Option<UnboundedSender<Diagnostic>>,
}

impl DiagnosticSink {
    /// A sink that only logs.
    #[must_use]
    pub fn log_only() -> Self {
        Self::default()
    }

    /// A sink that logs and forwards to `tx`.
    #[must_use]
    pub fn new(tx: UnboundedSender<Diagnostic>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Create a forwarding sink together with its receiver.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<Diagnostic>) {
        let (tx, rx) = unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Report one diagnostic.
    pub fn emit(&self, diagnostic: Diagnostic) {
        if diagnostic.is_warning() {
            tracing::warn!("{}", diagnostic);
        } else {
            tracing::debug!("{}", diagnostic);
        }
        if let Some(tx) = &self.tx {
            // receiver dropped means nobody is listening any more
            let _ = tx.send(diagnostic);
        }
    }

    /// Report several diagnostics in order.
    pub fn emit_all(&self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }
}

/// Drain everything currently buffered in a receiver.
pub fn drain(rx: &mut UnboundedReceiver<Diagnostic>) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    while let Ok(diagnostic) = rx.try_recv() {
        out.push(diagnostic);
    }
    out
}
