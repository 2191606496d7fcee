//! Scan orchestration.
//!
//! [`TodoGenerator::generate`] walks the root, then scans every candidate file
//! on tokio's blocking pool. A semaphore bounds how many files are open at
//! once. Each file's blocks are built and offered to a [`Deduplicator`] shared
//! by all scans; the accepted records are returned once every scan finished.
//!
//! # Example
//!
//! ```rust,ignore
//! use tdg::{ScanConfig, TodoGenerator};
//!
//! let config = ScanConfig::load(Path::new("."))?.with_min_words(1);
//! let records = TodoGenerator::new(config)?.generate().await?;
//! for record in &records {
//!     println!("{}:{} {} {}", record.file, record.line, record.tag, record.title);
//! }
//! ```

use futures::future::join_all;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::config::ScanConfig;
use crate::dedup::{Admission, Deduplicator, Thresholds};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{Result, TdgError};
use crate::scanner::{build_record, BlockAccumulator, RawBlock, TaskRecord};
use crate::walk::Traversal;

/// Turns a source tree into deduplicated [`TaskRecord`]s.
#[derive(Debug, Clone)]
pub struct TodoGenerator {
    traversal: Arc<Traversal>,
    thresholds: Thresholds,
    max_concurrency: usize,
    diagnostics: DiagnosticSink,
}

impl TodoGenerator {
    /// Prepare a generator. Fails on invalid configuration or filters.
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        tracing::info!("Using {:?} filters", config.include);

        let root = std::path::absolute(&config.root).unwrap_or_else(|e| {
            tracing::warn!("Error setting generator root: {}", e);
            config.root.clone()
        });

        Ok(Self {
            traversal: Arc::new(Traversal::new(root, &config)?),
            thresholds: config.thresholds(),
            max_concurrency: config.effective_concurrency(),
            diagnostics: DiagnosticSink::log_only(),
        })
    }

    /// Forward diagnostics to `sink` as well as the log.
    #[must_use]
    pub fn with_diagnostics(mut self, sink: DiagnosticSink) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Absolute scan root.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.traversal.root()
    }

    #[must_use]
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Scan the tree and return the accepted records, in no particular order.
    ///
    /// # Errors
    ///
    /// Only when the root itself cannot be traversed. Problems with single
    /// files are reported as diagnostics.
    pub async fn generate(&self) -> Result<Vec<TaskRecord>> {
        let traversal = Arc::clone(&self.traversal);
        let sink = self.diagnostics.clone();
        let candidates = tokio::task::spawn_blocking(move || traversal.candidates(&sink))
            .await
            .map_err(|e| TdgError::Other(anyhow::anyhow!("Traversal task panicked: {}", e)))??;

        tracing::info!("Matched files: {}", candidates.len());

        let dedup = Arc::new(Deduplicator::new(self.thresholds));
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));

        let handles: Vec<_> = candidates
            .into_iter()
            .map(|path| {
                let root = self.root().to_path_buf();
                let dedup = Arc::clone(&dedup);
                let semaphore = Arc::clone(&semaphore);
                let sink = self.diagnostics.clone();

                tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await?;
                    let display = path.display().to_string();
                    let found = tokio::task::spawn_blocking(move || {
                        scan_file(&root, &path, &dedup, &sink)
                    })
                    .await
                    .map_err(|e| anyhow::anyhow!("Scan of {} panicked: {}", display, e))?;
                    anyhow::Ok(found)
                })
            })
            .collect();

        let mut blocks = 0;
        for joined in join_all(handles).await {
            match joined {
                Ok(Ok(found)) => blocks += found,
                Ok(Err(e)) => tracing::warn!("{}", e),
                Err(e) => tracing::warn!("Scan task failed: {}", e),
            }
        }

        let records = match Arc::try_unwrap(dedup) {
            Ok(dedup) => dedup.into_records(),
            Err(shared) => shared.snapshot(),
        };
        tracing::info!("Found {} blocks, kept {} records", blocks, records.len());
        Ok(records)
    }
}

/// Scan one file on disk. Returns the number of blocks found.
///
/// A file that cannot be opened or read is reported and abandoned.
pub fn scan_file(root: &Path, path: &Path, dedup: &Deduplicator, sink: &DiagnosticSink) -> usize {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            sink.emit(Diagnostic::FileOpenFailure {
                path: path.to_path_buf(),
                message: e.to_string(),
            });
            return 0;
        }
    };

    let relative = relative_path(root, path);
    match scan_source(&relative, BufReader::new(file), dedup, sink) {
        Ok(found) => found,
        Err((found, e)) => {
            sink.emit(Diagnostic::FileOpenFailure {
                path: path.to_path_buf(),
                message: e.to_string(),
            });
            found
        }
    }
}

/// Scan lines from any reader, labelling records with `file`.
///
/// Lines are decoded lossily, so invalid UTF-8 never stops a scan. On a read
/// error the input ends there: the open block is finalized like at end of
/// file, and the error is returned with the number of blocks found.
pub fn scan_source<R: BufRead>(
    file: &str,
    mut reader: R,
    dedup: &Deduplicator,
    sink: &DiagnosticSink,
) -> std::result::Result<usize, (usize, std::io::Error)> {
    let mut acc = BlockAccumulator::new();
    let mut buf = Vec::new();
    let mut found = 0;

    let outcome = loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break Ok(()),
            Ok(_) => {
                if let Some(block) = acc.push_line(&decode_line(&buf)) {
                    found += 1;
                    account_block(file, block, dedup, sink);
                }
            }
            Err(e) => break Err(e),
        }
    };

    if let Some(block) = acc.finish() {
        found += 1;
        account_block(file, block, dedup, sink);
    }
    outcome.map(|()| found).map_err(|e| (found, e))
}

fn account_block(file: &str, block: RawBlock, dedup: &Deduplicator, sink: &DiagnosticSink) {
    let Some(built) = build_record(file, block) else {
        return;
    };
    sink.emit_all(built.diagnostics);

    let record = built.record;
    let (file, line, title) = (record.file.clone(), record.line, record.title.clone());
    match dedup.admit(record) {
        Admission::Accepted => {}
        Admission::Duplicate(fingerprint) => sink.emit(Diagnostic::DuplicateRecord {
            file,
            line,
            fingerprint,
        }),
        Admission::Insubstantial => {
            sink.emit(Diagnostic::InsubstantialRecord { file, line, title })
        }
    }
}

fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line)
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .map(PathBuf::from)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}
