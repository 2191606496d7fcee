//! Shared admission point for records found by concurrent scans.
//!
//! One [`Deduplicator`] lives for one generate run and is shared by `Arc`.
//! Records with the same title and body collapse to a single entry no matter
//! which file or line produced them, and titles that are too short to mean
//! anything are dropped.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use crate::scanner::TaskRecord;

/// Default minimum number of real words in a title.
pub const DEFAULT_MIN_WORDS: usize = 3;
/// Default minimum title length in characters.
pub const DEFAULT_MIN_CHARS: usize = 30;

/// Words must be longer than this many characters to count.
const SHORT_WORD_LEN: usize = 2;

/// Substantiveness thresholds. A title passes if it meets either one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub min_words: usize,
    pub min_chars: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_words: DEFAULT_MIN_WORDS,
            min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

impl Thresholds {
    #[must_use]
    pub fn new(min_words: usize, min_chars: usize) -> Self {
        Self {
            min_words,
            min_chars,
        }
    }

    /// Check whether a title carries enough content to keep.
    #[must_use]
    pub fn is_substantial(&self, title: &str) -> bool {
        count_title_words(title) >= self.min_words || title.chars().count() >= self.min_chars
    }
}

/// Count whitespace-separated words longer than two characters.
#[must_use]
pub fn count_title_words(title: &str) -> usize {
    title
        .split_whitespace()
        .filter(|w| w.chars().count() > SHORT_WORD_LEN)
        .count()
}

/// Outcome of [`Deduplicator::admit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    /// Carries the fingerprint that was already present.
    Duplicate(String),
    Insubstantial,
}

#[derive(Debug, Default)]
struct DedupState {
    seen: HashSet<String>,
    records: Vec<TaskRecord>,
}

/// Thread-safe fingerprint set plus the accepted records.
#[derive(Debug, Default)]
pub struct Deduplicator {
    thresholds: Thresholds,
    state: Mutex<DedupState>,
}

impl Deduplicator {
    #[must_use]
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            state: Mutex::new(DedupState::default()),
        }
    }

    /// Offer a record for the final output.
    ///
    /// Duplicates are checked first; an insubstantial record does not reserve
    /// its fingerprint.
    pub fn admit(&self, record: TaskRecord) -> Admission {
        let fingerprint = record.fingerprint();

        let mut state = self.lock();
        if state.seen.contains(&fingerprint) {
            return Admission::Duplicate(fingerprint);
        }
        if !self.thresholds.is_substantial(&record.title) {
            return Admission::Insubstantial;
        }
        state.seen.insert(fingerprint);
        state.records.push(record);
        Admission::Accepted
    }

    /// Number of accepted records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the accepted records, in admission order.
    #[must_use]
    pub fn into_records(self) -> Vec<TaskRecord> {
        self.state
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .records
    }

    /// Copy of the accepted records so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TaskRecord> {
        self.lock().records.clone()
    }

    fn lock(&self) -> MutexGuard<'_, DedupState> {
        // a panicking scan task must not take the whole run down with it
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
