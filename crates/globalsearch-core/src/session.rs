//! Search session aggregates.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SearchFailure;
use crate::matches::SearchMatch;

/// Mutable aggregate state of one in-flight search.
///
/// Owned exclusively by the worker driving the search; consumers only ever
/// see the immutable [`SearchMatch`] values delivered to them and the final
/// [`SearchSummary`] snapshot.
#[derive(Debug)]
pub struct SearchSession {
    /// Matches in discovery order.
    matches: Vec<SearchMatch>,
    /// Match count per file, keyed by absolute path in first-match order.
    file_counts: IndexMap<PathBuf, usize>,
    /// Per-path failures in discovery order.
    failures: Vec<SearchFailure>,
    /// When the search started.
    started_at: Instant,
}

impl SearchSession {
    /// Create a new empty session.
    pub fn new() -> Self {
        Self {
            matches: Vec::new(),
            file_counts: IndexMap::new(),
            failures: Vec::new(),
            started_at: Instant::now(),
        }
    }

    /// Record a match, keeping the per-file and total counts consistent.
    pub fn record_match(&mut self, m: SearchMatch) {
        *self.file_counts.entry(m.file_path.clone()).or_insert(0) += 1;
        self.matches.push(m);
    }

    /// Record a per-path failure.
    pub fn record_failure(&mut self, failure: SearchFailure) {
        self.failures.push(failure);
    }

    /// Matches recorded so far, in discovery order.
    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    /// Per-file match counts, keyed by absolute path.
    pub fn file_counts(&self) -> &IndexMap<PathBuf, usize> {
        &self.file_counts
    }

    /// Failures recorded so far.
    pub fn failures(&self) -> &[SearchFailure] {
        &self.failures
    }

    /// Total number of matches.
    pub fn total_matches(&self) -> usize {
        self.matches.len()
    }

    /// Number of distinct files with at least one match.
    pub fn distinct_files(&self) -> usize {
        self.file_counts.len()
    }

    /// Check if the session has no matches.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Snapshot the aggregate counts.
    pub fn summary(&self) -> SearchSummary {
        SearchSummary {
            distinct_files: self.distinct_files(),
            total_matches: self.total_matches(),
            failure_count: self.failures.len(),
            elapsed: self.started_at.elapsed(),
        }
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Final aggregate counts of a completed search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSummary {
    /// Number of distinct files with at least one match.
    pub distinct_files: usize,
    /// Total number of matches delivered.
    pub total_matches: usize,
    /// Number of per-path failures encountered.
    pub failure_count: usize,
    /// Time the search took.
    pub elapsed: Duration,
}
