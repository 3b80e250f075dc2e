//! Search coordination: worker scheduling, incremental delivery, cancellation.

use std::fs;
use std::path::Path;

use compact_str::CompactString;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use globalsearch_core::{
    FileContent, SearchConfig, SearchFailure, SearchMatch, SearchSession, SearchSummary,
};

use crate::scanner::LineScanner;
use crate::walker::FileWalker;

/// Default channel buffer size for search event delivery.
pub const SEARCH_CHANNEL_SIZE: usize = 100;

/// Event sent through the channel during a search.
///
/// Matches arrive in discovery order, one event per match, as soon as each
/// is found. Failures are non-fatal and interleave with matches. `Complete`
/// is always the final event of an uncancelled search.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// A match was found.
    Match(SearchMatch),
    /// A file or directory could not be read; the search continues.
    Failure(SearchFailure),
    /// The search finished, with final aggregate counts.
    Complete(SearchSummary),
}

/// Owns at most one in-flight search and its cancellation handle.
///
/// Starting a new search cancels the outstanding one: the superseded
/// worker stops promptly and delivers no further events, including no
/// `Complete`. Matches already delivered are never retracted.
#[derive(Debug, Default)]
pub struct SearchCoordinator {
    active: Option<CancellationToken>,
}

impl SearchCoordinator {
    /// Create a coordinator with no active search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a search, cancelling any search still in flight.
    ///
    /// Must be called within a tokio runtime. The blocking traversal and
    /// file reads run on a dedicated worker; the caller only consumes the
    /// returned channel.
    pub fn start(&mut self, config: SearchConfig) -> mpsc::Receiver<SearchEvent> {
        self.cancel();
        let token = CancellationToken::new();
        self.active = Some(token.clone());
        spawn_search(config, token)
    }

    /// Cancel the in-flight search, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.active.take() {
            token.cancel();
        }
    }
}

impl Drop for SearchCoordinator {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start a one-shot search without a coordinator.
///
/// Dropping the receiver stops the worker at the next delivery attempt.
pub fn start_search(config: SearchConfig) -> mpsc::Receiver<SearchEvent> {
    spawn_search(config, CancellationToken::new())
}

fn spawn_search(config: SearchConfig, token: CancellationToken) -> mpsc::Receiver<SearchEvent> {
    let (tx, rx) = mpsc::channel(SEARCH_CHANNEL_SIZE);

    if config.query.is_empty() {
        // Blank query: no traversal, immediate completion with zero counts.
        let summary = SearchSession::new().summary();
        tokio::spawn(async move {
            let _ = tx.send(SearchEvent::Complete(summary)).await;
        });
        return rx;
    }

    tokio::spawn(async move {
        let worker = tokio::task::spawn_blocking(move || run_search(&config, &token, &tx));
        if let Err(err) = worker.await {
            tracing::warn!("search worker failed: {err}");
        }
    });

    rx
}

/// Drive the walker over the scanner on the blocking worker.
fn run_search(config: &SearchConfig, token: &CancellationToken, tx: &mpsc::Sender<SearchEvent>) {
    let mut session = SearchSession::new();
    let scanner = LineScanner::new(&config.query);

    tracing::debug!(root = %config.root.display(), query = %config.query, "search started");

    // An invalid root is tolerated: complete with zero results.
    let root = match config.root.canonicalize() {
        Ok(path) if path.is_dir() => path,
        _ => {
            let _ = tx.blocking_send(SearchEvent::Complete(session.summary()));
            return;
        }
    };

    for entry in FileWalker::new(&root, config) {
        if token.is_cancelled() {
            tracing::debug!("search cancelled");
            return;
        }
        let delivered = match entry {
            Ok(path) => scan_file(&path, &scanner, &mut session, tx),
            Err(failure) => deliver_failure(failure, &mut session, tx),
        };
        if !delivered {
            // Receiver dropped; nobody is listening anymore.
            return;
        }
    }

    if token.is_cancelled() {
        tracing::debug!("search cancelled");
        return;
    }

    let summary = session.summary();
    tracing::debug!(
        matches = summary.total_matches,
        files = summary.distinct_files,
        failures = summary.failure_count,
        "search complete"
    );
    let _ = tx.blocking_send(SearchEvent::Complete(summary));
}

/// Scan one file and deliver its matches.
///
/// The file handle lives only for the single read; the content is then
/// shared by every match in the file. Returns false once the receiver is
/// gone.
fn scan_file(
    path: &Path,
    scanner: &LineScanner,
    session: &mut SearchSession,
    tx: &mpsc::Sender<SearchEvent>,
) -> bool {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => return deliver_failure(SearchFailure::from_io(path, &err), session, tx),
    };

    let content = FileContent::from(text);
    let file_name = path
        .file_name()
        .map(|n| CompactString::new(n.to_string_lossy()))
        .unwrap_or_default();

    for line_match in scanner.matches(content.as_str()) {
        let m = SearchMatch {
            file_path: path.to_path_buf(),
            file_name: file_name.clone(),
            content: content.clone(),
            line_text: line_match.line_text,
            line_number: line_match.line_number,
            start_index: line_match.start_index,
            end_index: line_match.end_index,
        };
        session.record_match(m.clone());
        if tx.blocking_send(SearchEvent::Match(m)).is_err() {
            return false;
        }
    }
    true
}

/// Record a per-path failure and deliver it as a distinct event.
fn deliver_failure(
    failure: SearchFailure,
    session: &mut SearchSession,
    tx: &mpsc::Sender<SearchEvent>,
) -> bool {
    tracing::warn!(path = %failure.path.display(), "{failure}");
    session.record_failure(failure.clone());
    tx.blocking_send(SearchEvent::Failure(failure)).is_ok()
}
