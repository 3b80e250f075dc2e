//! Streaming directory search engine for globalsearch.
//!
//! This crate walks a directory tree, scans text files line by line for a
//! case-insensitive substring, and streams each match to the consumer as it
//! is found.
//!
//! # Overview
//!
//! Three pieces, composed bottom-up:
//!
//! - [`FileWalker`] — lazy depth-first traversal yielding regular files in
//!   a deterministic order
//! - [`LineScanner`] — per-file line scanning with first-occurrence match
//!   extraction
//! - [`SearchCoordinator`] — drives both on a dedicated worker and delivers
//!   [`SearchEvent`]s over a channel, with cooperative cancellation
//!
//! # Example
//!
//! ```rust,no_run
//! use globalsearch_engine::{start_search, SearchConfig, SearchEvent};
//!
//! # async fn run() {
//! let mut rx = start_search(SearchConfig::new("/path/to/search", "hello"));
//!
//! while let Some(event) = rx.recv().await {
//!     match event {
//!         SearchEvent::Match(m) => {
//!             println!("{}:{}: {}", m.file_path.display(), m.line_number, m.line_text);
//!         }
//!         SearchEvent::Failure(f) => eprintln!("skipped: {f}"),
//!         SearchEvent::Complete(summary) => {
//!             println!("{} matches in {} files", summary.total_matches, summary.distinct_files);
//!         }
//!     }
//! }
//! # }
//! ```

mod coordinator;
mod scanner;
mod walker;

pub use coordinator::{start_search, SearchCoordinator, SearchEvent, SEARCH_CHANNEL_SIZE};
pub use scanner::{LineMatch, LineScanner};
pub use walker::FileWalker;

// Re-export core types for convenience
pub use globalsearch_core::{
    FailureKind, FileContent, SearchConfig, SearchFailure, SearchMatch, SearchSession,
    SearchSummary,
};
