//! Core types for globalsearch.
//!
//! This crate provides the fundamental data structures shared by the search
//! engine and its consumers: the search configuration, match records, the
//! shared file content handle, session aggregates, and the failure taxonomy.

mod config;
mod error;
mod matches;
mod session;

pub use config::{SearchConfig, SearchConfigBuilder};
pub use error::{FailureKind, SearchFailure};
pub use matches::{FileContent, SearchMatch};
pub use session::{SearchSession, SearchSummary};
