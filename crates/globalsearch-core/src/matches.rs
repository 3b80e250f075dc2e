//! Match records and shared file content.

use std::path::PathBuf;
use std::sync::Arc;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Immutable handle to the full text of a searched file.
///
/// The content is read once per file and shared by every match in that
/// file, so a consumer can show full-file context later without the engine
/// duplicating a growing string per match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent(Arc<str>);

impl FileContent {
    /// Create a new content handle.
    pub fn new(content: impl Into<Arc<str>>) -> Self {
        Self(content.into())
    }

    /// Get the full text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get a line by 1-based number, if present.
    pub fn line(&self, number: u32) -> Option<&str> {
        if number == 0 {
            return None;
        }
        self.0.lines().nth(number as usize - 1)
    }

    /// Length of the content in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for FileContent {
    fn from(content: String) -> Self {
        Self(content.into())
    }
}

/// One line, in one file, where the query occurs.
///
/// Only the first occurrence per line is recorded, even when the query
/// occurs several times in that line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    /// Absolute path of the containing file.
    pub file_path: PathBuf,

    /// Display name (basename of `file_path`).
    pub file_name: CompactString,

    /// Full text of the containing file, shared across its matches.
    pub content: FileContent,

    /// Trimmed text of the matching line.
    pub line_text: String,

    /// 1-based line number within the file.
    pub line_number: u32,

    /// Start of the match as a char offset into `line_text`.
    pub start_index: usize,

    /// End of the match (half-open char offset into `line_text`).
    pub end_index: usize,
}

impl SearchMatch {
    /// The matched slice of `line_text`.
    ///
    /// Equals the query under case-insensitive comparison.
    pub fn matched_text(&self) -> &str {
        let start = byte_offset(&self.line_text, self.start_index);
        let end = byte_offset(&self.line_text, self.end_index);
        &self.line_text[start..end]
    }
}

/// Convert a char offset into a byte offset, clamping at the end.
fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}
