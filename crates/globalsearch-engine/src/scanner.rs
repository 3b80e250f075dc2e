//! Case-insensitive line scanning.

/// A match within a single line, before file identity is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    /// 1-based line number within the file.
    pub line_number: u32,
    /// Trimmed text of the matching line.
    pub line_text: String,
    /// Start of the match as a char offset into `line_text`.
    pub start_index: usize,
    /// End of the match (half-open char offset into `line_text`).
    pub end_index: usize,
}

/// Scans file content line by line for a case-insensitive substring.
///
/// Comparison lowercases both sides; the reported indices are computed on
/// the trimmed line. At most one match is produced per line: only the first
/// occurrence is reported, even when the query occurs several times in the
/// same line.
#[derive(Debug, Clone)]
pub struct LineScanner {
    query_lower: String,
    query_chars: usize,
}

impl LineScanner {
    /// Create a scanner for a query.
    pub fn new(query: &str) -> Self {
        Self {
            query_lower: query.to_lowercase(),
            query_chars: query.chars().count(),
        }
    }

    /// Check whether the query is empty (a scanner that never matches).
    pub fn is_empty(&self) -> bool {
        self.query_lower.is_empty()
    }

    /// Find the first occurrence of the query in one line.
    ///
    /// Returns the half-open char range within the trimmed line, or None
    /// when the line does not contain the query.
    pub fn scan_line(&self, line: &str) -> Option<(usize, usize)> {
        if self.is_empty() {
            return None;
        }
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();
        let byte_idx = lower.find(&self.query_lower)?;
        let start = lower[..byte_idx].chars().count();
        Some((start, start + self.query_chars))
    }

    /// Lazily scan content, yielding a [`LineMatch`] per matching line.
    pub fn matches<'a>(&'a self, content: &'a str) -> LineMatches<'a> {
        LineMatches {
            scanner: self,
            lines: content.lines(),
            line_number: 0,
        }
    }
}

/// Iterator over the matching lines of one file's content.
pub struct LineMatches<'a> {
    scanner: &'a LineScanner,
    lines: std::str::Lines<'a>,
    line_number: u32,
}

impl Iterator for LineMatches<'_> {
    type Item = LineMatch;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            self.line_number += 1;
            if let Some((start_index, end_index)) = self.scanner.scan_line(line) {
                return Some(LineMatch {
                    line_number: self.line_number,
                    line_text: line.trim().to_string(),
                    start_index,
                    end_index,
                });
            }
        }
        None
    }
}
