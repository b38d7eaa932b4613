//! Source location utilities for converting byte offsets to line numbers
//!
//! Tokens carry byte spans from the lexer. Diagnostics and parsed definitions
//! report 1-based line numbers, computed through this table.

use std::ops::Range;

/// Provides fast conversion from byte offsets to line numbers
#[derive(Debug, Clone)]
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl SourceLocation {
    /// Create a new SourceLocation from source text
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self { line_starts }
    }

    /// Convert a byte offset to a 1-based line number
    pub fn line_number(&self, byte_offset: usize) -> usize {
        let index = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        index + 1
    }

    /// Line number of the first byte of a span
    pub fn span_line(&self, span: &Range<usize>) -> usize {
        self.line_number(span.start)
    }

    /// Get the total number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the byte offset for the start of a 1-based line
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1)
            .and_then(|index| self.line_starts.get(index))
            .copied()
    }
}
