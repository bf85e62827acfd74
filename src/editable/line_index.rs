//! Line geometry derived from a buffer snapshot.
//!
//! Nothing is cached: every query scans forward from the start of the buffer,
//! asking the buffer's terminator detection for one line at a time. Callers
//! make one query per user command, and no offsets survive across edits.

use serde::{Deserialize, Serialize};

use super::buffer::TextBuffer;
use crate::error::EditError;

/// Boundaries of one line, in char offsets.
///
/// `content_end` excludes the line terminator, `end` includes it. For the last
/// line of a buffer without a trailing terminator the two are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpan {
    pub start: usize,
    pub content_end: usize,
    pub end: usize,
}

impl LineSpan {
    pub const fn new(start: usize, content_end: usize, end: usize) -> Self {
        Self {
            start,
            content_end,
            end,
        }
    }

    /// Length of the line content (excluding the terminator)
    pub const fn content_len(&self) -> usize {
        self.content_end - self.start
    }

    pub const fn has_terminator(&self) -> bool {
        self.end > self.content_end
    }

    /// Membership test used for caret lines: `start <= offset < end`
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Line lookups over a borrowed buffer.
#[derive(Debug, Clone, Copy)]
pub struct LineIndex<'a, B: TextBuffer + ?Sized> {
    buffer: &'a B,
}

impl<'a, B: TextBuffer + ?Sized> LineIndex<'a, B> {
    pub fn new(buffer: &'a B) -> Self {
        Self { buffer }
    }

    /// Iterate over every line span from the start of the buffer
    pub fn spans(&self) -> LineSpans<'a, B> {
        LineSpans {
            buffer: self.buffer,
            next_start: Some(0),
        }
    }

    /// Number of lines (always >= 1). A final terminator does not start a
    /// new line.
    pub fn line_count(&self) -> usize {
        self.spans().count()
    }

    /// Line containing `offset`.
    ///
    /// An offset on a line boundary belongs to the line it starts. Offsets at
    /// or past the end of the buffer belong to the last line.
    pub fn line_index_at(&self, offset: usize) -> usize {
        let mut last = 0;
        for (idx, span) in self.spans().enumerate() {
            if span.contains(offset) {
                return idx;
            }
            last = idx;
        }
        last
    }

    /// Span of line number `line`
    pub fn line_span(&self, line: usize) -> Result<LineSpan, EditError> {
        let mut count = 0;
        for (idx, span) in self.spans().enumerate() {
            if idx == line {
                return Ok(span);
            }
            count = idx + 1;
        }
        Err(EditError::LineOutOfRange {
            line,
            line_count: count,
        })
    }

    /// Spans of lines `first..=last`, in order
    pub fn line_spans_in_range(&self, first: usize, last: usize) -> Result<Vec<LineSpan>, EditError> {
        let (first, last) = if first <= last { (first, last) } else { (last, first) };
        let mut out = Vec::new();
        let mut count = 0;
        for (idx, span) in self.spans().enumerate() {
            count = idx + 1;
            if idx > last {
                break;
            }
            if idx >= first {
                out.push(span);
            }
        }
        if count <= last {
            return Err(EditError::LineOutOfRange {
                line: last,
                line_count: count,
            });
        }
        Ok(out)
    }

    /// Span of the line containing `offset`
    pub fn span_at(&self, offset: usize) -> LineSpan {
        let mut last = LineSpan::default();
        for span in self.spans() {
            if span.contains(offset) {
                return span;
            }
            last = span;
        }
        last
    }
}

/// Forward scan over line spans.
#[derive(Debug, Clone)]
pub struct LineSpans<'a, B: TextBuffer + ?Sized> {
    buffer: &'a B,
    next_start: Option<usize>,
}

impl<B: TextBuffer + ?Sized> Iterator for LineSpans<'_, B> {
    type Item = LineSpan;

    fn next(&mut self) -> Option<LineSpan> {
        let start = self.next_start?;
        let span = self.buffer.line_boundaries(start);
        // The scan stops at the end of the buffer, even right after a terminator
        self.next_start = if span.has_terminator()
            && span.end > start
            && span.end < self.buffer.len_chars()
        {
            Some(span.end)
        } else {
            None
        };
        Some(span)
    }
}
