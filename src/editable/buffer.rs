//! Text buffer traits and the rope-backed implementation.
//!
//! `TextBuffer` is the read-only view the line index and navigator work
//! against; `TextBufferMut` adds replacement and grouped transactions for the
//! indent/outdent transformer. Offsets are char indices throughout.

use ropey::Rope;
use std::ops::Range;

use super::history::Edit;
use super::line_index::LineSpan;
use super::range::TextRange;
use crate::error::EditError;
use crate::util::is_line_terminator;

/// Read-only view into a text buffer for navigation and line geometry.
pub trait TextBuffer {
    /// Total length in characters
    fn len_chars(&self) -> usize;

    /// Check if buffer is empty
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Get character at offset, None if out of bounds
    fn char_at(&self, offset: usize) -> Option<char>;

    /// Get slice of text as String (by character indices, clamped to the buffer)
    fn slice(&self, range: Range<usize>) -> String;

    /// Get full content as String (may be expensive for large buffers)
    fn content(&self) -> String;

    /// Boundaries of the line containing `offset`.
    ///
    /// This is the terminator detection the line index scans with. Offsets past
    /// the end are clamped. A buffer ending in a terminator reports an empty
    /// span at `len_chars()`; `LineIndex` does not count it as a line.
    fn line_boundaries(&self, offset: usize) -> LineSpan;
}

/// Mutable buffer operations with all-or-nothing transactions.
pub trait TextBufferMut: TextBuffer + Sized {
    /// Saved state that `restore` can roll back to
    type Checkpoint;

    /// Replace the chars in `range` with `text`
    fn replace(&mut self, range: TextRange, text: &str) -> Result<(), EditError>;

    /// Insert text at character offset
    fn insert(&mut self, offset: usize, text: &str) -> Result<(), EditError> {
        self.replace(TextRange::caret(offset), text)
    }

    /// Remove text in character range
    fn remove(&mut self, range: TextRange) -> Result<(), EditError> {
        self.replace(range, "")
    }

    fn checkpoint(&self) -> Self::Checkpoint;

    fn restore(&mut self, checkpoint: Self::Checkpoint);

    /// Run `body` as one grouped edit.
    ///
    /// Either every replacement made through the transaction lands, or the
    /// buffer is restored to its state before the call and the error is
    /// returned. On success the applied edits are returned in application order.
    fn perform_transaction<F>(&mut self, body: F) -> Result<Vec<Edit>, EditError>
    where
        F: FnOnce(&mut Transaction<'_, Self>) -> Result<(), EditError>,
    {
        let checkpoint = self.checkpoint();
        let mut tx = Transaction {
            buffer: &mut *self,
            edits: Vec::new(),
        };
        let result = body(&mut tx);
        let edits = tx.edits;

        match result {
            Ok(()) => Ok(edits),
            Err(err) => {
                tracing::debug!(
                    applied = edits.len(),
                    "rolling back transaction: {}",
                    err
                );
                self.restore(checkpoint);
                Err(err)
            }
        }
    }
}

/// Handle for making replacements inside `perform_transaction`.
pub struct Transaction<'a, B: TextBufferMut> {
    buffer: &'a mut B,
    edits: Vec<Edit>,
}

impl<B: TextBufferMut> Transaction<'_, B> {
    /// Current (partially edited) buffer state
    pub fn buffer(&self) -> &B {
        &*self.buffer
    }

    pub fn replace(&mut self, range: TextRange, text: &str) -> Result<(), EditError> {
        range.check_within(self.buffer.len_chars())?;
        let deleted = self.buffer.slice(range.as_range());
        self.buffer.replace(range, text)?;
        self.edits.push(Edit {
            location: range.location,
            deleted,
            inserted: text.to_string(),
        });
        Ok(())
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), EditError> {
        self.replace(TextRange::caret(offset), text)
    }

    pub fn remove(&mut self, range: TextRange) -> Result<(), EditError> {
        self.replace(range, "")
    }
}

// =============================================================================
// RopeBuffer - for multi-line document editing
// =============================================================================

/// TextBuffer implementation wrapping ropey::Rope.
#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a RopeBuffer from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    /// Access the underlying Rope for rope-specific operations
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// End of a line's content, given its start and terminated end
    fn content_end(&self, start: usize, end: usize) -> usize {
        if end == start {
            return end;
        }
        let last = self.rope.char(end - 1);
        if last == '\n' && end - start >= 2 && self.rope.char(end - 2) == '\r' {
            end - 2
        } else if is_line_terminator(last) {
            end - 1
        } else {
            end
        }
    }
}

impl From<Rope> for RopeBuffer {
    fn from(rope: Rope) -> Self {
        Self { rope }
    }
}

impl TextBuffer for RopeBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        if offset >= self.rope.len_chars() {
            return None;
        }
        Some(self.rope.char(offset))
    }

    fn slice(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    fn content(&self) -> String {
        self.rope.to_string()
    }

    fn line_boundaries(&self, offset: usize) -> LineSpan {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        let start = self.rope.line_to_char(line);
        let end = self.rope.line_to_char(line + 1);
        LineSpan::new(start, self.content_end(start, end), end)
    }
}

impl TextBufferMut for RopeBuffer {
    type Checkpoint = Rope;

    fn replace(&mut self, range: TextRange, text: &str) -> Result<(), EditError> {
        range.check_within(self.len_chars())?;
        if !range.is_empty() {
            self.rope.remove(range.as_range());
        }
        if !text.is_empty() {
            self.rope.insert(range.location, text);
        }
        Ok(())
    }

    fn checkpoint(&self) -> Rope {
        // Rope clones share nodes, so this is O(1)
        self.rope.clone()
    }

    fn restore(&mut self, checkpoint: Rope) {
        self.rope = checkpoint;
    }
}
