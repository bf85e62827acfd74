//! Line-based indent and outdent.
//!
//! Both operations work on the lines covered by a selection's overall span,
//! compute one edit per line start on the unmodified buffer, then apply the
//! edits from the highest offset down inside a single transaction so earlier
//! offsets stay valid. Each call records at most one undo group.

use super::buffer::{TextBuffer, TextBufferMut};
use super::history::{Edit, UndoSink};
use super::line_index::{LineIndex, LineSpan};
use super::range::TextRange;
use super::selection::TextSelection;
use crate::error::EditError;
use crate::util::is_line_terminator;

/// Outcome of an indent or outdent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    pub selection: TextSelection,
    /// Applied edits, in application order (empty when nothing changed)
    pub edits: Vec<Edit>,
}

impl EditResult {
    fn unchanged(selection: &TextSelection) -> Self {
        Self {
            selection: selection.clone(),
            edits: Vec::new(),
        }
    }

    pub fn changed(&self) -> bool {
        !self.edits.is_empty()
    }
}

/// Reject units that are empty or would split lines
pub fn validate_indent_unit(unit: &str) -> Result<(), EditError> {
    if unit.is_empty() || unit.chars().any(is_line_terminator) {
        return Err(EditError::InvalidIndentUnit(unit.to_string()));
    }
    Ok(())
}

/// Line numbers `(first, last)` an edit of `range` applies to.
///
/// A caret uses its own line. Otherwise the last line is the one holding the
/// final selected char, so a selection ending exactly at a line start leaves
/// that line alone.
pub fn affected_line_range<B: TextBuffer + ?Sized>(buffer: &B, range: TextRange) -> (usize, usize) {
    let index = LineIndex::new(buffer);
    let first = index.line_index_at(range.start());
    let last = if range.is_empty() {
        first
    } else {
        index.line_index_at(range.end() - 1)
    };
    (first, last)
}

/// Insert `unit` at the start of every line the selection touches.
pub fn indent_selection<B, U>(
    buffer: &mut B,
    selection: &TextSelection,
    unit: &str,
    undo: &mut U,
) -> Result<EditResult, EditError>
where
    B: TextBufferMut,
    U: UndoSink + ?Sized,
{
    validate_indent_unit(unit)?;
    let range = selection.span();
    range.check_within(buffer.len_chars())?;
    if buffer.is_empty() {
        return Ok(EditResult::unchanged(selection));
    }

    let (first, last) = affected_line_range(buffer, range);
    let spans = LineIndex::new(&*buffer).line_spans_in_range(first, last)?;

    undo.begin_group(selection);
    let applied = buffer.perform_transaction(|tx| {
        for span in spans.iter().rev() {
            tx.insert(span.start, unit)?;
        }
        Ok(())
    });
    let edits = match applied {
        Ok(edits) => edits,
        Err(err) => {
            undo.end_group(selection);
            return Err(err);
        }
    };

    let new_selection = if range.is_empty() {
        TextSelection::caret(range.location + unit.chars().count())
    } else {
        reselect_lines(buffer, first, last)?
    };

    commit(undo, edits, new_selection)
}

/// Remove one level of indentation from every line the selection touches.
///
/// A line starting with `unit` loses it; otherwise a single leading space is
/// removed; otherwise the line is left alone.
pub fn outdent_selection<B, U>(
    buffer: &mut B,
    selection: &TextSelection,
    unit: &str,
    undo: &mut U,
) -> Result<EditResult, EditError>
where
    B: TextBufferMut,
    U: UndoSink + ?Sized,
{
    validate_indent_unit(unit)?;
    let range = selection.span();
    range.check_within(buffer.len_chars())?;
    if buffer.is_empty() {
        return Ok(EditResult::unchanged(selection));
    }

    let (first, last) = affected_line_range(buffer, range);
    let spans = LineIndex::new(&*buffer).line_spans_in_range(first, last)?;
    let unit_len = unit.chars().count();

    let removals: Vec<(LineSpan, usize)> = spans
        .into_iter()
        .map(|span| {
            let prefix_end = (span.start + unit_len).min(span.content_end);
            let prefix = buffer.slice(span.start..prefix_end);
            let count = if prefix == unit {
                unit_len
            } else if prefix.starts_with(' ') {
                1
            } else {
                0
            };
            (span, count)
        })
        .collect();

    if removals.iter().all(|(_, count)| *count == 0) {
        tracing::trace!(first, last, "nothing to outdent");
        return Ok(EditResult::unchanged(selection));
    }

    undo.begin_group(selection);
    let applied = buffer.perform_transaction(|tx| {
        for (span, count) in removals.iter().rev() {
            if *count > 0 {
                tx.remove(TextRange::new(span.start, *count))?;
            }
        }
        Ok(())
    });
    let edits = match applied {
        Ok(edits) => edits,
        Err(err) => {
            undo.end_group(selection);
            return Err(err);
        }
    };

    let new_selection = if range.is_empty() {
        let (span, removed) = removals[0];
        TextSelection::caret(range.location.saturating_sub(removed).max(span.start))
    } else {
        reselect_lines(buffer, first, last)?
    };

    commit(undo, edits, new_selection)
}

/// Selection from the start of `first` to the content end of `last`
fn reselect_lines<B: TextBuffer + ?Sized>(buffer: &B, first: usize, last: usize) -> Result<TextSelection, EditError> {
    let spans = LineIndex::new(buffer).line_spans_in_range(first, last)?;
    let (Some(head), Some(tail)) = (spans.first(), spans.last()) else {
        return Err(EditError::LineOutOfRange {
            line: last,
            line_count: 0,
        });
    };
    Ok(TextSelection::new(TextRange::between(head.start, tail.content_end)))
}

fn commit<U: UndoSink + ?Sized>(
    undo: &mut U,
    edits: Vec<Edit>,
    selection: TextSelection,
) -> Result<EditResult, EditError> {
    for edit in &edits {
        undo.record(edit.clone());
    }
    undo.end_group(&selection);
    Ok(EditResult { selection, edits })
}
