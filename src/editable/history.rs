//! Edit history (undo/redo) grouped per logical operation.
//!
//! The transformer brackets each indent/outdent with `begin_group` /
//! `end_group` on an [`UndoSink`]. [`EditHistory`] is the in-crate sink: it
//! keeps one [`EditGroup`] per bracket and drops groups that recorded nothing.

use serde::{Deserialize, Serialize};

use super::buffer::TextBufferMut;
use super::range::TextRange;
use super::selection::TextSelection;
use crate::error::EditError;

/// A single replacement applied to the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// Char offset where the edit occurred
    pub location: usize,
    /// Text that was removed (empty for pure inserts)
    pub deleted: String,
    /// Text that was inserted (empty for pure deletes)
    pub inserted: String,
}

impl Edit {
    pub fn insert(location: usize, text: impl Into<String>) -> Self {
        Self {
            location,
            deleted: String::new(),
            inserted: text.into(),
        }
    }

    pub fn delete(location: usize, text: impl Into<String>) -> Self {
        Self {
            location,
            deleted: text.into(),
            inserted: String::new(),
        }
    }

    /// Get the inverse edit for undo
    pub fn inverse(&self) -> Self {
        Self {
            location: self.location,
            deleted: self.inserted.clone(),
            inserted: self.deleted.clone(),
        }
    }

    /// Apply this edit to a buffer
    pub fn apply<B: TextBufferMut>(&self, buffer: &mut B) -> Result<(), EditError> {
        let range = TextRange::new(self.location, self.deleted.chars().count());
        buffer.replace(range, &self.inserted)
    }

    /// Char count delta this edit introduces
    pub fn delta(&self) -> isize {
        self.inserted.chars().count() as isize - self.deleted.chars().count() as isize
    }
}

/// The undo boundary collaborator.
pub trait UndoSink {
    /// Open a group; everything recorded until `end_group` undoes as one step
    fn begin_group(&mut self, selection_before: &TextSelection);

    fn record(&mut self, edit: Edit);

    /// Close the open group
    fn end_group(&mut self, selection_after: &TextSelection);
}

/// Sink that discards everything, for callers without undo support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUndo;

impl UndoSink for NoUndo {
    fn begin_group(&mut self, _selection_before: &TextSelection) {}
    fn record(&mut self, _edit: Edit) {}
    fn end_group(&mut self, _selection_after: &TextSelection) {}
}

/// Edits of one logical operation, in application order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditGroup {
    pub edits: Vec<Edit>,
    pub selection_before: TextSelection,
    pub selection_after: TextSelection,
}

impl EditGroup {
    /// Get the inverse group for undo (edits reversed and inverted)
    pub fn inverse(&self) -> Self {
        Self {
            edits: self.edits.iter().rev().map(Edit::inverse).collect(),
            selection_before: self.selection_after.clone(),
            selection_after: self.selection_before.clone(),
        }
    }

    /// Apply every edit inside a single transaction
    pub fn apply<B: TextBufferMut>(&self, buffer: &mut B) -> Result<(), EditError> {
        buffer
            .perform_transaction(|tx| {
                for edit in &self.edits {
                    let range = TextRange::new(edit.location, edit.deleted.chars().count());
                    tx.replace(range, &edit.inserted)?;
                }
                Ok(())
            })
            .map(|_| ())
    }
}

/// Edit history with undo/redo stacks of groups.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: Vec<EditGroup>,
    redo_stack: Vec<EditGroup>,
    open: Option<EditGroup>,
    max_size: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    /// Create a new edit history with default max size
    pub fn new() -> Self {
        Self::with_max_size(1000)
    }

    /// Create a new edit history with specified max size
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            open: None,
            max_size,
        }
    }

    /// Push a finished group onto the undo stack (clears redo stack)
    pub fn push(&mut self, group: EditGroup) {
        self.redo_stack.clear();
        self.undo_stack.push(group);

        // Trim if exceeded max size
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
    }

    /// Pop a group from the undo stack (its inverse moves to the redo stack)
    pub fn pop_undo(&mut self) -> Option<EditGroup> {
        let group = self.undo_stack.pop()?;
        self.redo_stack.push(group.inverse());
        Some(group)
    }

    /// Pop a group from the redo stack (its inverse moves back to the undo stack)
    pub fn pop_redo(&mut self) -> Option<EditGroup> {
        let group = self.redo_stack.pop()?;
        self.undo_stack.push(group.inverse());
        Some(group)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open = None;
    }

    /// Get the number of groups in the undo stack
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of groups in the redo stack
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

impl UndoSink for EditHistory {
    fn begin_group(&mut self, selection_before: &TextSelection) {
        if self.open.is_some() {
            tracing::warn!("begin_group called with a group already open; merging");
            return;
        }
        self.open = Some(EditGroup {
            edits: Vec::new(),
            selection_before: selection_before.clone(),
            selection_after: selection_before.clone(),
        });
    }

    fn record(&mut self, edit: Edit) {
        match self.open.as_mut() {
            Some(group) => group.edits.push(edit),
            None => tracing::warn!(location = edit.location, "edit recorded outside a group"),
        }
    }

    fn end_group(&mut self, selection_after: &TextSelection) {
        let Some(mut group) = self.open.take() else {
            return;
        };
        if group.edits.is_empty() {
            return;
        }
        group.selection_after = selection_after.clone();
        self.push(group);
    }
}
