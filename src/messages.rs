//! Message types for the Elm-style architecture
//!
//! All selection and text changes flow through these message types.

use serde::{Deserialize, Serialize};

use crate::editable::{Destination, Direction, MovementIntent, PointerInteraction};

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    // === Keyboard navigation ===
    /// Move (or extend) every selection
    Move(MovementIntent),

    // === Enclosing selection ===
    SelectAll,
    /// Expand the last selection to word boundaries
    SelectWord,
    /// Expand the last selection to whole lines
    SelectLine,
    /// Expand the last selection to whole paragraphs
    SelectParagraph,
    /// Replace the selection with a raw, possibly invalid range
    SetSelectedRange { location: i64, length: i64 },

    // === Pointer ===
    Interact(PointerInteraction),

    // === Editing ===
    /// Indent the lines of the primary selection
    Indent,
    /// Outdent the lines of the primary selection
    Outdent,
    Undo,
    Redo,
}

impl Msg {
    /// Caret movement (selections collapse)
    pub fn move_by(direction: Direction, destination: Destination) -> Self {
        Msg::Move(MovementIntent::new(direction, destination))
    }

    /// Selection extension (anchors stay put)
    pub fn extend_by(direction: Direction, destination: Destination) -> Self {
        Msg::Move(MovementIntent::new(direction, destination).with_extending(true))
    }

    /// Movement stopping at the edge of the current line or paragraph
    pub fn move_within(direction: Direction, destination: Destination, extending: bool) -> Self {
        Msg::Move(
            MovementIntent::new(direction, destination)
                .with_extending(extending)
                .with_confined(true),
        )
    }

    /// Whether handling this message may change the text
    pub fn is_edit(&self) -> bool {
        matches!(self, Msg::Indent | Msg::Outdent | Msg::Undo | Msg::Redo)
    }
}
