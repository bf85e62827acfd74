//! Selection and line-editing core.
//!
//! # Architecture
//!
//! The core components are:
//!
//! - [`TextBuffer`] / [`TextBufferMut`]: Traits abstracting over buffer implementations
//! - [`RopeBuffer`]: Buffer for multi-line documents (backed by `ropey::Rope`)
//! - [`LineIndex`]: Line boundaries computed from a buffer snapshot
//! - [`SelectionNavigator`]: Movement intents to new selections
//! - [`selections_for_interaction`]: Pointer events to new selections
//! - [`indent_selection`] / [`outdent_selection`]: Atomic multi-line edits
//! - [`EditHistory`]: Undo/redo groups, one per logical operation
//!
//! # Example
//!
//! ```
//! use token_selection::editable::{
//!     indent_selection, NoUndo, RopeBuffer, TextBuffer, TextRange, TextSelection,
//! };
//!
//! let mut buffer = RopeBuffer::from_text("ab\ncd\nef");
//! let selection = TextSelection::new(TextRange::new(1, 4));
//! let result = indent_selection(&mut buffer, &selection, "  ", &mut NoUndo).unwrap();
//!
//! assert_eq!(buffer.content(), "  ab\n  cd\nef");
//! assert_eq!(result.selection.span(), TextRange::new(0, 9));
//! ```

mod buffer;
mod history;
mod indent;
mod interaction;
mod line_index;
mod navigation;
mod range;
mod selection;

// Re-export main types
pub use buffer::{RopeBuffer, TextBuffer, TextBufferMut, Transaction};
pub use history::{Edit, EditGroup, EditHistory, NoUndo, UndoSink};
pub use indent::{
    affected_line_range, indent_selection, outdent_selection, validate_indent_unit, EditResult,
};
pub use interaction::{selections_for_interaction, PointerInteraction};
pub use line_index::{LineIndex, LineSpan, LineSpans};
pub use navigation::{Destination, Direction, MovementIntent, SelectionNavigator};
pub use range::TextRange;
pub use selection::{Affinity, Granularity, TextSelection};
