//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. The handlers
//! compute new state with the pure functions in `editable`, commit it to the
//! model in one step and return the side effects as a `Cmd`.

mod edit;
mod selection;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::EditorModel;

#[cfg(debug_assertions)]
use crate::tracing::SelectionSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use edit::update_edit;
pub use selection::update_selection;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut EditorModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut EditorModel, msg: Msg) -> Option<Cmd> {
    if msg.is_edit() {
        update_edit(model, msg)
    } else {
        update_selection(model, msg)
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after selection state and logs diffs for debugging.
#[cfg(debug_assertions)]
fn update_traced(model: &mut EditorModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = SelectionSnapshot::from_selections(&model.selections);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = SelectionSnapshot::from_selections(&model.selections);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "selection", %diff, "state changed");
    }

    model.assert_invariants_with_context(&msg_name);

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Move(Forward Word extend)`
/// - `SetSelectedRange(3+4)`
/// - `Indent`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Move(intent) => format!(
            "Move({:?} {:?}{}{})",
            intent.direction,
            intent.destination,
            if intent.extending { " extend" } else { "" },
            if intent.confined { " confined" } else { "" },
        ),
        Msg::SetSelectedRange { location, length } => {
            format!("SetSelectedRange({}+{})", location, length)
        }
        Msg::Interact(i) => format!(
            "Interact(({:.1},{:.1}){}{}{})",
            i.point.x,
            i.point.y,
            if i.extending { " extend" } else { "" },
            if i.dragging { " drag" } else { "" },
            if i.visual { " visual" } else { "" },
        ),
        other => format!("{:?}", other),
    }
}
