//! Text edit message handlers (indent, outdent, undo, redo)

use crate::commands::Cmd;
use crate::editable::{indent_selection, outdent_selection, EditGroup, EditResult};
use crate::error::EditError;
use crate::messages::Msg;
use crate::model::EditorModel;

/// Handle editing messages
pub fn update_edit(model: &mut EditorModel, msg: Msg) -> Option<Cmd> {
    if !model.config.editable {
        tracing::debug!(?msg, "ignoring edit: {}", EditError::NotEditable);
        return None;
    }

    match msg {
        Msg::Indent => {
            let selection = model.primary_selection();
            let result = indent_selection(
                &mut model.buffer,
                &selection,
                &model.config.indent_unit,
                &mut model.history,
            );
            commit_edit(model, result)
        }

        Msg::Outdent => {
            let selection = model.primary_selection();
            let result = outdent_selection(
                &mut model.buffer,
                &selection,
                &model.config.indent_unit,
                &mut model.history,
            );
            commit_edit(model, result)
        }

        Msg::Undo => {
            let group = model.history.pop_undo()?;
            replay(model, group)
        }

        Msg::Redo => {
            let group = model.history.pop_redo()?;
            replay(model, group)
        }

        other => {
            tracing::debug!(msg = ?other, "not an edit message");
            None
        }
    }
}

fn commit_edit(model: &mut EditorModel, result: Result<EditResult, EditError>) -> Option<Cmd> {
    match result {
        Ok(result) if result.changed() => {
            let caret = result.selection.head();
            model.selections = vec![result.selection];
            Some(Cmd::text_changed(Some(caret)))
        }
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("edit rejected: {}", e);
            None
        }
    }
}

/// Revert `group` and restore the selection it started from
fn replay(model: &mut EditorModel, group: EditGroup) -> Option<Cmd> {
    if let Err(e) = group.inverse().apply(&mut model.buffer) {
        tracing::warn!("Failed to replay edit group: {}", e);
        return None;
    }
    let caret = group.selection_before.head();
    model.selections = vec![group.selection_before];
    Some(Cmd::text_changed(Some(caret)))
}
