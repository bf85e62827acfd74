//! Selection message handlers (keyboard navigation, enclosing selection,
//! pointer interaction)

use crate::commands::Cmd;
use crate::editable::{
    selections_for_interaction, Granularity, TextBuffer, TextRange, TextSelection,
};
use crate::messages::Msg;
use crate::model::EditorModel;

/// Handle selection messages
pub fn update_selection(model: &mut EditorModel, msg: Msg) -> Option<Cmd> {
    if !model.config.selectable {
        tracing::debug!(?msg, "ignoring selection message: text is not selectable");
        return None;
    }

    match msg {
        Msg::Move(intent) => {
            let moved = model.navigator().destinations(&model.selections, intent);
            if !model.set_selections(moved) {
                tracing::trace!(?intent, "no selection can move");
                return None;
            }
            let caret = model.last_selection().head();
            Some(Cmd::selection_changed(Some(caret)))
        }

        Msg::SelectAll => {
            let selection = model.navigator().select_all()?;
            model.selections = vec![selection];
            Some(Cmd::batch(vec![
                Cmd::UpdateTypingAttributes { at: None },
                Cmd::LayoutGutter,
                Cmd::Redraw,
            ]))
        }

        Msg::SelectWord => select_enclosing(model, Granularity::Word),
        Msg::SelectLine => select_enclosing(model, Granularity::Line),
        Msg::SelectParagraph => select_enclosing(model, Granularity::Paragraph),

        Msg::SetSelectedRange { location, length } => {
            let range = match TextRange::from_raw(location, length, model.buffer.len_chars()) {
                Ok(range) => range,
                Err(e) => {
                    tracing::warn!("Invalid range: {}", e);
                    return None;
                }
            };
            model.selections = vec![TextSelection::new(range)];
            Some(Cmd::batch(vec![
                Cmd::UpdateTypingAttributes {
                    at: Some(range.location),
                },
                Cmd::LayoutGutter,
                Cmd::Redraw,
            ]))
        }

        Msg::Interact(interaction) => {
            let selections = selections_for_interaction(
                &model.buffer,
                &model.layout,
                &model.selections,
                &interaction,
            );
            model.set_selections(selections);
            // Highlights refresh even when the point missed the text
            Some(Cmd::batch(vec![
                Cmd::UpdateTypingAttributes {
                    at: Some(model.last_selection().head()),
                },
                Cmd::LayoutGutter,
                Cmd::Redraw,
            ]))
        }

        other => {
            tracing::debug!(msg = ?other, "not a selection message");
            None
        }
    }
}

fn select_enclosing(model: &mut EditorModel, granularity: Granularity) -> Option<Cmd> {
    let enclosing = model.last_selection();
    let selection = model.navigator().select_enclosing(&enclosing, granularity)?;
    let at = selection.start();
    model.selections = vec![selection];
    Some(Cmd::batch(vec![
        Cmd::UpdateTypingAttributes { at: Some(at) },
        Cmd::LayoutGutter,
        Cmd::Redraw,
    ]))
}
