//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! They are advisory: the host (renderer, typing-attribute store) decides how
//! to carry them out.

use serde::Serialize;

/// Side effects requested by `update`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a full redraw of the text view
    Redraw,
    /// Scroll so the (last) selection is visible
    ScrollToSelection,
    /// Line numbers or line heights may have changed
    LayoutGutter,
    /// Refresh typing attributes from the text at `at` (None clears them)
    UpdateTypingAttributes { at: Option<usize> },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Commands emitted after the selection changed
    pub fn selection_changed(caret: Option<usize>) -> Self {
        Cmd::Batch(vec![
            Cmd::UpdateTypingAttributes { at: caret },
            Cmd::ScrollToSelection,
            Cmd::Redraw,
        ])
    }

    /// Commands emitted after the text changed
    pub fn text_changed(caret: Option<usize>) -> Self {
        Cmd::Batch(vec![
            Cmd::UpdateTypingAttributes { at: caret },
            Cmd::LayoutGutter,
            Cmd::ScrollToSelection,
            Cmd::Redraw,
        ])
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::ScrollToSelection => true,
            Cmd::LayoutGutter => true,
            Cmd::UpdateTypingAttributes { .. } => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            cmd => vec![cmd],
        }
    }
}
