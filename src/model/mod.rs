//! Editor model - the complete state of one text view
//!
//! Following the Elm Architecture pattern, `update` is the only thing that
//! mutates this state; the core functions in `editable` compute new values
//! from it and `update` commits them wholesale.

use crate::config::EditorConfig;
use crate::editable::{EditHistory, RopeBuffer, SelectionNavigator, TextBuffer, TextSelection};
use crate::layout::MonospaceLayout;

/// The complete editor model
#[derive(Debug, Clone)]
pub struct EditorModel {
    pub buffer: RopeBuffer,
    /// Current selections (never empty; the first is the primary one)
    pub selections: Vec<TextSelection>,
    pub config: EditorConfig,
    pub history: EditHistory,
    pub layout: MonospaceLayout,
}

impl Default for EditorModel {
    fn default() -> Self {
        Self::new("", EditorConfig::default())
    }
}

impl EditorModel {
    pub fn new(text: &str, config: EditorConfig) -> Self {
        let layout = MonospaceLayout {
            tab_width: config.tab_width.max(1),
            ..MonospaceLayout::default()
        };
        Self {
            buffer: RopeBuffer::from_text(text),
            selections: vec![TextSelection::caret(0)],
            config,
            history: EditHistory::new(),
            layout,
        }
    }

    /// Builder-style initial selection
    pub fn with_selection(mut self, selection: TextSelection) -> Self {
        self.selections = vec![selection];
        self
    }

    /// Full buffer content
    pub fn text(&self) -> String {
        self.buffer.content()
    }

    /// First selection; indent/outdent act on its span
    pub fn primary_selection(&self) -> TextSelection {
        self.selections.first().cloned().unwrap_or_default()
    }

    /// Last selection; select word/line/paragraph expand this one
    pub fn last_selection(&self) -> TextSelection {
        self.selections.last().cloned().unwrap_or_default()
    }

    /// Replace the selection set; an empty set leaves it unchanged
    pub fn set_selections(&mut self, selections: Vec<TextSelection>) -> bool {
        if selections.is_empty() {
            return false;
        }
        self.selections = selections;
        true
    }

    /// Navigator over the current buffer honoring the config
    pub fn navigator(&self) -> SelectionNavigator<'_, RopeBuffer> {
        SelectionNavigator::new(&self.buffer)
            .selectable(self.config.selectable)
            .tab_width(self.config.tab_width)
    }

    /// Check that every selection lies within the buffer (debug builds only)
    #[cfg(debug_assertions)]
    pub fn assert_invariants_with_context(&self, context: &str) {
        let len = self.buffer.len_chars();
        debug_assert!(!self.selections.is_empty(), "{}: selection set is empty", context);
        for (i, sel) in self.selections.iter().enumerate() {
            for range in &sel.ranges {
                debug_assert!(
                    range.end() <= len,
                    "{}: selection #{} range {:?} exceeds buffer length {}",
                    context,
                    i,
                    range,
                    len
                );
            }
        }
    }
}
