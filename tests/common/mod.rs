//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use token_selection::config::EditorConfig;
use token_selection::editable::{TextRange, TextSelection};
use token_selection::model::EditorModel;

/// Create a test model with given text and a caret at `offset`
pub fn test_model(text: &str, offset: usize) -> EditorModel {
    EditorModel::new(text, EditorConfig::default()).with_selection(TextSelection::caret(offset))
}

/// Create a test model with given text and a selection (anchor to head)
pub fn test_model_with_selection(text: &str, anchor: usize, head: usize) -> EditorModel {
    EditorModel::new(text, EditorConfig::default())
        .with_selection(TextSelection::from_anchor_head(anchor, head))
}

/// Create a test model with a custom config
pub fn test_model_with_config(text: &str, range: TextRange, config: EditorConfig) -> EditorModel {
    EditorModel::new(text, config).with_selection(TextSelection::new(range))
}

/// Helper to get buffer content as string
pub fn buffer_to_string(model: &EditorModel) -> String {
    model.text()
}

/// (anchor, head) of the primary selection
pub fn anchor_head(model: &EditorModel) -> (usize, usize) {
    let sel = model.primary_selection();
    (sel.anchor(), sel.head())
}

/// Config with a specific indent unit
pub fn config_with_unit(unit: &str) -> EditorConfig {
    EditorConfig {
        indent_unit: unit.to_string(),
        ..EditorConfig::default()
    }
}
