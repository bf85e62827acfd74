//! Utility modules

pub mod grapheme;
pub mod text;

pub use grapheme::{grapheme_boundary_left, grapheme_boundary_right, word_segments, WordSegment};
pub use text::{
    char_col_to_visual_col, char_type, is_line_terminator, is_paragraph_terminator,
    is_punctuation, visual_col_to_char_col, CharType, TABULATOR_WIDTH,
};
