//! Grapheme cluster and word boundary helpers.
//!
//! The buffer is addressed in chars (Unicode scalar values), but caret
//! movement steps over whole grapheme clusters (e + combining acute, ZWJ emoji
//! sequences, regional indicator pairs) and word movement follows Unicode word
//! segmentation. All offsets here are char columns within a single line.

use unicode_segmentation::UnicodeSegmentation;

use super::text::{char_type, CharType};

/// A segment of a line produced by word segmentation, in char columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSegment {
    pub start: usize,
    pub end: usize,
    pub kind: CharType,
}

impl WordSegment {
    pub fn is_word(&self) -> bool {
        self.kind == CharType::WordChar
    }
}

/// Char column of the grapheme boundary immediately before `col`.
///
/// Returns 0 at the start of the text. A column inside a cluster snaps to the
/// start of that cluster.
pub fn grapheme_boundary_left(text: &str, col: usize) -> usize {
    if col == 0 {
        return 0;
    }

    let mut result = 0;
    let mut char_idx = 0;
    for grapheme in text.graphemes(true) {
        if char_idx >= col {
            break;
        }
        result = char_idx;
        char_idx += grapheme.chars().count();
    }

    result
}

/// Char column of the grapheme boundary immediately after `col`.
///
/// Returns the text length (in chars) when `col` is at or past the end.
pub fn grapheme_boundary_right(text: &str, col: usize) -> usize {
    let mut char_idx = 0;
    for grapheme in text.graphemes(true) {
        let end = char_idx + grapheme.chars().count();
        if col < end {
            return end;
        }
        char_idx = end;
    }

    char_idx
}

/// Split a line into word-segmentation runs with char columns.
///
/// Each segment is classified by its first character, so `foo_bar` is one
/// word, `  ` is one whitespace run and `::` is punctuation.
pub fn word_segments(text: &str) -> Vec<WordSegment> {
    let mut segments = Vec::new();
    let mut col = 0;
    for word in text.split_word_bounds() {
        let len = word.chars().count();
        let kind = word.chars().next().map(char_type).unwrap_or(CharType::Whitespace);
        segments.push(WordSegment {
            start: col,
            end: col + len,
            kind,
        });
        col += len;
    }
    segments
}
