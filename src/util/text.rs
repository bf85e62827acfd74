//! Character classification and column helpers

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '/' | ':'
            | ','
            | '.'
            | '-'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ';'
            | '"'
            | '\''
            | '<'
            | '>'
            | '='
            | '+'
            | '*'
            | '&'
            | '|'
            | '!'
            | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '~'
            | '`'
            | '\\'
            | '?'
    )
}

/// Character type for word navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    /// Whitespace characters
    Whitespace,
    /// Alphanumeric characters (word characters)
    WordChar,
    /// Punctuation and symbols
    Punctuation,
}

/// Get the character type for word navigation
pub fn char_type(ch: char) -> CharType {
    if ch.is_whitespace() {
        CharType::Whitespace
    } else if is_punctuation(ch) || (ch.is_ascii_punctuation() && ch != '_') {
        CharType::Punctuation
    } else {
        CharType::WordChar
    }
}

/// Line terminators recognised by the buffer.
///
/// Matches the set ropey splits lines on: LF, VT, FF, CR, NEL,
/// LINE SEPARATOR and PARAGRAPH SEPARATOR. CRLF is handled by callers.
pub fn is_line_terminator(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\u{000B}' | '\u{000C}' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Terminators that also end a paragraph.
///
/// LINE SEPARATOR breaks a line inside a paragraph, everything else ends both.
pub fn is_paragraph_terminator(ch: char) -> bool {
    is_line_terminator(ch) && ch != '\u{2028}'
}

/// Default tab width for visual column calculations
pub const TABULATOR_WIDTH: usize = 4;

/// Convert a visual column (screen position) to character column.
/// Accounts for tab expansion when converting screen position to character index.
pub fn visual_col_to_char_col(text: &str, visual_col: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    let mut current_visual = 0;
    let mut char_col = 0;

    for ch in text.chars() {
        if current_visual >= visual_col {
            return char_col;
        }

        if ch == '\t' {
            let width = tab_width - (current_visual % tab_width);
            // Land on whichever side of the tab is closer
            if visual_col < current_visual + width.div_ceil(2) {
                return char_col;
            }
            current_visual += width;
        } else {
            current_visual += 1;
        }
        char_col += 1;
    }

    char_col
}

/// Convert a character column to visual column (screen position).
/// Accounts for tab expansion when converting character index to screen position.
pub fn char_col_to_visual_col(text: &str, char_col: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    let mut visual_col = 0;

    for (i, ch) in text.chars().enumerate() {
        if i >= char_col {
            break;
        }

        if ch == '\t' {
            visual_col += tab_width - (visual_col % tab_width);
        } else {
            visual_col += 1;
        }
    }

    visual_col
}
