//! Error types for selection and indentation operations.
//!
//! Most of these never reach the user: the update loop treats them as
//! "no change" and logs them. They exist so the core functions can reject bad
//! input before touching the buffer.

use thiserror::Error;

/// Reasons a selection or edit request could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The text view is read-only (or not selectable) for this request
    #[error("text is not editable")]
    NotEditable,

    /// A character offset lies beyond the end of the buffer
    #[error("offset {offset} is outside the buffer (length {len})")]
    OffsetOutOfRange { offset: usize, len: usize },

    /// A line number lies beyond the last line of the buffer
    #[error("line {line} is outside the buffer ({line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },

    /// A raw (location, length) pair could not be mapped onto the buffer
    #[error("range {location}+{length} cannot be mapped onto a buffer of length {len}")]
    InvalidRangeMapping {
        location: i64,
        length: i64,
        len: usize,
    },

    /// The indent unit is empty or would introduce a line break
    #[error("indent unit {0:?} must be non-empty and contain no line terminators")]
    InvalidIndentUnit(String),
}

impl EditError {
    /// True for the offset/line bound violations
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            EditError::OffsetOutOfRange { .. } | EditError::LineOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_classification() {
        assert!(EditError::OffsetOutOfRange { offset: 9, len: 3 }.is_out_of_range());
        assert!(EditError::LineOutOfRange {
            line: 4,
            line_count: 2
        }
        .is_out_of_range());
        assert!(!EditError::NotEditable.is_out_of_range());
    }

    #[test]
    fn test_display_messages() {
        let err = EditError::LineOutOfRange {
            line: 7,
            line_count: 3,
        };
        assert_eq!(err.to_string(), "line 7 is outside the buffer (3 lines)");

        let err = EditError::InvalidRangeMapping {
            location: -1,
            length: 2,
            len: 10,
        };
        assert_eq!(
            err.to_string(),
            "range -1+2 cannot be mapped onto a buffer of length 10"
        );
    }
}
