//! Half-open character ranges.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// A half-open range `[location, location + length)` of char offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub location: usize,
    pub length: usize,
}

impl TextRange {
    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// An empty range (caret) at `location`
    pub const fn caret(location: usize) -> Self {
        Self {
            location,
            length: 0,
        }
    }

    /// Range between two offsets in either order
    pub fn between(a: usize, b: usize) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Self::new(start, end - start)
    }

    /// Map a raw, possibly negative (location, length) pair onto a buffer of
    /// `len` chars.
    pub fn from_raw(location: i64, length: i64, len: usize) -> Result<Self, EditError> {
        let invalid = || EditError::InvalidRangeMapping {
            location,
            length,
            len,
        };
        let start = usize::try_from(location).map_err(|_| invalid())?;
        let count = usize::try_from(length).map_err(|_| invalid())?;
        let end = start.checked_add(count).ok_or_else(invalid)?;
        if end > len {
            return Err(invalid());
        }
        Ok(Self::new(start, count))
    }

    pub const fn start(&self) -> usize {
        self.location
    }

    pub const fn end(&self) -> usize {
        self.location + self.length
    }

    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Check if an offset is within this range (end is exclusive)
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start() && offset < self.end()
    }

    /// Smallest range covering both
    pub fn union(&self, other: &TextRange) -> TextRange {
        let start = self.start().min(other.start());
        let end = self.end().max(other.end());
        TextRange::new(start, end - start)
    }

    /// Fail with `OffsetOutOfRange` unless the range fits in `len` chars
    pub fn check_within(&self, len: usize) -> Result<(), EditError> {
        if self.end() > len {
            return Err(EditError::OffsetOutOfRange {
                offset: self.end(),
                len,
            });
        }
        Ok(())
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start()..self.end()
    }
}

impl From<Range<usize>> for TextRange {
    fn from(range: Range<usize>) -> Self {
        TextRange::between(range.start, range.end)
    }
}
