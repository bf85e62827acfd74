//! Selection state: ranges plus affinity, granularity and direction.

use serde::{Deserialize, Serialize};

use super::range::TextRange;

/// Which side of a line wrap a caret at the wrap point renders on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Affinity {
    Upstream,
    #[default]
    Downstream,
}

/// The unit the selection was last made in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    #[default]
    Character,
    Word,
    Line,
    Paragraph,
    Document,
}

/// A selection of one or more ranges.
///
/// The anchor is the fixed end and the head is the end that moves when the
/// selection is extended. `reversed` means the head sits at the start of the
/// span. A box (rectangular) selection holds one range per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSelection {
    pub ranges: Vec<TextRange>,
    pub affinity: Affinity,
    pub granularity: Granularity,
    pub reversed: bool,
    /// Visual column kept across vertical moves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_column: Option<usize>,
}

impl Default for TextSelection {
    fn default() -> Self {
        Self::caret(0)
    }
}

impl TextSelection {
    /// Forward selection of a single range
    pub fn new(range: TextRange) -> Self {
        Self {
            ranges: vec![range],
            affinity: Affinity::Downstream,
            granularity: Granularity::Character,
            reversed: false,
            goal_column: None,
        }
    }

    /// Create a collapsed selection (caret)
    pub fn caret(offset: usize) -> Self {
        Self::new(TextRange::caret(offset))
    }

    /// Selection from `anchor` to `head` in either order
    pub fn from_anchor_head(anchor: usize, head: usize) -> Self {
        let mut sel = Self::new(TextRange::between(anchor, head));
        sel.reversed = head < anchor;
        if sel.reversed {
            sel.affinity = Affinity::Upstream;
        }
        sel
    }

    /// Selection holding several ranges (box selections)
    pub fn with_ranges(ranges: Vec<TextRange>, reversed: bool) -> Self {
        if ranges.is_empty() {
            return Self::default();
        }
        Self {
            ranges,
            affinity: Affinity::Downstream,
            granularity: Granularity::Character,
            reversed,
            goal_column: None,
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_goal_column(mut self, goal_column: Option<usize>) -> Self {
        self.goal_column = goal_column;
        self
    }

    /// Range covering every range in the selection
    pub fn span(&self) -> TextRange {
        let mut iter = self.ranges.iter();
        let Some(first) = iter.next() else {
            return TextRange::default();
        };
        iter.fold(*first, |acc, r| acc.union(r))
    }

    pub fn start(&self) -> usize {
        self.span().start()
    }

    pub fn end(&self) -> usize {
        self.span().end()
    }

    /// The fixed end
    pub fn anchor(&self) -> usize {
        let span = self.span();
        if self.reversed {
            span.end()
        } else {
            span.start()
        }
    }

    /// The moving end
    pub fn head(&self) -> usize {
        let span = self.span();
        if self.reversed {
            span.start()
        } else {
            span.end()
        }
    }

    /// Check if every range is empty
    pub fn is_empty(&self) -> bool {
        self.ranges.iter().all(TextRange::is_empty)
    }

    /// Check if this is a box selection (more than one range)
    pub fn is_box(&self) -> bool {
        self.ranges.len() > 1
    }
}
