//! Caret and selection movement.
//!
//! [`SelectionNavigator`] turns a [`MovementIntent`] into a new selection.
//! Every destination has its own boundary strategy that yields the target
//! offset for the moving end; [`SelectionNavigator::destination`] then either
//! collapses to a caret there or extends the selection from its anchor.

use serde::{Deserialize, Serialize};

use super::buffer::TextBuffer;
use super::line_index::{LineIndex, LineSpan};
use super::range::TextRange;
use super::selection::{Granularity, TextSelection};
use crate::util::{
    char_col_to_visual_col, grapheme_boundary_left, grapheme_boundary_right,
    is_paragraph_terminator, visual_col_to_char_col, word_segments, TABULATOR_WIDTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Forward,
    Backward,
}

impl Direction {
    /// Left, Up and Backward all move towards the start of the buffer
    pub fn is_backward(self) -> bool {
        matches!(self, Direction::Left | Direction::Up | Direction::Backward)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    Character,
    Word,
    Line,
    Paragraph,
    Document,
}

impl Destination {
    fn granularity(self) -> Granularity {
        match self {
            Destination::Character => Granularity::Character,
            Destination::Word => Granularity::Word,
            Destination::Line => Granularity::Line,
            Destination::Paragraph => Granularity::Paragraph,
            Destination::Document => Granularity::Document,
        }
    }
}

/// A requested caret/selection movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementIntent {
    pub direction: Direction,
    pub destination: Destination,
    /// Move the head and keep the anchor
    pub extending: bool,
    /// Stop at the boundary of the current line or paragraph
    pub confined: bool,
}

impl MovementIntent {
    pub const fn new(direction: Direction, destination: Destination) -> Self {
        Self {
            direction,
            destination,
            extending: false,
            confined: false,
        }
    }

    pub const fn with_extending(mut self, extending: bool) -> Self {
        self.extending = extending;
        self
    }

    pub const fn with_confined(mut self, confined: bool) -> Self {
        self.confined = confined;
        self
    }
}

/// Computes selections for movement and enclosing-selection commands.
#[derive(Debug, Clone, Copy)]
pub struct SelectionNavigator<'a, B: TextBuffer + ?Sized> {
    buffer: &'a B,
    selectable: bool,
    tab_width: usize,
}

impl<'a, B: TextBuffer + ?Sized> SelectionNavigator<'a, B> {
    pub fn new(buffer: &'a B) -> Self {
        Self {
            buffer,
            selectable: true,
            tab_width: TABULATOR_WIDTH,
        }
    }

    /// Read-only (non-selectable) navigators never produce a selection
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    /// New selection after moving `selection` by `intent`.
    ///
    /// `None` means no change: the navigator is not selectable, or there is
    /// nowhere to go and the movement is not extending.
    pub fn destination(&self, selection: &TextSelection, intent: MovementIntent) -> Option<TextSelection> {
        if !self.selectable {
            return None;
        }

        let len = self.buffer.len_chars();
        let backward = intent.direction.is_backward();
        let vertical = intent.direction.is_vertical();

        // Collapse instead of moving
        if !intent.extending
            && !selection.is_empty()
            && intent.destination == Destination::Character
            && !vertical
        {
            let at = if backward {
                selection.start()
            } else {
                selection.end()
            };
            return Some(TextSelection::caret(at.min(len)));
        }

        let origin = if intent.extending {
            selection.head()
        } else if backward {
            selection.start()
        } else {
            selection.end()
        };
        if origin > len {
            return None;
        }

        let target = match intent.destination {
            Destination::Character if vertical => {
                return self.vertical_destination(selection, origin, intent);
            }
            Destination::Character => self.character_target(origin, backward),
            Destination::Word => self.word_target(origin, backward, intent.confined),
            Destination::Line => {
                let index = LineIndex::new(self.buffer);
                self.block_target(origin, backward, intent.confined, |o| index.span_at(o))
            }
            Destination::Paragraph => {
                self.block_target(origin, backward, intent.confined, |o| self.paragraph_span_at(o))
            }
            Destination::Document => {
                if backward {
                    Some(0)
                } else {
                    Some(len)
                }
            }
        };

        self.settle(selection, origin, target, intent.extending, None)
            .map(|sel| sel.with_granularity(intent.destination.granularity()))
    }

    /// Move every selection independently, dropping those that cannot move
    pub fn destinations(&self, selections: &[TextSelection], intent: MovementIntent) -> Vec<TextSelection> {
        selections
            .iter()
            .filter_map(|sel| self.destination(sel, intent))
            .collect()
    }

    /// Whole-document selection
    pub fn select_all(&self) -> Option<TextSelection> {
        if !self.selectable {
            return None;
        }
        Some(TextSelection::new(TextRange::new(0, self.buffer.len_chars())))
    }

    /// Smallest `granularity`-aligned selection enclosing `selection`.
    ///
    /// Line and paragraph selections include the trailing terminator.
    pub fn select_enclosing(&self, selection: &TextSelection, granularity: Granularity) -> Option<TextSelection> {
        if !self.selectable {
            return None;
        }

        let len = self.buffer.len_chars();
        let start = selection.start().min(len);
        let end = selection.end().min(len);
        let last = if end > start { end - 1 } else { start };

        let (from, to) = match granularity {
            Granularity::Character => {
                return Some(selection.clone().with_granularity(Granularity::Character));
            }
            Granularity::Word => {
                let caret = end == start;
                let (from, _) = self.word_bounds(start, caret);
                let (_, to) = self.word_bounds(last, caret);
                (from, to.max(end))
            }
            Granularity::Line => {
                let index = LineIndex::new(self.buffer);
                (index.span_at(start).start, index.span_at(last).end)
            }
            Granularity::Paragraph => (
                self.paragraph_span_at(start).start,
                self.paragraph_span_at(last).end,
            ),
            Granularity::Document => (0, len),
        };

        Some(TextSelection::new(TextRange::between(from, to)).with_granularity(granularity))
    }

    /// Span of the paragraph containing `offset`.
    ///
    /// Paragraphs are runs of lines joined by LINE SEPARATOR; every other
    /// terminator ends one.
    pub fn paragraph_span_at(&self, offset: usize) -> LineSpan {
        let mut open: Option<LineSpan> = None;
        let mut last = LineSpan::default();
        for line in LineIndex::new(self.buffer).spans() {
            let span = match open {
                Some(p) => LineSpan::new(p.start, line.content_end, line.end),
                None => line,
            };
            let continues = line.has_terminator()
                && !self
                    .buffer
                    .char_at(line.content_end)
                    .is_some_and(is_paragraph_terminator);
            if continues {
                open = Some(span);
                continue;
            }
            if offset < span.end || !line.has_terminator() {
                return span;
            }
            open = None;
            last = span;
        }
        // Buffer ending in a LINE SEPARATOR leaves the last paragraph open
        open.unwrap_or(last)
    }

    fn settle(
        &self,
        selection: &TextSelection,
        origin: usize,
        target: Option<usize>,
        extending: bool,
        goal_column: Option<usize>,
    ) -> Option<TextSelection> {
        if extending {
            let head = target.unwrap_or(origin);
            return Some(TextSelection::from_anchor_head(selection.anchor(), head).with_goal_column(goal_column));
        }

        let target = target?;
        if selection.is_empty() && target == selection.head() {
            return None;
        }
        Some(TextSelection::caret(target).with_goal_column(goal_column))
    }

    fn line_text(&self, span: LineSpan) -> String {
        self.buffer.slice(span.start..span.content_end)
    }

    /// One grapheme cluster, stepping over a whole terminator between lines
    fn character_target(&self, origin: usize, backward: bool) -> Option<usize> {
        let index = LineIndex::new(self.buffer);
        let span = index.span_at(origin);

        if backward {
            if origin == 0 {
                return None;
            }
            if origin <= span.start {
                return Some(index.span_at(span.start - 1).content_end);
            }
            if origin > span.content_end {
                return Some(span.content_end);
            }
            let col = origin - span.start;
            Some(span.start + grapheme_boundary_left(&self.line_text(span), col))
        } else {
            if origin >= self.buffer.len_chars() {
                return None;
            }
            if origin >= span.content_end {
                return Some(span.end);
            }
            let col = origin - span.start;
            Some(span.start + grapheme_boundary_right(&self.line_text(span), col))
        }
    }

    fn vertical_destination(
        &self,
        selection: &TextSelection,
        origin: usize,
        intent: MovementIntent,
    ) -> Option<TextSelection> {
        let index = LineIndex::new(self.buffer);
        let line = index.line_index_at(origin);
        let span = index.line_span(line).ok()?;
        let goal = selection.goal_column.unwrap_or_else(|| {
            let col = origin.min(span.content_end) - span.start;
            char_col_to_visual_col(&self.line_text(span), col, self.tab_width)
        });

        let up = intent.direction == Direction::Up;
        let target_line = if up {
            line.checked_sub(1)
        } else {
            Some(line + 1).filter(|l| *l < index.line_count())
        };

        let target = match target_line {
            Some(l) => {
                let t = index.line_span(l).ok()?;
                Some(t.start + visual_col_to_char_col(&self.line_text(t), goal, self.tab_width))
            }
            None if intent.extending => Some(if up { 0 } else { self.buffer.len_chars() }),
            None => None,
        };

        self.settle(selection, origin, target, intent.extending, Some(goal))
    }

    /// End of the next word or start of the previous one, crossing lines
    fn word_target(&self, origin: usize, backward: bool, confined: bool) -> Option<usize> {
        let spans: Vec<LineSpan> = LineIndex::new(self.buffer).spans().collect();
        let line = spans
            .iter()
            .position(|s| s.contains(origin))
            .unwrap_or(spans.len().saturating_sub(1));

        if backward {
            for (i, span) in spans[..=line].iter().enumerate().rev() {
                let limit = if i == line {
                    origin.min(span.content_end) - span.start
                } else {
                    span.content_len()
                };
                let segments = word_segments(&self.line_text(*span));
                if let Some(seg) = segments.iter().rev().find(|s| s.is_word() && s.start < limit) {
                    return Some(span.start + seg.start);
                }
                if confined {
                    return Some(span.start);
                }
            }
            (origin > 0).then_some(0)
        } else {
            for (i, span) in spans[line..].iter().enumerate() {
                let from = if i == 0 {
                    origin.saturating_sub(span.start).min(span.content_len())
                } else {
                    0
                };
                let segments = word_segments(&self.line_text(*span));
                if let Some(seg) = segments.iter().find(|s| s.is_word() && s.end > from) {
                    return Some(span.start + seg.end);
                }
                if confined {
                    return Some(span.content_end);
                }
            }
            let len = self.buffer.len_chars();
            (origin < len).then_some(len)
        }
    }

    /// Line/paragraph boundary: the current block's start or content end,
    /// or the neighbouring block's when already there and not confined
    fn block_target(
        &self,
        origin: usize,
        backward: bool,
        confined: bool,
        span_at: impl Fn(usize) -> LineSpan,
    ) -> Option<usize> {
        let span = span_at(origin);

        if backward {
            if origin > span.start || confined {
                return Some(span.start);
            }
            if span.start == 0 {
                return None;
            }
            Some(span_at(span.start - 1).start)
        } else {
            if origin < span.content_end || confined {
                return Some(span.content_end);
            }
            if !span.has_terminator() || span.end >= self.buffer.len_chars() {
                return None;
            }
            Some(span_at(span.end).content_end)
        }
    }

    /// Word segment around `offset`; whitespace and punctuation runs count.
    ///
    /// With `caret`, an offset touching the end of a word belongs to that word.
    fn word_bounds(&self, offset: usize, caret: bool) -> (usize, usize) {
        let span = LineIndex::new(self.buffer).span_at(offset);
        let text = self.line_text(span);
        let col = offset.min(span.content_end) - span.start;
        let segments = word_segments(&text);

        let seg = segments
            .iter()
            .find(|s| caret && s.is_word() && s.start < col && col == s.end)
            .or_else(|| segments.iter().find(|s| s.start <= col && col < s.end))
            .or_else(|| segments.last());
        match seg {
            Some(seg) => (span.start + seg.start, span.start + seg.end),
            None => (offset, offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::RopeBuffer;

    fn nav(buf: &RopeBuffer) -> SelectionNavigator<'_, RopeBuffer> {
        SelectionNavigator::new(buf)
    }

    fn mv(direction: Direction, destination: Destination) -> MovementIntent {
        MovementIntent::new(direction, destination)
    }

    fn caret_after(text: &str, at: usize, intent: MovementIntent) -> Option<usize> {
        let buf = RopeBuffer::from_text(text);
        nav(&buf)
            .destination(&TextSelection::caret(at), intent)
            .map(|sel| sel.head())
    }

    #[test]
    fn test_backward_at_start_is_noop() {
        assert_eq!(caret_after("abc", 0, mv(Direction::Backward, Destination::Character)), None);
        assert_eq!(caret_after("abc", 0, mv(Direction::Left, Destination::Character)), None);
        assert_eq!(caret_after("abc", 3, mv(Direction::Right, Destination::Character)), None);
    }

    #[test]
    fn test_character_steps_over_crlf() {
        let text = "ab\r\ncd";
        assert_eq!(caret_after(text, 2, mv(Direction::Right, Destination::Character)), Some(4));
        assert_eq!(caret_after(text, 4, mv(Direction::Left, Destination::Character)), Some(2));
    }

    #[test]
    fn test_character_steps_by_grapheme() {
        let text = "ae\u{0301}b";
        assert_eq!(caret_after(text, 1, mv(Direction::Forward, Destination::Character)), Some(3));
        assert_eq!(caret_after(text, 3, mv(Direction::Backward, Destination::Character)), Some(1));
    }

    #[test]
    fn test_non_empty_selection_collapses() {
        let buf = RopeBuffer::from_text("hello world");
        let sel = TextSelection::from_anchor_head(2, 7);
        let left = nav(&buf)
            .destination(&sel, mv(Direction::Left, Destination::Character))
            .unwrap();
        assert_eq!(left, TextSelection::caret(2));
        let right = nav(&buf)
            .destination(&sel, mv(Direction::Right, Destination::Character))
            .unwrap();
        assert_eq!(right, TextSelection::caret(7));
    }

    #[test]
    fn test_extend_flips_when_crossing_anchor() {
        let buf = RopeBuffer::from_text("hello");
        let sel = TextSelection::from_anchor_head(2, 3);
        let intent = mv(Direction::Left, Destination::Character).with_extending(true);
        let once = nav(&buf).destination(&sel, intent).unwrap();
        assert!(once.is_empty());
        let twice = nav(&buf).destination(&once, intent).unwrap();
        assert_eq!(twice.span(), TextRange::new(1, 1));
        assert!(twice.reversed);
        assert_eq!(twice.anchor(), 2);
    }

    #[test]
    fn test_vertical_keeps_goal_column() {
        let buf = RopeBuffer::from_text("hello\nab\nworld");
        let down = mv(Direction::Down, Destination::Character);
        let first = nav(&buf).destination(&TextSelection::caret(4), down).unwrap();
        assert_eq!(first.head(), 8); // clamped to "ab"
        assert_eq!(first.goal_column, Some(4));
        let second = nav(&buf).destination(&first, down).unwrap();
        assert_eq!(second.head(), 13);
    }

    #[test]
    fn test_vertical_at_edges() {
        let text = "one\ntwo";
        assert_eq!(caret_after(text, 1, mv(Direction::Up, Destination::Character)), None);
        assert_eq!(caret_after(text, 5, mv(Direction::Down, Destination::Character)), None);

        let buf = RopeBuffer::from_text(text);
        let up = mv(Direction::Up, Destination::Character).with_extending(true);
        let sel = nav(&buf).destination(&TextSelection::caret(1), up).unwrap();
        assert_eq!(sel.span(), TextRange::new(0, 1));
        let down = mv(Direction::Down, Destination::Character).with_extending(true);
        let sel = nav(&buf).destination(&TextSelection::caret(5), down).unwrap();
        assert_eq!(sel.span(), TextRange::new(5, 2));
    }

    #[test]
    fn test_word_movement_crosses_lines() {
        let text = "foo bar\n  baz";
        assert_eq!(caret_after(text, 0, mv(Direction::Forward, Destination::Word)), Some(3));
        assert_eq!(caret_after(text, 3, mv(Direction::Forward, Destination::Word)), Some(7));
        assert_eq!(caret_after(text, 7, mv(Direction::Forward, Destination::Word)), Some(13));
        assert_eq!(caret_after(text, 10, mv(Direction::Backward, Destination::Word)), Some(4));
        assert_eq!(caret_after(text, 4, mv(Direction::Backward, Destination::Word)), Some(0));
        assert_eq!(caret_after(text, 13, mv(Direction::Forward, Destination::Word)), None);
    }

    #[test]
    fn test_line_confined_and_unconfined() {
        let text = "abc\ndef\nghi";
        let confined = mv(Direction::Right, Destination::Line).with_confined(true);
        assert_eq!(caret_after(text, 5, confined), Some(7));
        assert_eq!(caret_after(text, 7, confined), None);

        let unconfined = mv(Direction::Forward, Destination::Line);
        assert_eq!(caret_after(text, 7, unconfined), Some(11));
        let back = mv(Direction::Backward, Destination::Line);
        assert_eq!(caret_after(text, 4, back), Some(0));
        assert_eq!(caret_after(text, 0, back), None);
    }

    #[test]
    fn test_paragraph_spans_join_line_separators() {
        let buf = RopeBuffer::from_text("a\u{2028}b\nc");
        let nav = nav(&buf);
        assert_eq!(nav.paragraph_span_at(0), LineSpan::new(0, 3, 4));
        assert_eq!(nav.paragraph_span_at(2), LineSpan::new(0, 3, 4));
        assert_eq!(nav.paragraph_span_at(4), LineSpan::new(4, 5, 5));

        let forward = mv(Direction::Forward, Destination::Paragraph);
        assert_eq!(nav.destination(&TextSelection::caret(0), forward).map(|s| s.head()), Some(3));
    }

    #[test]
    fn test_document_destination() {
        let buf = RopeBuffer::from_text("abc\ndef");
        let sel = nav(&buf)
            .destination(
                &TextSelection::caret(5),
                mv(Direction::Backward, Destination::Document).with_extending(true),
            )
            .unwrap();
        assert_eq!(sel.span(), TextRange::new(0, 5));
        assert!(sel.reversed);
        assert_eq!(sel.granularity, Granularity::Document);
    }

    #[test]
    fn test_not_selectable_returns_none() {
        let buf = RopeBuffer::from_text("abc");
        let nav = nav(&buf).selectable(false);
        assert!(nav
            .destination(&TextSelection::caret(1), mv(Direction::Right, Destination::Character))
            .is_none());
        assert!(nav.select_all().is_none());
    }

    #[test]
    fn test_destinations_filter_out_stuck_selections() {
        let buf = RopeBuffer::from_text("abc");
        let sels = vec![TextSelection::caret(0), TextSelection::caret(2)];
        let moved = nav(&buf).destinations(&sels, mv(Direction::Left, Destination::Character));
        assert_eq!(moved, vec![TextSelection::caret(1)]);
    }

    #[test]
    fn test_select_enclosing() {
        let buf = RopeBuffer::from_text("foo bar\nbaz");
        let nav = nav(&buf);

        let word = nav
            .select_enclosing(&TextSelection::caret(5), Granularity::Word)
            .unwrap();
        assert_eq!(word.span(), TextRange::new(4, 3));

        let line = nav
            .select_enclosing(&TextSelection::caret(5), Granularity::Line)
            .unwrap();
        assert_eq!(line.span(), TextRange::new(0, 8));

        let both = nav
            .select_enclosing(&TextSelection::from_anchor_head(5, 9), Granularity::Line)
            .unwrap();
        assert_eq!(both.span(), TextRange::new(0, 11));
    }

    #[test]
    fn test_select_word_at_word_end_picks_that_word() {
        let buf = RopeBuffer::from_text("foo bar");
        let nav = nav(&buf);
        let sel = nav
            .select_enclosing(&TextSelection::caret(3), Granularity::Word)
            .unwrap();
        assert_eq!(sel.span(), TextRange::new(0, 3));

        // Start of a word still picks the word after the caret
        let sel = nav
            .select_enclosing(&TextSelection::caret(4), Granularity::Word)
            .unwrap();
        assert_eq!(sel.span(), TextRange::new(4, 3));

        // Whitespace between words stays whitespace
        let buf = RopeBuffer::from_text("a  b");
        let sel = SelectionNavigator::new(&buf)
            .select_enclosing(&TextSelection::caret(2), Granularity::Word)
            .unwrap();
        assert_eq!(sel.span(), TextRange::new(1, 2));
    }

    #[test]
    fn test_final_terminator_is_not_a_line() {
        let buf = RopeBuffer::from_text("ab\n");
        let nav = nav(&buf);
        let down = mv(Direction::Down, Destination::Character);
        assert!(nav.destination(&TextSelection::caret(1), down).is_none());

        let line_end = mv(Direction::Forward, Destination::Line);
        assert!(nav.destination(&TextSelection::caret(2), line_end).is_none());

        let line = nav
            .select_enclosing(&TextSelection::caret(3), Granularity::Line)
            .unwrap();
        assert_eq!(line.span(), TextRange::new(0, 3));
    }

    #[test]
    fn test_paragraph_ending_in_line_separator() {
        let buf = RopeBuffer::from_text("a\nb\u{2028}");
        assert_eq!(nav(&buf).paragraph_span_at(3), LineSpan::new(2, 3, 4));
        assert_eq!(nav(&buf).paragraph_span_at(4), LineSpan::new(2, 3, 4));
    }

    #[test]
    fn test_select_word_on_empty_line_is_caret() {
        let buf = RopeBuffer::from_text("a\n\nb");
        let sel = nav(&buf)
            .select_enclosing(&TextSelection::caret(2), Granularity::Word)
            .unwrap();
        assert_eq!(sel.span(), TextRange::caret(2));
    }
}
