//! Spatial mapping between points and buffer offsets.
//!
//! Glyph layout lives with the renderer; the selection engine only needs to
//! ask which offset sits under a point and where an offset sits horizontally.
//! [`MonospaceLayout`] answers those questions for a fixed cell grid and is
//! what the controller and tests use.

use serde::{Deserialize, Serialize};

use crate::editable::{LineIndex, TextBuffer};
use crate::util::{char_col_to_visual_col, visual_col_to_char_col, TABULATOR_WIDTH};

/// A point in the text container's coordinate space (origin top-left)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Offset lookups provided by whatever lays out the text.
pub trait LayoutService {
    /// Offset under `point`, measured from the line containing
    /// `container_location`. `None` when the point is outside addressable text.
    fn offset_at<B: TextBuffer + ?Sized>(&self, buffer: &B, point: Point, container_location: usize) -> Option<usize>;

    /// Offset on line `line` nearest to horizontal position `x`
    fn offset_in_line_at<B: TextBuffer + ?Sized>(&self, buffer: &B, line: usize, x: f64) -> Option<usize>;

    /// Horizontal position of the caret at `offset`
    fn x_for_offset<B: TextBuffer + ?Sized>(&self, buffer: &B, offset: usize) -> f64;
}

/// Fixed-size character cells with tab expansion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonospaceLayout {
    pub char_width: f64,
    pub line_height: f64,
    pub tab_width: usize,
}

impl Default for MonospaceLayout {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 16.0,
            tab_width: TABULATOR_WIDTH,
        }
    }
}

impl MonospaceLayout {
    pub fn new(char_width: f64, line_height: f64, tab_width: usize) -> Self {
        Self {
            char_width,
            line_height,
            tab_width: tab_width.max(1),
        }
    }

    fn is_addressable(&self, point: Point) -> bool {
        point.x.is_finite() && point.y.is_finite() && point.x >= 0.0 && point.y >= 0.0
    }
}

impl LayoutService for MonospaceLayout {
    fn offset_at<B: TextBuffer + ?Sized>(&self, buffer: &B, point: Point, container_location: usize) -> Option<usize> {
        if !self.is_addressable(point) || self.line_height <= 0.0 {
            return None;
        }

        let index = LineIndex::new(buffer);
        let base = index.line_index_at(container_location);
        let rows = (point.y / self.line_height).floor() as usize;
        let line = base
            .saturating_add(rows)
            .min(index.line_count().saturating_sub(1));

        self.offset_in_line_at(buffer, line, point.x)
    }

    fn offset_in_line_at<B: TextBuffer + ?Sized>(&self, buffer: &B, line: usize, x: f64) -> Option<usize> {
        if !x.is_finite() || self.char_width <= 0.0 {
            return None;
        }
        let span = LineIndex::new(buffer).line_span(line).ok()?;
        let text = buffer.slice(span.start..span.content_end);
        // Negative x clamps to the line start
        let visual = (x.max(0.0) / self.char_width).round() as usize;
        Some(span.start + visual_col_to_char_col(&text, visual, self.tab_width))
    }

    fn x_for_offset<B: TextBuffer + ?Sized>(&self, buffer: &B, offset: usize) -> f64 {
        let span = LineIndex::new(buffer).span_at(offset);
        let text = buffer.slice(span.start..span.content_end);
        let col = offset.clamp(span.start, span.content_end) - span.start;
        char_col_to_visual_col(&text, col, self.tab_width) as f64 * self.char_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::RopeBuffer;

    #[test]
    fn test_offset_at_maps_cells() {
        let buf = RopeBuffer::from_text("hello\nworld");
        let layout = MonospaceLayout::default();
        assert_eq!(layout.offset_at(&buf, Point::new(0.0, 0.0), 0), Some(0));
        assert_eq!(layout.offset_at(&buf, Point::new(17.0, 2.0), 0), Some(2));
        assert_eq!(layout.offset_at(&buf, Point::new(8.0, 20.0), 0), Some(7));
    }

    #[test]
    fn test_offset_at_clamps_to_content() {
        let buf = RopeBuffer::from_text("hi\nthere");
        let layout = MonospaceLayout::default();
        // Past the end of line 0
        assert_eq!(layout.offset_at(&buf, Point::new(200.0, 1.0), 0), Some(2));
        // Below the last line
        assert_eq!(layout.offset_at(&buf, Point::new(0.0, 900.0), 0), Some(3));
    }

    #[test]
    fn test_offset_at_relative_to_container() {
        let buf = RopeBuffer::from_text("a\nb\nc");
        let layout = MonospaceLayout::default();
        assert_eq!(layout.offset_at(&buf, Point::new(0.0, 0.0), 2), Some(2));
        assert_eq!(layout.offset_at(&buf, Point::new(0.0, 16.0), 2), Some(4));
    }

    #[test]
    fn test_outside_points_are_rejected() {
        let buf = RopeBuffer::from_text("abc");
        let layout = MonospaceLayout::default();
        assert_eq!(layout.offset_at(&buf, Point::new(-1.0, 0.0), 0), None);
        assert_eq!(layout.offset_at(&buf, Point::new(0.0, -5.0), 0), None);
        assert_eq!(layout.offset_at(&buf, Point::new(f64::NAN, 0.0), 0), None);
    }

    #[test]
    fn test_tabs_expand() {
        let buf = RopeBuffer::from_text("\tx");
        let layout = MonospaceLayout::default();
        assert_eq!(layout.x_for_offset(&buf, 1), 32.0);
        assert_eq!(layout.offset_in_line_at(&buf, 0, 32.0), Some(1));
        assert_eq!(layout.offset_in_line_at(&buf, 0, 8.0), Some(0));
    }
}
