//! Pointer interactions (click, shift-click, drag, box drag) to selections.

use serde::{Deserialize, Serialize};

use super::buffer::TextBuffer;
use super::line_index::LineIndex;
use super::range::TextRange;
use super::selection::TextSelection;
use crate::layout::{LayoutService, Point};

/// One pointer event as the selection engine sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerInteraction {
    pub point: Point,
    /// Offset whose line the point's y coordinate is measured from
    pub container_location: usize,
    /// Selections the drag started from (empty means the current ones)
    #[serde(default)]
    pub anchors: Vec<TextSelection>,
    pub extending: bool,
    pub dragging: bool,
    /// Rectangular (box) selection
    pub visual: bool,
}

impl PointerInteraction {
    pub fn click(point: Point) -> Self {
        Self {
            point,
            ..Default::default()
        }
    }

    pub fn extend(point: Point) -> Self {
        Self {
            point,
            extending: true,
            ..Default::default()
        }
    }

    pub fn drag(point: Point, anchors: Vec<TextSelection>) -> Self {
        Self {
            point,
            anchors,
            dragging: true,
            ..Default::default()
        }
    }

    pub fn with_visual(mut self, visual: bool) -> Self {
        self.visual = visual;
        self
    }

    pub fn with_container_location(mut self, container_location: usize) -> Self {
        self.container_location = container_location;
        self
    }
}

/// Selections resulting from `interaction`.
///
/// An empty result means the point is outside the text and the current
/// selections should stay as they are.
pub fn selections_for_interaction<B, L>(
    buffer: &B,
    layout: &L,
    current: &[TextSelection],
    interaction: &PointerInteraction,
) -> Vec<TextSelection>
where
    B: TextBuffer + ?Sized,
    L: LayoutService,
{
    let Some(offset) = layout.offset_at(buffer, interaction.point, interaction.container_location) else {
        tracing::trace!(point = ?interaction.point, "pointer outside addressable text");
        return Vec::new();
    };

    let sources: &[TextSelection] = if interaction.dragging && !interaction.anchors.is_empty() {
        &interaction.anchors
    } else {
        current
    };

    if interaction.visual && (interaction.dragging || interaction.extending) {
        let anchor = sources.first().map(TextSelection::anchor).unwrap_or(offset);
        return vec![box_selection(buffer, layout, anchor, offset, interaction.point.x)];
    }

    if (interaction.dragging || interaction.extending) && !sources.is_empty() {
        return sources
            .iter()
            .map(|sel| TextSelection::from_anchor_head(sel.anchor(), offset))
            .collect();
    }

    vec![TextSelection::caret(offset)]
}

/// One range per line between the anchor's column and `head_x`
fn box_selection<B, L>(buffer: &B, layout: &L, anchor: usize, head: usize, head_x: f64) -> TextSelection
where
    B: TextBuffer + ?Sized,
    L: LayoutService,
{
    let index = LineIndex::new(buffer);
    let anchor_line = index.line_index_at(anchor);
    let head_line = index.line_index_at(head);
    let anchor_x = layout.x_for_offset(buffer, anchor);
    let head_x = head_x.max(0.0);

    let (first, last) = if anchor_line <= head_line {
        (anchor_line, head_line)
    } else {
        (head_line, anchor_line)
    };

    let ranges = (first..=last)
        .filter_map(|line| {
            let a = layout.offset_in_line_at(buffer, line, anchor_x)?;
            let h = layout.offset_in_line_at(buffer, line, head_x)?;
            Some(TextRange::between(a, h))
        })
        .collect();

    TextSelection::with_ranges(ranges, head < anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::RopeBuffer;
    use crate::layout::MonospaceLayout;

    // 8px cells, 16px lines
    fn at(col: f64, line: f64) -> Point {
        Point::new(col * 8.0, line * 16.0 + 1.0)
    }

    #[test]
    fn test_click_places_caret() {
        let buf = RopeBuffer::from_text("hello\nworld");
        let sels = selections_for_interaction(
            &buf,
            &MonospaceLayout::default(),
            &[TextSelection::from_anchor_head(0, 3)],
            &PointerInteraction::click(at(2.0, 1.0)),
        );
        assert_eq!(sels, vec![TextSelection::caret(8)]);
    }

    #[test]
    fn test_outside_point_changes_nothing() {
        let buf = RopeBuffer::from_text("hello");
        let sels = selections_for_interaction(
            &buf,
            &MonospaceLayout::default(),
            &[TextSelection::caret(1)],
            &PointerInteraction::click(Point::new(-4.0, 0.0)),
        );
        assert!(sels.is_empty());
    }

    #[test]
    fn test_extend_moves_head_keeps_anchor() {
        let buf = RopeBuffer::from_text("hello world");
        let sels = selections_for_interaction(
            &buf,
            &MonospaceLayout::default(),
            &[TextSelection::caret(6)],
            &PointerInteraction::extend(at(2.0, 0.0)),
        );
        assert_eq!(sels.len(), 1);
        assert_eq!(sels[0].span(), TextRange::new(2, 4));
        assert_eq!(sels[0].anchor(), 6);
        assert!(sels[0].reversed);
    }

    #[test]
    fn test_drag_uses_anchors_or_current() {
        let buf = RopeBuffer::from_text("hello world");
        let layout = MonospaceLayout::default();
        let from_anchor = selections_for_interaction(
            &buf,
            &layout,
            &[TextSelection::caret(0)],
            &PointerInteraction::drag(at(8.0, 0.0), vec![TextSelection::caret(3)]),
        );
        assert_eq!(from_anchor[0].span(), TextRange::new(3, 5));

        let from_current = selections_for_interaction(
            &buf,
            &layout,
            &[TextSelection::caret(1)],
            &PointerInteraction::drag(at(8.0, 0.0), Vec::new()),
        );
        assert_eq!(from_current[0].span(), TextRange::new(1, 7));
    }

    #[test]
    fn test_visual_drag_builds_box() {
        let buf = RopeBuffer::from_text("abcdef\nab\nabcdef");
        let sels = selections_for_interaction(
            &buf,
            &MonospaceLayout::default(),
            &[],
            &PointerInteraction::drag(at(4.0, 2.0), vec![TextSelection::caret(1)]).with_visual(true),
        );
        assert_eq!(sels.len(), 1);
        assert_eq!(
            sels[0].ranges,
            vec![TextRange::new(1, 3), TextRange::new(8, 1), TextRange::new(11, 3)]
        );
        assert!(!sels[0].reversed);
    }
}
