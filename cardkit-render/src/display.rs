//! Display list types produced by the paint pass.

use cardkit_core::{Point, Rect};
use uuid::Uuid;

/// A filled, optionally rounded rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectItem {
    pub bounds: Rect,
    /// RGBA color, each channel in [0.0, 1.0].
    pub color: [f32; 4],
    /// Border radius in pixels (uniform for all 4 corners).
    pub border_radius: f32,
    /// Paint order (0 = backmost).
    pub z_index: f32,
}

impl RectItem {
    pub fn new(bounds: Rect, color: [f32; 4]) -> Self {
        Self {
            bounds,
            color,
            border_radius: 0.0,
            z_index: 0.0,
        }
    }

    pub fn with_radius(mut self, r: f32) -> Self {
        self.border_radius = r;
        self
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.z_index = z;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DisplayItem {
    Fill(RectItem),
    Border {
        bounds: Rect,
        width: f32,
        color: [f32; 4],
    },
    Image {
        node: Uuid,
        bounds: Rect,
        src: String,
        alt: String,
    },
    TextLine {
        node: Uuid,
        /// Top-left of the line box.
        origin: Point,
        text: String,
        width: f32,
        line_height: f32,
        color: [f32; 4],
        weight: u16,
    },
}

/// Per-frame statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Fills and borders.
    pub rect_count: u32,
    pub image_count: u32,
    pub text_lines: u32,
}

/// Items in back-to-front paint order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    pub items: Vec<DisplayItem>,
}

impl DisplayList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn stats(&self) -> FrameStats {
        let mut stats = FrameStats::default();
        for item in &self.items {
            match item {
                DisplayItem::Fill(_) | DisplayItem::Border { .. } => stats.rect_count += 1,
                DisplayItem::Image { .. } => stats.image_count += 1,
                DisplayItem::TextLine { .. } => stats.text_lines += 1,
            }
        }
        stats
    }

    /// Text lines painted for one node, top to bottom.
    pub fn lines_of(&self, node: Uuid) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                DisplayItem::TextLine { node: n, text, .. } if *n == node => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_item_builders() {
        let item = RectItem::new(Rect::new(0.0, 0.0, 10.0, 10.0), [1.0, 0.0, 0.0, 1.0])
            .with_radius(6.0)
            .with_z(2.0);
        assert_eq!(item.border_radius, 6.0);
        assert!((item.z_index - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_stats_and_lines() {
        let node = Uuid::new_v4();
        let line = |text: &str| DisplayItem::TextLine {
            node,
            origin: Point::default(),
            text: text.to_string(),
            width: 0.0,
            line_height: 24.0,
            color: [0.0; 4],
            weight: 400,
        };
        let list = DisplayList {
            items: vec![
                DisplayItem::Fill(RectItem::new(Rect::default(), [0.0; 4])),
                DisplayItem::Border {
                    bounds: Rect::default(),
                    width: 1.0,
                    color: [0.0; 4],
                },
                line("first"),
                line("second"),
            ],
        };

        assert_eq!(
            list.stats(),
            FrameStats {
                rect_count: 2,
                image_count: 0,
                text_lines: 2
            }
        );
        assert_eq!(list.lines_of(node), vec!["first", "second"]);
        assert!(list.lines_of(Uuid::new_v4()).is_empty());
    }
}
