//! Document → display list bridge: walks a `cardkit_core::Document` in
//! paint order and emits items positioned by the computed layout.

use cardkit_core::{Document, NodeKind, Point};
use cardkit_layout::{LayoutBridge, LayoutEngine};
use cardkit_text::TextEngine;

use crate::display::{DisplayItem, DisplayList, RectItem};

/// Build the display list for `document`.
///
/// Nodes are visited pre-order, so parents paint beneath their children.
/// Nodes without a computed layout are skipped. Text is re-wrapped at the
/// node's laid-out width with the same style the layout pass measured.
pub fn collect_display_list(
    document: &Document,
    engine: &LayoutEngine,
    bridge: &LayoutBridge,
    text: &mut TextEngine,
) -> DisplayList {
    let mut list = DisplayList::default();

    for (z, id) in document.descendants(document.root_id()).into_iter().enumerate() {
        let (Some(node), Some(bounds)) = (document.get_node(&id), engine.absolute_bounds(id)) else {
            continue; // no computed layout yet
        };

        match &node.kind {
            NodeKind::Box => {
                if let Some(color) = node.style.background {
                    list.items.push(DisplayItem::Fill(
                        RectItem::new(bounds, color.to_rgba_f32())
                            .with_radius(node.style.corner_radius)
                            .with_z(z as f32),
                    ));
                }
                if node.style.border_width > 0.0 {
                    let color = node.style.border_color.unwrap_or(cardkit_core::Color::BLACK);
                    list.items.push(DisplayItem::Border {
                        bounds,
                        width: node.style.border_width,
                        color: color.to_rgba_f32(),
                    });
                }
            }
            NodeKind::Image { src, alt } => {
                list.items.push(DisplayItem::Image {
                    node: id,
                    bounds,
                    src: src.clone(),
                    alt: alt.clone(),
                });
            }
            NodeKind::Text(props) => {
                let style = bridge.text_style_for(node);
                let laid_out = text.layout(&props.content, &style, Some(bounds.width), props.wrap);
                for (i, line) in laid_out.lines.into_iter().enumerate() {
                    list.items.push(DisplayItem::TextLine {
                        node: id,
                        origin: Point {
                            x: bounds.x,
                            y: bounds.y + i as f32 * style.line_height,
                        },
                        text: line.text,
                        width: line.width,
                        line_height: style.line_height,
                        color: props.color.to_rgba_f32(),
                        weight: style.weight,
                    });
                }
            }
        }
    }

    log::trace!("Display list: {} item(s)", list.len());
    list
}

// ===================================================================
// Tests
// ===================================================================
