use cardkit_core::{Align, BoxStyle, Flow, Length, Rect, WrapMode};
use cardkit_text::{TextEngine, TextStyle};
use rustc_hash::{FxHashMap, FxHashSet};
use taffy::prelude::*;
use taffy::{Layout, NodeId, Style, TaffyError, TaffyTree};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Taffy error: {0}")]
    Taffy(#[from] TaffyError),
    #[error("Node not found: {0}")]
    NodeNotFound(Uuid),
}

/// Measurement context attached to text leaves.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLeaf {
    pub content: String,
    pub style: TextStyle,
    pub wrap: WrapMode,
}

/// Layout engine backed by Taffy.
///
/// Keeps a bidirectional mapping between document node ids and Taffy
/// `NodeId`s, tracks dirty nodes, and caches both Taffy's parent-relative
/// layouts and absolute page rectangles after each pass.
pub struct LayoutEngine {
    taffy: TaffyTree<TextLeaf>,

    node_to_taffy: FxHashMap<Uuid, NodeId>,
    taffy_to_node: FxHashMap<NodeId, Uuid>,

    dirty_nodes: FxHashSet<Uuid>,
    last_available: Option<Size<f32>>,

    layout_results: FxHashMap<Uuid, Layout>,
    absolute: FxHashMap<Uuid, Rect>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_to_taffy: FxHashMap::default(),
            taffy_to_node: FxHashMap::default(),
            dirty_nodes: FxHashSet::default(),
            last_available: None,
            layout_results: FxHashMap::default(),
            absolute: FxHashMap::default(),
        }
    }

    // ---------------------------------------------------------------
    // Style conversion  (Taffy 0.9 – lowercase constructors)
    // ---------------------------------------------------------------

    /// Convert a cardkit `BoxStyle` to a Taffy `Style`.
    pub fn to_taffy_style(style: &BoxStyle) -> Style {
        Style {
            display: match style.flow {
                Flow::Block => Display::Block,
                Flow::Row | Flow::Column => Display::Flex,
            },
            flex_direction: match style.flow {
                Flow::Column => FlexDirection::Column,
                Flow::Block | Flow::Row => FlexDirection::Row,
            },
            size: Size {
                width: dimension(style.width),
                height: dimension(style.height),
            },
            flex_grow: style.flex_grow,
            flex_shrink: style.flex_shrink,
            flex_basis: dimension(style.flex_basis),
            gap: Size {
                width: LengthPercentage::length(style.gap),
                height: LengthPercentage::length(style.gap),
            },
            margin: taffy::Rect {
                left: LengthPercentageAuto::length(style.margin_left),
                right: LengthPercentageAuto::length(0.0),
                top: LengthPercentageAuto::length(0.0),
                bottom: LengthPercentageAuto::length(0.0),
            },
            padding: taffy::Rect {
                left: LengthPercentage::length(style.padding_x),
                right: LengthPercentage::length(style.padding_x),
                top: LengthPercentage::length(0.0),
                bottom: LengthPercentage::length(0.0),
            },
            border: taffy::Rect {
                left: LengthPercentage::length(style.border_width),
                right: LengthPercentage::length(style.border_width),
                top: LengthPercentage::length(style.border_width),
                bottom: LengthPercentage::length(style.border_width),
            },
            justify_content: style.justify.map(|a| match a {
                Align::Start => JustifyContent::FlexStart,
                Align::Center => JustifyContent::Center,
                Align::End => JustifyContent::FlexEnd,
            }),
            align_items: style.align.map(|a| match a {
                Align::Start => AlignItems::FlexStart,
                Align::Center => AlignItems::Center,
                Align::End => AlignItems::FlexEnd,
            }),
            ..Style::default()
        }
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Add or update a node. `text` attaches (or clears) a measured text leaf.
    pub fn upsert_node(
        &mut self,
        id: Uuid,
        style: Style,
        text: Option<TextLeaf>,
    ) -> Result<(), LayoutError> {
        if let Some(&node) = self.node_to_taffy.get(&id) {
            self.taffy.set_style(node, style)?;
            self.taffy.set_node_context(node, text)?;
        } else {
            let node = match text {
                Some(leaf) => self.taffy.new_leaf_with_context(style, leaf)?,
                None => self.taffy.new_leaf(style)?,
            };
            self.node_to_taffy.insert(id, node);
            self.taffy_to_node.insert(node, id);
        }
        self.dirty_nodes.insert(id);
        Ok(())
    }

    /// Replace the ordered child list of `id`.
    pub fn set_children(&mut self, id: Uuid, children: &[Uuid]) -> Result<(), LayoutError> {
        let parent = self.taffy_node(id)?;
        let nodes = children
            .iter()
            .map(|child| self.taffy_node(*child))
            .collect::<Result<Vec<_>, _>>()?;

        self.taffy.set_children(parent, &nodes)?;
        self.dirty_nodes.insert(id);
        Ok(())
    }

    /// Remove a node from the tree.
    pub fn remove_node(&mut self, id: Uuid) -> Result<(), LayoutError> {
        let node = self.taffy_node(id)?;

        self.taffy.remove(node)?;
        self.node_to_taffy.remove(&id);
        self.taffy_to_node.remove(&node);
        self.layout_results.remove(&id);
        self.absolute.remove(&id);
        self.dirty_nodes.remove(&id);
        Ok(())
    }

    // ---------------------------------------------------------------
    // Layout computation
    // ---------------------------------------------------------------

    /// Compute layout for the tree rooted at `root_id` within `available`.
    ///
    /// Skipped when nothing is dirty and the available size is unchanged.
    /// Text leaves are measured through `text`.
    pub fn compute_layout(
        &mut self,
        root_id: Uuid,
        available: Size<f32>,
        text: &mut TextEngine,
    ) -> Result<(), LayoutError> {
        if self.dirty_nodes.is_empty() && self.last_available == Some(available) {
            return Ok(());
        }

        let root = self.taffy_node(root_id)?;
        let space = Size {
            width: AvailableSpace::Definite(available.width),
            height: AvailableSpace::Definite(available.height),
        };

        self.taffy.compute_layout_with_measure(
            root,
            space,
            |known, available, _node, leaf, _style| measure_text(text, known, available, leaf),
        )?;

        self.refresh_results(root)?;
        log::debug!(
            "Layout pass: {} node(s), {} dirty, {}x{}",
            self.node_count(),
            self.dirty_nodes.len(),
            available.width,
            available.height
        );

        self.dirty_nodes.clear();
        self.last_available = Some(available);
        Ok(())
    }

    /// Walk the computed tree and cache parent-relative and absolute boxes.
    fn refresh_results(&mut self, root: NodeId) -> Result<(), LayoutError> {
        self.layout_results.clear();
        self.absolute.clear();

        let mut stack = vec![(root, 0.0_f32, 0.0_f32)];
        while let Some((node, origin_x, origin_y)) = stack.pop() {
            let layout = *self.taffy.layout(node)?;
            let x = origin_x + layout.location.x;
            let y = origin_y + layout.location.y;

            if let Some(&id) = self.taffy_to_node.get(&node) {
                self.layout_results.insert(id, layout);
                self.absolute
                    .insert(id, Rect::new(x, y, layout.size.width, layout.size.height));
            }
            for child in self.taffy.children(node)? {
                stack.push((child, x, y));
            }
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    /// Parent-relative layout of a node from the last pass.
    pub fn get_layout(&self, id: Uuid) -> Option<&Layout> {
        self.layout_results.get(&id)
    }

    /// Page-space border box of a node from the last pass.
    pub fn absolute_bounds(&self, id: Uuid) -> Option<Rect> {
        self.absolute.get(&id).copied()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.node_to_taffy.contains_key(&id)
    }

    /// Ids of every node the engine tracks.
    pub fn tracked_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.node_to_taffy.keys().copied()
    }

    /// Number of nodes tracked by the engine.
    pub fn node_count(&self) -> usize {
        self.node_to_taffy.len()
    }

    /// Number of nodes currently marked dirty.
    pub fn dirty_count(&self) -> usize {
        self.dirty_nodes.len()
    }

    fn taffy_node(&self, id: Uuid) -> Result<NodeId, LayoutError> {
        self.node_to_taffy
            .get(&id)
            .copied()
            .ok_or(LayoutError::NodeNotFound(id))
    }
}

// ---------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------

fn dimension(length: Length) -> Dimension {
    match length {
        Length::Auto => Dimension::auto(),
        Length::Px(px) => Dimension::length(px),
        Length::Percent(fraction) => Dimension::percent(fraction),
    }
}

/// Taffy measure function for text leaves. Boxes without a leaf are empty.
fn measure_text(
    text: &mut TextEngine,
    known: Size<Option<f32>>,
    available: Size<AvailableSpace>,
    leaf: Option<&mut TextLeaf>,
) -> Size<f32> {
    let Some(leaf) = leaf else {
        return Size::ZERO;
    };
    if let Size {
        width: Some(width),
        height: Some(height),
    } = known
    {
        return Size { width, height };
    }

    let max_width = known.width.or(match available.width {
        AvailableSpace::Definite(width) => Some(width),
        AvailableSpace::MinContent => Some(text.min_content_width(&leaf.content, &leaf.style)),
        AvailableSpace::MaxContent => None,
    });
    let laid_out = text.layout(&leaf.content, &leaf.style, max_width, leaf.wrap);

    Size {
        width: known.width.unwrap_or(laid_out.width),
        height: known.height.unwrap_or(laid_out.height),
    }
}

// ===================================================================
// Tests
// ===================================================================
