//! # cardkit-core
//!
//! Retained document tree for cardkit. Components render virtual
//! [`Element`] trees; the host commits them into a [`Document`] whose
//! nodes can be addressed by a stable element id.
//!
//! ```text
//!  Component::render() ──► Element ──commit──► Document
//!                                                 │
//!                                    find_by_element_id / inner_text
//! ```

use serde::{Deserialize, Serialize};

pub mod document;
pub mod element;
pub mod node;

pub use document::{collapse_whitespace, Document, DocumentError};
pub use element::Element;
pub use node::{
    Align, BoxStyle, Color, Flow, FontWeight, Length, Node, NodeKind, TextProps, WrapMode,
};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned box in page coordinates.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True if `other` lies entirely inside `self` (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}
