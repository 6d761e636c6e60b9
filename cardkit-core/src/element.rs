//! Virtual element trees.
//!
//! An [`Element`] is the value a component returns from `render`. It owns
//! its children and carries no node ids; the document assigns those when
//! the tree is committed.

use crate::node::{BoxStyle, NodeKind, TextProps};

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: NodeKind,
    pub element_id: Option<String>,
    pub style: BoxStyle,
    pub children: Vec<Element>,
}

impl Element {
    pub fn container(style: BoxStyle) -> Self {
        Self {
            kind: NodeKind::Box,
            element_id: None,
            style,
            children: Vec::new(),
        }
    }

    pub fn image(src: impl Into<String>, alt: impl Into<String>, style: BoxStyle) -> Self {
        Self {
            kind: NodeKind::Image {
                src: src.into(),
                alt: alt.into(),
            },
            element_id: None,
            style,
            children: Vec::new(),
        }
    }

    pub fn text(props: TextProps) -> Self {
        Self {
            kind: NodeKind::Text(props),
            element_id: None,
            style: BoxStyle::default(),
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of elements in this tree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Element::count).sum::<usize>()
    }

    /// Element ids used anywhere in this tree, in pre-order.
    pub fn element_ids(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_ids(&mut out);
        out
    }

    fn collect_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(id) = &self.element_id {
            out.push(id);
        }
        for child in &self.children {
            child.collect_ids(out);
        }
    }
}
