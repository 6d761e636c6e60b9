use std::collections::{HashMap, HashSet};

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::element::Element;
use crate::node::{BoxStyle, Node, NodeKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Node not found: {0}")]
    NodeNotFound(Uuid),
    #[error("Parent not found: {0}")]
    ParentNotFound(Uuid),
    #[error("Duplicate element id: {0}")]
    DuplicateElementId(String),
    #[error("The root node cannot be removed")]
    RootRemoval,
}

/// The live tree that components are committed into.
///
/// Every node lives in a flat map keyed by `Uuid`; parent/child links are
/// stored on the nodes. Nodes carrying an `element_id` are indexed so hosts
/// can find them by identity, the way a page finds an element by id.
#[derive(Clone, Debug)]
pub struct Document {
    pub id: Uuid,
    nodes: HashMap<Uuid, Node>,
    root_id: Uuid,
    element_index: HashMap<String, Uuid>,
    version: u64,
}

// Only the tree itself is exported; the element index is derived state.
impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct DocumentSnapshot<'a> {
            id: Uuid,
            root_id: Uuid,
            version: u64,
            nodes: Vec<&'a Node>,
        }

        let nodes = self
            .descendants(self.root_id)
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .collect();

        let snapshot = DocumentSnapshot {
            id: self.id,
            root_id: self.root_id,
            version: self.version,
            nodes,
        };

        snapshot.serialize(serializer)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(BoxStyle::default())
    }
}

impl Document {
    pub fn new(root_style: BoxStyle) -> Self {
        let root = Node::new(NodeKind::Box, root_style);
        let root_id = root.id;
        let mut nodes = HashMap::new();
        nodes.insert(root_id, root);

        Self {
            id: Uuid::new_v4(),
            nodes,
            root_id,
            element_index: HashMap::new(),
            version: 0,
        }
    }

    pub fn root_id(&self) -> Uuid {
        self.root_id
    }

    /// Incremented on every structural change or commit.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get_node(&self, id: &Uuid) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn find_by_element_id(&self, element_id: &str) -> Option<&Node> {
        self.element_index
            .get(element_id)
            .and_then(|id| self.nodes.get(id))
    }

    pub fn children(&self, id: &Uuid) -> &[Uuid] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Pre-order walk of the subtree rooted at `id` (including `id`).
    pub fn descendants(&self, id: Uuid) -> Vec<Uuid> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(&current) {
                out.push(current);
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }

    /// Rendered text of a subtree.
    ///
    /// Each text node contributes its content with whitespace collapsed;
    /// separate text nodes are joined by a newline. Returns `None` when
    /// `id` is not in the document.
    pub fn inner_text(&self, id: &Uuid) -> Option<String> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        let parts: Vec<String> = self
            .descendants(*id)
            .iter()
            .filter_map(|nid| self.nodes.get(nid))
            .filter_map(Node::text)
            .map(|t| collapse_whitespace(&t.content))
            .filter(|s| !s.is_empty())
            .collect();

        Some(parts.join("\n"))
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Insert an element tree as the last child of `parent_id`.
    pub fn append(&mut self, parent_id: Uuid, element: &Element) -> Result<Uuid, DocumentError> {
        if !self.nodes.contains_key(&parent_id) {
            return Err(DocumentError::ParentNotFound(parent_id));
        }
        self.check_element_ids(element, None)?;

        let id = self.insert_tree(parent_id, None, element);
        self.version += 1;
        Ok(id)
    }

    /// Remove a node and all of its descendants. Returns the number of
    /// nodes removed.
    pub fn remove_subtree(&mut self, id: Uuid) -> Result<usize, DocumentError> {
        if id == self.root_id {
            return Err(DocumentError::RootRemoval);
        }
        let parent = self
            .nodes
            .get(&id)
            .ok_or(DocumentError::NodeNotFound(id))?
            .parent;

        self.detach_from_parent(id, parent);
        let removed = self.drop_subtree(id);
        self.version += 1;
        Ok(removed)
    }

    /// Reconcile `element` into the document under `parent_id`.
    ///
    /// With no `previous` subtree the element is appended. Otherwise the
    /// previous subtree (which must be a child of `parent_id`) is patched in
    /// place wherever node kinds and child counts still line up; mismatched
    /// subtrees are replaced in the same child slot. Returns the id of the
    /// committed subtree root.
    pub fn commit(
        &mut self,
        parent_id: Uuid,
        previous: Option<Uuid>,
        element: &Element,
    ) -> Result<Uuid, DocumentError> {
        if !self.nodes.contains_key(&parent_id) {
            return Err(DocumentError::ParentNotFound(parent_id));
        }

        let id = match previous {
            Some(prev) => {
                let is_child = self
                    .nodes
                    .get(&prev)
                    .is_some_and(|n| n.parent == Some(parent_id));
                if !is_child {
                    return Err(DocumentError::NodeNotFound(prev));
                }
                self.check_element_ids(element, Some(prev))?;
                self.patch(prev, element)
            }
            None => {
                self.check_element_ids(element, None)?;
                self.insert_tree(parent_id, None, element)
            }
        };

        self.version += 1;
        log::debug!(
            "Committed {} element(s) at {} (document v{})",
            element.count(),
            id,
            self.version
        );
        Ok(id)
    }

    /// Serialize the tree (pre-order node list) as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    // ---------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------

    /// Element ids in `element` must be unique among themselves and must not
    /// collide with ids owned by nodes outside the subtree being replaced.
    fn check_element_ids(
        &self,
        element: &Element,
        replacing: Option<Uuid>,
    ) -> Result<(), DocumentError> {
        let replaced: HashSet<Uuid> = replacing
            .map(|r| self.descendants(r).into_iter().collect())
            .unwrap_or_default();

        let mut seen = HashSet::new();
        for eid in element.element_ids() {
            if !seen.insert(eid) {
                return Err(DocumentError::DuplicateElementId(eid.to_string()));
            }
            if let Some(owner) = self.element_index.get(eid) {
                if !replaced.contains(owner) {
                    return Err(DocumentError::DuplicateElementId(eid.to_string()));
                }
            }
        }
        Ok(())
    }

    fn insert_tree(&mut self, parent_id: Uuid, index: Option<usize>, element: &Element) -> Uuid {
        let mut node = Node::new(element.kind.clone(), element.style.clone());
        node.element_id = element.element_id.clone();
        node.parent = Some(parent_id);
        let id = node.id;

        if let Some(eid) = &node.element_id {
            self.element_index.insert(eid.clone(), id);
        }
        self.nodes.insert(id, node);

        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            match index {
                Some(i) if i <= parent.children.len() => parent.children.insert(i, id),
                _ => parent.children.push(id),
            }
        }

        for child in &element.children {
            self.insert_tree(id, None, child);
        }
        id
    }

    fn patch(&mut self, id: Uuid, element: &Element) -> Uuid {
        let compatible = self.nodes.get(&id).is_some_and(|n| {
            n.kind.same_variant(&element.kind) && n.children.len() == element.children.len()
        });

        if !compatible {
            let parent = self.nodes.get(&id).and_then(|n| n.parent);
            let slot = parent
                .and_then(|p| self.nodes.get(&p))
                .and_then(|p| p.children.iter().position(|c| *c == id));
            self.detach_from_parent(id, parent);
            self.drop_subtree(id);
            return match parent {
                Some(p) => self.insert_tree(p, slot, element),
                None => id,
            };
        }

        let (old_element_id, children) = match self.nodes.get_mut(&id) {
            Some(node) => {
                let old = node.element_id.clone();
                node.kind = element.kind.clone();
                node.style = element.style.clone();
                node.element_id = element.element_id.clone();
                (old, node.children.clone())
            }
            None => return id,
        };

        if old_element_id != element.element_id {
            if let Some(old) = old_element_id {
                if self.element_index.get(&old) == Some(&id) {
                    self.element_index.remove(&old);
                }
            }
            if let Some(new) = &element.element_id {
                self.element_index.insert(new.clone(), id);
            }
        }

        for (child_id, child) in children.iter().zip(&element.children) {
            self.patch(*child_id, child);
        }
        id
    }

    fn detach_from_parent(&mut self, id: Uuid, parent: Option<Uuid>) {
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
    }

    fn drop_subtree(&mut self, id: Uuid) -> usize {
        let Some(node) = self.nodes.remove(&id) else {
            return 0;
        };
        if let Some(eid) = &node.element_id {
            if self.element_index.get(eid) == Some(&id) {
                self.element_index.remove(eid);
            }
        }
        1 + node
            .children
            .iter()
            .map(|child| self.drop_subtree(*child))
            .sum::<usize>()
    }
}

/// Collapse runs of document whitespace (space, tab, LF, CR, FF) into a
/// single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split([' ', '\t', '\n', '\r', '\x0C'])
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
