//! Document → Layout bridge
//!
//! Mirrors a `cardkit_core::Document` into a [`LayoutEngine`]. The bridge
//! remembers the document version it last synced, so calling it every
//! frame is cheap when nothing was committed in between.
//!
//! ```text
//!  Document ──sync──▸ LayoutBridge ──▸ LayoutEngine
//!                          │
//!                  stale-node removal
//! ```

use cardkit_core::{Document, Node, NodeKind};
use cardkit_text::TextStyle;
use rustc_hash::FxHashSet;
use uuid::Uuid;

use crate::engine::{LayoutEngine, LayoutError, TextLeaf};

/// Result of a `sync()` call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncResult {
    /// Nodes added or updated in the engine.
    pub upserted: usize,
    /// Engine nodes removed because the document no longer has them.
    pub removed: usize,
    /// The document version was already synced; nothing was done.
    pub skipped: bool,
}

/// Synchronous bridge that keeps a layout tree in step with a document.
///
/// The bridge owns no engine; it borrows one mutably during `sync`, so the
/// caller can share the engine with the paint pass.
pub struct LayoutBridge {
    /// Base text style; per-node weight is applied on top.
    base_text: TextStyle,
    last_synced: Option<(Uuid, u64)>,
    syncs: u64,
}

impl Default for LayoutBridge {
    fn default() -> Self {
        Self::new(TextStyle::default())
    }
}

impl LayoutBridge {
    pub fn new(base_text: TextStyle) -> Self {
        Self {
            base_text,
            last_synced: None,
            syncs: 0,
        }
    }

    pub fn base_text(&self) -> &TextStyle {
        &self.base_text
    }

    /// Total syncs that did work over the lifetime of this bridge.
    #[inline]
    pub fn total_syncs(&self) -> u64 {
        self.syncs
    }

    /// Text style used to measure a text node.
    pub fn text_style_for(&self, node: &Node) -> TextStyle {
        match node.text() {
            Some(props) => TextStyle {
                weight: props.weight.numeric(),
                ..self.base_text.clone()
            },
            None => self.base_text.clone(),
        }
    }

    /// Bring `engine` in line with `document`.
    pub fn sync(
        &mut self,
        document: &Document,
        engine: &mut LayoutEngine,
    ) -> Result<SyncResult, LayoutError> {
        let stamp = (document.id, document.version());
        if self.last_synced == Some(stamp) {
            return Ok(SyncResult {
                skipped: true,
                ..SyncResult::default()
            });
        }

        let mut result = SyncResult::default();
        let live: Vec<Uuid> = document.descendants(document.root_id());
        let live_set: FxHashSet<Uuid> = live.iter().copied().collect();

        // 1. Drop nodes that left the document.
        let stale: Vec<Uuid> = engine
            .tracked_ids()
            .filter(|id| !live_set.contains(id))
            .collect();
        for id in stale {
            engine.remove_node(id)?;
            result.removed += 1;
        }

        // 2. Upsert every live node.
        for id in &live {
            let Some(node) = document.get_node(id) else {
                continue;
            };
            let style = LayoutEngine::to_taffy_style(&node.style);
            let leaf = match &node.kind {
                NodeKind::Text(props) => Some(TextLeaf {
                    content: props.content.clone(),
                    style: self.text_style_for(node),
                    wrap: props.wrap,
                }),
                NodeKind::Box | NodeKind::Image { .. } => None,
            };
            engine.upsert_node(*id, style, leaf)?;
            result.upserted += 1;
        }

        // 3. Re-link children in document order.
        for id in &live {
            engine.set_children(*id, document.children(id))?;
        }

        self.last_synced = Some(stamp);
        self.syncs += 1;
        log::debug!(
            "Synced document v{}: {} upserted, {} removed",
            document.version(),
            result.upserted,
            result.removed
        );
        Ok(result)
    }
}

// ===================================================================
// Tests
// ===================================================================
