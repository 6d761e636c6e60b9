//! # cardkit-layout
//!
//! Box layout for cardkit documents, backed by Taffy (flexbox + block).
//!
//! - [`engine`]: the Taffy tree, text-leaf measurement, cached results.
//! - [`bridge`]: mirrors a `cardkit_core::Document` into the engine.

pub mod bridge;
pub mod engine;

pub use bridge::{LayoutBridge, SyncResult};
pub use engine::{LayoutEngine, LayoutError, TextLeaf};
