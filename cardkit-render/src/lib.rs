//! # cardkit-render
//!
//! Paint pass for cardkit: turns a laid-out document into a flat,
//! back-to-front display list.
//!
//! ```text
//!  Document (cardkit-core)
//!       │
//!       ▼
//!  LayoutEngine (cardkit-layout)
//!       │
//!       ▼
//!  bridge::collect_display_list()   ◀─── boxes, image, wrapped text lines
//!       │
//!       ▼
//!  DisplayList + FrameStats
//! ```
//!
//! - [`display`]: display items and per-frame statistics
//! - [`bridge`]: document + layout → display list conversion

pub mod bridge;
pub mod display;

pub use bridge::collect_display_list;
pub use display::{DisplayItem, DisplayList, FrameStats, RectItem};
