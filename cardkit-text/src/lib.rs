//! # cardkit-text
//!
//! Text shaping and line breaking for cardkit, via `cosmic-text`.
//!
//! ```text
//! TextEngine (FontSystem with bundled fonts + LRU layout cache)
//!     │
//!     ▼
//! layout(str, style, max_width, wrap) ──► TextLayout { Vec<LineBox> }
//! ```
//!
//! - **`fonts`**: the bundled font database; no system font discovery.
//! - **`engine`**: shaping, wrapping and the layout cache used by the
//!   layout and render crates.

pub mod engine;
pub mod fonts;

pub use engine::{LineBox, TextEngine, TextLayout, TextStyle};
pub use fonts::{bundled_database, bundled_font_system, BODY_FAMILY};
