//! Text engine: shapes and wraps text with `cosmic-text`.
//!
//! The engine owns a `FontSystem` loaded with the bundled fonts and an LRU
//! cache of finished layouts. Flexbox measurement asks for the same text
//! at the same widths several times per pass, so cache hits are the common
//! case.

use std::num::NonZeroUsize;

use cardkit_core::{collapse_whitespace, WrapMode};
use cosmic_text::{Attrs, Buffer, Family, FontSystem, LayoutRun, Metrics, Shaping, Weight, Wrap};
use lru::LruCache;

use crate::fonts::{bundled_font_system, BODY_FAMILY};

/// Style specification for a text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f32,
    /// Line height in pixels.
    pub line_height: f32,
    /// Font weight (100–900). 400 = normal, 600 = semibold.
    pub weight: u16,
    pub family: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            line_height: 24.0,
            weight: 400,
            family: String::from(BODY_FAMILY),
        }
    }
}

/// One laid-out line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct LineBox {
    /// Line content without trailing whitespace.
    pub text: String,
    /// Advance width of `text` in pixels.
    pub width: f32,
}

/// Result of laying out a text block.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TextLayout {
    pub lines: Vec<LineBox>,
    /// Width of the widest line.
    pub width: f32,
    /// `lines.len() * line_height`.
    pub height: f32,
}

impl TextLayout {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    text: String,
    family: String,
    font_size: u32,
    line_height: u32,
    weight: u16,
    max_width: Option<u32>,
    wrap: WrapMode,
}

impl CacheKey {
    fn new(text: &str, style: &TextStyle, max_width: Option<f32>, wrap: WrapMode) -> Self {
        Self {
            text: text.to_owned(),
            family: style.family.clone(),
            font_size: style.font_size.to_bits(),
            line_height: style.line_height.to_bits(),
            weight: style.weight,
            max_width: max_width.map(f32::to_bits),
            wrap,
        }
    }
}

/// Core text engine wrapping cosmic-text.
pub struct TextEngine {
    font_system: FontSystem,
    cache: LruCache<CacheKey, TextLayout>,
    hits: u64,
    misses: u64,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    pub const DEFAULT_CACHE_CAPACITY: usize = 256;

    /// Create an engine over the bundled fonts.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_font_system(bundled_font_system(), capacity)
    }

    /// Use a caller-provided font system, e.g. one with system fonts loaded.
    pub fn with_font_system(font_system: FontSystem, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            font_system,
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    pub fn font_system(&self) -> &FontSystem {
        &self.font_system
    }

    /// Single-line advance of `text` after whitespace collapsing.
    pub fn measure(&mut self, text: &str, style: &TextStyle) -> f32 {
        self.layout(text, style, None, WrapMode::Normal).width
    }

    /// Narrowest width the text can occupy: its widest word. Break-word
    /// wrapping does not lower this, matching CSS min-content sizing.
    pub fn min_content_width(&mut self, text: &str, style: &TextStyle) -> f32 {
        collapse_whitespace(text)
            .split(' ')
            .map(|word| self.measure(word, style))
            .fold(0.0, f32::max)
    }

    /// Lay out `text`, wrapping at `max_width` when given.
    ///
    /// Whitespace is collapsed first, as for CSS `white-space: normal`.
    /// [`WrapMode::Normal`] breaks between words only; [`WrapMode::BreakWord`]
    /// also breaks inside a word that cannot fit on a line of its own.
    pub fn layout(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width: Option<f32>,
        wrap: WrapMode,
    ) -> TextLayout {
        let key = CacheKey::new(text, style, max_width, wrap);
        if let Some(cached) = self.cache.get(&key) {
            self.hits += 1;
            return cached.clone();
        }
        self.misses += 1;

        let layout = self.shape(&collapse_whitespace(text), style, max_width, wrap);
        log::trace!(
            "Laid out {} char(s) into {} line(s) at {:?}",
            text.chars().count(),
            layout.line_count(),
            max_width
        );
        self.cache.put(key, layout.clone());
        layout
    }

    /// `(hits, misses)` since creation or the last [`clear_cache`](Self::clear_cache).
    pub fn cache_stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }

    fn shape(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width: Option<f32>,
        wrap: WrapMode,
    ) -> TextLayout {
        if text.is_empty() {
            return TextLayout::default();
        }

        let attrs = Attrs::new()
            .family(Family::Name(&style.family))
            .weight(Weight(style.weight));
        let mut buffer = Buffer::new(
            &mut self.font_system,
            Metrics::new(style.font_size, style.line_height),
        );
        buffer.set_wrap(
            &mut self.font_system,
            match wrap {
                WrapMode::Normal => Wrap::Word,
                WrapMode::BreakWord => Wrap::WordOrGlyph,
            },
        );
        buffer.set_size(&mut self.font_system, max_width, None);
        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let lines: Vec<LineBox> = buffer.layout_runs().filter_map(line_box).collect();
        let width = lines.iter().map(|l| l.width).fold(0.0, f32::max);
        let height = lines.len() as f32 * style.line_height;
        TextLayout {
            lines,
            width,
            height,
        }
    }
}

/// Text and inked width of one layout run. Trailing spaces left on a
/// wrapped line count toward neither.
fn line_box(run: LayoutRun<'_>) -> Option<LineBox> {
    let start = run.glyphs.iter().map(|g| g.start).min()?;
    let end = run.glyphs.iter().map(|g| g.end).max()?;
    let text = run.text.get(start..end)?.trim_end().to_string();
    if text.is_empty() {
        return None;
    }

    let width = run
        .glyphs
        .iter()
        .filter(|g| {
            run.text
                .get(g.start..g.end)
                .is_some_and(|s| !s.trim().is_empty())
        })
        .map(|g| g.x + g.w)
        .fold(0.0, f32::max);
    Some(LineBox { text, width })
}

// ===================================================================
// Tests
// ===================================================================
