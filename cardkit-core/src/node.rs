use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// RGBA with each channel in [0.0, 1.0].
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a,
        ]
    }
}

/// A box dimension. `Percent` is a fraction of the parent (0.0–1.0).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum Length {
    #[default]
    Auto,
    Px(f32),
    Percent(f32),
}

impl Length {
    pub const FULL: Length = Length::Percent(1.0);
}

/// How a box lays out its children.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Block,
    Row,
    Column,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

/// Layout and paint properties of a single box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoxStyle {
    pub flow: Flow,
    pub width: Length,
    pub height: Length,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: Length,
    pub gap: f32,
    pub margin_left: f32,
    pub padding_x: f32,
    pub border_width: f32,
    /// Main-axis alignment of children.
    pub justify: Option<Align>,
    /// Cross-axis alignment of children.
    pub align: Option<Align>,
    pub background: Option<Color>,
    pub border_color: Option<Color>,
    pub corner_radius: f32,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            flow: Flow::Block,
            width: Length::Auto,
            height: Length::Auto,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: Length::Auto,
            gap: 0.0,
            margin_left: 0.0,
            padding_x: 0.0,
            border_width: 0.0,
            justify: None,
            align: None,
            background: None,
            border_color: None,
            corner_radius: 0.0,
        }
    }
}

impl BoxStyle {
    pub fn row() -> Self {
        Self {
            flow: Flow::Row,
            ..Self::default()
        }
    }

    pub fn column() -> Self {
        Self {
            flow: Flow::Column,
            ..Self::default()
        }
    }

    pub fn size(mut self, width: Length, height: Length) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// `flex: <grow> 1 0%`
    pub fn flex(mut self, grow: f32) -> Self {
        self.flex_grow = grow;
        self.flex_shrink = 1.0;
        self.flex_basis = Length::Percent(0.0);
        self
    }

    pub fn grow(mut self, grow: f32) -> Self {
        self.flex_grow = grow;
        self
    }

    pub fn no_shrink(mut self) -> Self {
        self.flex_shrink = 0.0;
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn margin_left(mut self, px: f32) -> Self {
        self.margin_left = px;
        self
    }

    pub fn padding_x(mut self, px: f32) -> Self {
        self.padding_x = px;
        self
    }

    pub fn border(mut self, width: f32, color: Color) -> Self {
        self.border_width = width;
        self.border_color = Some(color);
        self
    }

    pub fn justify(mut self, align: Align) -> Self {
        self.justify = Some(align);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Centre children on both axes.
    pub fn centered(self) -> Self {
        self.justify(Align::Center).align(Align::Center)
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Semibold,
}

impl FontWeight {
    /// CSS numeric weight.
    pub fn numeric(self) -> u16 {
        match self {
            FontWeight::Normal => 400,
            FontWeight::Semibold => 600,
        }
    }
}

/// Line breaking behaviour of a text node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    /// Break only between words; long words overflow.
    #[default]
    Normal,
    /// Break between words, and inside a word that cannot fit on its own line.
    BreakWord,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextProps {
    pub content: String,
    pub weight: FontWeight,
    pub color: Color,
    pub wrap: WrapMode,
}

impl TextProps {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            weight: FontWeight::Normal,
            color: Color::BLACK,
            wrap: WrapMode::Normal,
        }
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum NodeKind {
    Box,
    Image { src: String, alt: String },
    Text(TextProps),
}

impl NodeKind {
    /// Same variant, ignoring payload.
    pub fn same_variant(&self, other: &NodeKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: Uuid,
    /// Stable, document-unique identity used for lookups.
    pub element_id: Option<String>,
    pub kind: NodeKind,
    pub style: BoxStyle,
    pub children: Vec<Uuid>,
    pub parent: Option<Uuid>,
}

impl Node {
    pub fn new(kind: NodeKind, style: BoxStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            element_id: None,
            kind,
            style,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn text(&self) -> Option<&TextProps> {
        match &self.kind {
            NodeKind::Text(props) => Some(props),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }
}
