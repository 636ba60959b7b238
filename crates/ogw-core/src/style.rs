//! CSS-like style model
//!
//! Every caller-facing field is an `Option`: `None` means "use the engine
//! default" and `Some(0)` is a real zero. [`Style::resolve`] merges field by
//! field into a [`ResolvedStyle`] that the layout engine reads.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Simple RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

/// Outer spacing in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margin {
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn all(value: u32) -> Self {
        Self::new(value, value, value, value)
    }

    /// `left + right`, widened so huge margins can't wrap
    pub fn horizontal(&self) -> u64 {
        self.left as u64 + self.right as u64
    }

    /// `top + bottom`, widened so huge margins can't wrap
    pub fn vertical(&self) -> u64 {
        self.top as u64 + self.bottom as u64
    }
}

/// Corner radii in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BorderRadius {
    pub top_left: u32,
    pub top_right: u32,
    pub bottom_right: u32,
    pub bottom_left: u32,
}

impl BorderRadius {
    pub const fn new(top_left: u32, top_right: u32, bottom_right: u32, bottom_left: u32) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    pub const fn all(radius: u32) -> Self {
        Self::new(radius, radius, radius, radius)
    }

    pub fn is_zero(&self) -> bool {
        self.top_left == 0 && self.top_right == 0 && self.bottom_right == 0 && self.bottom_left == 0
    }
}

/// Solid border stroked inside the box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Border {
    pub width: u32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Position {
    #[default]
    Static,
    /// Taken out of the flex flow and placed by top/right/bottom/left
    Absolute,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// What happens to text cut off by `max_height`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TextOverflow {
    #[default]
    Clip,
    /// Append "..." to the last visible line
    Ellipsis,
    /// Append a custom marker to the last visible line
    Content(String),
}

impl TextOverflow {
    /// Marker appended to a truncated line, if any
    pub fn marker(&self) -> Option<&str> {
        match self {
            TextOverflow::Clip => None,
            TextOverflow::Ellipsis => Some("..."),
            TextOverflow::Content(marker) => Some(marker.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum WordBreak {
    /// Break at whitespace only
    #[default]
    Normal,
    /// Break between any two characters
    BreakAll,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum WhiteSpace {
    /// Collapse whitespace runs, treat newlines as spaces, wrap lines
    #[default]
    Normal,
    /// Keep whitespace, break only at newlines
    Pre,
}

impl WhiteSpace {
    pub fn is_pre(&self) -> bool {
        matches!(self, WhiteSpace::Pre)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FlexDirection {
    Row,
    #[default]
    Column,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum JustifyContent {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AlignItems {
    #[default]
    Start,
    Center,
    End,
    Stretch,
}

/// Caller-provided element style
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Style {
    pub border_radius: Option<BorderRadius>,
    pub border: Option<Border>,
    pub margin: Option<Margin>,
    pub color: Option<Color>,
    pub font_size: Option<f32>,
    pub line_height: Option<f32>,
    pub letter_spacing: Option<f32>,
    pub top: Option<i32>,
    pub right: Option<i32>,
    pub bottom: Option<i32>,
    pub left: Option<i32>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub position: Option<Position>,
    pub text_align: Option<TextAlign>,
    pub text_overflow: Option<TextOverflow>,
    pub word_break: Option<WordBreak>,
    pub white_space: Option<WhiteSpace>,
}

impl Style {
    /// Merges this style over `base`, one field at a time
    pub fn resolve(&self, base: &ResolvedStyle) -> ResolvedStyle {
        ResolvedStyle {
            border_radius: self.border_radius.unwrap_or(base.border_radius),
            border: self.border.or(base.border),
            margin: self.margin.unwrap_or(base.margin),
            color: self.color.unwrap_or(base.color),
            font_size: self.font_size.unwrap_or(base.font_size),
            line_height: self.line_height.unwrap_or(base.line_height),
            letter_spacing: self.letter_spacing.unwrap_or(base.letter_spacing),
            top: self.top.or(base.top),
            right: self.right.or(base.right),
            bottom: self.bottom.or(base.bottom),
            left: self.left.or(base.left),
            max_width: self.max_width.or(base.max_width),
            max_height: self.max_height.or(base.max_height),
            position: self.position.unwrap_or(base.position),
            text_align: self.text_align.unwrap_or(base.text_align),
            text_overflow: self
                .text_overflow
                .clone()
                .unwrap_or_else(|| base.text_overflow.clone()),
            word_break: self.word_break.unwrap_or(base.word_break),
            white_space: self.white_space.unwrap_or(base.white_space),
        }
    }

    /// Resolves against the engine defaults
    pub fn resolve_default(&self) -> ResolvedStyle {
        self.resolve(&ResolvedStyle::default())
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self.position, Some(Position::Absolute))
    }
}

/// Effective style with every field decided
///
/// Offsets and max sizes stay optional: `None` there means "not anchored"
/// and "unbounded", which are values in their own right.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub border_radius: BorderRadius,
    pub border: Option<Border>,
    pub margin: Margin,
    pub color: Color,
    pub font_size: f32,
    pub line_height: f32,
    pub letter_spacing: f32,
    pub top: Option<i32>,
    pub right: Option<i32>,
    pub bottom: Option<i32>,
    pub left: Option<i32>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub position: Position,
    pub text_align: TextAlign,
    pub text_overflow: TextOverflow,
    pub word_break: WordBreak,
    pub white_space: WhiteSpace,
}

impl ResolvedStyle {
    pub fn is_absolute(&self) -> bool {
        matches!(self.position, Position::Absolute)
    }
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            border_radius: BorderRadius::default(),
            border: None,
            margin: Margin::default(),
            color: Color::black(),
            font_size: 30.0,
            line_height: 1.5,
            letter_spacing: 0.0,
            top: None,
            right: None,
            bottom: None,
            left: None,
            max_width: None,
            max_height: None,
            position: Position::Static,
            text_align: TextAlign::Start,
            text_overflow: TextOverflow::Clip,
            word_break: WordBreak::Normal,
            white_space: WhiteSpace::Normal,
        }
    }
}

/// Root or container arrangement
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowStyle {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub background_color: Option<Color>,
    pub flex_direction: Option<FlexDirection>,
    pub justify_content: Option<JustifyContent>,
    pub align_items: Option<AlignItems>,
}

impl WindowStyle {
    /// Fills unset fields; `fallback_width`/`fallback_height` stand in for
    /// missing dimensions
    pub fn resolve(&self, fallback_width: u32, fallback_height: u32) -> ResolvedWindow {
        ResolvedWindow {
            width: self.width.unwrap_or(fallback_width),
            height: self.height.unwrap_or(fallback_height),
            background_color: self.background_color,
            flex_direction: self.flex_direction.unwrap_or_default(),
            justify_content: self.justify_content.unwrap_or_default(),
            align_items: self.align_items.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedWindow {
    pub width: u32,
    pub height: u32,
    pub background_color: Option<Color>,
    pub flex_direction: FlexDirection,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
}
