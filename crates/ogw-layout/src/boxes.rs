//! Positioned output of the layout engine
//!
//! Every rect is relative to its parent container's top-left corner. The
//! compositor walks this tree and never measures anything itself.

use std::sync::Arc;

use ogw_core::error::Warning;
use ogw_core::style::{Border, BorderRadius, Color};
use ogw_core::traits::FontFace;
use ogw_core::types::{GlyphId, NodePath};

/// Integer box relative to the parent container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Decoded pixels, straight-alpha RGBA8, already scaled to the box
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// A glyph ready to fill, positioned on its line
#[derive(Clone)]
pub struct PlacedGlyph {
    /// Pen position from the start of the line
    pub x: f32,
    pub glyph_id: GlyphId,
    pub font: Arc<dyn FontFace>,
    pub size: f32,
    pub color: Color,
}

impl std::fmt::Debug for PlacedGlyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacedGlyph")
            .field("x", &self.x)
            .field("glyph_id", &self.glyph_id)
            .field("size", &self.size)
            .field("color", &self.color)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Line {
    pub glyphs: Vec<PlacedGlyph>,
    /// Offset inside the text box, set by text-align
    pub x: f32,
    /// Top of the line box inside the text box
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Baseline distance from the top of the line box
    pub baseline: f32,
}

#[derive(Debug, Clone)]
pub struct TextBox {
    pub path: NodePath,
    pub rect: Rect,
    pub lines: Vec<Line>,
    pub border: Option<Border>,
    pub border_radius: BorderRadius,
}

#[derive(Debug, Clone)]
pub struct ImageBox {
    pub path: NodePath,
    pub rect: Rect,
    pub image: DecodedImage,
    pub border: Option<Border>,
    pub border_radius: BorderRadius,
}

#[derive(Debug, Clone)]
pub struct ContainerBox {
    pub path: NodePath,
    pub rect: Rect,
    pub background: Option<Color>,
    pub background_image: Option<DecodedImage>,
    pub border: Option<Border>,
    pub border_radius: BorderRadius,
    /// Children in paint order
    pub children: Vec<LayoutBox>,
}

#[derive(Debug, Clone)]
pub enum LayoutBox {
    Image(ImageBox),
    Text(TextBox),
    Container(ContainerBox),
}

impl LayoutBox {
    pub fn rect(&self) -> Rect {
        match self {
            LayoutBox::Image(b) => b.rect,
            LayoutBox::Text(b) => b.rect,
            LayoutBox::Container(b) => b.rect,
        }
    }

    pub fn path(&self) -> &NodePath {
        match self {
            LayoutBox::Image(b) => &b.path,
            LayoutBox::Text(b) => &b.path,
            LayoutBox::Container(b) => &b.path,
        }
    }
}

/// Finished layout plus whatever was skipped on the way
#[derive(Debug)]
pub struct LayoutTree {
    pub root: ContainerBox,
    pub warnings: Vec<Warning>,
}

impl LayoutTree {
    pub fn width(&self) -> u32 {
        self.root.rect.width
    }

    pub fn height(&self) -> u32 {
        self.root.rect.height
    }
}
