//! OGW Layout: from a caller-built tree to positioned boxes
//!
//! Build a [`Writer`], append [`TextArea`]s, [`ImageNode`]s and nested
//! [`Container`]s, then hand it to [`layout`]. The result is a
//! [`LayoutTree`] with every box measured and placed, ready to paint.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ogw_core::{PaintOptions, Style, WindowStyle};
//! use ogw_fontdb::FontRegistry;
//! use ogw_layout::{layout, TextArea, Writer};
//!
//! let mut fonts = FontRegistry::new();
//! fonts.register(std::fs::read("Inter.ttf")?)?;
//!
//! let mut writer = Writer::with_fonts(
//!     WindowStyle { width: Some(1200), height: Some(630), ..Default::default() },
//!     Arc::new(fonts),
//! );
//! let mut title = TextArea::new(Style::default());
//! title.push_text("Hello");
//! writer.append(title);
//!
//! let tree = layout(&writer, &PaintOptions::default())?;
//! assert_eq!(tree.width(), 1200);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod boxes;
pub mod engine;
pub mod image;
mod line_breaker;
mod shape;
pub mod text;
pub mod tree;

pub use boxes::{
    ContainerBox, DecodedImage, ImageBox, LayoutBox, LayoutTree, Line, PlacedGlyph, Rect, TextBox,
};
pub use engine::{layout, LayoutEngine};
pub use text::TextLayout;
pub use tree::{Container, Element, ImageInputFormat, ImageNode, TextArea, TextRun, Writer};
