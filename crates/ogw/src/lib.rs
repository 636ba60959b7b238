//! OGW - Open Graph image compositor
//!
//! Lay out text, images and nested containers on a fixed-size canvas, paint
//! them into an RGBA buffer, then encode the buffer as PNG, JPEG or raw bytes.
//!
//! Stages live in their own crates:
//!
//! 1. [`layout`](ogw_layout) - shaping, line breaking, flex-like placement
//! 2. [`render`](ogw_render) - tiny-skia compositing
//! 3. [`export`](ogw_export) - encoders
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ogw::prelude::*;
//!
//! let mut fonts = FontRegistry::new();
//! fonts.register(std::fs::read("Inter.ttf")?)?;
//!
//! let window = WindowStyle {
//!     width: Some(1200),
//!     height: Some(630),
//!     background_color: Some(Color::white()),
//!     ..Default::default()
//! };
//! let mut writer = Writer::with_fonts(window, Arc::new(fonts));
//! let mut title = TextArea::new(Style::default());
//! title.push_text("Hello, world");
//! writer.append(title);
//!
//! let painting = ogw::paint(&writer)?;
//! let png = ogw::encode(&painting.buffer, &OutputFormat::default())?;
//! std::fs::write("og.png", png.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use ogw_core as core;
pub use ogw_core::{error, style, FailurePolicy, OgwError, PaintOptions, PixelBuffer, Result};
pub use ogw_export as export;
pub use ogw_export::OutputFormat;
pub use ogw_fontdb as fontdb;
pub use ogw_layout as layout;
pub use ogw_render as render;

use ogw_core::Warning;
use ogw_layout::Writer;
use ogw_render::Compositor;

/// A painted canvas and whatever went wrong along the way
#[derive(Debug)]
pub struct Painting {
    pub buffer: PixelBuffer,
    /// Nodes that were skipped or drawn partially under [`FailurePolicy::Degrade`]
    pub warnings: Vec<Warning>,
}

impl Painting {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Encoded output plus what the caller needs to serve it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub mime_type: &'static str,
}

/// Paint with default options
pub fn paint(writer: &Writer) -> Result<Painting> {
    paint_with(writer, &PaintOptions::default())
}

/// Lay out then paint the whole tree
///
/// The writer is only read, so painting twice yields identical buffers.
pub fn paint_with(writer: &Writer, options: &PaintOptions) -> Result<Painting> {
    let tree = ogw_layout::layout(writer, options)?;
    let buffer = Compositor::new().paint(&tree)?;

    log::debug!(
        "Painted {}x{} canvas with {} warning(s)",
        buffer.width(),
        buffer.height(),
        tree.warnings.len()
    );

    Ok(Painting {
        buffer,
        warnings: tree.warnings,
    })
}

/// Encode a painted buffer
pub fn encode(buffer: &PixelBuffer, format: &OutputFormat) -> Result<Encoded> {
    let exporter = ogw_export::exporter_for(format);
    let bytes = exporter.export(buffer)?;
    log::debug!("Encoded {} bytes as {}", bytes.len(), exporter.name());
    Ok(Encoded {
        bytes,
        format: *format,
        mime_type: exporter.mime_type(),
    })
}

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{encode, paint, paint_with, Encoded, Painting};
    pub use ogw_core::{
        AlignItems, Border, BorderRadius, Color, FailurePolicy, FlexDirection, JustifyContent,
        Margin, OgwError, PaintOptions, PixelBuffer, Position, Result, Style, TextAlign,
        TextOverflow, WhiteSpace, WindowStyle, WordBreak,
    };
    pub use ogw_export::{JpegOptions, OutputFormat, PngColorType, PngCompression, PngOptions};
    pub use ogw_fontdb::{FontBlob, FontReference, FontRegistry};
    pub use ogw_layout::{Container, ImageInputFormat, ImageNode, TextArea, Writer};
}
