//! The seams between stages
//!
//! - [`FontFace`] - Glyph lookup, metrics and outlines for one face
//! - [`Exporter`] - Where pixels become bytes

use crate::{error::Result, types::*};

/// Vertical metrics of a face, in font units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceMetrics {
    pub units_per_em: u16,
    /// Distance from baseline to the top, positive
    pub ascent: f32,
    /// Distance from baseline to the bottom, negative
    pub descent: f32,
    pub line_gap: f32,
}

/// Everything the layout engine and compositor need from a font
///
/// ```ignore
/// struct BoxFont;
///
/// impl FontFace for BoxFont {
///     fn data(&self) -> &[u8] {
///         &[]
///     }
///
///     fn units_per_em(&self) -> u16 {
///         1000
///     }
///
///     fn glyph_id(&self, ch: char) -> Option<GlyphId> {
///         ch.is_ascii().then_some(ch as u32)
///     }
///
///     fn advance_width(&self, _glyph_id: GlyphId) -> f32 {
///         500.0
///     }
///
///     fn metrics(&self) -> FaceMetrics {
///         FaceMetrics { units_per_em: 1000, ascent: 800.0, descent: -200.0, line_gap: 0.0 }
///     }
///
///     fn outline(&self, _glyph_id: GlyphId, _size: f32) -> Option<kurbo::BezPath> {
///         None
///     }
/// }
/// ```
pub trait FontFace: Send + Sync {
    /// Raw font bytes, empty for synthetic faces
    fn data(&self) -> &[u8];

    fn units_per_em(&self) -> u16;

    /// Glyph for a character, `None` when the face doesn't cover it
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// Horizontal advance in font units
    fn advance_width(&self, glyph_id: GlyphId) -> f32;

    fn metrics(&self) -> FaceMetrics;

    /// Pair adjustment in font units
    fn kerning(&self, _left: GlyphId, _right: GlyphId) -> f32 {
        0.0
    }

    /// Glyph outline scaled to `size` pixels per em
    ///
    /// Coordinates are y-up with the origin on the baseline, as fonts draw
    /// them. The compositor flips them into raster space.
    fn outline(&self, glyph_id: GlyphId, size: f32) -> Option<kurbo::BezPath>;
}

/// Turns a finished pixel buffer into file bytes
pub trait Exporter: Send + Sync {
    /// Who are you?
    fn name(&self) -> &'static str;

    /// Encode the buffer; the buffer itself is never modified
    fn export(&self, buffer: &PixelBuffer) -> Result<Vec<u8>>;

    fn extension(&self) -> &'static str;

    fn mime_type(&self) -> &'static str;
}
