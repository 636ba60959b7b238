//! Where fonts come to life: faces and the registry for OGW
//!
//! Fonts are registered as raw bytes and parsed the first time a text run
//! needs them. A [`FontRegistry`] is an ordinary value owned by the writer
//! that uses it; there is no process-wide font cache.
//!
//! ## Memory Management
//!
//! [`Font`] keeps its bytes behind an `Arc` and builds a skrifa `FontRef`
//! on demand, so clones are cheap and TTC faces share one allocation.

mod registry;

pub use registry::{FontBlob, FontReference, FontRegistry};

use std::fs;
use std::path::Path;
use std::sync::Arc;

use ogw_core::{
    error::{FontError, Result},
    traits::{FaceMetrics, FontFace},
    types::GlyphId,
};
use read_fonts::tables::kern::SubtableKind;
use read_fonts::TableProvider;
use skrifa::instance::{LocationRef, Size};
use skrifa::MetadataProvider;

/// A parsed font face backed by skrifa
pub struct Font {
    data: Arc<Vec<u8>>,
    face_index: u32,
    units_per_em: u16,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("bytes", &self.data.len())
            .field("face_index", &self.face_index)
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}

impl Font {
    /// Reads a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data =
            fs::read(path).map_err(|_| FontError::FontNotFound(path.display().to_string()))?;
        Self::from_data(data)
    }

    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_shared(Arc::new(data), 0)
    }

    /// Parses face `face_index` of shared bytes (TTC collections)
    pub fn from_shared(data: Arc<Vec<u8>>, face_index: u32) -> Result<Self> {
        let font_ref = skrifa::FontRef::from_index(&data, face_index)
            .map_err(|_| FontError::InvalidFontData)?;

        // A face without a head table can't be scaled
        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .map_err(|_| FontError::InvalidFontData)?;
        if units_per_em == 0 {
            return Err(FontError::InvalidFontData.into());
        }

        Ok(Font {
            data,
            face_index,
            units_per_em,
        })
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    fn font_ref(&self) -> Option<skrifa::FontRef<'_>> {
        skrifa::FontRef::from_index(&self.data, self.face_index).ok()
    }
}

impl FontFace for Font {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        let font = self.font_ref()?;
        font.charmap().map(ch).map(|gid| gid.to_u32())
    }

    fn advance_width(&self, glyph_id: GlyphId) -> f32 {
        self.font_ref()
            .and_then(|font| {
                font.glyph_metrics(Size::unscaled(), LocationRef::default())
                    .advance_width(skrifa::GlyphId::new(glyph_id))
            })
            .unwrap_or(self.units_per_em as f32 / 2.0)
    }

    fn metrics(&self) -> FaceMetrics {
        match self.font_ref() {
            Some(font) => {
                let metrics = font.metrics(Size::unscaled(), LocationRef::default());
                FaceMetrics {
                    units_per_em: self.units_per_em,
                    ascent: metrics.ascent,
                    descent: metrics.descent,
                    line_gap: metrics.leading,
                }
            },
            None => {
                let upem = self.units_per_em as f32;
                FaceMetrics {
                    units_per_em: self.units_per_em,
                    ascent: upem * 0.8,
                    descent: -upem * 0.2,
                    line_gap: 0.0,
                }
            },
        }
    }

    /// Sum of the horizontal `kern` subtables that apply to the pair
    ///
    /// State-machine, cross-stream and variation subtables are skipped.
    fn kerning(&self, left: GlyphId, right: GlyphId) -> f32 {
        let Some(font) = self.font_ref() else {
            return 0.0;
        };
        let Ok(kern) = font.kern() else {
            return 0.0;
        };
        let (left, right) = (skrifa::GlyphId::new(left), skrifa::GlyphId::new(right));

        let mut total = 0i32;
        for subtable in kern.subtables().flatten() {
            if !subtable.is_horizontal() || subtable.is_cross_stream() || subtable.is_variable() {
                continue;
            }
            let value = match subtable.kind() {
                Ok(SubtableKind::Format0(table)) => table.kerning(left, right),
                Ok(SubtableKind::Format2(table)) => table.kerning(left, right),
                Ok(SubtableKind::Format3(table)) => table.kerning(left, right),
                _ => None,
            };
            total = total.saturating_add(value.unwrap_or(0));
        }
        total as f32
    }

    fn outline(&self, glyph_id: GlyphId, size: f32) -> Option<kurbo::BezPath> {
        let font = self.font_ref()?;
        let outlines = font.outline_glyphs();
        let glyph = outlines.get(skrifa::GlyphId::new(glyph_id))?;

        let mut path = kurbo::BezPath::new();
        let mut pen = PathPen { path: &mut path };
        let settings =
            skrifa::outline::DrawSettings::unhinted(Size::new(size), LocationRef::default());

        if let Err(e) = glyph.draw(settings, &mut pen) {
            log::debug!("Outline for glyph {} failed: {:?}", glyph_id, e);
            return None;
        }
        Some(path)
    }
}

/// Bridge between skrifa's outline commands and kurbo's path format
///
/// skrifa already scales to the requested size, so points pass through.
struct PathPen<'a> {
    path: &'a mut kurbo::BezPath,
}

impl skrifa::outline::OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path.quad_to((cx0 as f64, cy0 as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
