//! Registry behaviour with synthetic and real faces

use std::path::PathBuf;
use std::sync::Arc;

use ogw_core::error::FontError;
use ogw_core::{FaceMetrics, FontFace, GlyphId, OgwError};
use ogw_fontdb::{FontBlob, FontReference, FontRegistry};

/// Covers a fixed set of characters, nothing else
struct MockFont {
    covers: &'static str,
}

impl FontFace for MockFont {
    fn data(&self) -> &[u8] {
        &[]
    }

    fn units_per_em(&self) -> u16 {
        1000
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        self.covers.contains(ch).then_some(ch as u32)
    }

    fn advance_width(&self, _glyph_id: GlyphId) -> f32 {
        500.0
    }

    fn metrics(&self) -> FaceMetrics {
        FaceMetrics {
            units_per_em: 1000,
            ascent: 800.0,
            descent: -200.0,
            line_gap: 0.0,
        }
    }

    fn outline(&self, _glyph_id: GlyphId, _size: f32) -> Option<kurbo::BezPath> {
        None
    }
}

fn system_font() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("OGW_TEST_FONT") {
        return Some(PathBuf::from(path));
    }
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|p| p.exists())
}

#[test]
fn empty_bytes_are_rejected_eagerly() {
    let mut registry = FontRegistry::new();
    let result = registry.register(Vec::new());
    assert!(matches!(
        result,
        Err(OgwError::Font(FontError::InvalidFontData))
    ));
    assert!(registry.is_empty());
}

#[test]
fn malformed_bytes_fail_on_resolve() {
    let mut registry = FontRegistry::new();
    let index = registry.register(vec![1, 2, 3, 4]).unwrap();
    assert_eq!(index, 0);

    for _ in 0..2 {
        let result = registry.resolve(&FontReference::Index(index));
        assert!(matches!(
            result,
            Err(OgwError::Font(FontError::InvalidFontData))
        ));
    }
}

#[test]
fn blob_parse_outcome_is_memoized() {
    let blob = FontBlob::new(vec![0; 64]);
    assert!(!blob.is_parsed());

    assert!(blob.face().is_err());
    assert!(blob.is_parsed());

    let shared = blob.clone();
    assert!(shared.is_parsed());
}

#[test]
fn out_of_range_index_is_not_found() {
    let mut registry = FontRegistry::new();
    registry.register_face(Arc::new(MockFont { covers: "abc" }));

    let result = registry.resolve(&FontReference::Index(3));
    assert!(matches!(
        result,
        Err(OgwError::Font(FontError::FontNotFound(_)))
    ));
}

#[test]
fn clear_is_idempotent() {
    let mut registry = FontRegistry::new();
    registry.clear();

    registry.register(vec![9; 16]).unwrap();
    registry.register_face(Arc::new(MockFont { covers: "x" }));
    assert_eq!(registry.len(), 2);

    registry.clear();
    registry.clear();
    assert!(registry.is_empty());
}

#[test]
fn fallback_picks_first_covering_face() {
    let mut registry = FontRegistry::new();
    registry.register_face(Arc::new(MockFont { covers: "ab" }));
    registry.register_face(Arc::new(MockFont { covers: "bc" }));

    let face = registry.select_for_char('c').unwrap();
    assert_eq!(face.glyph_id('c'), Some('c' as u32));
    assert_eq!(face.glyph_id('a'), None);

    let face = registry.select_for_char('b').unwrap();
    assert_eq!(face.glyph_id('a'), Some('a' as u32));
}

#[test]
fn fallback_skips_broken_entries() {
    let mut registry = FontRegistry::new();
    registry.register(vec![0xde, 0xad, 0xbe, 0xef]).unwrap();
    registry.register_face(Arc::new(MockFont { covers: "z" }));

    assert!(registry.select_for_char('z').is_ok());
}

#[test]
fn fallback_without_fonts_is_not_found() {
    let registry = FontRegistry::new();
    let result = registry.select_for_char('H');
    assert!(matches!(
        result,
        Err(OgwError::Font(FontError::FontNotFound(_)))
    ));
}

#[test]
fn real_font_resolves_and_draws() {
    let Some(path) = system_font() else {
        eprintln!("Skipping test: font not found");
        return;
    };

    let mut registry = FontRegistry::new();
    let index = registry.register_file(&path).unwrap();
    let face = registry.resolve(&FontReference::Index(index)).unwrap();

    assert!(face.units_per_em() > 0);
    let metrics = face.metrics();
    assert!(metrics.ascent > 0.0);
    assert!(metrics.descent <= 0.0);

    let gid = face.glyph_id('H').unwrap();
    assert!(face.advance_width(gid) > 0.0);

    let outline = face.outline(gid, 32.0).unwrap();
    assert!(!outline.elements().is_empty());
}
