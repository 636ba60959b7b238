//! A malformed blob is reported once, not once per shaped character
//!
//! Lives in its own test binary because it installs the global logger.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ogw_core::{FaceMetrics, FontFace, GlyphId};
use ogw_fontdb::FontRegistry;

struct WarnCounter {
    warnings: AtomicUsize,
}

impl log::Log for WarnCounter {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Warn
    }

    fn log(&self, record: &log::Record) {
        if record.level() == log::Level::Warn {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn flush(&self) {}
}

static COUNTER: WarnCounter = WarnCounter {
    warnings: AtomicUsize::new(0),
};

struct AsciiFont;

impl FontFace for AsciiFont {
    fn data(&self) -> &[u8] {
        &[]
    }

    fn units_per_em(&self) -> u16 {
        1000
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        ch.is_ascii().then_some(ch as u32)
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

#[test]
fn malformed_blob_warns_once_across_fallback() {
    log::set_logger(&COUNTER).unwrap();
    log::set_max_level(log::LevelFilter::Debug);

    let mut registry = FontRegistry::new();
    registry.register(vec![0; 64]).unwrap();
    registry.register_face(Arc::new(AsciiFont));

    for ch in "Hello, fallback".chars() {
        assert!(registry.select_for_char(ch).is_ok());
    }
    assert_eq!(COUNTER.warnings.load(Ordering::SeqCst), 1);
}
