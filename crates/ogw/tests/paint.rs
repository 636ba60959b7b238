//! End-to-end: build a writer, paint it, encode it

use std::io::Cursor;
use std::sync::Arc;

use ogw::prelude::*;
use ogw_core::error::FontError;
use ogw_core::{FaceMetrics, FontFace, GlyphId};

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

/// Half-em box glyphs with a 0.8/0.2 ascent split
struct BoxFont;

impl FontFace for BoxFont {
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

    fn outline(&self, _glyph_id: GlyphId, size: f32) -> Option<kurbo::BezPath> {
        let w = size as f64 * 0.5;
        let h = size as f64 * 0.7;
        let mut path = kurbo::BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((w, 0.0));
        path.line_to((w, h));
        path.line_to((0.0, h));
        path.close_path();
        Some(path)
    }
}

fn fonts() -> Arc<FontRegistry> {
    let mut registry = FontRegistry::new();
    registry.register_face(Arc::new(BoxFont));
    Arc::new(registry)
}

fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn window(width: u32, height: u32, background: Option<Color>) -> WindowStyle {
    WindowStyle {
        width: Some(width),
        height: Some(height),
        background_color: background,
        ..WindowStyle::default()
    }
}

/// 300x200 black canvas, "Hello", then a 1x1 red PNG stretched to 50x50
fn hello_card() -> Writer {
    let mut writer = Writer::with_fonts(window(300, 200, Some(Color::rgba(0, 0, 0, 255))), fonts());
    let mut area = TextArea::new(Style::default());
    area.push_text("Hello");
    writer.append(area);
    writer.append(ImageNode::new(solid_png(1, 1, RED), ImageInputFormat::Png).with_size(50, 50));
    writer
}

#[test]
fn hello_card_scenario() {
    let painting = ogw::paint(&hello_card()).unwrap();
    let buffer = &painting.buffer;

    assert!(painting.is_clean());
    assert_eq!(buffer.as_bytes().len(), 300 * 200 * 4);
    // Text line is 45px tall, so the image spans y 45..95
    assert_eq!(buffer.pixel(0, 46), Some(RED));
    assert_eq!(buffer.pixel(49, 94), Some(RED));
    assert_eq!(buffer.pixel(25, 96), Some(BLACK));
    assert_eq!(buffer.pixel(51, 70), Some(BLACK));
    assert_eq!(buffer.pixel(299, 199), Some(BLACK));
}

#[test]
fn painting_twice_is_byte_identical() {
    let writer = hello_card();
    let first = ogw::paint(&writer).unwrap();
    let second = ogw::paint(&writer).unwrap();
    assert_eq!(first.buffer, second.buffer);
}

#[test]
fn unsized_containers_shrink_by_one_and_a_half() {
    let mut middle = Writer::new(WindowStyle {
        background_color: Some(Color::rgba(0, 255, 0, 255)),
        ..WindowStyle::default()
    });
    middle.append(Container::new(
        Writer::new(WindowStyle {
            background_color: Some(Color::rgba(0, 0, 255, 255)),
            ..WindowStyle::default()
        }),
        Style::default(),
    ));
    let mut writer = Writer::new(window(300, 200, Some(Color::black())));
    writer.append(Container::new(middle, Style::default()));

    let buffer = ogw::paint(&writer).unwrap().buffer;
    // 300x200 -> 200x133 -> 133x88
    assert_eq!(buffer.pixel(132, 87), Some(BLUE));
    assert_eq!(buffer.pixel(133, 50), Some(GREEN));
    assert_eq!(buffer.pixel(50, 88), Some(GREEN));
    assert_eq!(buffer.pixel(199, 132), Some(GREEN));
    assert_eq!(buffer.pixel(200, 50), Some(BLACK));
    assert_eq!(buffer.pixel(50, 133), Some(BLACK));
}

#[test]
fn zero_length_image_changes_nothing() {
    let build = |with_empty: bool| {
        let mut writer = Writer::new(window(40, 40, Some(Color::black())));
        if with_empty {
            writer.append(ImageNode::new(Vec::new(), ImageInputFormat::Png).with_size(20, 20));
        }
        writer.append(ImageNode::new(solid_png(1, 1, RED), ImageInputFormat::Png).with_size(10, 10));
        writer
    };

    let with_empty = ogw::paint(&build(true)).unwrap();
    let without = ogw::paint(&build(false)).unwrap();
    assert!(with_empty.is_clean());
    assert_eq!(with_empty.buffer, without.buffer);
    assert_eq!(with_empty.buffer.pixel(5, 5), Some(RED));
}

#[test]
fn no_fonts_degrades_to_background_only() {
    let mut writer = Writer::new(window(80, 40, Some(Color::white())));
    let mut area = TextArea::new(Style::default());
    area.push_text("Hello");
    writer.append(area);

    let painting = ogw::paint(&writer).unwrap();
    assert_eq!(painting.warnings.len(), 1);
    assert!(painting
        .buffer
        .as_bytes()
        .chunks_exact(4)
        .all(|px| px == [255, 255, 255, 255]));
}

#[test]
fn no_fonts_fails_under_abort() {
    let mut writer = Writer::new(window(80, 40, Some(Color::white())));
    let mut area = TextArea::new(Style::default());
    area.push_text("Hello");
    writer.append(area);

    let options = PaintOptions::default().with_failure_policy(FailurePolicy::Abort);
    let result = ogw::paint_with(&writer, &options);
    assert!(matches!(
        result,
        Err(OgwError::Font(FontError::FontNotFound(_)))
    ));
}

#[test]
fn png_output_decodes_to_the_painted_buffer() {
    let painting = ogw::paint(&hello_card()).unwrap();
    let encoded = ogw::encode(&painting.buffer, &OutputFormat::default()).unwrap();
    assert_eq!(encoded.mime_type, "image/png");

    let decoded = image::load_from_memory_with_format(&encoded.bytes, image::ImageFormat::Png)
        .unwrap()
        .into_rgba8();
    assert_eq!(decoded.as_raw(), painting.buffer.as_bytes());
}

#[test]
fn raw_output_is_the_buffer() {
    let painting = ogw::paint(&hello_card()).unwrap();
    let encoded = ogw::encode(&painting.buffer, &OutputFormat::Raw).unwrap();
    assert_eq!(encoded.bytes, painting.buffer.as_bytes());
    assert_eq!(encoded.format, OutputFormat::Raw);
}

#[test]
fn template_image_sets_the_canvas() {
    let writer = Writer::from_image(
        WindowStyle::default(),
        solid_png(64, 32, BLUE),
        ImageInputFormat::Png,
    );
    let buffer = ogw::paint(&writer).unwrap().buffer;
    assert_eq!((buffer.width(), buffer.height()), (64, 32));
    assert_eq!(buffer.pixel(63, 31), Some(BLUE));
}

#[test]
fn zero_width_window_paints_an_empty_buffer() {
    let writer = Writer::with_fonts(window(0, 10, Some(Color::white())), fonts());

    let painting = ogw::paint(&writer).unwrap();
    assert_eq!((painting.buffer.width(), painting.buffer.height()), (0, 10));
    assert!(painting.buffer.as_bytes().is_empty());
    assert_eq!(painting.buffer.pixel(0, 0), None);
}
