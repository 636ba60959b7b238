//! Pixel checks for the compositor

use std::io::Cursor;
use std::sync::Arc;

use ogw_core::{
    Border, BorderRadius, Color, FaceMetrics, FontFace, GlyphId, Margin, PaintOptions,
    PixelBuffer, Style, WindowStyle,
};
use ogw_fontdb::FontRegistry;
use ogw_layout::{layout, Container, ImageInputFormat, ImageNode, TextArea, Writer};
use ogw_render::Compositor;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Draws every glyph as a solid half-em box sitting on the baseline
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

    fn outline(&self, glyph_id: GlyphId, size: f32) -> Option<kurbo::BezPath> {
        if glyph_id == ' ' as u32 {
            return None;
        }
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

fn window(width: u32, height: u32, background: Option<Color>) -> WindowStyle {
    WindowStyle {
        width: Some(width),
        height: Some(height),
        background_color: background,
        ..WindowStyle::default()
    }
}

fn red_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba(RED));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn paint(writer: &Writer) -> PixelBuffer {
    let tree = layout(writer, &PaintOptions::default()).unwrap();
    Compositor::new().paint(&tree).unwrap()
}

#[test]
fn background_fills_every_pixel() {
    let writer = Writer::new(window(20, 10, Some(Color::rgba(255, 0, 0, 255))));
    let buffer = paint(&writer);

    assert_eq!(buffer.as_bytes().len(), 20 * 10 * 4);
    assert!(buffer.as_bytes().chunks_exact(4).all(|px| px == RED));
}

#[test]
fn no_background_stays_transparent() {
    let writer = Writer::new(window(4, 4, None));
    let buffer = paint(&writer);
    assert!(buffer.as_bytes().iter().all(|b| *b == 0));
}

#[test]
fn image_lands_below_text() {
    let mut writer = Writer::with_fonts(window(300, 200, Some(Color::black())), fonts());
    let mut area = TextArea::new(Style::default());
    area.push_text("Hello");
    writer.append(area);
    writer.append(ImageNode::new(red_png(), ImageInputFormat::Png).with_size(50, 50));

    let buffer = paint(&writer);
    assert_eq!(buffer.pixel(25, 70), Some(RED));
    assert_eq!(buffer.pixel(25, 100), Some(BLACK));
    assert_eq!(buffer.pixel(100, 70), Some(BLACK));
}

#[test]
fn glyphs_sit_on_the_baseline() {
    let mut writer = Writer::with_fonts(window(100, 60, Some(Color::black())), fonts());
    let mut area = TextArea::new(Style {
        color: Some(Color::white()),
        ..Style::default()
    });
    area.push_text("H");
    writer.append(area);

    let buffer = paint(&writer);
    // Box glyph spans x 0..15, y 10.5..31.5
    assert_eq!(buffer.pixel(7, 20), Some(WHITE));
    assert_eq!(buffer.pixel(7, 40), Some(BLACK));
    assert_eq!(buffer.pixel(20, 20), Some(BLACK));
}

#[test]
fn rounded_image_corners_are_clipped() {
    let mut writer = Writer::new(window(60, 60, Some(Color::black())));
    writer.append(
        ImageNode::new(red_png(), ImageInputFormat::Png)
            .with_size(40, 40)
            .with_style(Style {
                border_radius: Some(BorderRadius::all(20)),
                ..Style::default()
            }),
    );

    let buffer = paint(&writer);
    assert_eq!(buffer.pixel(0, 0), Some(BLACK));
    assert_eq!(buffer.pixel(20, 20), Some(RED));
    assert_eq!(buffer.pixel(39, 39), Some(BLACK));
}

#[test]
fn nested_container_paints_at_its_offset() {
    let green = Color::rgba(0, 255, 0, 255);
    let inner = Writer::new(window(20, 20, Some(green)));
    let mut writer = Writer::new(window(50, 50, Some(Color::black())));
    writer.append(Container::new(
        inner,
        Style {
            margin: Some(Margin::new(10, 0, 0, 10)),
            ..Style::default()
        },
    ));

    let buffer = paint(&writer);
    assert_eq!(buffer.pixel(5, 5), Some(BLACK));
    assert_eq!(buffer.pixel(15, 15), Some([0, 255, 0, 255]));
    assert_eq!(buffer.pixel(35, 35), Some(BLACK));
}

#[test]
fn nested_container_radius_clips_its_children() {
    let inner = Writer::new(window(40, 40, Some(Color::white())));
    let mut writer = Writer::new(window(40, 40, Some(Color::black())));
    writer.append(Container::new(
        inner,
        Style {
            border_radius: Some(BorderRadius::all(20)),
            ..Style::default()
        },
    ));

    let buffer = paint(&writer);
    assert_eq!(buffer.pixel(0, 0), Some(BLACK));
    assert_eq!(buffer.pixel(20, 20), Some(WHITE));
}

#[test]
fn border_is_stroked_inside_the_edge() {
    let inner = Writer::new(window(40, 40, Some(Color::white())));
    let mut writer = Writer::new(window(40, 40, Some(Color::black())));
    writer.append(Container::new(
        inner,
        Style {
            border: Some(Border {
                width: 4,
                color: Color::rgba(255, 0, 0, 255),
            }),
            ..Style::default()
        },
    ));

    let buffer = paint(&writer);
    assert_eq!(buffer.pixel(1, 20), Some(RED));
    assert_eq!(buffer.pixel(20, 38), Some(RED));
    assert_eq!(buffer.pixel(20, 20), Some(WHITE));
}

#[test]
fn images_and_text_carry_borders() {
    let blue = Color::rgba(0, 0, 255, 255);
    let mut writer = Writer::with_fonts(window(100, 100, Some(Color::white())), fonts());
    writer.append(ImageNode::new(red_png(), ImageInputFormat::Png).with_size(40, 40).with_style(
        Style {
            border: Some(Border {
                width: 4,
                color: blue,
            }),
            ..Style::default()
        },
    ));
    let mut area = TextArea::new(Style {
        border: Some(Border {
            width: 2,
            color: blue,
        }),
        ..Style::default()
    });
    area.push_text("ab");
    writer.append(area);

    let buffer = paint(&writer);
    // image spans rows 0..40, the 30x45 text box sits below it
    assert_eq!(buffer.pixel(1, 20), Some([0, 0, 255, 255]));
    assert_eq!(buffer.pixel(20, 20), Some(RED));
    assert_eq!(buffer.pixel(0, 60), Some([0, 0, 255, 255]));
    assert_eq!(buffer.pixel(10, 45), Some(WHITE));
    assert_eq!(buffer.pixel(40, 60), Some(WHITE));
}

#[test]
fn repaint_is_byte_identical() {
    let build = || {
        let mut writer = Writer::with_fonts(window(120, 80, Some(Color::white())), fonts());
        let mut area = TextArea::new(Style::default());
        area.push_text("same pixels");
        writer.append(area);
        writer
    };
    let writer = build();
    assert_eq!(paint(&writer), paint(&writer));
    assert_eq!(paint(&writer), paint(&build()));
}
