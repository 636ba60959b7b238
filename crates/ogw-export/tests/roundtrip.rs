//! Encoded output decodes back to the painted pixels

use ogw_core::{Exporter, PixelBuffer};
use ogw_export::{exporter_for, OutputFormat, PngColorType, PngCompression, PngOptions};

fn gradient(width: u32, height: u32, alpha: impl Fn(u32) -> u8) -> PixelBuffer {
    let data = (0..width * height)
        .flat_map(|i| {
            let a = alpha(i);
            [(i % 251) as u8, (i * 3 % 256) as u8, (255 - i % 256) as u8, a]
        })
        .collect();
    PixelBuffer::from_raw(width, height, data).unwrap()
}

#[test]
fn png_roundtrip_is_lossless() {
    let buffer = gradient(37, 21, |i| (i % 256) as u8);
    for compression in [PngCompression::Fast, PngCompression::Best] {
        let format = OutputFormat::Png(PngOptions {
            compression,
            ..PngOptions::default()
        });
        let bytes = exporter_for(&format).export(&buffer).unwrap();

        let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
            .unwrap()
            .into_rgba8();
        assert_eq!((decoded.width(), decoded.height()), (37, 21));
        assert_eq!(decoded.as_raw(), buffer.as_bytes());
    }
}

#[test]
fn rgb_png_roundtrip_keeps_color() {
    let buffer = gradient(9, 9, |_| 255);
    let format = OutputFormat::Png(PngOptions {
        color_type: PngColorType::Rgb,
        ..PngOptions::default()
    });
    let bytes = exporter_for(&format).export(&buffer).unwrap();

    let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();
    assert_eq!(decoded.as_raw(), buffer.as_bytes());
}

#[test]
fn failed_encode_leaves_buffer_alone() {
    let buffer = gradient(4, 4, |i| i as u8);
    let before = buffer.clone();
    let format = OutputFormat::Png(PngOptions {
        interlaced: true,
        ..PngOptions::default()
    });
    assert!(exporter_for(&format).export(&buffer).is_err());
    assert_eq!(buffer, before);
}

#[test]
fn jpeg_decodes_to_same_size() {
    let buffer = gradient(16, 8, |_| 255);
    let format = OutputFormat::Jpeg(ogw_export::JpegOptions { quality: 80 });
    let exporter = exporter_for(&format);
    assert_eq!(exporter.mime_type(), "image/jpeg");

    let bytes = exporter.export(&buffer).unwrap();
    let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (16, 8));
}
