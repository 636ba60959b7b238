//! PNG export format
//!
//! Encodes through the `png` crate so compression level is under our
//! control. The encoder writes non-interlaced images only.

use ogw_core::{
    error::{EncodeError, Result},
    traits::Exporter,
    types::PixelBuffer,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PngCompression {
    Fast,
    #[default]
    Default,
    Best,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PngColorType {
    #[default]
    Rgba,
    /// Alpha dropped; only allowed for fully opaque buffers
    Rgb,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PngOptions {
    pub compression: PngCompression,
    pub color_type: PngColorType,
    pub interlaced: bool,
}

/// Encode a pixel buffer to PNG bytes
pub fn encode_png(buffer: &PixelBuffer, options: &PngOptions) -> Result<Vec<u8>> {
    if options.interlaced {
        return Err(EncodeError::UnsupportedOption(
            "interlaced PNG output is not supported".into(),
        )
        .into());
    }

    let (color, data) = match options.color_type {
        PngColorType::Rgba => (png::ColorType::Rgba, None),
        PngColorType::Rgb => {
            if !buffer.is_opaque() {
                return Err(EncodeError::UnsupportedOption(
                    "RGB output needs a fully opaque buffer".into(),
                )
                .into());
            }
            let rgb: Vec<u8> = buffer
                .as_bytes()
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            (png::ColorType::Rgb, Some(rgb))
        },
    };

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, buffer.width(), buffer.height());
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(match options.compression {
            PngCompression::Fast => png::Compression::Fast,
            PngCompression::Default => png::Compression::Default,
            PngCompression::Best => png::Compression::Best,
        });

        let mut writer = encoder
            .write_header()
            .map_err(|e| EncodeError::EncodingFailed(format!("PNG header: {}", e)))?;
        writer
            .write_image_data(data.as_deref().unwrap_or(buffer.as_bytes()))
            .map_err(|e| EncodeError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;
        writer
            .finish()
            .map_err(|e| EncodeError::EncodingFailed(format!("PNG finish: {}", e)))?;
    }

    log::debug!(
        "Encoded {}x{} PNG ({:?}, {:?}): {} bytes",
        buffer.width(),
        buffer.height(),
        options.color_type,
        options.compression,
        png_data.len()
    );
    Ok(png_data)
}

/// PNG exporter for pixel buffers
///
/// ```
/// use ogw_export::PngExporter;
/// let exporter = PngExporter::new();
/// ```
#[derive(Debug, Clone, Default)]
pub struct PngExporter {
    options: PngOptions,
}

impl PngExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: PngOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PngOptions {
        &self.options
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, buffer: &PixelBuffer) -> Result<Vec<u8>> {
        encode_png(buffer, &self.options)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(width: u32, height: u32) -> PixelBuffer {
        let data = (0..width * height)
            .flat_map(|i| [(i * 7) as u8, (i * 13) as u8, (i * 29) as u8, 255])
            .collect();
        PixelBuffer::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn test_png_exporter_creation() {
        let exporter = PngExporter::new();
        assert_eq!(exporter.name(), "png");
        assert_eq!(exporter.extension(), "png");
        assert_eq!(exporter.mime_type(), "image/png");
    }

    #[test]
    fn test_png_signature() {
        let bytes = PngExporter::new().export(&opaque(3, 3)).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_interlaced_is_refused() {
        let exporter = PngExporter::with_options(PngOptions {
            interlaced: true,
            ..PngOptions::default()
        });
        assert!(exporter.export(&opaque(2, 2)).is_err());
    }

    #[test]
    fn test_rgb_needs_opaque_pixels() {
        let exporter = PngExporter::with_options(PngOptions {
            color_type: PngColorType::Rgb,
            ..PngOptions::default()
        });
        assert!(exporter.export(&opaque(2, 2)).is_ok());
        assert!(exporter.export(&PixelBuffer::new(2, 2)).is_err());
    }

    #[test]
    fn test_compression_levels_all_encode() {
        let buffer = opaque(16, 16);
        for compression in [PngCompression::Fast, PngCompression::Default, PngCompression::Best] {
            let options = PngOptions {
                compression,
                ..PngOptions::default()
            };
            assert!(!encode_png(&buffer, &options).unwrap().is_empty());
        }
    }
}
