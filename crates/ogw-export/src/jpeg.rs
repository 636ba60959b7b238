//! JPEG export format
//!
//! JPEG has no alpha channel, so pixels are flattened to RGB as-is.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use ogw_core::{
    error::{EncodeError, Result},
    traits::Exporter,
    types::PixelBuffer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegOptions {
    /// 1 (smallest) to 100 (best)
    pub quality: u8,
}

impl Default for JpegOptions {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

pub fn encode_jpeg(buffer: &PixelBuffer, options: &JpegOptions) -> Result<Vec<u8>> {
    if !(1..=100).contains(&options.quality) {
        return Err(EncodeError::UnsupportedOption(format!(
            "JPEG quality must be 1..=100, got {}",
            options.quality
        ))
        .into());
    }

    let rgb: Vec<u8> = buffer
        .as_bytes()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut jpeg_data = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_data, options.quality)
        .write_image(&rgb, buffer.width(), buffer.height(), ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(format!("JPEG encoding failed: {}", e)))?;
    Ok(jpeg_data)
}

#[derive(Debug, Clone, Default)]
pub struct JpegExporter {
    options: JpegOptions,
}

impl JpegExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: JpegOptions) -> Self {
        Self { options }
    }
}

impl Exporter for JpegExporter {
    fn name(&self) -> &'static str {
        "jpeg"
    }

    fn export(&self, buffer: &PixelBuffer) -> Result<Vec<u8>> {
        encode_jpeg(buffer, &self.options)
    }

    fn extension(&self) -> &'static str {
        "jpg"
    }

    fn mime_type(&self) -> &'static str {
        "image/jpeg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_bounds() {
        let buffer = PixelBuffer::new(4, 4);
        assert!(encode_jpeg(&buffer, &JpegOptions { quality: 0 }).is_err());
        assert!(encode_jpeg(&buffer, &JpegOptions { quality: 101 }).is_err());
        assert!(encode_jpeg(&buffer, &JpegOptions { quality: 1 }).is_ok());
        assert!(encode_jpeg(&buffer, &JpegOptions { quality: 100 }).is_ok());
    }

    #[test]
    fn writes_jfif_markers() {
        let bytes = JpegExporter::new().export(&PixelBuffer::new(8, 8)).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
    }
}
