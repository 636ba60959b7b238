//! Export formats for OGW
//!
//! A painted [`PixelBuffer`] leaves as raw RGBA, PNG or JPEG. Exporters only
//! read the buffer, so a failed encode leaves it untouched.

pub mod jpeg;
pub mod png;

pub use crate::jpeg::{JpegExporter, JpegOptions};
pub use crate::png::{PngColorType, PngCompression, PngExporter, PngOptions};

use ogw_core::{error::Result, traits::Exporter, types::PixelBuffer};

/// The RGBA bytes exactly as painted
#[derive(Debug, Clone, Copy, Default)]
pub struct RawExporter;

impl RawExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for RawExporter {
    fn name(&self) -> &'static str {
        "raw"
    }

    fn export(&self, buffer: &PixelBuffer) -> Result<Vec<u8>> {
        Ok(buffer.as_bytes().to_vec())
    }

    fn extension(&self) -> &'static str {
        "rgba"
    }

    fn mime_type(&self) -> &'static str {
        "application/octet-stream"
    }
}

/// Every way a buffer can be written out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Raw,
    Png(PngOptions),
    Jpeg(JpegOptions),
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Png(PngOptions::default())
    }
}

/// Picks the exporter for a format
pub fn exporter_for(format: &OutputFormat) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Raw => Box::new(RawExporter::new()),
        OutputFormat::Png(options) => Box::new(PngExporter::with_options(*options)),
        OutputFormat::Jpeg(options) => Box::new(JpegExporter::with_options(*options)),
    }
}
