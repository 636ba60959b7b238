//! Data shared between the layout, render and export stages

use crate::error::{RenderError, Result};
use std::fmt;

/// Unique identifier for a glyph within a font
pub type GlyphId = u32;

/// Position of a node in the layout tree
///
/// Child indices from the root writer down, so `0/2` is the third child of
/// the first container. The root itself is the empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of the `index`-th child of this node
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

/// Final composited image
///
/// Row-major RGBA8 with straight (non-premultiplied) alpha. Pixel (0, 0) is
/// the top-left corner, each row is exactly `width * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent buffer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wraps existing RGBA8 bytes, checking the length
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: data.len(),
            }
            .into());
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// RGBA value at `(x, y)`, `None` outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.stride() + x as usize * 4;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// True when every pixel has full alpha
    pub fn is_opaque(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_path_display() {
        assert_eq!(NodePath::root().to_string(), "/");
        assert_eq!(NodePath::root().child(0).child(2).to_string(), "0/2");
        assert!(NodePath::root().is_root());
        assert_eq!(NodePath::root().child(4).indices(), &[4]);
    }

    #[test]
    fn pixel_buffer_layout() {
        let mut data = vec![0u8; 2 * 2 * 4];
        // pixel (1, 1)
        data[12..16].copy_from_slice(&[1, 2, 3, 4]);
        let buffer = PixelBuffer::from_raw(2, 2, data).unwrap();

        assert_eq!(buffer.stride(), 8);
        assert_eq!(buffer.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(buffer.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(buffer.pixel(2, 0), None);
        assert!(!buffer.is_opaque());
    }

    #[test]
    fn from_raw_rejects_wrong_length() {
        let result = PixelBuffer::from_raw(3, 3, vec![0; 10]);
        assert!(result.is_err());
    }
}
