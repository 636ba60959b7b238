//! Image node decoding and sizing

use image::imageops::{self, FilterType};

use ogw_core::error::{ImageDecodeError, Result};
use ogw_core::style::ResolvedStyle;
use ogw_core::types::NodePath;

use crate::boxes::DecodedImage;
use crate::tree::ImageNode;

/// Decodes the node's bytes into straight RGBA at natural size
pub fn decode(node: &ImageNode, path: &NodePath) -> Result<DecodedImage> {
    let decoded = image::load_from_memory_with_format(node.data(), node.format().to_image_format())
        .map_err(|e| ImageDecodeError {
            path: path.clone(),
            reason: e.to_string(),
        })?;
    let rgba = decoded.into_rgba8();
    log::debug!(
        "Decoded {:?} image at {}: {}x{}",
        node.format(),
        path,
        rgba.width(),
        rgba.height()
    );
    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// Size the node occupies
///
/// Both declared sides win outright. One declared side scales the other by
/// the natural aspect ratio. Otherwise the natural size is shrunk to fit
/// `max_width`/`max_height`, keeping the ratio.
pub fn target_size(
    natural: (u32, u32),
    declared: (Option<u32>, Option<u32>),
    style: &ResolvedStyle,
) -> (u32, u32) {
    let (nat_w, nat_h) = natural;
    match declared {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => (w, scale_side(nat_h, w, nat_w)),
        (None, Some(h)) => (scale_side(nat_w, h, nat_h), h),
        (None, None) => {
            let (mut w, mut h) = (nat_w, nat_h);
            if let Some(max_w) = style.max_width {
                if w > max_w {
                    h = scale_side(h, max_w, w);
                    w = max_w;
                }
            }
            if let Some(max_h) = style.max_height {
                if h > max_h {
                    w = scale_side(w, max_h, h);
                    h = max_h;
                }
            }
            (w, h)
        },
    }
}

/// `side * num / den`, rounded
fn scale_side(side: u32, num: u32, den: u32) -> u32 {
    if den == 0 {
        return 0;
    }
    ((side as u64 * num as u64 + den as u64 / 2) / den as u64) as u32
}

/// Resamples to `(width, height)` unless it's already that size
pub fn fit(image: DecodedImage, width: u32, height: u32) -> DecodedImage {
    if image.width == width && image.height == height {
        return image;
    }
    if width == 0 || height == 0 || image.width == 0 || image.height == 0 {
        return DecodedImage {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        };
    }
    let Some(buffer) = image::RgbaImage::from_raw(image.width, image.height, image.pixels) else {
        return DecodedImage {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        };
    };
    let resized = imageops::resize(&buffer, width, height, FilterType::Triangle);
    DecodedImage {
        width,
        height,
        pixels: resized.into_raw(),
    }
}
