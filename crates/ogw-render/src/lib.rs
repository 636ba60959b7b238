//! Compositor: layout boxes become pixels via tiny-skia
//!
//! Each container paints into its own surface: background color, then
//! background image, then border, then children in insertion order. Nested
//! containers are composited onto their parent through a coverage mask of
//! their rounded rect, so `border_radius` clips everything inside them.
//!
//! tiny-skia works in premultiplied alpha; the final buffer is converted
//! back to straight RGBA.

mod shapes;

use std::collections::HashMap;
use std::sync::Arc;

use kurbo::PathEl;
use tiny_skia::{
    FillRule, IntSize, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

use ogw_core::error::{RenderError, Result};
use ogw_core::style::{Border, BorderRadius, Color};
use ogw_core::traits::FontFace;
use ogw_core::types::{NodePath, PixelBuffer};
use ogw_layout::{ContainerBox, DecodedImage, ImageBox, LayoutBox, LayoutTree, Rect, TextBox};

use shapes::rounded_rect;

/// Paints layout trees into pixel buffers
#[derive(Debug)]
pub struct Compositor {
    /// Largest side we agree to allocate
    max_size: u32,
}

/// Glyph outlines converted once per paint, keyed by face, glyph and size
type GlyphCache = HashMap<(usize, u32, u32), Option<tiny_skia::Path>>;

impl Compositor {
    pub fn new() -> Self {
        Self { max_size: 16384 }
    }

    pub fn with_max_size(max_size: u32) -> Self {
        Self { max_size }
    }

    pub fn name(&self) -> &'static str {
        "tiny-skia"
    }

    /// Paints the whole tree at its root size
    ///
    /// A zero-area root paints to an empty buffer of the same dimensions.
    pub fn paint(&self, tree: &LayoutTree) -> Result<PixelBuffer> {
        let (width, height) = (tree.width(), tree.height());
        if width > self.max_size || height > self.max_size {
            return Err(RenderError::InvalidDimensions { width, height }.into());
        }
        if width == 0 || height == 0 {
            log::debug!("Zero-area canvas {}x{}, nothing to composite", width, height);
            return Ok(PixelBuffer::new(width, height));
        }

        let mut cache = GlyphCache::new();
        let pixmap = paint_container(&tree.root, &mut cache)?.ok_or(
            RenderError::InvalidDimensions { width, height },
        )?;
        log::debug!(
            "Composited {}x{} ({} cached glyph outlines)",
            width,
            height,
            cache.len()
        );

        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for px in pixmap.pixels() {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        PixelBuffer::from_raw(width, height, data)
    }
}

/// Paints one container into a fresh surface; `None` for empty boxes
fn paint_container(container: &ContainerBox, cache: &mut GlyphCache) -> Result<Option<Pixmap>> {
    let Some(mut pixmap) = Pixmap::new(container.rect.width, container.rect.height) else {
        return Ok(None);
    };

    if let Some(color) = container.background {
        pixmap.fill(skia_color(color));
    }
    if let Some(image) = &container.background_image {
        if let Some(surface) = image_pixmap(image) {
            pixmap.draw_pixmap(
                0,
                0,
                surface.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
    }
    if let Some(border) = container.border {
        let bounds = Rect::new(0, 0, container.rect.width, container.rect.height);
        stroke_border(&mut pixmap, bounds, border, container.border_radius, &container.path)?;
    }

    for child in &container.children {
        match child {
            LayoutBox::Text(text) => {
                paint_text(&mut pixmap, text, cache);
                if let Some(border) = text.border {
                    stroke_border(&mut pixmap, text.rect, border, text.border_radius, &text.path)?;
                }
            },
            LayoutBox::Image(image) => paint_image(&mut pixmap, image)?,
            LayoutBox::Container(nested) => {
                if let Some(surface) = paint_container(nested, cache)? {
                    let mask = clip_mask(&pixmap, nested.rect, nested.border_radius, &nested.path)?;
                    pixmap.draw_pixmap(
                        nested.rect.x,
                        nested.rect.y,
                        surface.as_ref(),
                        &PixmapPaint::default(),
                        Transform::identity(),
                        mask.as_ref(),
                    );
                }
            },
        }
    }
    Ok(Some(pixmap))
}

fn paint_image(pixmap: &mut Pixmap, image: &ImageBox) -> Result<()> {
    if image.rect.is_empty() {
        return Ok(());
    }
    let Some(surface) = image_pixmap(&image.image) else {
        return Ok(());
    };
    let mask = clip_mask(pixmap, image.rect, image.border_radius, &image.path)?;
    pixmap.draw_pixmap(
        image.rect.x,
        image.rect.y,
        surface.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        mask.as_ref(),
    );
    if let Some(border) = image.border {
        stroke_border(pixmap, image.rect, border, image.border_radius, &image.path)?;
    }
    Ok(())
}

/// Coverage mask of a rounded rect in `pixmap` space, `None` when square
fn clip_mask(
    pixmap: &Pixmap,
    rect: Rect,
    radius: BorderRadius,
    path: &NodePath,
) -> Result<Option<Mask>> {
    if radius.is_zero() || rect.is_empty() {
        return Ok(None);
    }
    let shape = rounded_rect(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
        radius,
    )
    .ok_or_else(|| RenderError::PathBuildingFailed(path.clone()))?;

    let mut mask = Mask::new(pixmap.width(), pixmap.height()).ok_or(
        RenderError::InvalidDimensions {
            width: pixmap.width(),
            height: pixmap.height(),
        },
    )?;
    mask.fill_path(&shape, FillRule::Winding, true, Transform::identity());
    Ok(Some(mask))
}

/// Strokes the border inside the edge of `rect`, given in `pixmap` space
fn stroke_border(
    pixmap: &mut Pixmap,
    rect: Rect,
    border: Border,
    radius: BorderRadius,
    path: &NodePath,
) -> Result<()> {
    if border.width == 0 {
        return Ok(());
    }
    let width = border.width as f32;
    let inset = width / 2.0;
    let (w, h) = (rect.width as f32, rect.height as f32);
    if w <= width || h <= width {
        return Ok(());
    }
    let inner_radius = BorderRadius::new(
        radius.top_left.saturating_sub(border.width / 2),
        radius.top_right.saturating_sub(border.width / 2),
        radius.bottom_right.saturating_sub(border.width / 2),
        radius.bottom_left.saturating_sub(border.width / 2),
    );
    let shape = rounded_rect(
        rect.x as f32 + inset,
        rect.y as f32 + inset,
        w - width,
        h - width,
        inner_radius,
    )
        .ok_or_else(|| RenderError::PathBuildingFailed(path.clone()))?;

    let mut paint = Paint::default();
    paint.set_color(skia_color(border.color));
    paint.anti_alias = true;
    let stroke = Stroke {
        width,
        ..Stroke::default()
    };
    pixmap.stroke_path(&shape, &paint, &stroke, Transform::identity(), None);
    Ok(())
}

fn paint_text(pixmap: &mut Pixmap, text: &TextBox, cache: &mut GlyphCache) {
    for line in &text.lines {
        let origin_x = text.rect.x as f32 + line.x;
        let baseline = text.rect.y as f32 + line.y + line.baseline;

        for glyph in &line.glyphs {
            let key = (
                Arc::as_ptr(&glyph.font) as *const u8 as usize,
                glyph.glyph_id,
                glyph.size.to_bits(),
            );
            let outline = cache
                .entry(key)
                .or_insert_with(|| glyph_path(glyph.font.as_ref(), glyph.glyph_id, glyph.size));
            let Some(outline) = outline else {
                continue;
            };

            let mut paint = Paint::default();
            paint.set_color(skia_color(glyph.color));
            paint.anti_alias = true;

            // Fonts are y-up; flip and drop onto the baseline
            let transform =
                Transform::from_scale(1.0, -1.0).post_translate(origin_x + glyph.x, baseline);
            pixmap.fill_path(outline, &paint, FillRule::Winding, transform, None);
        }
    }
}

/// Glyph outline in tiny-skia form, `None` for blank glyphs
fn glyph_path(font: &dyn FontFace, glyph_id: u32, size: f32) -> Option<tiny_skia::Path> {
    let outline = font.outline(glyph_id, size)?;
    let mut builder = PathBuilder::new();
    for element in outline.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(ctrl, end) => {
                builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            },
            PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

/// Premultiplies decoded RGBA into a surface
fn image_pixmap(image: &DecodedImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width, image.height)?;
    let mut data = Vec::with_capacity(image.pixels.len());
    for px in image.pixels.chunks_exact(4) {
        let c = tiny_skia::ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Pixmap::from_vec(data, size)
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_oversized_canvas() {
        let compositor = Compositor::with_max_size(8);
        let tree = LayoutTree {
            root: ContainerBox {
                path: NodePath::root(),
                rect: Rect::new(0, 0, 16, 4),
                background: None,
                background_image: None,
                border: None,
                border_radius: BorderRadius::default(),
                children: Vec::new(),
            },
            warnings: Vec::new(),
        };
        assert!(compositor.paint(&tree).is_err());
        assert!(Compositor::new().paint(&tree).is_ok());
    }

    #[test]
    fn zero_area_canvas_paints_empty() {
        let tree = LayoutTree {
            root: ContainerBox {
                path: NodePath::root(),
                rect: Rect::new(0, 0, 0, 10),
                background: Some(Color::rgba(255, 0, 0, 255)),
                background_image: None,
                border: None,
                border_radius: BorderRadius::default(),
                children: Vec::new(),
            },
            warnings: Vec::new(),
        };
        let buffer = Compositor::new().paint(&tree).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (0, 10));
        assert!(buffer.as_bytes().is_empty());
    }

    #[test]
    fn image_pixmap_premultiplies() {
        let image = DecodedImage {
            width: 1,
            height: 1,
            pixels: vec![255, 0, 0, 128],
        };
        let pixmap = image_pixmap(&image).unwrap();
        let px = pixmap.pixels()[0];
        assert_eq!(px.alpha(), 128);
        assert_eq!(px.red(), 128);
    }

    #[test]
    fn empty_image_has_no_surface() {
        let image = DecodedImage {
            width: 0,
            height: 3,
            pixels: Vec::new(),
        };
        assert!(image_pixmap(&image).is_none());
    }
}
