//! The layout engine: one flex-like pass per container
//!
//! Children are measured first, then distributed along the primary axis
//! (justify-content) and placed on the cross axis (align-items). Containers
//! recurse once their own size is final. Absolute children skip the flow and
//! anchor to their container's edges.

use std::sync::Arc;

use ogw_core::config::PaintOptions;
use ogw_core::error::{Diagnostics, OgwError, Result};
use ogw_core::style::{
    AlignItems, FlexDirection, JustifyContent, ResolvedStyle, ResolvedWindow, TextAlign,
};
use ogw_core::types::NodePath;
use ogw_fontdb::FontRegistry;

use crate::boxes::{
    ContainerBox, DecodedImage, ImageBox, LayoutBox, LayoutTree, Rect, TextBox,
};
use crate::image;
use crate::text::{layout_text, TextLayout};
use crate::tree::{Container, Element, ImageNode, TextArea, Writer};

/// Lays out a writer with the given options
pub fn layout(writer: &Writer, options: &PaintOptions) -> Result<LayoutTree> {
    LayoutEngine::new(options).layout(writer)
}

pub struct LayoutEngine<'a> {
    options: &'a PaintOptions,
    diagnostics: Diagnostics,
    no_fonts: Arc<FontRegistry>,
}

/// A child after measuring, before placement
enum Measured<'w> {
    Image {
        image: DecodedImage,
        style: ResolvedStyle,
    },
    Text {
        text: TextLayout,
        width: u32,
        height: u32,
        style: ResolvedStyle,
    },
    Container {
        container: &'w Container,
        width: u32,
        height: u32,
        style: ResolvedStyle,
    },
}

impl Measured<'_> {
    fn size(&self) -> (u32, u32) {
        match self {
            Measured::Image { image, .. } => (image.width, image.height),
            Measured::Text { width, height, .. } | Measured::Container { width, height, .. } => {
                (*width, *height)
            },
        }
    }

    fn style(&self) -> &ResolvedStyle {
        match self {
            Measured::Image { style, .. }
            | Measured::Text { style, .. }
            | Measured::Container { style, .. } => style,
        }
    }
}

/// Which sides a measured child may grow to under `align-items: stretch`
#[derive(Clone, Copy)]
struct Stretch {
    width: Option<u32>,
    height: Option<u32>,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(options: &'a PaintOptions) -> Self {
        Self {
            options,
            diagnostics: Diagnostics::new(options.failure_policy),
            no_fonts: Arc::new(FontRegistry::new()),
        }
    }

    pub fn layout(mut self, writer: &Writer) -> Result<LayoutTree> {
        let path = NodePath::root();
        let background = self.decode_background(writer, &path)?;

        let (default_w, default_h) = self.options.default_window;
        let natural = background.as_ref().map(|img| (img.width, img.height));
        let window = writer.window();
        let width = window
            .width
            .or(natural.map(|n| n.0))
            .unwrap_or(default_w);
        let height = window
            .height
            .or(natural.map(|n| n.1))
            .unwrap_or(default_h);
        log::debug!("Root window {}x{}", width, height);

        let fonts = writer
            .fonts()
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.no_fonts));
        let root = self.layout_container(
            writer,
            path,
            Rect::new(0, 0, width, height),
            &ResolvedStyle::default(),
            &fonts,
            background,
        )?;

        Ok(LayoutTree {
            root,
            warnings: self.diagnostics.into_warnings(),
        })
    }

    fn decode_background(
        &mut self,
        writer: &Writer,
        path: &NodePath,
    ) -> Result<Option<DecodedImage>> {
        let Some(node) = writer.background() else {
            return Ok(None);
        };
        if node.data().is_empty() {
            return Ok(None);
        }
        match image::decode(node, path) {
            Ok(img) => Ok(Some(img)),
            Err(e) => {
                self.diagnostics.recover(path, e)?;
                Ok(None)
            },
        }
    }

    /// Lays out the children of `writer` inside a box of `rect`'s size
    fn layout_container(
        &mut self,
        writer: &Writer,
        path: NodePath,
        rect: Rect,
        inherited: &ResolvedStyle,
        fonts: &Arc<FontRegistry>,
        background_image: Option<DecodedImage>,
    ) -> Result<ContainerBox> {
        let window = writer.window().resolve(rect.width, rect.height);
        let inner = (rect.width, rect.height);

        let mut measured = Vec::new();
        for (index, element) in writer.elements().iter().enumerate() {
            let child_path = path.child(index);
            if let Some(m) = self.measure(element, &child_path, window, inherited, fonts)? {
                measured.push((child_path, m));
            }
        }

        let positions = place(&measured, window, inner)?;

        let mut children = Vec::with_capacity(measured.len());
        for ((child_path, m), (x, y)) in measured.into_iter().zip(positions) {
            let (w, h) = m.size();
            let child_rect = Rect::new(x, y, w, h);
            children.push(self.finish(m, child_path, child_rect, fonts)?);
        }

        Ok(ContainerBox {
            path,
            rect,
            background: window.background_color,
            background_image: background_image.map(|img| image::fit(img, rect.width, rect.height)),
            border: None,
            border_radius: Default::default(),
            children,
        })
    }

    fn measure<'w>(
        &mut self,
        element: &'w Element,
        path: &NodePath,
        window: ResolvedWindow,
        inherited: &ResolvedStyle,
        fonts: &Arc<FontRegistry>,
    ) -> Result<Option<Measured<'w>>> {
        match element {
            Element::Image(node) => {
                let style = node.style().resolve(inherited);
                self.check_fits(path, window.width, &style)?;
                Ok(self
                    .measure_image(node, path, &style)?
                    .map(|image| Measured::Image { image, style }))
            },
            Element::TextArea(area) => {
                let style = area.style().resolve(inherited);
                let available = self.check_fits(path, window.width, &style)?;
                let stretch = stretch_for(window, &style, available, window.height);
                self.measure_text(area, path, &style, available, stretch, fonts)
                    .map(Some)
            },
            Element::Container(container) => {
                let style = container.style().resolve(inherited);
                let available = self.check_fits(path, window.width, &style)?;
                let stretch = stretch_for(window, &style, available, window.height);
                let (width, height) = container_size(container, &style, window, stretch);
                Ok(Some(Measured::Container {
                    container,
                    width,
                    height,
                    style,
                }))
            },
        }
    }

    /// Width left after horizontal margins, or `LayoutOverflow`
    fn check_fits(&self, path: &NodePath, width: u32, style: &ResolvedStyle) -> Result<u32> {
        let margins = style.margin.horizontal();
        (width as u64)
            .checked_sub(margins)
            .map(|left| left as u32)
            .ok_or_else(|| OgwError::LayoutOverflow {
                path: path.clone(),
                detail: format!(
                    "horizontal margins {} exceed container width {}",
                    margins, width
                ),
            })
    }

    fn measure_image(
        &mut self,
        node: &ImageNode,
        path: &NodePath,
        style: &ResolvedStyle,
    ) -> Result<Option<DecodedImage>> {
        if node.data().is_empty() {
            log::debug!("Skipping empty image at {}", path);
            return Ok(None);
        }
        let decoded = match image::decode(node, path) {
            Ok(img) => img,
            Err(e) => {
                self.diagnostics.recover(path, e)?;
                return Ok(None);
            },
        };
        let (w, h) = image::target_size(
            (decoded.width, decoded.height),
            (node.width(), node.height()),
            style,
        );
        Ok(Some(image::fit(decoded, w, h)))
    }

    fn measure_text<'w>(
        &mut self,
        area: &TextArea,
        path: &NodePath,
        style: &ResolvedStyle,
        available: u32,
        stretch: Stretch,
        fonts: &Arc<FontRegistry>,
    ) -> Result<Measured<'w>> {
        let wrap = match style.max_width {
            Some(max) => available.min(max),
            None => available,
        };
        let text = layout_text(
            area,
            style,
            Some(wrap as f32),
            fonts,
            path,
            &mut self.diagnostics,
        )?;

        let mut width = text.width.ceil() as u32;
        if let Some(max) = style.max_width {
            width = width.min(max);
        }
        let mut height = text.height.ceil() as u32;
        if let Some(w) = stretch.width {
            width = w;
        }
        if let Some(h) = stretch.height {
            height = h;
        }

        Ok(Measured::Text {
            text,
            width,
            height,
            style: style.clone(),
        })
    }

    /// Turns a placed child into its box, recursing into containers
    fn finish(
        &mut self,
        measured: Measured<'_>,
        path: NodePath,
        rect: Rect,
        fonts: &Arc<FontRegistry>,
    ) -> Result<LayoutBox> {
        match measured {
            Measured::Image { image, style } => Ok(LayoutBox::Image(ImageBox {
                path,
                rect,
                image,
                border: style.border,
                border_radius: style.border_radius,
            })),
            Measured::Text {
                mut text, style, ..
            } => {
                for line in &mut text.lines {
                    let free = (rect.width as f32 - line.width).max(0.0);
                    line.x = match style.text_align {
                        TextAlign::Start => 0.0,
                        TextAlign::Center => free / 2.0,
                        TextAlign::End => free,
                    };
                }
                Ok(LayoutBox::Text(TextBox {
                    path,
                    rect,
                    lines: text.lines,
                    border: style.border,
                    border_radius: style.border_radius,
                }))
            },
            Measured::Container {
                container, style, ..
            } => {
                let writer = container.writer();
                let child_fonts = writer.fonts().cloned().unwrap_or_else(|| Arc::clone(fonts));
                let background = self.decode_background(writer, &path)?;
                let mut boxed = self.layout_container(
                    writer,
                    path,
                    rect,
                    &inheritable(&style),
                    &child_fonts,
                    background,
                )?;
                boxed.border = style.border;
                boxed.border_radius = style.border_radius;
                Ok(LayoutBox::Container(boxed))
            },
        }
    }
}

/// Typography flows down into nested containers; box properties don't
fn inheritable(style: &ResolvedStyle) -> ResolvedStyle {
    ResolvedStyle {
        color: style.color,
        font_size: style.font_size,
        line_height: style.line_height,
        letter_spacing: style.letter_spacing,
        text_align: style.text_align,
        word_break: style.word_break,
        white_space: style.white_space,
        text_overflow: style.text_overflow.clone(),
        ..ResolvedStyle::default()
    }
}

/// Cross-axis sizes a child grows to under `align-items: stretch`
fn stretch_for(
    window: ResolvedWindow,
    style: &ResolvedStyle,
    available_width: u32,
    height: u32,
) -> Stretch {
    if window.align_items != AlignItems::Stretch || style.is_absolute() {
        return Stretch {
            width: None,
            height: None,
        };
    }
    match window.flex_direction {
        FlexDirection::Column => Stretch {
            width: Some(available_width),
            height: None,
        },
        FlexDirection::Row => Stretch {
            width: None,
            height: Some((height as u64).saturating_sub(style.margin.vertical()) as u32),
        },
    }
}

/// Size of a nested container
///
/// Unset sides default to two thirds of the parent (1 / 1.5, floored), then
/// stretch and `max_width`/`max_height` apply.
fn container_size(
    container: &Container,
    style: &ResolvedStyle,
    parent: ResolvedWindow,
    stretch: Stretch,
) -> (u32, u32) {
    let window = container.writer().window();
    let mut width = window
        .width
        .or(stretch.width)
        .unwrap_or_else(|| two_thirds(parent.width));
    let mut height = window
        .height
        .or(stretch.height)
        .unwrap_or_else(|| two_thirds(parent.height));
    if let Some(max) = style.max_width {
        width = width.min(max);
    }
    if let Some(max) = style.max_height {
        height = height.min(max);
    }
    (width, height)
}

fn two_thirds(value: u32) -> u32 {
    (value as u64 * 2 / 3) as u32
}

/// Positions of measured children, in order
///
/// Footprints are summed in `i64`; a position that leaves the `i32` range
/// is a `LayoutOverflow` at that child.
fn place(
    measured: &[(NodePath, Measured<'_>)],
    window: ResolvedWindow,
    (width, height): (u32, u32),
) -> Result<Vec<(i32, i32)>> {
    let row = window.flex_direction == FlexDirection::Row;
    let (main_size, cross_size) = if row {
        (width as i64, height as i64)
    } else {
        (height as i64, width as i64)
    };

    // (main footprint, main start margin, cross footprint, cross start margin)
    let spans: Vec<(i64, i64, i64, i64)> = measured
        .iter()
        .map(|(_, m)| {
            let (w, h) = m.size();
            let margin = m.style().margin;
            let along_x = (w as i64 + margin.horizontal() as i64, margin.left as i64);
            let along_y = (h as i64 + margin.vertical() as i64, margin.top as i64);
            if row {
                (along_x.0, along_x.1, along_y.0, along_y.1)
            } else {
                (along_y.0, along_y.1, along_x.0, along_x.1)
            }
        })
        .collect();

    let in_flow: Vec<bool> = measured
        .iter()
        .map(|(_, m)| !m.style().is_absolute())
        .collect();
    let flow_count = in_flow.iter().filter(|f| **f).count() as i64;
    let total: i64 = spans
        .iter()
        .zip(&in_flow)
        .filter(|(_, f)| **f)
        .map(|(s, _)| s.0)
        .sum();
    let free = main_size - total;

    let (mut cursor, gap) = match window.justify_content {
        JustifyContent::Start => (0, 0),
        JustifyContent::Center => (free / 2, 0),
        JustifyContent::End => (free, 0),
        JustifyContent::SpaceBetween if free > 0 && flow_count > 1 => (0, free / (flow_count - 1)),
        JustifyContent::SpaceBetween => (0, 0),
    };

    let mut out = Vec::with_capacity(measured.len());
    for (((path, m), span), flow) in measured.iter().zip(&spans).zip(&in_flow) {
        let (x, y) = if *flow {
            let (main_len, main_margin, cross_len, cross_margin) = *span;
            let main = cursor + main_margin;
            cursor += main_len + gap;

            let cross = match window.align_items {
                AlignItems::Start | AlignItems::Stretch => cross_margin,
                AlignItems::Center => (cross_size - cross_len) / 2 + cross_margin,
                AlignItems::End => cross_size - cross_len + cross_margin,
            };
            if row {
                (main, cross)
            } else {
                (cross, main)
            }
        } else {
            absolute_position(m, width, height)
        };
        out.push((to_offset(x, path)?, to_offset(y, path)?));
    }
    Ok(out)
}

fn to_offset(value: i64, path: &NodePath) -> Result<i32> {
    i32::try_from(value).map_err(|_| OgwError::LayoutOverflow {
        path: path.clone(),
        detail: format!("offset {} is out of range", value),
    })
}

/// Anchors an absolute child by its offsets and margins
fn absolute_position(m: &Measured<'_>, width: u32, height: u32) -> (i64, i64) {
    let style = m.style();
    let (w, h) = m.size();
    let margin = style.margin;

    let x = match (style.left, style.right) {
        (Some(left), _) => left as i64 + margin.left as i64,
        (None, Some(right)) => width as i64 - right as i64 - margin.right as i64 - w as i64,
        (None, None) => margin.left as i64,
    };
    let y = match (style.top, style.bottom) {
        (Some(top), _) => top as i64 + margin.top as i64,
        (None, Some(bottom)) => height as i64 - bottom as i64 - margin.bottom as i64 - h as i64,
        (None, None) => margin.top as i64,
    };
    (x, y)
}
