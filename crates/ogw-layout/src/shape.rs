//! Characters to advances: font selection and horizontal metrics
//!
//! Each character tries the run's font, then the text area's font, then the
//! registry fallback. Advances are `units * size / upem + letter_spacing`,
//! plus pair kerning when two neighbours share a face.

use std::sync::Arc;

use ogw_core::error::{Diagnostics, FontError, Result};
use ogw_core::style::{Color, ResolvedStyle, WhiteSpace};
use ogw_core::traits::FontFace;
use ogw_core::types::{GlyphId, NodePath};
use ogw_fontdb::{FontReference, FontRegistry};

use crate::tree::TextArea;

/// One character with everything line breaking and painting need
#[derive(Clone)]
pub(crate) struct ShapedChar {
    pub ch: char,
    pub glyph: Option<(Arc<dyn FontFace>, GlyphId)>,
    pub advance: f32,
    pub size: f32,
    pub color: Color,
    /// Line box height contribution, `size * line_height`
    pub line_height: f32,
    /// Pixels above the baseline
    pub ascent: f32,
    /// Pixels below the baseline, negative
    pub descent: f32,
}

impl ShapedChar {
    pub fn is_space(&self) -> bool {
        self.ch.is_whitespace()
    }
}

pub(crate) enum Item {
    Char(ShapedChar),
    /// Forced break from a newline in `pre` text
    Break,
}

pub(crate) struct Shaper<'a> {
    registry: &'a FontRegistry,
    path: &'a NodePath,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Shaper<'a> {
    pub fn new(
        registry: &'a FontRegistry,
        path: &'a NodePath,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            registry,
            path,
            diagnostics,
        }
    }

    /// Shapes every run of the area with whitespace already processed
    pub fn shape_area(&mut self, area: &TextArea, style: &ResolvedStyle) -> Result<Vec<Item>> {
        let area_font = self.resolve_reference(area.font())?;
        let mut items = Vec::new();
        let mut after_space = false;

        for run in area.runs() {
            let run_style = match run.style() {
                Some(overrides) => overrides.resolve(style),
                None => style.clone(),
            };
            let run_font = match run.font() {
                Some(reference) => self.resolve_reference(Some(reference))?,
                None => area_font.clone(),
            };
            let mut warned = false;

            for ch in run.text().chars() {
                let ch = match style.white_space {
                    WhiteSpace::Normal if ch.is_whitespace() => {
                        if after_space {
                            continue;
                        }
                        after_space = true;
                        ' '
                    },
                    WhiteSpace::Normal => {
                        after_space = false;
                        ch
                    },
                    WhiteSpace::Pre => match ch {
                        '\n' => {
                            items.push(Item::Break);
                            continue;
                        },
                        '\r' => continue,
                        _ => ch,
                    },
                };

                if let Some(shaped) =
                    self.shape_char(ch, &run_style, run_font.as_ref(), &mut warned)?
                {
                    push_kerned(&mut items, shaped);
                }
            }
        }
        Ok(items)
    }

    /// Shapes a loose string, used for overflow markers
    pub fn shape_str(
        &mut self,
        text: &str,
        style: &ResolvedStyle,
        font: Option<&Arc<dyn FontFace>>,
    ) -> Result<Vec<ShapedChar>> {
        let mut items = Vec::new();
        let mut warned = false;
        for ch in text.chars() {
            if let Some(shaped) = self.shape_char(ch, style, font, &mut warned)? {
                push_kerned(&mut items, shaped);
            }
        }
        Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Item::Char(c) => Some(c),
                Item::Break => None,
            })
            .collect())
    }

    fn resolve_reference(
        &mut self,
        reference: Option<&FontReference>,
    ) -> Result<Option<Arc<dyn FontFace>>> {
        let Some(reference) = reference else {
            return Ok(None);
        };
        match self.registry.resolve(reference) {
            Ok(face) => Ok(Some(face)),
            Err(e) => {
                self.diagnostics.recover(self.path, e)?;
                Ok(None)
            },
        }
    }

    /// `None` means the character has no glyph anywhere and is skipped
    fn shape_char(
        &mut self,
        ch: char,
        style: &ResolvedStyle,
        font: Option<&Arc<dyn FontFace>>,
        warned: &mut bool,
    ) -> Result<Option<ShapedChar>> {
        if let Some(face) = font {
            if let Some(gid) = face.glyph_id(ch) {
                return Ok(Some(with_face(ch, Arc::clone(face), gid, style)));
            }
        }

        let cause = match self.registry.select_for_char(ch) {
            Ok(face) => match face.glyph_id(ch) {
                Some(gid) => return Ok(Some(with_face(ch, face, gid, style))),
                None => FontError::FontNotFound(format!("no glyph for {:?}", ch)).into(),
            },
            Err(e) => e,
        };

        // Spaces still take room without a font
        if ch.is_whitespace() {
            return Ok(Some(blank(ch, style)));
        }

        if !*warned {
            *warned = true;
            self.diagnostics.recover(self.path, cause)?;
        }
        Ok(None)
    }
}

fn with_face(ch: char, face: Arc<dyn FontFace>, gid: GlyphId, style: &ResolvedStyle) -> ShapedChar {
    let scale = style.font_size / face.units_per_em().max(1) as f32;
    let metrics = face.metrics();
    ShapedChar {
        ch,
        advance: face.advance_width(gid) * scale + style.letter_spacing,
        size: style.font_size,
        color: style.color,
        line_height: style.font_size * style.line_height,
        ascent: metrics.ascent * scale,
        descent: metrics.descent * scale,
        glyph: Some((face, gid)),
    }
}

fn blank(ch: char, style: &ResolvedStyle) -> ShapedChar {
    ShapedChar {
        ch,
        glyph: None,
        advance: style.font_size * 0.25 + style.letter_spacing,
        size: style.font_size,
        color: style.color,
        line_height: style.font_size * style.line_height,
        ascent: style.font_size * 0.8,
        descent: -style.font_size * 0.2,
    }
}

fn same_face(a: &Arc<dyn FontFace>, b: &Arc<dyn FontFace>) -> bool {
    Arc::as_ptr(a) as *const u8 == Arc::as_ptr(b) as *const u8
}

/// Adds `shaped`, folding pair kerning into the previous advance
fn push_kerned(items: &mut Vec<Item>, shaped: ShapedChar) {
    if let (Some(Item::Char(prev)), Some((face, right))) = (items.last_mut(), &shaped.glyph) {
        if let Some((prev_face, left)) = &prev.glyph {
            if same_face(prev_face, face) && prev.size == shaped.size {
                let scale = shaped.size / face.units_per_em().max(1) as f32;
                prev.advance += face.kerning(*left, *right) * scale;
            }
        }
    }
    items.push(Item::Char(shaped));
}
