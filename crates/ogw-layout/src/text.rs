//! Text area layout: shaping, wrapping, line metrics and truncation

use std::sync::Arc;

use ogw_core::error::{Diagnostics, Result};
use ogw_core::style::{ResolvedStyle, WhiteSpace};
use ogw_core::types::NodePath;
use ogw_fontdb::FontRegistry;

use crate::boxes::{Line, PlacedGlyph};
use crate::line_breaker::{break_lines, width_of};
use crate::shape::{ShapedChar, Shaper};
use crate::tree::TextArea;

/// Lines of one text area, before alignment
#[derive(Debug, Clone)]
pub struct TextLayout {
    pub lines: Vec<Line>,
    /// Widest line
    pub width: f32,
    /// Sum of line box heights
    pub height: f32,
}

/// Lays out `area` for a given wrap width
///
/// `wrap_width` is ignored for `white-space: pre`, which only breaks at
/// newlines.
pub fn layout_text(
    area: &TextArea,
    style: &ResolvedStyle,
    wrap_width: Option<f32>,
    registry: &FontRegistry,
    path: &NodePath,
    diagnostics: &mut Diagnostics,
) -> Result<TextLayout> {
    let mut shaper = Shaper::new(registry, path, diagnostics);
    let items = shaper.shape_area(area, style)?;

    let wrap = match style.white_space {
        WhiteSpace::Normal => wrap_width,
        WhiteSpace::Pre => None,
    };
    let mut lines = break_lines(items, wrap, style.word_break, style.white_space);

    if let Some(max_height) = style.max_height {
        let limit = wrap.or(style.max_width.map(|w| w as f32));
        truncate(&mut lines, max_height as f32, limit, style, &mut shaper)?;
    }

    let mut y = 0.0;
    let mut width = 0.0f32;
    let mut out = Vec::with_capacity(lines.len());
    for chars in &lines {
        let line = build_line(chars, y, style);
        y += line.height;
        width = width.max(line.width);
        out.push(line);
    }

    log::debug!(
        "Text at {}: {} line(s), {:.1}x{:.1}",
        path,
        out.len(),
        width,
        y
    );
    Ok(TextLayout {
        lines: out,
        width,
        height: y,
    })
}

struct LineMetrics {
    height: f32,
    ascent: f32,
    descent: f32,
}

fn metrics(chars: &[ShapedChar], style: &ResolvedStyle) -> LineMetrics {
    if chars.is_empty() {
        return LineMetrics {
            height: style.font_size * style.line_height,
            ascent: style.font_size * 0.8,
            descent: -style.font_size * 0.2,
        };
    }
    chars.iter().fold(
        LineMetrics {
            height: 0.0,
            ascent: 0.0,
            descent: 0.0,
        },
        |acc, c| LineMetrics {
            height: acc.height.max(c.line_height),
            ascent: acc.ascent.max(c.ascent),
            descent: acc.descent.min(c.descent),
        },
    )
}

fn build_line(chars: &[ShapedChar], y: f32, style: &ResolvedStyle) -> Line {
    let m = metrics(chars, style);
    // Half-leading above the ascent, the same below the descent
    let baseline = (m.height - (m.ascent - m.descent)) / 2.0 + m.ascent;

    let mut pen = 0.0;
    let mut glyphs = Vec::new();
    for c in chars {
        if let (Some((font, glyph_id)), false) = (&c.glyph, c.is_space()) {
            glyphs.push(PlacedGlyph {
                x: pen,
                glyph_id: *glyph_id,
                font: Arc::clone(font),
                size: c.size,
                color: c.color,
            });
        }
        pen += c.advance;
    }

    Line {
        glyphs,
        x: 0.0,
        y,
        width: pen,
        height: m.height,
        baseline,
    }
}

/// Drops lines past `max_height` and marks the cut
fn truncate(
    lines: &mut Vec<Vec<ShapedChar>>,
    max_height: f32,
    limit: Option<f32>,
    style: &ResolvedStyle,
    shaper: &mut Shaper<'_>,
) -> Result<()> {
    let mut used = 0.0;
    let mut kept = 0;
    for line in lines.iter() {
        let height = metrics(line, style).height;
        if used + height > max_height + f32::EPSILON {
            break;
        }
        used += height;
        kept += 1;
    }
    if kept == lines.len() {
        return Ok(());
    }
    lines.truncate(kept);

    let (Some(marker), Some(last)) = (style.text_overflow.marker(), lines.last_mut()) else {
        return Ok(());
    };

    // The marker borrows the look of the text it replaces
    let mut marker_style = style.clone();
    let mut marker_font = None;
    if let Some(tail) = last.iter().rev().find(|c| !c.is_space()) {
        marker_style.font_size = tail.size;
        marker_style.color = tail.color;
        marker_font = tail.glyph.as_ref().map(|(font, _)| Arc::clone(font));
    }
    let marker = shaper.shape_str(marker, &marker_style, marker_font.as_ref())?;
    let marker_width = width_of(&marker);

    loop {
        let too_wide = limit.is_some_and(|max| width_of(last) + marker_width > max);
        match last.last() {
            Some(c) if c.is_space() || too_wide => {
                last.pop();
            },
            _ => break,
        }
    }
    last.extend(marker);
    Ok(())
}
