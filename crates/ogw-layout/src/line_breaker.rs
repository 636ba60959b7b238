//! Splits shaped text into lines

use ogw_core::style::{WhiteSpace, WordBreak};

use crate::shape::{Item, ShapedChar};

pub(crate) fn width_of(chars: &[ShapedChar]) -> f32 {
    chars.iter().map(|c| c.advance).sum()
}

/// Greedy line breaking
///
/// With `max_width` set, `Normal` wraps at the last space that fits and lets
/// a single overlong word overflow its own line; `BreakAll` wraps between
/// any two characters. Spaces never trigger a wrap themselves.
pub(crate) fn break_lines(
    items: Vec<Item>,
    max_width: Option<f32>,
    word_break: WordBreak,
    white_space: WhiteSpace,
) -> Vec<Vec<ShapedChar>> {
    let mut lines = Vec::new();
    let mut current: Vec<ShapedChar> = Vec::new();
    let mut width = 0.0f32;
    // Index of the last space in `current`
    let mut last_space: Option<usize> = None;

    for item in items {
        let ch = match item {
            Item::Break => {
                lines.push(std::mem::take(&mut current));
                width = 0.0;
                last_space = None;
                continue;
            },
            Item::Char(ch) => ch,
        };

        if ch.is_space() {
            width += ch.advance;
            current.push(ch);
            last_space = Some(current.len() - 1);
            continue;
        }

        let overflows = max_width.is_some_and(|max| width + ch.advance > max);
        if overflows && !current.is_empty() {
            match word_break {
                WordBreak::BreakAll => {
                    lines.push(std::mem::take(&mut current));
                    last_space = None;
                },
                WordBreak::Normal => {
                    if let Some(at) = last_space.take() {
                        let rest = current.split_off(at + 1);
                        current.pop();
                        lines.push(std::mem::replace(&mut current, rest));
                    }
                },
            }
            width = width_of(&current);
        }

        width += ch.advance;
        current.push(ch);
    }
    lines.push(current);

    match white_space {
        WhiteSpace::Normal => lines
            .into_iter()
            .map(trim)
            .filter(|line| !line.is_empty())
            .collect(),
        WhiteSpace::Pre => lines,
    }
}

fn trim(mut line: Vec<ShapedChar>) -> Vec<ShapedChar> {
    while line.last().is_some_and(ShapedChar::is_space) {
        line.pop();
    }
    let lead = line.iter().take_while(|c| c.is_space()).count();
    line.drain(..lead);
    line
}
