//! Rounded rectangles for clips and borders

use ogw_core::style::BorderRadius;
use tiny_skia::{Path, PathBuilder};

/// Cubic control-point distance approximating a quarter circle
const KAPPA: f32 = 0.552_284_8;

/// A rect with per-corner radii, each clamped to half the shorter side
pub(crate) fn rounded_rect(x: f32, y: f32, w: f32, h: f32, radius: BorderRadius) -> Option<Path> {
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let max = w.min(h) / 2.0;
    let clamp = |r: u32| (r as f32).min(max);
    let (tl, tr, br, bl) = (
        clamp(radius.top_left),
        clamp(radius.top_right),
        clamp(radius.bottom_right),
        clamp(radius.bottom_left),
    );
    let (right, bottom) = (x + w, y + h);

    let mut pb = PathBuilder::new();
    pb.move_to(x + tl, y);
    pb.line_to(right - tr, y);
    if tr > 0.0 {
        pb.cubic_to(
            right - tr + tr * KAPPA,
            y,
            right,
            y + tr - tr * KAPPA,
            right,
            y + tr,
        );
    }
    pb.line_to(right, bottom - br);
    if br > 0.0 {
        pb.cubic_to(
            right,
            bottom - br + br * KAPPA,
            right - br + br * KAPPA,
            bottom,
            right - br,
            bottom,
        );
    }
    pb.line_to(x + bl, bottom);
    if bl > 0.0 {
        pb.cubic_to(
            x + bl - bl * KAPPA,
            bottom,
            x,
            bottom - bl + bl * KAPPA,
            x,
            bottom - bl,
        );
    }
    pb.line_to(x, y + tl);
    if tl > 0.0 {
        pb.cubic_to(x, y + tl - tl * KAPPA, x + tl - tl * KAPPA, y, x + tl, y);
    }
    pb.close();
    pb.finish()
}
