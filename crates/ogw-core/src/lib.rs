//! OGW Core: shared vocabulary for the compositor
//!
//! A tree of containers, text and images goes in, an RGBA buffer comes out.
//! This crate holds what every stage agrees on:
//!
//! - [`style`] - The CSS-like style model and its resolution rules
//! - [`error`] - One error taxonomy, plus the warning collector
//! - [`types`] - Pixel buffers and node paths
//! - [`traits`] - [`FontFace`] and [`Exporter`], the seams between crates
//! - [`config`] - [`PaintOptions`] and the failure policy

pub mod config;
pub mod error;
pub mod style;
pub mod traits;
pub mod types;

pub use config::{FailurePolicy, PaintOptions};
pub use error::{Diagnostics, OgwError, Result, Warning};
pub use style::{
    AlignItems, Border, BorderRadius, Color, FlexDirection, JustifyContent, Margin, Position,
    ResolvedStyle, ResolvedWindow, Style, TextAlign, TextOverflow, WhiteSpace, WindowStyle,
    WordBreak,
};
pub use traits::{Exporter, FaceMetrics, FontFace};
pub use types::{GlyphId, NodePath, PixelBuffer};
