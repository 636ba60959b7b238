//! Render command: scene file in, encoded image out

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use ogw::{FailurePolicy, OutputFormat, PaintOptions};
use ogw_export::{JpegOptions, PngCompression, PngOptions};
use ogw_fontdb::FontRegistry;

use crate::cli::{CompressionArg, FormatArg, RenderArgs};
use crate::scene::Scene;

pub fn run(args: &RenderArgs) -> Result<()> {
    let scene = Scene::load(&args.scene)?;
    let base_dir = args
        .scene
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut fonts = FontRegistry::new();
    for path in scene.font_paths(base_dir).iter().chain(&args.fonts) {
        let index = fonts
            .register_file(path)
            .with_context(|| format!("Failed to load font {}", path.display()))?;
        log::debug!("Font {} registered as #{}", path.display(), index);
    }

    let mut writer = scene.to_writer(base_dir)?;
    writer.set_fonts(Arc::new(fonts));

    let mut options = PaintOptions::from_env();
    if args.strict {
        options = options.with_failure_policy(FailurePolicy::Abort);
    }

    let painting = ogw::paint_with(&writer, &options).context("Painting failed")?;
    for warning in &painting.warnings {
        eprintln!("warning: {}", warning);
    }

    let format = output_format(args);
    let encoded = ogw::encode(&painting.buffer, &format).context("Encoding failed")?;
    std::fs::write(&args.output, &encoded.bytes)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!(
        "Wrote {}x{} {} ({} bytes) to {}",
        painting.buffer.width(),
        painting.buffer.height(),
        encoded.mime_type,
        encoded.bytes.len(),
        args.output.display()
    );
    Ok(())
}

fn output_format(args: &RenderArgs) -> OutputFormat {
    match args.format {
        FormatArg::Raw => OutputFormat::Raw,
        FormatArg::Jpeg => OutputFormat::Jpeg(JpegOptions {
            quality: args.quality,
        }),
        FormatArg::Png => OutputFormat::Png(PngOptions {
            compression: match args.compression {
                CompressionArg::Fast => PngCompression::Fast,
                CompressionArg::Default => PngCompression::Default,
                CompressionArg::Best => PngCompression::Best,
            },
            ..PngOptions::default()
        }),
    }
}
