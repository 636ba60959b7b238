//! JSON scene files
//!
//! A scene mirrors the writer tree. File paths (fonts, images, templates)
//! are resolved against the directory holding the scene file.
//!
//! ```json
//! {
//!   "window": { "width": 1200, "height": 630,
//!               "background_color": { "r": 255, "g": 255, "b": 255, "a": 255 } },
//!   "fonts": ["fonts/Inter.ttf"],
//!   "children": [
//!     { "type": "text", "runs": ["Hello, ", { "text": "world", "style": { "font_size": 60 } }] },
//!     { "type": "image", "path": "logo.png", "width": 64, "height": 64 },
//!     { "type": "container", "window": { "flex_direction": "row" }, "children": [] }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ogw_core::{Style, WindowStyle};
use ogw_fontdb::FontReference;
use ogw_layout::{Container, ImageInputFormat, ImageNode, TextArea, TextRun, Writer};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default)]
    pub window: WindowStyle,
    /// Template image the canvas is painted on
    pub background: Option<PathBuf>,
    #[serde(default)]
    pub fonts: Vec<PathBuf>,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Node {
    Text {
        #[serde(default)]
        style: Style,
        /// Index into the registered fonts
        font: Option<usize>,
        runs: Vec<RunSpec>,
    },
    Image {
        path: PathBuf,
        width: Option<u32>,
        height: Option<u32>,
        /// Overrides the format guessed from the extension
        format: Option<String>,
        #[serde(default)]
        style: Style,
    },
    Container {
        #[serde(default)]
        window: WindowStyle,
        background: Option<PathBuf>,
        #[serde(default)]
        style: Style,
        #[serde(default)]
        children: Vec<Node>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RunSpec {
    Plain(String),
    Styled {
        text: String,
        style: Option<Style>,
        font: Option<usize>,
    },
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid scene {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scene JSON")
    }

    /// Font files in registration order
    pub fn font_paths(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.fonts.iter().map(|p| base_dir.join(p)).collect()
    }

    /// Builds the root writer; fonts are attached by the caller
    pub fn to_writer(&self, base_dir: &Path) -> Result<Writer> {
        build_writer(
            self.window,
            self.background.as_deref(),
            &self.children,
            base_dir,
        )
    }
}

fn build_writer(
    window: WindowStyle,
    background: Option<&Path>,
    children: &[Node],
    base_dir: &Path,
) -> Result<Writer> {
    let mut writer = match background {
        Some(path) => {
            let path = base_dir.join(path);
            let format = format_for(&path, None)?;
            Writer::from_image(window, read(&path)?, format)
        },
        None => Writer::new(window),
    };

    for node in children {
        match node {
            Node::Text { style, font, runs } => {
                let mut area = TextArea::new(style.clone());
                if let Some(index) = font {
                    area = area.with_font(FontReference::Index(*index));
                }
                for run in runs {
                    area.push_run(run.to_run());
                }
                writer.append(area);
            },
            Node::Image {
                path,
                width,
                height,
                format,
                style,
            } => {
                let path = base_dir.join(path);
                let format = format_for(&path, format.as_deref())?;
                let mut image = ImageNode::new(read(&path)?, format).with_style(style.clone());
                if let Some(width) = width {
                    image = image.with_width(*width);
                }
                if let Some(height) = height {
                    image = image.with_height(*height);
                }
                writer.append(image);
            },
            Node::Container {
                window,
                background,
                style,
                children,
            } => {
                let inner =
                    build_writer(*window, background.as_deref(), children, base_dir)?;
                writer.append(Container::new(inner, style.clone()));
            },
        }
    }
    Ok(writer)
}

impl RunSpec {
    fn to_run(&self) -> TextRun {
        match self {
            RunSpec::Plain(text) => TextRun::new(text.clone()),
            RunSpec::Styled { text, style, font } => {
                let mut run = TextRun::new(text.clone());
                if let Some(style) = style {
                    run = run.with_style(style.clone());
                }
                if let Some(index) = font {
                    run = run.with_font(FontReference::Index(*index));
                }
                run
            },
        }
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn format_for(path: &Path, explicit: Option<&str>) -> Result<ImageInputFormat> {
    let name = match explicit {
        Some(name) => name.to_string(),
        None => match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_string(),
            None => bail!(
                "Cannot tell the image format of {}; add a \"format\" field",
                path.display()
            ),
        },
    };
    name.parse::<ImageInputFormat>()
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
}
