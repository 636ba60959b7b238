//! The caller-built tree: writers, containers, text areas and images
//!
//! Nodes are moved into their parent when appended, so the tree can't hold
//! cycles or shared children.

use std::sync::Arc;

use ogw_core::style::{Style, WindowStyle};
use ogw_fontdb::{FontReference, FontRegistry};

/// Encoded format of an image node's bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageInputFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
}

impl ImageInputFormat {
    pub(crate) fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageInputFormat::Png => image::ImageFormat::Png,
            ImageInputFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageInputFormat::Gif => image::ImageFormat::Gif,
            ImageInputFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

impl std::str::FromStr for ImageInputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(ImageInputFormat::Png),
            "jpg" | "jpeg" => Ok(ImageInputFormat::Jpeg),
            "gif" => Ok(ImageInputFormat::Gif),
            "webp" => Ok(ImageInputFormat::WebP),
            other => Err(format!("unsupported image format '{}'", other)),
        }
    }
}

/// An encoded image plus how big it should be drawn
#[derive(Debug, Clone)]
pub struct ImageNode {
    data: Arc<Vec<u8>>,
    width: Option<u32>,
    height: Option<u32>,
    format: ImageInputFormat,
    style: Style,
}

impl ImageNode {
    pub fn new(data: Vec<u8>, format: ImageInputFormat) -> Self {
        Self {
            data: Arc::new(data),
            width: None,
            height: None,
            format,
            style: Style::default(),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Declared width; the height follows the aspect ratio unless set
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    pub fn format(&self) -> ImageInputFormat {
        self.format
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// One styled span of text
#[derive(Debug, Clone)]
pub struct TextRun {
    text: String,
    style: Option<Style>,
    font: Option<FontReference>,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
            font: None,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_font(mut self, font: FontReference) -> Self {
        self.font = Some(font);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Overrides on top of the text area's style
    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    pub fn font(&self) -> Option<&FontReference> {
        self.font.as_ref()
    }
}

/// A paragraph made of runs
#[derive(Debug, Clone, Default)]
pub struct TextArea {
    runs: Vec<TextRun>,
    style: Style,
    font: Option<FontReference>,
}

impl TextArea {
    pub fn new(style: Style) -> Self {
        Self {
            runs: Vec::new(),
            style,
            font: None,
        }
    }

    /// Font for runs that don't name their own
    pub fn with_font(mut self, font: FontReference) -> Self {
        self.font = Some(font);
        self
    }

    /// Appends text in the area's own style
    pub fn push_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.runs.push(TextRun::new(text));
        self
    }

    pub fn push(&mut self, text: impl Into<String>, style: Style) -> &mut Self {
        self.runs.push(TextRun::new(text).with_style(style));
        self
    }

    pub fn push_with_font(
        &mut self,
        text: impl Into<String>,
        style: Style,
        font: FontReference,
    ) -> &mut Self {
        self.runs
            .push(TextRun::new(text).with_style(style).with_font(font));
        self
    }

    pub fn push_run(&mut self, run: TextRun) -> &mut Self {
        self.runs.push(run);
        self
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn font(&self) -> Option<&FontReference> {
        self.font.as_ref()
    }
}

/// A nested writer laid out as one child
#[derive(Debug)]
pub struct Container {
    writer: Writer,
    style: Style,
}

impl Container {
    pub fn new(writer: Writer, style: Style) -> Self {
        Self { writer, style }
    }

    pub fn writer(&self) -> &Writer {
        &self.writer
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

#[derive(Debug)]
pub enum Element {
    Image(ImageNode),
    TextArea(TextArea),
    Container(Container),
}

impl From<ImageNode> for Element {
    fn from(node: ImageNode) -> Self {
        Element::Image(node)
    }
}

impl From<TextArea> for Element {
    fn from(area: TextArea) -> Self {
        Element::TextArea(area)
    }
}

impl From<Container> for Element {
    fn from(container: Container) -> Self {
        Element::Container(container)
    }
}

/// The root aggregate: a window and its children, in paint order
#[derive(Debug, Default)]
pub struct Writer {
    window: WindowStyle,
    elements: Vec<Element>,
    fonts: Option<Arc<FontRegistry>>,
    background: Option<ImageNode>,
}

impl Writer {
    pub fn new(window: WindowStyle) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    pub fn with_fonts(window: WindowStyle, fonts: Arc<FontRegistry>) -> Self {
        Self {
            window,
            fonts: Some(fonts),
            ..Self::default()
        }
    }

    /// Starts from a template image painted under everything else
    ///
    /// Unset window dimensions take the image's natural size.
    pub fn from_image(window: WindowStyle, data: Vec<u8>, format: ImageInputFormat) -> Self {
        Self {
            window,
            background: Some(ImageNode::new(data, format)),
            ..Self::default()
        }
    }

    pub fn set_fonts(&mut self, fonts: Arc<FontRegistry>) {
        self.fonts = Some(fonts);
    }

    /// Adds a child after the existing ones
    pub fn append(&mut self, element: impl Into<Element>) -> &mut Self {
        self.elements.push(element.into());
        self
    }

    pub fn window(&self) -> &WindowStyle {
        &self.window
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Registry for this writer; nested writers without one use their parent's
    pub fn fonts(&self) -> Option<&Arc<FontRegistry>> {
        self.fonts.as_ref()
    }

    pub fn background(&self) -> Option<&ImageNode> {
        self.background.as_ref()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
