//! The font registry: an ordered list of faces a writer can draw with

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use ogw_core::{
    error::{FontError, Result},
    traits::FontFace,
};

use crate::Font;

/// Owned font bytes, parsed on first use
///
/// The parse outcome is memoized, so a malformed blob is only inspected once
/// no matter how many runs point at it. Clones share the outcome.
#[derive(Clone)]
pub struct FontBlob {
    inner: Arc<BlobInner>,
}

struct BlobInner {
    data: Arc<Vec<u8>>,
    parsed: OnceCell<Option<Arc<Font>>>,
}

impl FontBlob {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            inner: Arc::new(BlobInner {
                data: Arc::new(data),
                parsed: OnceCell::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.data.is_empty()
    }

    /// True once a parse has been attempted
    pub fn is_parsed(&self) -> bool {
        self.inner.parsed.get().is_some()
    }

    /// The parsed face, or `InvalidFontData` for bytes that aren't a font
    pub fn face(&self) -> Result<Arc<Font>> {
        let parsed = self.inner.parsed.get_or_init(|| {
            match Font::from_shared(Arc::clone(&self.inner.data), 0) {
                Ok(font) => {
                    log::debug!("Parsed font blob ({} bytes)", self.inner.data.len());
                    Some(Arc::new(font))
                },
                // Memoized, so this fires once per blob
                Err(e) => {
                    log::warn!("Font blob rejected: {}", e);
                    None
                },
            }
        });
        parsed
            .clone()
            .ok_or_else(|| FontError::InvalidFontData.into())
    }
}

impl std::fmt::Debug for FontBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBlob")
            .field("bytes", &self.len())
            .field("parsed", &self.is_parsed())
            .finish()
    }
}

impl From<Vec<u8>> for FontBlob {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

/// How a text run names its font
#[derive(Debug, Clone)]
pub enum FontReference {
    /// Position in the writer's registry
    Index(usize),
    /// Bytes carried by the run itself
    Bytes(FontBlob),
}

impl From<usize> for FontReference {
    fn from(index: usize) -> Self {
        FontReference::Index(index)
    }
}

impl From<FontBlob> for FontReference {
    fn from(blob: FontBlob) -> Self {
        FontReference::Bytes(blob)
    }
}

enum Entry {
    Blob(FontBlob),
    Face(Arc<dyn FontFace>),
}

impl Entry {
    fn face(&self) -> Result<Arc<dyn FontFace>> {
        match self {
            Entry::Blob(blob) => Ok(blob.face()? as Arc<dyn FontFace>),
            Entry::Face(face) => Ok(Arc::clone(face)),
        }
    }
}

/// Your font library, in registration order
///
/// Register everything before painting starts. `clear` takes `&mut self`,
/// so a registry shared through an `Arc` stays read-only while writers
/// paint with it.
#[derive(Default)]
pub struct FontRegistry {
    entries: Vec<Entry>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends font bytes and returns their index
    ///
    /// Only emptiness is checked here; the bytes are parsed when a run first
    /// resolves them.
    pub fn register(&mut self, data: Vec<u8>) -> Result<usize> {
        if data.is_empty() {
            return Err(FontError::InvalidFontData.into());
        }
        self.entries.push(Entry::Blob(FontBlob::new(data)));
        let index = self.entries.len() - 1;
        log::debug!("Registered font #{}", index);
        Ok(index)
    }

    /// Reads and registers a font file
    pub fn register_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|_| FontError::FontNotFound(path.display().to_string()))?;
        self.register(data)
    }

    /// Registers a face that is already parsed
    pub fn register_face(&mut self, face: Arc<dyn FontFace>) -> usize {
        self.entries.push(Entry::Face(face));
        self.entries.len() - 1
    }

    /// Drops every entry; safe to call repeatedly
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Turns a reference into a usable face
    pub fn resolve(&self, reference: &FontReference) -> Result<Arc<dyn FontFace>> {
        match reference {
            FontReference::Index(index) => self
                .entries
                .get(*index)
                .ok_or_else(|| {
                    FontError::FontNotFound(format!(
                        "index {} ({} registered)",
                        index,
                        self.entries.len()
                    ))
                })?
                .face(),
            FontReference::Bytes(blob) => Ok(blob.face()? as Arc<dyn FontFace>),
        }
    }

    /// First registered face that has a glyph for `ch`
    ///
    /// Entries whose bytes don't parse are skipped.
    pub fn select_for_char(&self, ch: char) -> Result<Arc<dyn FontFace>> {
        for (index, entry) in self.entries.iter().enumerate() {
            let face = match entry.face() {
                Ok(face) => face,
                Err(e) => {
                    log::debug!("Skipping font #{} during fallback: {}", index, e);
                    continue;
                },
            };
            if face.glyph_id(ch).is_some() {
                return Ok(face);
            }
        }
        Err(FontError::FontNotFound(format!("no registered font covers {:?}", ch)).into())
    }
}

impl std::fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRegistry")
            .field("entries", &self.entries.len())
            .finish()
    }
}
