//! Error types for OGW
//!
//! Recoverable failures (fonts, image decoding) flow through [`Diagnostics`],
//! which either records them as [`Warning`]s or turns them into hard errors
//! depending on the configured [`FailurePolicy`].

use crate::config::FailurePolicy;
use crate::types::NodePath;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OgwError>;

/// Main error type for OGW
#[derive(Debug, Error)]
pub enum OgwError {
    #[error("Font error: {0}")]
    Font(#[from] FontError),

    #[error("Image decode failed: {0}")]
    ImageDecode(#[from] ImageDecodeError),

    #[error("Layout overflow at node {path}: {detail}")]
    LayoutOverflow { path: NodePath, detail: String },

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Font registration and lookup errors
#[derive(Debug, Error)]
pub enum FontError {
    #[error("Invalid font data")]
    InvalidFontData,

    #[error("Font not found: {0}")]
    FontNotFound(String),
}

/// Image node decoding failure
#[derive(Debug, Error)]
#[error("node {path}: {reason}")]
pub struct ImageDecodeError {
    pub path: NodePath,
    pub reason: String,
}

/// Rasterization errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Failed to build path for node {0}")]
    PathBuildingFailed(NodePath),
}

/// Encoder errors
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Unsupported option: {0}")]
    UnsupportedOption(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// A recoverable failure that was skipped during painting
#[derive(Debug)]
pub struct Warning {
    /// Node the failure belongs to
    pub path: NodePath,
    /// What went wrong
    pub cause: OgwError,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node {}: {}", self.path, self.cause)
    }
}

/// Collects warnings for a single paint call
///
/// Every recoverable failure goes through [`Diagnostics::recover`], so the
/// degrade-or-abort decision lives in exactly one place.
#[derive(Debug)]
pub struct Diagnostics {
    policy: FailurePolicy,
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            warnings: Vec::new(),
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Records `cause` as a warning, or returns it when the policy aborts
    pub fn recover(&mut self, path: &NodePath, cause: OgwError) -> Result<()> {
        match self.policy {
            FailurePolicy::Degrade => {
                log::warn!("Skipping node {}: {}", path, cause);
                self.warnings.push(Warning {
                    path: path.clone(),
                    cause,
                });
                Ok(())
            },
            FailurePolicy::Abort => Err(cause),
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
