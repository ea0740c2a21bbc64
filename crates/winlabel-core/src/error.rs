use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the resolver and config boundaries.
///
/// None of these are fatal to a running widget: the widget logs them
/// and degrades (hide, no icon, raw label text).
#[derive(Debug, Error)]
pub enum Error {
    /// The OS query for a window failed or returned nothing usable.
    #[error("could not resolve window 0x{hwnd:X}: {reason}")]
    Resolution { hwnd: usize, reason: String },

    /// An icon was found but could not be turned into pixels.
    #[error("icon decode failed: {0}")]
    IconDecode(String),

    /// A package manifest was missing, malformed, or had no logo.
    #[error("manifest {}: {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },

    /// A label template could not be expanded.
    #[error("label template {template:?}: {reason}")]
    Format { template: String, reason: String },

    /// The configuration file could not be read or parsed.
    #[error("config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// A platform call needed to start the widget failed.
    #[error("platform: {0}")]
    Platform(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn resolution(hwnd: usize, reason: impl ToString) -> Self {
        Self::Resolution {
            hwnd,
            reason: reason.to_string(),
        }
    }

    pub fn manifest(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Manifest {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn format(template: &str, reason: impl ToString) -> Self {
        Self::Format {
            template: template.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(value: image::ImageError) -> Self {
        Self::IconDecode(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
