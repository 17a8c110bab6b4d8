//! Error types for the conversion pipeline
//!
//! Library code returns [`ConvertError`]; the binary wraps it in
//! `anyhow::Error` for reporting.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::trace::TraceError;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// No source images were given
    #[error("no image files were selected")]
    NoInput,

    /// The font family name was empty after trimming
    #[error("the font family name must not be empty")]
    EmptyFamilyName,

    #[error("failed to decode image {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to trace {file}")]
    Trace {
        file: String,
        #[source]
        source: TraceError,
    },

    /// Every image in a font batch failed to yield a glyph
    #[error("no valid glyph could be produced.")]
    NoValidGlyph,

    #[error("failed to {operation} {}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write UFO to {}", path.display())]
    Ufo {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("could not run the font compiler `{}`", executable.display())]
    CompilerUnavailable {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("font compilation failed: {stderr}")]
    Compile { stderr: String },

    #[error("failed to build archive")]
    Archive(#[from] zip::result::ZipError),
}

/// Attach a file path and operation name to an I/O failure
pub trait FileContext<T> {
    fn with_file_context(self, operation: &'static str, path: &Path) -> ConvertResult<T>;
}

impl<T> FileContext<T> for std::io::Result<T> {
    fn with_file_context(self, operation: &'static str, path: &Path) -> ConvertResult<T> {
        self.map_err(|source| ConvertError::Io {
            operation,
            path: path.to_path_buf(),
            source,
        })
    }
}
