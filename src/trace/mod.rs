//! Raster-to-vector tracing
//!
//! A [`Tracer`] is called once per image with the binarized ink mask and a
//! scale factor, and returns a complete SVG document. Batches call their
//! tracer strictly one image at a time.

pub mod edge_tracer;
pub mod svg_document;

use thiserror::Error;

use crate::raster::Bitmap;

pub use edge_tracer::EdgeTracer;
pub use svg_document::{parse_leading_int, SvgOutline};

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("scale factor must be positive and finite, got {0}")]
    InvalidScale(f64),

    #[error("contour extraction failed: {0}")]
    Contour(String),
}

/// Turns an ink mask into an SVG document
pub trait Tracer {
    fn trace(&self, bitmap: &Bitmap, scale: f64) -> Result<TracedSvg, TraceError>;
}

impl<T: Tracer + ?Sized> Tracer for &T {
    fn trace(&self, bitmap: &Bitmap, scale: f64) -> Result<TracedSvg, TraceError> {
        (**self).trace(bitmap, scale)
    }
}

/// The text of a traced SVG document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracedSvg {
    content: String,
}

impl TracedSvg {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn into_string(self) -> String {
        self.content
    }

    /// The first `<path>` and the root size attributes, if there is a path
    pub fn outline(&self) -> Option<SvgOutline> {
        svg_document::read_outline(&self.content)
    }
}

impl From<String> for TracedSvg {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}
