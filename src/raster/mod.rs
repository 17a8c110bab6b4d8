//! Source images and binarization
//!
//! An [`ImageSource`] is one decoded image together with the file name it
//! came from. The binarizer turns it into a black-and-white raster, and
//! [`Bitmap`] is the ink mask that tracers consume.

pub mod binarize;

use image::RgbaImage;
use std::path::{Path, PathBuf};

use crate::core::errors::{ConvertError, ConvertResult};

pub use binarize::{binarize, Bitmap};

/// A decoded image with its original file name (extension included)
#[derive(Debug, Clone)]
pub struct ImageSource {
    name: String,
    pixels: RgbaImage,
}

impl ImageSource {
    /// Decode an image file from disk
    pub fn open(path: &Path) -> ConvertResult<Self> {
        let pixels = image::open(path)
            .map_err(|source| ConvertError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        tracing::debug!(
            "Decoded {} ({}x{})",
            name,
            pixels.width(),
            pixels.height()
        );
        Ok(Self { name, pixels })
    }

    /// Wrap already-decoded pixels
    pub fn from_rgba(name: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            name: name.into(),
            pixels,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// One entry of a conversion batch: either a file still to be decoded or
/// an image that is already in memory
#[derive(Debug, Clone)]
pub enum ImageInput {
    Path(PathBuf),
    Decoded(ImageSource),
}

impl ImageInput {
    /// File name shown in progress reports
    pub fn name(&self) -> String {
        match self {
            ImageInput::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            ImageInput::Decoded(image) => image.name().to_string(),
        }
    }

    pub fn load(&self) -> ConvertResult<ImageSource> {
        match self {
            ImageInput::Path(path) => ImageSource::open(path),
            ImageInput::Decoded(image) => Ok(image.clone()),
        }
    }
}

impl From<PathBuf> for ImageInput {
    fn from(path: PathBuf) -> Self {
        ImageInput::Path(path)
    }
}

impl From<ImageSource> for ImageInput {
    fn from(image: ImageSource) -> Self {
        ImageInput::Decoded(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_names() {
        let from_path = ImageInput::from(PathBuf::from("scans/あ.png"));
        assert_eq!(from_path.name(), "あ.png");

        let decoded = ImageSource::from_rgba("A.png", RgbaImage::new(2, 3));
        assert_eq!(decoded.width(), 2);
        assert_eq!(decoded.height(), 3);
        assert_eq!(ImageInput::from(decoded).name(), "A.png");
    }

    #[test]
    fn test_missing_file_is_image_error() {
        let input = ImageInput::from(PathBuf::from("/nonexistent/dir/B.png"));
        let error = input.load().unwrap_err();
        assert!(matches!(error, ConvertError::Image { .. }));
    }

    #[test]
    fn test_open_decodes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("C.png");
        RgbaImage::from_pixel(4, 5, image::Rgba([0, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let image = ImageSource::open(&path).unwrap();
        assert_eq!(image.name(), "C.png");
        assert_eq!((image.width(), image.height()), (4, 5));
    }
}
