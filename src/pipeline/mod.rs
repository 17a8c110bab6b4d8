//! Batch conversion driver
//!
//! The orchestrator runs every image of a batch through decode, binarize,
//! trace and (in font mode) glyph building, one image at a time and in the
//! order given. The first failure aborts the batch.

pub mod progress;

use serde::{Deserialize, Serialize};

use crate::core::errors::{ConvertError, ConvertResult};
use crate::export::{svg_file_name, SvgFile};
use crate::font_source::{FontAssembler, FontDocument, GlyphBuilder, WidthOption};
use crate::raster::{binarize, Bitmap, ImageInput, ImageSource};
use crate::trace::{TracedSvg, Tracer};

pub use progress::{LogProgress, NoProgress, Progress, ProgressReporter};

/// Height traced SVGs are scaled to in fixed-height mode
pub const FIXED_OUTPUT_HEIGHT: f64 = 1000.0;

/// Default binarization threshold
pub const DEFAULT_THRESHOLD: u8 = 128;

/// How traced coordinates are scaled
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum OutputSize {
    /// Keep source pixel coordinates
    #[default]
    Original,
    /// Scale so the image is 1000 units tall
    FixedHeight,
}

impl OutputSize {
    /// Scale factor for an image of the given height. A zero height keeps
    /// the original scale.
    pub fn scale_for(self, image_height: u32) -> f64 {
        match self {
            OutputSize::FixedHeight if image_height > 0 => {
                FIXED_OUTPUT_HEIGHT / image_height as f64
            }
            _ => 1.0,
        }
    }
}

/// Settings shared by both output modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOptions {
    pub threshold: u8,
    pub output_size: OutputSize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            output_size: OutputSize::default(),
        }
    }
}

/// Settings for font mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontOptions {
    pub family_name: String,
    pub width_option: WidthOption,
}

/// Result of an SVG export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvgExport {
    /// One image, written as-is
    Single(SvgFile),
    /// Several images, to be packed into an archive in this order
    Batch(Vec<SvgFile>),
}

pub struct ConversionOrchestrator<T: Tracer> {
    tracer: T,
    options: ConversionOptions,
}

impl<T: Tracer> ConversionOrchestrator<T> {
    pub fn new(tracer: T, options: ConversionOptions) -> Self {
        Self { tracer, options }
    }

    /// Binarize and trace one decoded image
    pub fn trace_image(&self, image: &ImageSource) -> ConvertResult<TracedSvg> {
        let binarized = binarize(image.pixels(), self.options.threshold);
        let bitmap = Bitmap::from_binarized(&binarized);
        let scale = self.options.output_size.scale_for(image.height());

        tracing::debug!(
            "Tracing {} ({} ink pixels, scale {})",
            image.name(),
            bitmap.ink_count(),
            scale
        );
        self.tracer
            .trace(&bitmap, scale)
            .map_err(|source| ConvertError::Trace {
                file: image.name().to_string(),
                source,
            })
    }

    /// Trace every image into an SVG document
    pub fn convert_to_svg(
        &self,
        inputs: &[ImageInput],
        progress: &mut dyn ProgressReporter,
    ) -> ConvertResult<SvgExport> {
        if inputs.is_empty() {
            return Err(ConvertError::NoInput);
        }

        let mut files = Vec::with_capacity(inputs.len());
        self.trace_each(inputs, progress, |name, svg| {
            files.push(SvgFile {
                file_name: svg_file_name(&name),
                content: svg.into_string(),
            });
        })?;

        Ok(match files.len() {
            1 => SvgExport::Single(files.remove(0)),
            _ => SvgExport::Batch(files),
        })
    }

    /// Trace every image into a glyph and assemble the font
    pub fn convert_to_font(
        &self,
        inputs: &[ImageInput],
        font: &FontOptions,
        progress: &mut dyn ProgressReporter,
    ) -> ConvertResult<FontDocument> {
        if inputs.is_empty() {
            return Err(ConvertError::NoInput);
        }
        let family_name = font.family_name.trim();
        if family_name.is_empty() {
            return Err(ConvertError::EmptyFamilyName);
        }

        let builder = GlyphBuilder::new(font.width_option);
        let mut glyphs = Vec::with_capacity(inputs.len());
        self.trace_each(inputs, progress, |name, svg| {
            if let Some(glyph) = builder.build(&svg, &name) {
                glyphs.push(glyph);
            }
        })?;

        if glyphs.is_empty() {
            return Err(ConvertError::NoValidGlyph);
        }

        tracing::info!("Assembling {} glyphs into '{}'", glyphs.len(), family_name);
        Ok(FontAssembler::new(family_name).assemble(glyphs))
    }

    /// Decode and trace each input in order, reporting progress as each one
    /// starts and handing the file name and document to `sink`. Stops at the
    /// first failure.
    fn trace_each(
        &self,
        inputs: &[ImageInput],
        progress: &mut dyn ProgressReporter,
        mut sink: impl FnMut(String, TracedSvg),
    ) -> ConvertResult<()> {
        let total = inputs.len();
        for (idx, input) in inputs.iter().enumerate() {
            let name = input.name();
            progress.report(Progress {
                index: idx + 1,
                total,
                file_name: &name,
            });
            let image = input.load()?;
            let svg = self.trace_image(&image)?;
            sink(name, svg);
        }
        Ok(())
    }
}
