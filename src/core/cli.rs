//! Command line interface for tracefont
//!
//! Handles parsing command line arguments and resolving each setting
//! against the user config file and the built-in defaults.

use crate::core::config_file::ConfigFile;
use crate::export::compiler::DEFAULT_COMPILER;
use crate::font_source::WidthOption;
use crate::pipeline::{ConversionOptions, OutputSize, DEFAULT_THRESHOLD};
use crate::trace::EdgeTracer;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// tracefont CLI arguments
///
/// Examples:
///   tracefont svg scan.png                      # Trace one image to scan.svg
///   tracefont svg *.png --output-size fixed-height
///   tracefont font A.png B.png あ.png --name "My Font"
///   tracefont font glyphs/*.png --width svg --ufo-only
///   tracefont preview scan.png --threshold 90   # Check the threshold first
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "tracefont",
    version,
    about = "Trace bitmap images into SVG outlines or a font",
    long_about = "tracefont binarizes bitmap images with a threshold, traces them into vector outlines, and writes the outlines as SVG files or assembles them into a font. In font mode each image becomes the glyph for the first character of its file name."
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    /// Initialize user configuration directory with default settings
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with default settings",
        long_help = "Initialize the ~/.config/tracefont directory with a settings.json file holding every built-in default, and a logs directory."
    )]
    pub new_config: bool,

    /// Also write logs to ~/.config/tracefont/logs/
    #[clap(long = "log-file", global = true, help = "Also write logs to the config logs directory")]
    pub log_file: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Trace images into SVG files (several images are zipped together)
    Svg(SvgArgs),
    /// Trace images into glyphs and build a font
    Font(FontArgs),
    /// Write the binarized version of an image, to check a threshold
    Preview(PreviewArgs),
}

/// Options shared by the tracing subcommands
#[derive(Args, Debug, Clone)]
pub struct TraceArgs {
    /// Source images, processed in the order given
    #[clap(required = true, help = "Source images")]
    pub images: Vec<PathBuf>,

    /// Binarization threshold
    #[clap(
        long = "threshold",
        short = 't',
        help = "Binarization threshold (0-255)",
        long_help = "Pixels whose average red, green and blue value is below the threshold become ink. Defaults to 128."
    )]
    pub threshold: Option<u8>,

    /// Output size mode
    #[clap(
        long = "output-size",
        value_enum,
        help = "Keep source size or scale to a height of 1000 units"
    )]
    pub output_size: Option<OutputSize>,

    /// Speckle size for the tracer
    #[clap(long = "turd-size", help = "Drop contours enclosing this many pixels or fewer")]
    pub turd_size: Option<u32>,

    /// Round corners into curves
    #[clap(long = "smooth", help = "Round traced corners into curves")]
    pub smooth: bool,

    /// Directory output files are written to
    #[clap(long = "output-dir", short = 'o', default_value = ".", help = "Output directory")]
    pub output_dir: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct SvgArgs {
    #[clap(flatten)]
    pub trace: TraceArgs,
}

#[derive(Args, Debug, Clone)]
pub struct FontArgs {
    #[clap(flatten)]
    pub trace: TraceArgs,

    /// Font family name
    #[clap(
        long = "name",
        short = 'n',
        help = "Font family name",
        long_help = "Font family name. The output file is named after it with whitespace replaced by hyphens. Defaults to \"MyFont YYYYMMDD\" with today's date."
    )]
    pub family_name: Option<String>,

    /// Advance width policy
    #[clap(long = "width", value_enum, help = "Advance width policy")]
    pub width_option: Option<WidthOption>,

    /// Write the UFO source instead of compiling a binary font
    #[clap(long = "ufo-only", help = "Write a UFO instead of compiling")]
    pub ufo_only: bool,

    /// Font compiler executable
    #[clap(long = "fontc", help = "Path to the fontc executable")]
    pub fontc: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    /// Image to binarize
    pub image: PathBuf,

    #[clap(long = "threshold", short = 't', help = "Binarization threshold (0-255)")]
    pub threshold: Option<u8>,

    /// Output PNG path; defaults to <name>-preview.png next to the image
    #[clap(long = "output", short = 'o')]
    pub output: Option<PathBuf>,
}

/// Default family name: "MyFont YYYYMMDD" with today's date
pub fn default_family_name() -> String {
    chrono::Local::now().format("MyFont %Y%m%d").to_string()
}

/// Priority order for every setting:
/// 1. CLI argument
/// 2. Config file setting (~/.config/tracefont/settings.json)
/// 3. Built-in default
impl TraceArgs {
    pub fn threshold(&self, config: &ConfigFile) -> u8 {
        resolve_threshold(self.threshold, config)
    }

    pub fn output_size(&self, config: &ConfigFile) -> OutputSize {
        self.output_size
            .or(config.output_size)
            .unwrap_or_default()
    }

    pub fn conversion_options(&self, config: &ConfigFile) -> ConversionOptions {
        ConversionOptions {
            threshold: self.threshold(config),
            output_size: self.output_size(config),
        }
    }

    pub fn tracer(&self, config: &ConfigFile) -> EdgeTracer {
        let defaults = EdgeTracer::default();
        EdgeTracer::new(
            self.turd_size
                .or(config.turd_size)
                .unwrap_or(defaults.turd_size),
            self.smooth || config.smooth.unwrap_or(defaults.smooth),
        )
    }
}

impl FontArgs {
    pub fn family_name(&self, config: &ConfigFile) -> String {
        self.family_name
            .clone()
            .or_else(|| config.family_name.clone())
            .unwrap_or_else(default_family_name)
    }

    pub fn width_option(&self, config: &ConfigFile) -> WidthOption {
        self.width_option
            .or(config.width_option)
            .unwrap_or_default()
    }

    pub fn compiler_path(&self, config: &ConfigFile) -> PathBuf {
        self.fontc
            .clone()
            .or_else(|| config.fontc.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COMPILER))
    }
}

impl PreviewArgs {
    pub fn threshold(&self, config: &ConfigFile) -> u8 {
        resolve_threshold(self.threshold, config)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let stem = self
                .image
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            self.image.with_file_name(format!("{stem}-preview.png"))
        })
    }
}

fn resolve_threshold(cli: Option<u8>, config: &ConfigFile) -> u8 {
    cli.or(config.threshold).unwrap_or(DEFAULT_THRESHOLD)
}
