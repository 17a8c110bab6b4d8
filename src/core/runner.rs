//! Application runner logic
//!
//! Handles the different commands of the tracefont binary

use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::core::cli::{CliArgs, Command, FontArgs, PreviewArgs, SvgArgs, TraceArgs};
use crate::core::config_file::ConfigFile;
use crate::data::save_ufo;
use crate::export::{font_file_name, ufo_dir_name, write_archive, FontCompiler, ARCHIVE_NAME};
use crate::logging;
use crate::pipeline::{ConversionOrchestrator, FontOptions, LogProgress, SvgExport};
use crate::raster::{binarize, ImageInput, ImageSource};

/// Run the command selected on the command line.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    // Handle --new-config flag specially
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory");
    }

    let _log_guard = logging::init_logging(cli_args.log_file)?;
    let config = ConfigFile::load().unwrap_or_default();

    let Some(command) = cli_args.command else {
        bail!("No command given. Use `svg`, `font` or `preview`.");
    };
    match command {
        Command::Svg(args) => run_svg(&args, &config),
        Command::Font(args) => run_font(&args, &config),
        Command::Preview(args) => run_preview(&args, &config),
    }
}

fn inputs(trace: &TraceArgs) -> Vec<ImageInput> {
    trace.images.iter().cloned().map(ImageInput::from).collect()
}

fn prepare_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))
}

fn run_svg(args: &SvgArgs, config: &ConfigFile) -> Result<()> {
    let trace = &args.trace;
    let orchestrator =
        ConversionOrchestrator::new(trace.tracer(config), trace.conversion_options(config));

    let export = orchestrator.convert_to_svg(&inputs(trace), &mut LogProgress)?;
    prepare_output_dir(&trace.output_dir)?;

    match export {
        SvgExport::Single(file) => {
            let path = trace.output_dir.join(&file.file_name);
            fs::write(&path, &file.content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Converted to {}", path.display());
        }
        SvgExport::Batch(files) => {
            let path = trace.output_dir.join(ARCHIVE_NAME);
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_archive(&files, BufWriter::new(file))?;
            println!("Packed {} files into {}", files.len(), path.display());
        }
    }
    Ok(())
}

fn run_font(args: &FontArgs, config: &ConfigFile) -> Result<()> {
    let trace = &args.trace;
    let font_options = FontOptions {
        family_name: args.family_name(config),
        width_option: args.width_option(config),
    };
    let orchestrator =
        ConversionOrchestrator::new(trace.tracer(config), trace.conversion_options(config));

    let document =
        orchestrator.convert_to_font(&inputs(trace), &font_options, &mut LogProgress)?;
    prepare_output_dir(&trace.output_dir)?;

    let family_name = &document.metadata.family_name;
    let font = document.to_norad_font();
    let output: PathBuf = if args.ufo_only {
        let path = trace.output_dir.join(ufo_dir_name(family_name));
        save_ufo(&font, &path)?;
        path
    } else {
        let path = trace.output_dir.join(font_file_name(family_name));
        FontCompiler::with_executable(args.compiler_path(config)).compile(&font, &path)?;
        path
    };

    println!(
        "Built {} with {} glyphs: {}",
        document.metadata.display_name(),
        document.glyphs().len(),
        output.display()
    );
    Ok(())
}

fn run_preview(args: &PreviewArgs, config: &ConfigFile) -> Result<()> {
    let image = ImageSource::open(&args.image)?;
    let preview = binarize(image.pixels(), args.threshold(config));
    let output = args.output_path();
    preview
        .save(&output)
        .with_context(|| format!("Failed to write preview {}", output.display()))?;
    println!("Wrote preview to {}", output.display());
    Ok(())
}
