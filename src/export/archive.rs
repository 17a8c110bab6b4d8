//! Packing several SVG files into one ZIP archive

use std::io::{Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::SvgFile;
use crate::core::errors::{ConvertError, ConvertResult};

/// File name used for batched SVG exports
pub const ARCHIVE_NAME: &str = "converted_svg_files.zip";

/// Write `files` into a deflated ZIP archive, in order, and return the writer
pub fn write_archive<W: Write + Seek>(files: &[SvgFile], writer: W) -> ConvertResult<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for file in files {
        zip.start_file(file.file_name.as_str(), options)?;
        zip.write_all(file.content.as_bytes())
            .map_err(|source| ConvertError::Archive(source.into()))?;
    }

    let writer = zip.finish()?;
    tracing::debug!("Packed {} files into archive", files.len());
    Ok(writer)
}
