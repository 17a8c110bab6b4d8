//! UFO file I/O operations

use norad::Font;
use std::path::Path;

use crate::core::errors::{ConvertError, ConvertResult};

/// Write a UFO to disk, replacing anything already at `path`
pub fn save_ufo(font: &Font, path: &Path) -> ConvertResult<()> {
    font.save(path).map_err(|source| ConvertError::Ufo {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;
    tracing::debug!("Saved UFO to {:?}", path);
    Ok(())
}
