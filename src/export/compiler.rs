//! Binary font output through the `fontc` compiler
//!
//! The UFO is written into a scratch directory and handed to the external
//! `fontc` executable, which produces the binary font file.

use std::path::{Path, PathBuf};
use std::process::Command;

use norad::Font;

use crate::core::errors::{ConvertError, ConvertResult, FileContext};
use crate::data::save_ufo;

pub const DEFAULT_COMPILER: &str = "fontc";

pub struct FontCompiler {
    executable: PathBuf,
}

impl Default for FontCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl FontCompiler {
    pub fn new() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_COMPILER),
        }
    }

    /// Use a specific compiler binary instead of `fontc` from `PATH`
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Compile `font` into a binary font at `output_path`
    pub fn compile(&self, font: &Font, output_path: &Path) -> ConvertResult<()> {
        let scratch = tempfile::tempdir().with_file_context("create", &std::env::temp_dir())?;
        let ufo_path = scratch.path().join("source.ufo");
        save_ufo(font, &ufo_path)?;

        tracing::info!("Compiling {} with {}", output_path.display(), self.executable.display());

        let output = Command::new(&self.executable)
            .arg(&ufo_path)
            .arg("--output-file")
            .arg(output_path)
            .arg("--build-dir")
            .arg(scratch.path().join("build"))
            .output()
            .map_err(|source| ConvertError::CompilerUnavailable {
                executable: self.executable.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConvertError::Compile {
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::FontAssembler;

    #[test]
    fn test_missing_compiler_is_reported() {
        let compiler = FontCompiler::with_executable("/nonexistent/bin/fontc");
        let font = FontAssembler::new("Test").assemble(Vec::new()).to_norad_font();
        let dir = tempfile::tempdir().unwrap();

        let error = compiler.compile(&font, &dir.path().join("Test.otf")).unwrap_err();
        assert!(matches!(error, ConvertError::CompilerUnavailable { .. }));
        assert!(error.to_string().contains("/nonexistent/bin/fontc"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_compiler_reports_stderr() {
        // `false` exits non-zero without reading its arguments
        let compiler = FontCompiler::with_executable("false");
        let font = FontAssembler::new("Test").assemble(Vec::new()).to_norad_font();
        let dir = tempfile::tempdir().unwrap();

        let error = compiler.compile(&font, &dir.path().join("Test.otf")).unwrap_err();
        assert!(matches!(error, ConvertError::Compile { .. }));
    }

    #[test]
    fn test_default_executable() {
        assert_eq!(FontCompiler::default().executable(), Path::new("fontc"));
    }
}
