//! Output files: SVG documents, archives and compiled fonts

pub mod archive;
pub mod compiler;

pub use archive::{write_archive, ARCHIVE_NAME};
pub use compiler::FontCompiler;

/// A traced SVG document together with its output file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgFile {
    pub file_name: String,
    pub content: String,
}

/// Strip the extension from a source file name.
/// Names without a dot are returned unchanged.
pub fn base_name(source_name: &str) -> &str {
    match source_name.rfind('.') {
        Some(idx) => &source_name[..idx],
        None => source_name,
    }
}

/// `photo.png` becomes `photo.svg`
pub fn svg_file_name(source_name: &str) -> String {
    format!("{}.svg", base_name(source_name))
}

/// Family name with each whitespace character replaced by `-`, plus `.otf`
pub fn font_file_name(family_name: &str) -> String {
    format!("{}.otf", hyphenate(family_name))
}

/// Family name with each whitespace character replaced by `-`, plus `.ufo`
pub fn ufo_dir_name(family_name: &str) -> String {
    format!("{}.ufo", hyphenate(family_name))
}

fn hyphenate(family_name: &str) -> String {
    family_name
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}
