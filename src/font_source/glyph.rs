//! Glyph records and building them from traced SVG documents
//!
//! A glyph takes its character from the source file name: `あ.png` becomes
//! the glyph for U+3042, named `uni3042`.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use super::metrics::ASCENDER;
use crate::outline::{transform_svg_path, Outline};
use crate::trace::TracedSvg;

/// Advance width used by the `fixed` policy and as the `svg` fallback
pub const DEFAULT_ADVANCE_WIDTH: f64 = 1000.0;

/// How a glyph's advance width is chosen
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum WidthOption {
    /// Always 1000 units
    #[default]
    Fixed,
    /// Width of the traced SVG coordinate space
    Svg,
}

/// One glyph of a font
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRecord {
    /// Unique within a font
    pub name: String,
    pub codepoint: Option<u32>,
    pub advance_width: f64,
    pub outline: Outline,
}

impl GlyphRecord {
    /// A glyph with no outline
    pub fn blank(name: impl Into<String>, codepoint: Option<u32>, advance_width: f64) -> Self {
        Self {
            name: name.into(),
            codepoint,
            advance_width,
            outline: Outline::new(),
        }
    }

    pub fn character(&self) -> Option<char> {
        self.codepoint.and_then(char::from_u32)
    }
}

/// `uni` followed by at least four uppercase hex digits
pub fn glyph_name_for(codepoint: u32) -> String {
    format!("uni{codepoint:04X}")
}

/// The character a source file stands for: the first code point of the
/// NFC-normalized file name, extension removed.
pub fn character_for_source(source_name: &str) -> Option<char> {
    let stem = match source_name.rfind('.') {
        Some(idx) if idx > 0 => &source_name[..idx],
        _ => source_name,
    };
    stem.nfc().next()
}

/// Builds glyph records from traced documents
#[derive(Debug, Clone)]
pub struct GlyphBuilder {
    width_option: WidthOption,
    ascender: f64,
}

impl GlyphBuilder {
    pub fn new(width_option: WidthOption) -> Self {
        Self {
            width_option,
            ascender: ASCENDER,
        }
    }

    /// Use a different vertical offset for the y flip
    pub fn with_ascender(mut self, ascender: f64) -> Self {
        self.ascender = ascender;
        self
    }

    /// Build the glyph for `source_name` from its traced document.
    ///
    /// Returns `None` when the document has no `<path>` or the name yields
    /// no character.
    pub fn build(&self, svg: &TracedSvg, source_name: &str) -> Option<GlyphRecord> {
        let Some(svg_outline) = svg.outline() else {
            tracing::warn!("{} has no outline path; skipping", source_name);
            return None;
        };
        let Some(character) = character_for_source(source_name) else {
            tracing::warn!("{} does not name a character; skipping", source_name);
            return None;
        };

        let codepoint = character as u32;
        let advance_width = match self.width_option {
            WidthOption::Fixed => DEFAULT_ADVANCE_WIDTH,
            WidthOption::Svg => svg_outline
                .declared_width()
                .filter(|width| *width >= 0)
                .map(|width| width as f64)
                .unwrap_or(DEFAULT_ADVANCE_WIDTH),
        };
        let outline = transform_svg_path(&svg_outline.path_data, self.ascender);

        tracing::debug!(
            "Built glyph {} from {} ({} commands, bounds {:?}, advance {})",
            glyph_name_for(codepoint),
            source_name,
            outline.len(),
            outline.bounding_box(),
            advance_width
        );

        Some(GlyphRecord {
            name: glyph_name_for(codepoint),
            codepoint: Some(codepoint),
            advance_width,
            outline,
        })
    }
}
