//! Assembling glyph records into a font document
//!
//! The assembler always places `.notdef` and `space` ahead of the supplied
//! glyphs, applies the fixed metrics, and tags the font as Japanese when any
//! glyph falls in a kana, CJK ideograph or fullwidth-forms block.

use std::ops::RangeInclusive;

use super::glyph::GlyphRecord;
use super::metrics::FontMetadata;

pub const NOTDEF_GLYPH_NAME: &str = ".notdef";
pub const NOTDEF_ADVANCE_WIDTH: f64 = 600.0;
pub const SPACE_GLYPH_NAME: &str = "space";
pub const SPACE_ADVANCE_WIDTH: f64 = 300.0;

/// OS/2 code page range bit for JIS/Japan
pub const JAPANESE_CODE_PAGE_BIT: u32 = 17;

/// Design-language tag written to the `meta` table
pub const JAPANESE_DESIGN_LANGUAGE: &str = "Jpan";

/// Hiragana, katakana, CJK unified ideographs, halfwidth and fullwidth forms
pub const JAPANESE_RANGES: [RangeInclusive<u32>; 4] = [
    0x3040..=0x309F,
    0x30A0..=0x30FF,
    0x4E00..=0x9FAF,
    0xFF00..=0xFFEF,
];

pub fn is_japanese_codepoint(codepoint: u32) -> bool {
    JAPANESE_RANGES
        .iter()
        .any(|range| range.contains(&codepoint))
}

/// Whether any glyph maps a Japanese codepoint
pub fn contains_japanese(glyphs: &[GlyphRecord]) -> bool {
    glyphs
        .iter()
        .filter_map(|glyph| glyph.codepoint)
        .any(is_japanese_codepoint)
}

/// Script metadata destined for the `meta` table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptMetadata {
    /// `dlng` entries
    pub design_languages: Vec<String>,
}

/// A complete font, ready for serialization
#[derive(Debug, Clone, PartialEq)]
pub struct FontDocument {
    pub metadata: FontMetadata,
    glyphs: Vec<GlyphRecord>,
    pub script: Option<ScriptMetadata>,
    /// OS/2 `ulCodePageRange1`
    pub code_page_range1: u32,
}

impl FontDocument {
    /// All glyphs, `.notdef` and `space` first
    pub fn glyphs(&self) -> &[GlyphRecord] {
        &self.glyphs
    }

    pub fn glyph(&self, name: &str) -> Option<&GlyphRecord> {
        self.glyphs.iter().find(|glyph| glyph.name == name)
    }

    pub fn glyph_names(&self) -> Vec<&str> {
        self.glyphs.iter().map(|glyph| glyph.name.as_str()).collect()
    }

    /// True when any of the `dlng` tags equals `tag`
    pub fn has_design_language(&self, tag: &str) -> bool {
        self.script
            .as_ref()
            .is_some_and(|script| script.design_languages.iter().any(|lang| lang == tag))
    }

    pub fn has_code_page_bit(&self, bit: u32) -> bool {
        self.code_page_range1 & (1 << bit) != 0
    }
}

/// Combines glyph records into a [`FontDocument`]
#[derive(Debug, Clone)]
pub struct FontAssembler {
    metadata: FontMetadata,
}

impl FontAssembler {
    pub fn new(family_name: impl Into<String>) -> Self {
        Self {
            metadata: FontMetadata::new(family_name),
        }
    }

    /// Build the font document.
    ///
    /// Supplied glyphs keep their order. A glyph that claims the `.notdef` or
    /// `space` codepoint is dropped, and a glyph whose name was already seen
    /// replaces the earlier one in place, so names and codepoints stay unique.
    pub fn assemble(self, supplied: Vec<GlyphRecord>) -> FontDocument {
        let mut glyphs = vec![
            GlyphRecord::blank(NOTDEF_GLYPH_NAME, Some(0), NOTDEF_ADVANCE_WIDTH),
            GlyphRecord::blank(SPACE_GLYPH_NAME, Some(32), SPACE_ADVANCE_WIDTH),
        ];

        for glyph in supplied {
            if matches!(glyph.codepoint, Some(0) | Some(32)) {
                tracing::warn!(
                    "Glyph {} uses a reserved codepoint; dropping it",
                    glyph.name
                );
                continue;
            }
            match glyphs.iter().position(|existing| existing.name == glyph.name) {
                Some(idx) => {
                    tracing::warn!("Duplicate glyph {}; keeping the later one", glyph.name);
                    glyphs[idx] = glyph;
                }
                None => glyphs.push(glyph),
            }
        }

        let mut script = None;
        let mut code_page_range1 = 0;
        if contains_japanese(&glyphs[2..]) {
            tracing::info!(
                "Japanese glyphs found; tagging design language '{}' and code page bit {}",
                JAPANESE_DESIGN_LANGUAGE,
                JAPANESE_CODE_PAGE_BIT
            );
            script = Some(ScriptMetadata {
                design_languages: vec![JAPANESE_DESIGN_LANGUAGE.to_string()],
            });
            code_page_range1 |= 1 << JAPANESE_CODE_PAGE_BIT;
        }

        FontDocument {
            metadata: self.metadata,
            glyphs,
            script,
            code_page_range1,
        }
    }
}
