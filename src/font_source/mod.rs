//! Font source data structures
//!
//! Glyph records, the font document they are assembled into, and the
//! fixed metrics every generated font shares.

pub mod assembler;
pub mod glyph;
pub mod metrics;

// Explicit re-exports for public API
pub use assembler::{
    contains_japanese, is_japanese_codepoint, FontAssembler, FontDocument, ScriptMetadata,
};
pub use glyph::{character_for_source, glyph_name_for, GlyphBuilder, GlyphRecord, WidthOption};
pub use metrics::FontMetadata;
