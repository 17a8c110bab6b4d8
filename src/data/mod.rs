//! Font data persistence
//!
//! Conversion of assembled fonts into the UFO object model and UFO I/O.

pub mod conversions;
pub mod ufo;

pub use conversions::{code_page_bits, outline_to_contours};
pub use ufo::save_ufo;
