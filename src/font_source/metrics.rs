//! Font metadata and vertical metrics
//!
//! Every font this tool builds uses the same fixed metrics: a 1000 unit em
//! split into 800 units above the baseline and 200 below.

/// Units per em of generated fonts
pub const UNITS_PER_EM: u16 = 1000;

/// Height above the baseline; traced SVG y coordinates are flipped around it
pub const ASCENDER: f64 = 800.0;

pub const DESCENDER: f64 = -200.0;

pub const STYLE_NAME: &str = "Regular";

/// Font-wide naming and metrics
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetadata {
    pub units_per_em: u16,
    pub ascender: f64,
    pub descender: f64,
    pub family_name: String,
    pub style_name: String,
}

impl FontMetadata {
    /// Standard metrics with the given family name
    pub fn new(family_name: impl Into<String>) -> Self {
        Self {
            units_per_em: UNITS_PER_EM,
            ascender: ASCENDER,
            descender: DESCENDER,
            family_name: family_name.into(),
            style_name: STYLE_NAME.to_string(),
        }
    }

    /// Get a display name combining family and style names
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [&self.family_name, &self.style_name]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect();

        if parts.is_empty() {
            "Untitled Font".to_string()
        } else {
            parts.join(" ")
        }
    }
}
