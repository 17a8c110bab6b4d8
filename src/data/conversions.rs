//! UFO format conversion utilities
//!
//! Conversion from the assembled font document to the norad UFO object
//! model. This is pure data transformation; writing to disk lives in
//! [`super::ufo`].

use norad::{Contour, ContourPoint, Font, PointType};

use crate::font_source::{FontDocument, FontMetadata, GlyphRecord};
use crate::outline::{Outline, PathCommand, Point};

/// UFO lib key holding the glyph order
pub const GLYPH_ORDER_KEY: &str = "public.glyphOrder";

/// UFO lib key holding `meta` table entries
pub const OPENTYPE_META_KEY: &str = "public.openTypeMeta";

impl FontDocument {
    /// Convert to a complete norad Font
    pub fn to_norad_font(&self) -> Font {
        let mut font = Font::new();
        font.font_info = self.metadata.to_norad_font_info(self.code_page_range1);

        let layer = font.default_layer_mut();
        for glyph in self.glyphs() {
            layer.insert_glyph(glyph.to_norad_glyph());
        }

        let order = self
            .glyph_names()
            .into_iter()
            .map(|name| plist::Value::String(name.to_string()))
            .collect();
        font.lib
            .insert(GLYPH_ORDER_KEY.to_string(), plist::Value::Array(order));

        if let Some(script) = &self.script {
            let languages = script
                .design_languages
                .iter()
                .map(|lang| plist::Value::String(lang.clone()))
                .collect();
            let mut meta = plist::Dictionary::new();
            meta.insert("dlng".to_string(), plist::Value::Array(languages));
            font.lib
                .insert(OPENTYPE_META_KEY.to_string(), plist::Value::Dictionary(meta));
        }

        font
    }
}

impl FontMetadata {
    /// Convert to norad FontInfo
    pub fn to_norad_font_info(&self, code_page_range1: u32) -> norad::FontInfo {
        let mut info = norad::FontInfo::default();

        // Set family and style names
        if !self.family_name.is_empty() {
            info.family_name = Some(self.family_name.clone());
        }
        if !self.style_name.is_empty() {
            info.style_name = Some(self.style_name.clone());
        }

        // Set numeric values
        if let Some(units_per_em) =
            norad::fontinfo::NonNegativeIntegerOrFloat::new(self.units_per_em as f64)
        {
            info.units_per_em = Some(units_per_em);
        }
        info.ascender = Some(self.ascender);
        info.descender = Some(self.descender);

        let code_pages = code_page_bits(code_page_range1);
        if !code_pages.is_empty() {
            info.open_type_os2_code_page_ranges = Some(code_pages);
        }
        info
    }
}

/// Bit numbers set in a code page bitmask, ascending
pub fn code_page_bits(mask: u32) -> Vec<u8> {
    (0..32u8).filter(|bit| mask & (1 << bit) != 0).collect()
}

impl GlyphRecord {
    /// Convert to a norad glyph
    pub fn to_norad_glyph(&self) -> norad::Glyph {
        let mut glyph = norad::Glyph::new(&self.name);
        glyph.width = self.advance_width;

        if let Some(character) = self.character() {
            glyph.codepoints.insert(character);
        }
        glyph.contours = outline_to_contours(&self.outline);
        glyph
    }
}

/// Split an outline into UFO contours.
///
/// A closed contour whose last on-curve point lands on its start point drops
/// the duplicate, and the start point takes the type of the closing segment.
/// A contour that is never closed starts with a `move` point.
pub fn outline_to_contours(outline: &Outline) -> Vec<Contour> {
    let mut contours = Vec::new();
    let mut builder = ContourBuilder::default();

    for command in outline.commands() {
        match *command {
            PathCommand::MoveTo(p) => {
                contours.extend(builder.finish(false));
                builder.start(p);
            }
            PathCommand::LineTo(p) if builder.start.is_none() => builder.start(p),
            PathCommand::LineTo(p) => builder.push(p, PointType::Line),
            PathCommand::CurveTo(c1, c2, p) => {
                builder.ensure_started(c1);
                builder.push(c1, PointType::OffCurve);
                builder.push(c2, PointType::OffCurve);
                builder.push(p, PointType::Curve);
            }
            PathCommand::Close => contours.extend(builder.finish(true)),
        }
    }
    contours.extend(builder.finish(false));
    contours
}

/// Accumulates the points of one contour
#[derive(Default)]
struct ContourBuilder {
    start: Option<Point>,
    points: Vec<(Point, PointType)>,
}

impl ContourBuilder {
    fn start(&mut self, p: Point) {
        self.start = Some(p);
        self.points.clear();
    }

    /// A curve without a preceding move starts at its first control point
    fn ensure_started(&mut self, p: Point) {
        if self.start.is_none() {
            self.start(p);
        }
    }

    fn push(&mut self, p: Point, typ: PointType) {
        self.points.push((p, typ));
    }

    fn finish(&mut self, closed: bool) -> Option<Contour> {
        let start = self.start.take()?;
        let mut points = std::mem::take(&mut self.points);

        if !closed {
            points.insert(0, (start, PointType::Move));
        } else {
            let closing = match points.last() {
                Some((last, typ)) if *last == start && *typ != PointType::OffCurve => {
                    Some(typ.clone())
                }
                _ => None,
            };
            match closing {
                Some(typ) => {
                    points.pop();
                    points.insert(0, (start, typ));
                }
                None => points.insert(0, (start, PointType::Line)),
            }
        }
        // a lone point draws nothing
        if points.len() < 2 {
            return None;
        }

        let points = points
            .into_iter()
            .map(|(p, typ)| ContourPoint::new(p.x, p.y, typ, false, None, None))
            .collect();
        Some(Contour::new(points, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::FontAssembler;

    fn types(contour: &Contour) -> Vec<PointType> {
        contour.points.iter().map(|p| p.typ.clone()).collect()
    }

    #[test]
    fn test_closed_polygon() {
        let outline = crate::outline::transform_svg_path("M 0 0 L 100 0 L 100 100 Z", 0.0);
        let contours = outline_to_contours(&outline);

        assert_eq!(contours.len(), 1);
        assert_eq!(
            types(&contours[0]),
            vec![PointType::Line, PointType::Line, PointType::Line]
        );
        assert_eq!(contours[0].points[0].x, 0.0);
        assert_eq!(contours[0].points[2].y, -100.0);
    }

    #[test]
    fn test_curve_returning_to_start_drops_duplicate() {
        let outline: Outline = [
            PathCommand::MoveTo(Point::new(0.0, 0.0)),
            PathCommand::CurveTo(
                Point::new(50.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(100.0, 100.0),
            ),
            PathCommand::CurveTo(
                Point::new(50.0, 100.0),
                Point::new(0.0, 50.0),
                Point::new(0.0, 0.0),
            ),
            PathCommand::Close,
        ]
        .into_iter()
        .collect();
        let contours = outline_to_contours(&outline);

        assert_eq!(
            types(&contours[0]),
            vec![
                PointType::Curve,
                PointType::OffCurve,
                PointType::OffCurve,
                PointType::Curve,
                PointType::OffCurve,
                PointType::OffCurve,
            ]
        );
    }

    #[test]
    fn test_open_and_multiple_contours() {
        let outline =
            crate::outline::transform_svg_path("M 0 0 L 10 0 Z M 20 0 L 30 0 L 30 10", 0.0);
        let contours = outline_to_contours(&outline);

        assert_eq!(contours.len(), 2);
        assert_eq!(types(&contours[1])[0], PointType::Move);
        assert_eq!(contours[1].points.len(), 3);
    }

    #[test]
    fn test_lone_move_is_dropped_when_closed() {
        let outline = crate::outline::transform_svg_path("M 5 5 Z", 0.0);
        assert!(outline_to_contours(&outline).is_empty());
    }

    #[test]
    fn test_code_page_bits() {
        assert!(code_page_bits(0).is_empty());
        assert_eq!(code_page_bits(1 << 17), vec![17]);
        assert_eq!(code_page_bits(0b101), vec![0, 2]);
    }

    #[test]
    fn test_font_conversion_carries_metadata() {
        let glyph = GlyphRecord {
            name: "uni3042".to_string(),
            codepoint: Some(0x3042),
            advance_width: 900.0,
            outline: crate::outline::transform_svg_path("M 0 0 L 10 0 L 10 10 Z", 800.0),
        };
        let document = FontAssembler::new("Test Font").assemble(vec![glyph]);
        let font = document.to_norad_font();

        assert_eq!(font.font_info.family_name.as_deref(), Some("Test Font"));
        assert_eq!(font.font_info.style_name.as_deref(), Some("Regular"));
        assert_eq!(font.font_info.ascender, Some(800.0));
        assert_eq!(font.font_info.descender, Some(-200.0));
        assert_eq!(
            font.font_info.open_type_os2_code_page_ranges,
            Some(vec![17])
        );

        let layer = font.default_layer();
        assert_eq!(layer.len(), 3);
        let glyph = layer.get_glyph("uni3042").unwrap();
        assert_eq!(glyph.width, 900.0);
        assert!(glyph.codepoints.iter().any(|c| c == 'あ'));
        assert_eq!(glyph.contours.len(), 1);

        let order = font.lib.get(GLYPH_ORDER_KEY).and_then(|v| v.as_array()).unwrap();
        assert_eq!(order.len(), 3);
        assert_eq!(order[0].as_string(), Some(".notdef"));

        let meta = font
            .lib
            .get(OPENTYPE_META_KEY)
            .and_then(|v| v.as_dictionary())
            .unwrap();
        let dlng = meta.get("dlng").and_then(|v| v.as_array()).unwrap();
        assert_eq!(dlng[0].as_string(), Some("Jpan"));
    }

    #[test]
    fn test_latin_font_has_no_meta() {
        let document = FontAssembler::new("Test").assemble(Vec::new());
        let font = document.to_norad_font();
        assert!(font.lib.get(OPENTYPE_META_KEY).is_none());
        assert!(font.font_info.open_type_os2_code_page_ranges.is_none());
    }
}
