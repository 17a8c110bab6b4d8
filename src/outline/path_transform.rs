//! SVG path data to font-space outline conversion
//!
//! Tracers emit absolute `M`, `L`, `C` and `Z` commands in SVG space, where
//! y grows downward. Font outlines have y growing upward from the baseline,
//! so every coordinate is flipped around the ascender: `y_font = offset - y_svg`.
//!
//! The parser is lenient. Unknown commands, operand-less commands and
//! commands with too few coordinate pairs are skipped rather than reported,
//! so malformed tracer output degrades to a partial outline.

use super::{Outline, PathCommand, Point};

/// Flip a y coordinate between SVG space and font space.
///
/// The operation is its own inverse for a fixed offset.
pub fn flip_y(y: f64, offset: f64) -> f64 {
    offset - y
}

/// Convert an SVG path `d` attribute into a font-space outline.
pub fn transform_svg_path(path_data: &str, vertical_offset: f64) -> Outline {
    let mut outline = Outline::new();

    for (letter, operand_text) in split_commands(path_data) {
        let operands = parse_operands(operand_text);
        let is_close = letter.eq_ignore_ascii_case(&'z');
        if operands.is_empty() && !is_close {
            continue;
        }

        let points: Vec<Point> = operands
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], flip_y(pair[1], vertical_offset)))
            .collect();

        let command = match letter {
            'M' => points.first().copied().map(PathCommand::MoveTo),
            'L' => points.first().copied().map(PathCommand::LineTo),
            'C' => match points.as_slice() {
                [c1, c2, end, ..] => Some(PathCommand::CurveTo(*c1, *c2, *end)),
                _ => None,
            },
            'Z' | 'z' => Some(PathCommand::Close),
            _ => None,
        };

        match command {
            Some(command) => outline.push(command),
            None => tracing::trace!("Skipping path command '{}{}'", letter, operand_text),
        }
    }

    outline
}

/// Command letters are any ASCII letter except `e`/`E`, which only appear
/// as exponent markers inside numbers.
fn is_command_letter(c: char) -> bool {
    c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')
}

/// Split path data into `(command letter, operand text)` tokens.
/// Text before the first command letter is ignored.
fn split_commands(path_data: &str) -> Vec<(char, &str)> {
    let mut tokens = Vec::new();
    let mut current: Option<(char, usize)> = None;

    for (idx, c) in path_data.char_indices() {
        if is_command_letter(c) {
            if let Some((letter, start)) = current.take() {
                tokens.push((letter, &path_data[start..idx]));
            }
            current = Some((c, idx + c.len_utf8()));
        }
    }
    if let Some((letter, start)) = current {
        tokens.push((letter, &path_data[start..]));
    }

    tokens
}

/// Split operand text on whitespace and commas, keeping every field that
/// starts with a number.
fn parse_operands(text: &str) -> Vec<f64> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter_map(parse_leading_float)
        .collect()
}

/// Parse the longest numeric prefix of `field`, ignoring trailing garbage
/// (`"12.5px"` is 12.5, `"abc"` is nothing).
pub(crate) fn parse_leading_float(field: &str) -> Option<f64> {
    let bytes = field.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    field[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASCENDER: f64 = 800.0;

    #[test]
    fn test_command_count_matches_recognized_tokens() {
        let data = "M 10 20 L 30 40 C 1 2 3 4 5 6 L 7 8 Z";
        let outline = transform_svg_path(data, ASCENDER);

        assert_eq!(outline.len(), 5);
        assert!(matches!(outline.commands()[0], PathCommand::MoveTo(_)));
        assert!(matches!(outline.commands()[1], PathCommand::LineTo(_)));
        assert!(matches!(outline.commands()[2], PathCommand::CurveTo(..)));
        assert!(matches!(outline.commands()[3], PathCommand::LineTo(_)));
        assert_eq!(outline.commands()[4], PathCommand::Close);
    }

    #[test]
    fn test_vertical_flip_uses_ascender() {
        let outline = transform_svg_path("M 10 20 L 30 900", ASCENDER);

        assert_eq!(
            outline.commands()[0],
            PathCommand::MoveTo(Point::new(10.0, 780.0))
        );
        assert_eq!(
            outline.commands()[1],
            PathCommand::LineTo(Point::new(30.0, -100.0))
        );
    }

    #[test]
    fn test_flip_is_involutive() {
        let svg_ys = [0.0, 12.5, 800.0, 1234.75, -40.0];
        for y in svg_ys {
            assert_eq!(flip_y(flip_y(y, ASCENDER), ASCENDER), y);
        }

        let outline = transform_svg_path("M 5 123.25", ASCENDER);
        let PathCommand::MoveTo(p) = outline.commands()[0] else {
            panic!("expected a move");
        };
        assert_eq!(flip_y(p.y, ASCENDER), 123.25);
    }

    #[test]
    fn test_curve_points_in_order() {
        let outline = transform_svg_path("M0,0C10,790 20,780 30,770", ASCENDER);
        assert_eq!(
            outline.commands()[1],
            PathCommand::CurveTo(
                Point::new(10.0, 10.0),
                Point::new(20.0, 20.0),
                Point::new(30.0, 30.0)
            )
        );
    }

    #[test]
    fn test_exponent_is_part_of_number() {
        let outline = transform_svg_path("M 1e2 2.5E1 L -3e-1 0", 0.0);
        assert_eq!(outline.len(), 2);
        assert_eq!(
            outline.commands()[0],
            PathCommand::MoveTo(Point::new(100.0, -25.0))
        );
        assert_eq!(
            outline.commands()[1],
            PathCommand::LineTo(Point::new(-0.3, 0.0))
        );
    }

    #[test]
    fn test_lenient_parsing() {
        // relative and unsupported commands are dropped
        let outline = transform_svg_path("M 0 0 l 10 10 H 50 Q 1 2 3 4 L 5 5 z", ASCENDER);
        assert_eq!(outline.len(), 3);

        // operand-less commands other than close are dropped
        let outline = transform_svg_path("M L 1 1 Z", ASCENDER);
        assert_eq!(outline.len(), 2);
        assert!(matches!(outline.commands()[0], PathCommand::LineTo(_)));

        // a curve missing coordinate pairs is dropped
        let outline = transform_svg_path("M 0 0 C 1 2 3 4 Z", ASCENDER);
        assert_eq!(outline.len(), 2);

        // garbage yields an empty outline
        assert!(transform_svg_path("", ASCENDER).is_empty());
        assert!(transform_svg_path("12 34 56", ASCENDER).is_empty());
    }

    #[test]
    fn test_parse_leading_float() {
        assert_eq!(parse_leading_float("12"), Some(12.0));
        assert_eq!(parse_leading_float("-4.5px"), Some(-4.5));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("3."), Some(3.0));
        assert_eq!(parse_leading_float("7e"), Some(7.0));
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float("abc"), None);
    }
}
