//! Built-in tracer on top of `contour-isobands`
//!
//! The ink mask becomes a grid of 0/1 samples, one per pixel center, padded
//! with a ring of background so every shape closes. The isoband between 0.5
//! and 1.5 is exactly the ink: its edges fall on pixel boundaries, with
//! outside corners cut at 45 degrees. Outer rings are oriented clockwise on
//! screen and holes counter-clockwise before being written out.

use contour_isobands::ContourBuilder;

use super::{TraceError, TracedSvg, Tracer};
use crate::raster::Bitmap;

type Vertex = (f64, f64);

/// Isoband bounds selecting the ink samples
const INK_BAND: [f64; 2] = [0.5, 1.5];

#[derive(Debug, Clone)]
pub struct EdgeTracer {
    /// Contours enclosing this many pixels or fewer are dropped as speckles
    pub turd_size: u32,
    /// Round polygon corners into cubic curves
    pub smooth: bool,
}

impl Default for EdgeTracer {
    fn default() -> Self {
        Self {
            turd_size: 2,
            smooth: false,
        }
    }
}

impl EdgeTracer {
    pub fn new(turd_size: u32, smooth: bool) -> Self {
        Self { turd_size, smooth }
    }

    /// Outer rings and their holes, in pixel units, speckles removed
    fn contours(&self, bitmap: &Bitmap) -> Result<Vec<Vec<Vertex>>, TraceError> {
        let turd_size = self.turd_size as f64;
        let mut contours = Vec::new();

        for polygon in ink_polygons(bitmap)? {
            let Some(exterior) = oriented(&polygon.exterior, true) else {
                continue;
            };
            if signed_area(&exterior).abs() <= turd_size {
                continue;
            }
            contours.push(exterior);
            contours.extend(
                polygon
                    .interiors
                    .iter()
                    .filter_map(|ring| oriented(ring, false))
                    .filter(|ring| signed_area(ring).abs() > turd_size),
            );
        }
        Ok(contours)
    }
}

impl Tracer for EdgeTracer {
    fn trace(&self, bitmap: &Bitmap, scale: f64) -> Result<TracedSvg, TraceError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(TraceError::InvalidScale(scale));
        }

        let contours = self.contours(bitmap)?;
        let path_data = contours
            .iter()
            .map(|contour| {
                if self.smooth {
                    smooth_contour_data(contour, scale)
                } else {
                    polygon_contour_data(contour, scale)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        tracing::debug!(
            "Traced {}x{} bitmap into {} contours",
            bitmap.width(),
            bitmap.height(),
            contours.len()
        );

        let width = format_coord(bitmap.width() as f64 * scale);
        let height = format_coord(bitmap.height() as f64 * scale);
        Ok(TracedSvg::new(format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\
             <path d=\"{path_data}\" stroke=\"none\" fill=\"black\" fill-rule=\"evenodd\"/></svg>"
        )))
    }
}

/// One filled region: an outer ring and the holes cut out of it
#[derive(Debug, Clone, Default)]
struct InkPolygon {
    exterior: Vec<Vertex>,
    interiors: Vec<Vec<Vertex>>,
}

/// Run the isoband extraction over the padded ink grid and move the rings
/// into pixel coordinates
fn ink_polygons(bitmap: &Bitmap) -> Result<Vec<InkPolygon>, TraceError> {
    let grid_width = bitmap.width() as usize + 2;
    let grid_height = bitmap.height() as usize + 2;
    let mut values = Vec::with_capacity(grid_width * grid_height);
    for row in 0..grid_height as i64 {
        for col in 0..grid_width as i64 {
            let ink = bitmap.is_ink(col - 1, row - 1);
            values.push(if ink { 1.0 } else { 0.0 });
        }
    }

    let bands = ContourBuilder::new(grid_width, grid_height)
        .use_quad_tree(false)
        .contours(&values, &INK_BAND)
        .map_err(|error| TraceError::Contour(error.to_string()))?;

    // grid node (i, j) sits at the center of pixel (i - 1, j - 1)
    let to_pixels = |ring: &[(f64, f64)]| -> Vec<Vertex> {
        ring.iter().map(|&(x, y)| (x - 0.5, y - 0.5)).collect()
    };
    let ring_points = |ring: &geo_types::LineString<f64>| -> Vec<(f64, f64)> {
        ring.0.iter().map(|coord| (coord.x, coord.y)).collect()
    };

    Ok(bands
        .iter()
        .flat_map(|band| band.geometry().0.iter())
        .map(|polygon| InkPolygon {
            exterior: to_pixels(&ring_points(polygon.exterior())),
            interiors: polygon
                .interiors()
                .iter()
                .map(|ring| to_pixels(&ring_points(ring)))
                .collect(),
        })
        .collect())
}

/// Open the ring, merge collinear runs, and wind it clockwise on screen when
/// `clockwise` is set, counter-clockwise otherwise. Degenerate rings give
/// `None`.
fn oriented(ring: &[Vertex], clockwise: bool) -> Option<Vec<Vertex>> {
    let mut vertices = ring.to_vec();
    vertices.dedup();
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    let mut vertices = merge_collinear(&vertices);
    if vertices.len() < 3 {
        return None;
    }
    let area = signed_area(&vertices);
    if area == 0.0 {
        return None;
    }
    if (area > 0.0) != clockwise {
        vertices.reverse();
    }
    Some(vertices)
}

/// Drop vertices that sit in the middle of a straight run
fn merge_collinear(vertices: &[Vertex]) -> Vec<Vertex> {
    let n = vertices.len();
    if n < 3 {
        return vertices.to_vec();
    }
    (0..n)
        .filter(|&i| {
            let (px, py) = vertices[(i + n - 1) % n];
            let (hx, hy) = vertices[i];
            let (nx, ny) = vertices[(i + 1) % n];
            let cross = (hx - px) * (ny - hy) - (hy - py) * (nx - hx);
            cross.abs() > 1e-9
        })
        .map(|i| vertices[i])
        .collect()
}

/// Shoelace area; positive for clockwise contours in screen space
fn signed_area(vertices: &[Vertex]) -> f64 {
    let n = vertices.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let (x0, y0) = vertices[i];
            let (x1, y1) = vertices[(i + 1) % n];
            x0 * y1 - x1 * y0
        })
        .sum();
    twice / 2.0
}

fn polygon_contour_data(vertices: &[Vertex], scale: f64) -> String {
    let mut data = String::new();
    for (idx, &(x, y)) in vertices.iter().enumerate() {
        let command = if idx == 0 { 'M' } else { 'L' };
        data.push_str(&format!(
            "{command} {} {} ",
            format_coord(x * scale),
            format_coord(y * scale)
        ));
    }
    data.push('Z');
    data
}

/// Replace each corner with a cubic running from the midpoint of the
/// incoming side to the midpoint of the outgoing side
fn smooth_contour_data(vertices: &[Vertex], scale: f64) -> String {
    let n = vertices.len();
    let point = |v: Vertex| (v.0 * scale, v.1 * scale);
    let midpoint = |i: usize| {
        let (ax, ay) = point(vertices[i % n]);
        let (bx, by) = point(vertices[(i + 1) % n]);
        ((ax + bx) / 2.0, (ay + by) / 2.0)
    };
    let toward = |from: (f64, f64), to: (f64, f64)| {
        (
            from.0 + (to.0 - from.0) * 2.0 / 3.0,
            from.1 + (to.1 - from.1) * 2.0 / 3.0,
        )
    };

    let start = midpoint(n - 1);
    let mut data = format!("M {} {} ", format_coord(start.0), format_coord(start.1));
    let mut previous = start;
    for i in 0..n {
        let corner = point(vertices[i]);
        let end = midpoint(i);
        let c1 = toward(previous, corner);
        let c2 = toward(end, corner);
        data.push_str(&format!(
            "C {} {} {} {} {} {} ",
            format_coord(c1.0),
            format_coord(c1.1),
            format_coord(c2.0),
            format_coord(c2.1),
            format_coord(end.0),
            format_coord(end.1)
        ));
        previous = end;
    }
    data.push('Z');
    data
}

/// Three decimals at most, no trailing zeros
fn format_coord(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{transform_svg_path, Outline, PathCommand};

    /// Path of a traced document, y negated
    fn traced_outline(svg: &TracedSvg) -> Outline {
        transform_svg_path(&svg.outline().unwrap().path_data, 0.0)
    }

    /// Bounds back in screen coordinates: (min x, min y, max x, max y)
    fn screen_bounds(outline: &Outline) -> (f64, f64, f64, f64) {
        let bbox = outline.bounding_box().unwrap();
        (bbox.min_x(), -bbox.max_y(), bbox.max_x(), -bbox.min_y())
    }

    #[test]
    fn test_square_follows_pixel_boundaries() {
        let bitmap = Bitmap::from_rows(&["###", "###", "###"]);
        let contours = EdgeTracer::new(0, false).contours(&bitmap).unwrap();

        assert_eq!(contours.len(), 1);
        // four sides plus four cut corners
        assert_eq!(contours[0].len(), 8);
        assert_eq!(signed_area(&contours[0]), 8.5);
        for &(x, y) in &contours[0] {
            assert!((0.0..=3.0).contains(&x) && (0.0..=3.0).contains(&y));
        }
    }

    #[test]
    fn test_hole_winds_opposite() {
        let bitmap = Bitmap::from_rows(&["#####", "#...#", "#...#", "#...#", "#####"]);
        let contours = EdgeTracer::new(0, false).contours(&bitmap).unwrap();

        assert_eq!(contours.len(), 2);
        assert!(signed_area(&contours[0]) > 0.0);
        assert!(signed_area(&contours[1]) < 0.0);
    }

    #[test]
    fn test_speckles_are_dropped() {
        let tracer = EdgeTracer::new(2, false);
        let svg = tracer
            .trace(&Bitmap::from_rows(&["#....", ".....", "..###", "..###"]), 1.0)
            .unwrap();
        let outline = traced_outline(&svg);

        // only the 3x2 block survives
        let moves = outline
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count();
        assert_eq!(moves, 1);
        assert_eq!(screen_bounds(&outline), (2.0, 2.0, 5.0, 4.0));
    }

    #[test]
    fn test_document_shape_and_scale() {
        let bitmap = Bitmap::from_rows(&["##", "##", "..", ".."]);
        let svg = EdgeTracer::new(0, false).trace(&bitmap, 250.0).unwrap();
        let outline = svg.outline().unwrap();

        assert_eq!(outline.view_box.as_deref(), Some("0 0 500 1000"));
        assert_eq!(outline.width.as_deref(), Some("500"));
        assert_eq!(
            screen_bounds(&traced_outline(&svg)),
            (0.0, 0.0, 500.0, 500.0)
        );
    }

    #[test]
    fn test_blank_bitmap_still_has_path() {
        let svg = EdgeTracer::default().trace(&Bitmap::new(3, 3), 1.0).unwrap();
        let outline = svg.outline().expect("path element is always emitted");
        assert!(outline.path_data.is_empty());
    }

    #[test]
    fn test_smooth_emits_curves() {
        let bitmap = Bitmap::from_rows(&["####", "####", "####", "####"]);
        let svg = EdgeTracer::new(0, true).trace(&bitmap, 1.0).unwrap();
        let outline = traced_outline(&svg);

        let curves = outline
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCommand::CurveTo(..)))
            .count();
        assert!(curves >= 4);
        assert_eq!(outline.commands().last(), Some(&PathCommand::Close));
    }

    #[test]
    fn test_orientation_is_normalized() {
        let counter_clockwise = vec![(0.0, 0.0), (0.0, 2.0), (1.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)];

        let outer = oriented(&counter_clockwise, true).unwrap();
        assert_eq!(outer.len(), 4);
        assert_eq!(signed_area(&outer), 4.0);

        let hole = oriented(&outer, false).unwrap();
        assert_eq!(signed_area(&hole), -4.0);

        assert!(oriented(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)], true).is_none());
    }

    #[test]
    fn test_rejects_bad_scale() {
        let bitmap = Bitmap::new(1, 1);
        let tracer = EdgeTracer::default();
        assert!(matches!(
            tracer.trace(&bitmap, 0.0),
            Err(TraceError::InvalidScale(_))
        ));
        assert!(tracer.trace(&bitmap, f64::NAN).is_err());
    }

    #[test]
    fn test_format_coord() {
        assert_eq!(format_coord(500.0), "500");
        assert_eq!(format_coord(312.5), "312.5");
        assert_eq!(format_coord(1.0 / 3.0), "0.333");
        assert_eq!(format_coord(-0.0001), "0");
        assert_eq!(format_coord(0.0), "0");
    }
}
