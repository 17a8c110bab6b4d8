//! Glyph outlines in font design space
//!
//! An outline is the ordered list of drawing commands that make up a glyph's
//! filled shape. Outlines are produced from traced SVG path data by
//! [`path_transform`] and consumed by the glyph builder.

pub mod path_transform;

use kurbo::{BezPath, Rect, Shape};

pub use kurbo::Point;
pub use path_transform::{flip_y, transform_svg_path};

/// A single drawing command in font design units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic Bézier: two control points, then the end point
    CurveTo(Point, Point, Point),
    Close,
}

/// An ordered sequence of path commands. Order is significant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    commands: Vec<PathCommand>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Convert to a kurbo path for geometry queries
    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => path.move_to(p),
                PathCommand::LineTo(p) => path.line_to(p),
                PathCommand::CurveTo(c1, c2, p) => path.curve_to(c1, c2, p),
                PathCommand::Close => path.close_path(),
            }
        }
        path
    }

    /// Bounding box of the drawn geometry, `None` for an empty outline
    pub fn bounding_box(&self) -> Option<Rect> {
        let has_geometry = self
            .commands
            .iter()
            .any(|command| !matches!(command, PathCommand::Close));
        has_geometry.then(|| self.to_bezpath().bounding_box())
    }
}

impl FromIterator<PathCommand> for Outline {
    fn from_iter<I: IntoIterator<Item = PathCommand>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}
