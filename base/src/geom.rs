/*!
 * Geometric primitives.
 *
 * Paths and points are publicly imported from tiny-skia-path.
 * [`Xy`] is a double precision point or vector in cartesian space,
 * whereas [`Point`] is a single precision point in pixel space.
 *
 * Y low coordinates are at the top in pixel space.
 */

use std::ops;

pub use tiny_skia_path::{Path, PathBuilder, PathVerb, Point};

/// A point or a vector in cartesian (x, y) space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Xy {
    /// The x coordinate
    pub x: f64,
    /// The y coordinate
    pub y: f64,
}

impl Xy {
    /// The origin
    pub const ZERO: Xy = Xy { x: 0.0, y: 0.0 };

    /// Build a point from its coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Xy { x, y }
    }

    /// Dot product
    pub fn dot(self, other: Xy) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Squared euclidean norm
    pub fn norm_sq(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean norm
    pub fn norm(self) -> f64 {
        self.norm_sq().sqrt()
    }
}

impl From<(f64, f64)> for Xy {
    fn from((x, y): (f64, f64)) -> Self {
        Xy { x, y }
    }
}

impl From<[f64; 2]> for Xy {
    fn from([x, y]: [f64; 2]) -> Self {
        Xy { x, y }
    }
}

impl From<Xy> for [f64; 2] {
    fn from(xy: Xy) -> Self {
        [xy.x, xy.y]
    }
}

impl ops::Add for Xy {
    type Output = Xy;
    fn add(self, rhs: Xy) -> Xy {
        Xy::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl ops::AddAssign for Xy {
    fn add_assign(&mut self, rhs: Xy) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl ops::Sub for Xy {
    type Output = Xy;
    fn sub(self, rhs: Xy) -> Xy {
        Xy::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl ops::SubAssign for Xy {
    fn sub_assign(&mut self, rhs: Xy) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl ops::Mul<f64> for Xy {
    type Output = Xy;
    fn mul(self, rhs: f64) -> Xy {
        Xy::new(self.x * rhs, self.y * rhs)
    }
}

impl ops::Div<f64> for Xy {
    type Output = Xy;
    fn div(self, rhs: f64) -> Xy {
        Xy::new(self.x / rhs, self.y / rhs)
    }
}

impl ops::Neg for Xy {
    type Output = Xy;
    fn neg(self) -> Xy {
        Xy::new(-self.x, -self.y)
    }
}

/// How the first point of a sequence connects to the path being built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// Start a new contour
    Move,
    /// Continue the current contour with a straight line
    Line,
}

/// Append a point sequence to a path builder.
///
/// When `bicubic` is false, the points are joined by straight lines.
/// Otherwise the sequence is made of knots separated by two Bézier control points,
/// (knot, ctrl, ctrl, knot, ctrl, ctrl, knot, ...), and each knot is joined to the
/// next by a cubic curve. Trailing points that do not complete a curve are ignored.
pub fn append_points(pb: &mut PathBuilder, points: &[Point], bicubic: bool, join: Join) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    match join {
        Join::Move => pb.move_to(first.x, first.y),
        Join::Line => pb.line_to(first.x, first.y),
    }
    if bicubic {
        for c in rest.chunks_exact(3) {
            pb.cubic_to(c[0].x, c[0].y, c[1].x, c[1].y, c[2].x, c[2].y);
        }
    } else {
        for p in rest {
            pb.line_to(p.x, p.y);
        }
    }
}
