//! Point sequences in cartesian space and their conversion to surface paths.

use plotive_carpet_base::geom::{self, Join, Path, PathBuilder, Point, Xy};

use crate::scale::CoordMapXy;

/// A sequence of cartesian points.
///
/// When `bicubic` is set, every third point is a knot and the two points between
/// knots are the Bézier control points of the cubic curve joining them.
/// Otherwise the points are joined by straight lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
    /// The x coordinates
    pub x: Vec<f64>,
    /// The y coordinates
    pub y: Vec<f64>,
    /// Whether the points describe cubic curves
    pub bicubic: bool,
}

impl Curve {
    /// An empty curve
    pub fn new(bicubic: bool) -> Self {
        Curve {
            x: Vec::new(),
            y: Vec::new(),
            bicubic,
        }
    }

    /// An empty curve with room for `cap` points
    pub fn with_capacity(cap: usize, bicubic: bool) -> Self {
        Curve {
            x: Vec::with_capacity(cap),
            y: Vec::with_capacity(cap),
            bicubic,
        }
    }

    /// Number of points, control points included
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the curve has no point
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Append a point
    pub fn push(&mut self, p: Xy) {
        self.x.push(p.x);
        self.y.push(p.y);
    }

    /// The point at index `idx`
    pub fn point(&self, idx: usize) -> Xy {
        Xy::new(self.x[idx], self.y[idx])
    }

    /// Iterator over the points, control points included
    pub fn points(&self) -> impl Iterator<Item = Xy> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| Xy::new(x, y))
    }

    /// Iterator over the knots only
    pub fn knots(&self) -> impl Iterator<Item = Xy> + '_ {
        let stride = if self.bicubic { 3 } else { 1 };
        self.points().step_by(stride)
    }

    /// The same curve traversed backwards
    pub fn reversed(&self) -> Curve {
        Curve {
            x: self.x.iter().rev().copied().collect(),
            y: self.y.iter().rev().copied().collect(),
            bicubic: self.bicubic,
        }
    }

    /// Map the points to the surface
    pub fn to_surface(&self, map: &CoordMapXy<'_>) -> Vec<Point> {
        self.points().map(|p| map.c2p(p)).collect()
    }

    /// Append the curve to a path builder, mapping its points to the surface
    pub fn append_to(&self, pb: &mut PathBuilder, map: &CoordMapXy<'_>, join: Join) {
        geom::append_points(pb, &self.to_surface(map), self.bicubic, join);
    }

    /// Build an open surface path from the curve.
    /// Returns `None` if the curve has less than two points.
    pub fn to_path(&self, map: &CoordMapXy<'_>) -> Option<Path> {
        let mut pb = PathBuilder::new();
        self.append_to(&mut pb, map, Join::Move);
        pb.finish()
    }
}

/// Build a closed surface path joining `curves` end to end with straight lines
pub fn closed_path<'c, I>(curves: I, map: &CoordMapXy<'_>) -> Option<Path>
where
    I: IntoIterator<Item = &'c Curve>,
{
    let mut pb = PathBuilder::new();
    for (idx, c) in curves.into_iter().enumerate() {
        let join = if idx == 0 { Join::Move } else { Join::Line };
        c.append_to(&mut pb, map, join);
    }
    pb.close();
    pb.finish()
}
