//! Centripetal Catmull-Rom tangents expressed as cubic Bézier control points.

use plotive_carpet_base::geom::Xy;

/// Parametrization exponent. 0.5 is the centripetal variant,
/// which does not form cusps or self-intersections within a curve segment.
const ALPHA: f64 = 0.5;

/// Bézier control points on both sides of knot `p1`, given its neighbors `p0` and `p2`.
///
/// Returns `(before, after)`: the control point of the curve arriving at `p1` from `p0`,
/// and the control point of the curve leaving `p1` towards `p2`.
/// `smoothness` scales the tangent; 0 gives control points on the knot.
pub fn control_points(p0: Xy, p1: Xy, p2: Xy, smoothness: f64) -> (Xy, Xy) {
    let d1 = p0 - p1;
    let d2 = p2 - p1;
    let d1a = d1.norm_sq().powf(ALPHA / 2.0);
    let d2a = d2.norm_sq().powf(ALPHA / 2.0);

    let num = (d1 * (d2a * d2a) - d2 * (d1a * d1a)) * smoothness;
    let denom1 = d2a * (d1a + d2a) * 3.0;
    let denom2 = d1a * (d1a + d2a) * 3.0;

    let before = if denom1 != 0.0 { p1 + num / denom1 } else { p1 };
    let after = if denom2 != 0.0 { p1 - num / denom2 } else { p1 };
    (before, after)
}

/// Infer the control point next to the end knot `p0` of a curve.
///
/// `p2` is the control point on the other side of the first interior knot `p3`.
/// The end segment is taken as the quadratic curve that shares the tangent at `p3`,
/// elevated to a cubic.
pub fn infer_end_control_point(p0: Xy, p2: Xy, p3: Xy) -> Xy {
    let p2e = p3 * -0.5 + p2 * 1.5;
    (p2e * 2.0 + p0) / 3.0
}
