//! Lines of constant value between two values of the other axis.
//!
//! Plots drawn over a carpet, such as contours, use these lines to follow
//! the carpet boundaries in axis space.

use plotive_carpet_base::geom::Xy;

use crate::engine::{AxisLetter, CellPos, CoordinateEngine};
use crate::path::Curve;

/// Line running along axis `letter` from value `range.0` to `range.1`,
/// at the constant value `iso` of the other axis.
///
/// The line is split on every data point it crosses. When axis `letter` is smoothed,
/// each piece is a cubic curve whose control points follow the carpet tangents,
/// otherwise pieces are straight. Both directions are supported.
pub fn axis_aligned_line(
    engine: &CoordinateEngine,
    letter: AxisLetter,
    iso: f64,
    range: (f64, f64),
) -> Curve {
    let smooth = engine.smoothing(letter).is_smooth();
    let n = engine.axis(letter).len();
    let m = engine.axis(letter.other()).len();

    let (to_idx, iso_idx) = match letter {
        AxisLetter::A => (engine.a2i(range.0), engine.b2j(iso)),
        AxisLetter::B => (engine.b2j(range.0), engine.a2i(iso)),
    };
    let vstart = to_idx;
    let vend = match letter {
        AxisLetter::A => engine.a2i(range.1),
        AxisLetter::B => engine.b2j(range.1),
    };
    let iso_cell = CellPos::of(iso_idx, m);

    let xy = |v: f64| match letter {
        AxisLetter::A => engine.evalxy(v, iso_idx),
        AxisLetter::B => engine.evalxy(iso_idx, v),
    };
    let tangent = |k0: usize, t: f64| match letter {
        AxisLetter::A => engine.dxydi(k0, iso_cell.cell, t, iso_cell.t),
        AxisLetter::B => engine.dxydj(iso_cell.cell, k0, iso_cell.t, t),
    };

    let mut curve = Curve::new(smooth);
    let mut p0 = xy(vstart);
    curve.push(p0);
    if vstart == vend {
        return curve;
    }

    let dir = if vstart < vend { 1.0 } else { -1.0 };
    let tol = (vend - vstart) * 1e-8;
    let (idx0, idx1) = if dir > 0.0 {
        ((vstart + tol).floor(), (vend - tol).ceil())
    } else {
        ((vstart + tol).ceil(), (vend - tol).floor())
    };

    let mut idx = idx0;
    while idx * dir < idx1 * dir {
        let (start, end) = if dir > 0.0 {
            (vstart.max(idx), vend.min(idx + dir))
        } else {
            (vstart.min(idx), vend.max(idx + dir))
        };
        let span = end - start;
        // derivatives differ across data points: pick the cell of the piece middle
        let cell = (0.5 * (start + end)).floor().clamp(0.0, (n - 2) as f64);
        let p1 = xy(end);
        if smooth {
            let v0: Xy = tangent(cell as usize, start - cell);
            let v1: Xy = tangent(cell as usize, end - cell);
            curve.push(p0 + v0 * (span / 3.0));
            curve.push(p1 - v1 * (span / 3.0));
        }
        curve.push(p1);
        p0 = p1;
        idx += dir;
    }
    curve
}
