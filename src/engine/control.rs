//! Expansion of a coordinate grid into a grid of Bézier control points.
//!
//! On a smoothed axis, every data cell is split in three: knots (the data points)
//! lie at every third index of the expanded grid, and the two indices between knots
//! hold the control points of the cubic curve joining them.
//! The expanded length of a smoothed axis of `n` values is therefore `3n - 2`.
//!
//! For a 4 x 4 grid smoothed on both axes (`+` are knots, `o` control points):
//!
//! ```text
//!    9 +--o-o--+--o-o--+--o-o--+
//!    8 o  o o  o  o o  o  o o  o
//!    7 o  o o  o  o o  o  o o  o
//!    6 +--o-o--+--o-o--+--o-o--+
//!    5 o  o o  o  o o  o  o o  o
//! ^  4 o  o o  o  o o  o  o o  o
//! |  3 +--o-o--+--o-o--+--o-o--+
//! b  2 o  o o  o  o o  o  o o  o
//!    1 o  o o  o  o o  o  o o  o
//!    0 +--o-o--+--o-o--+--o-o--+
//!      0  1 2  3  4 5  6  7 8  9   a ->
//! ```
//!
//! Control points are computed in cartesian space.

use plotive_carpet_base::geom::Xy;

use super::Smoothing;
use super::catmull_rom::{control_points, infer_end_control_point};
use crate::data::Grid;

/// The x and y control point grids of a carpet, always built together
#[derive(Debug, Clone, PartialEq)]
pub struct ControlGrid {
    x: Grid<f64>,
    y: Grid<f64>,
}

impl ControlGrid {
    /// Compute the control grids of the dense coordinate grids `x` and `y`.
    ///
    /// Smoothing must be [`Smoothing::Linear`] on any axis shorter than 3 values.
    pub fn compute(
        x: &Grid<f64>,
        y: &Grid<f64>,
        a_smoothing: Smoothing,
        b_smoothing: Smoothing,
    ) -> Self {
        let na = x.na();
        let nb = x.nb();
        debug_assert_eq!((na, nb), (y.na(), y.nb()));

        let sa = a_smoothing.stride();
        let sb = b_smoothing.stride();
        let nea = a_smoothing.expanded_len(na);
        let neb = b_smoothing.expanded_len(nb);

        let mut ctrl = ControlGrid {
            x: Grid::filled(nea, neb, 0.0),
            y: Grid::filled(nea, neb, 0.0),
        };

        for j in 0..nb {
            for i in 0..na {
                ctrl.set(j * sb, i * sa, Xy::new(x[(j, i)], y[(j, i)]));
            }
        }

        if let Smoothing::CatmullRom(f) = a_smoothing {
            let f = f.get();
            for j in 0..nb {
                let je = j * sb;
                for i in 1..na - 1 {
                    let ie = 3 * i;
                    let (c0, c1) = control_points(
                        Xy::new(x[(j, i - 1)], y[(j, i - 1)]),
                        Xy::new(x[(j, i)], y[(j, i)]),
                        Xy::new(x[(j, i + 1)], y[(j, i + 1)]),
                        f,
                    );
                    ctrl.set(je, ie - 1, c0);
                    ctrl.set(je, ie + 1, c1);
                }
                let (p1, p2) = ctrl.end_control_points_along_a(je);
                ctrl.set(je, 1, p1);
                ctrl.set(je, nea - 2, p2);
            }
        }

        if let Smoothing::CatmullRom(f) = b_smoothing {
            let f = f.get();
            // every column, so that the control points along a get their b tangents too
            for ie in 0..nea {
                for je in (3..neb - 3).step_by(3) {
                    let (c0, c1) = control_points(
                        ctrl.point(je - 3, ie),
                        ctrl.point(je, ie),
                        ctrl.point(je + 3, ie),
                        f,
                    );
                    ctrl.set(je - 1, ie, c0);
                    ctrl.set(je + 1, ie, c1);
                }
                let p1 = infer_end_control_point(
                    ctrl.point(0, ie),
                    ctrl.point(2, ie),
                    ctrl.point(3, ie),
                );
                let p2 = infer_end_control_point(
                    ctrl.point(neb - 1, ie),
                    ctrl.point(neb - 3, ie),
                    ctrl.point(neb - 4, ie),
                );
                ctrl.set(1, ie, p1);
                ctrl.set(neb - 2, ie, p2);
            }

            // Rows between knot rows got their points from b tangents only.
            // They are blended with the estimate computed along a.
            if let Smoothing::CatmullRom(fa) = a_smoothing {
                let fa = fa.get();
                for je in (1..neb).filter(|je| je % 3 != 0) {
                    for ie in (3..nea - 3).step_by(3) {
                        let (c0, c1) = control_points(
                            ctrl.point(je, ie - 3),
                            ctrl.point(je, ie),
                            ctrl.point(je, ie + 3),
                            fa,
                        );
                        ctrl.blend(je, ie - 1, c0);
                        ctrl.blend(je, ie + 1, c1);
                    }
                    let (p1, p2) = ctrl.end_control_points_along_a(je);
                    ctrl.blend(je, 1, p1);
                    ctrl.blend(je, nea - 2, p2);
                }
            }
        }

        ctrl
    }

    /// The x control grid
    pub fn x(&self) -> &Grid<f64> {
        &self.x
    }

    /// The y control grid
    pub fn y(&self) -> &Grid<f64> {
        &self.y
    }

    /// Expanded length along a
    pub fn nea(&self) -> usize {
        self.x.na()
    }

    /// Expanded length along b
    pub fn neb(&self) -> usize {
        self.x.nb()
    }

    /// Control point at expanded row `je` and column `ie`
    pub fn point(&self, je: usize, ie: usize) -> Xy {
        Xy::new(self.x[(je, ie)], self.y[(je, ie)])
    }

    fn set(&mut self, je: usize, ie: usize, p: Xy) {
        self.x[(je, ie)] = p.x;
        self.y[(je, ie)] = p.y;
    }

    fn blend(&mut self, je: usize, ie: usize, p: Xy) {
        let cur = self.point(je, ie);
        self.set(je, ie, (cur + p) * 0.5);
    }

    /// The control points next to both ends of expanded row `je`
    fn end_control_points_along_a(&self, je: usize) -> (Xy, Xy) {
        let nea = self.nea();
        let p1 = infer_end_control_point(
            self.point(je, 0),
            self.point(je, 2),
            self.point(je, 3),
        );
        let p2 = infer_end_control_point(
            self.point(je, nea - 1),
            self.point(je, nea - 3),
            self.point(je, nea - 4),
        );
        (p1, p2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{Near, assert_near};

    fn smooth() -> Smoothing {
        Smoothing::from_factor(1.0).unwrap()
    }

    fn grid3x3() -> (Grid<f64>, Grid<f64>) {
        let x = Grid::from_fn(3, 3, |j, i| i as f64 + 0.3 * (j * j) as f64);
        let y = Grid::from_fn(3, 3, |j, i| j as f64 * 2.0 + 0.1 * (i * i) as f64);
        (x, y)
    }

    #[test]
    fn linear_is_identity() {
        let (x, y) = grid3x3();
        let ctrl = ControlGrid::compute(&x, &y, Smoothing::Linear, Smoothing::Linear);
        assert_eq!(ctrl.x(), &x);
        assert_eq!(ctrl.y(), &y);
    }

    #[test]
    fn a_smoothing_expands_columns() {
        let (x, y) = grid3x3();
        let ctrl = ControlGrid::compute(&x, &y, smooth(), Smoothing::Linear);
        assert_eq!(ctrl.nea(), 7);
        assert_eq!(ctrl.neb(), 3);
        for j in 0..3 {
            for i in 0..3 {
                assert_eq!(ctrl.x()[(j, 3 * i)], x[(j, i)]);
                assert_eq!(ctrl.y()[(j, 3 * i)], y[(j, i)]);
            }
        }
    }

    #[test]
    fn both_smoothed_knots_are_kept() {
        let x = Grid::from_fn(4, 3, |j, i| (i as f64).powi(2) * 0.5 + j as f64);
        let y = Grid::from_fn(4, 3, |j, i| (j as f64 * 1.5).sin() + i as f64);
        let ctrl = ControlGrid::compute(&x, &y, smooth(), smooth());
        assert_eq!(ctrl.nea(), 10);
        assert_eq!(ctrl.neb(), 7);
        for j in 0..3 {
            for i in 0..4 {
                assert_eq!(ctrl.point(3 * j, 3 * i), Xy::new(x[(j, i)], y[(j, i)]));
            }
        }
        assert!(ctrl.x().values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn straight_rows_stay_straight() {
        // evenly spaced straight grid: control points are at thirds
        let x = Grid::from_fn(3, 3, |_, i| i as f64);
        let y = Grid::from_fn(3, 3, |j, _| j as f64);
        let ctrl = ControlGrid::compute(&x, &y, smooth(), smooth());
        for je in 0..7 {
            for ie in 0..7 {
                let p = ctrl.point(je, ie);
                assert_near!(abs, p.x, ie as f64 / 3.0);
                assert_near!(abs, p.y, je as f64 / 3.0);
            }
        }
    }
}
