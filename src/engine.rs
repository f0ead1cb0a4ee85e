/*!
 * The carpet coordinate engine.
 *
 * Four coordinate systems are involved:
 *  - `i`, `j`: fractional grid indices along a and b. Integer values are data points.
 *  - `a`, `b`: axis values, interpolated linearly between data points.
 *  - `x`, `y`: cartesian coordinates, interpolated over the control grid,
 *    either linearly or by cubic Bézier curves along each axis.
 *  - `p`: surface pixels, through a [`CoordMapXy`].
 *
 * [`CoordinateEngine`] owns the axis values, the dense coordinate grids and their
 * control grids, and converts between all these systems.
 */
use std::fmt;

use plotive_carpet_base::geom::{Point, Xy};
use strict_num::NonZeroPositiveF64;

use crate::data::{Grid, NumBounds};
use crate::scale::CoordMapXy;
use crate::search::find_bin;

pub mod catmull_rom;
pub mod control;
pub mod spline;

pub use control::ControlGrid;
pub use spline::{DerivativeEvaluator, Interpolation, SplineEvaluator};

/// Relative tolerance of the visibility tests, in proportion of the axis range
const VISIBILITY_TOLERANCE: f64 = 1e-6;

/// Default step of the rough derivatives, in proportion of the axis range
const ROUGH_DERIVATIVE_STEP: f64 = 0.1;

/// One of the two carpet axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisLetter {
    /// The a axis, along grid columns
    A,
    /// The b axis, along grid rows
    B,
}

impl AxisLetter {
    /// The crossing axis
    pub fn other(self) -> AxisLetter {
        match self {
            AxisLetter::A => AxisLetter::B,
            AxisLetter::B => AxisLetter::A,
        }
    }
}

impl fmt::Display for AxisLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisLetter::A => f.write_str("a"),
            AxisLetter::B => f.write_str("b"),
        }
    }
}

/// Interpolation of the cartesian coordinates along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Smoothing {
    /// Straight segments between data points
    Linear,
    /// Centripetal Catmull-Rom spline, with the given tangent factor
    CatmullRom(NonZeroPositiveF64),
}

impl Smoothing {
    /// Smoothing from a factor. 0 is linear, any positive finite factor is a spline.
    /// Returns `None` for negative or non-finite factors.
    pub fn from_factor(factor: f64) -> Option<Self> {
        if factor == 0.0 {
            Some(Smoothing::Linear)
        } else {
            NonZeroPositiveF64::new(factor).map(Smoothing::CatmullRom)
        }
    }

    /// The tangent factor, 0 if linear
    pub fn factor(&self) -> f64 {
        match self {
            Smoothing::Linear => 0.0,
            Smoothing::CatmullRom(f) => f.get(),
        }
    }

    /// Whether this is a spline
    pub fn is_smooth(&self) -> bool {
        matches!(self, Smoothing::CatmullRom(_))
    }

    /// Distance between two data points in the control grid
    pub fn stride(&self) -> usize {
        if self.is_smooth() { 3 } else { 1 }
    }

    /// Length of the control grid along an axis of `n` data points
    pub fn expanded_len(&self, n: usize) -> usize {
        if self.is_smooth() { 3 * n - 2 } else { n }
    }

    /// The smoothing that applies to an axis of `n` data points.
    /// A spline needs at least 3 points.
    pub fn effective(self, n: usize) -> Self {
        if n < 3 { Smoothing::Linear } else { self }
    }
}

/// Cell index and in-cell parameter of a fractional index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPos {
    /// The cell index, lower than the number of values minus 1
    pub cell: usize,
    /// The parameter within the cell, normally in `[0, 1]`
    pub t: f64,
}

impl CellPos {
    /// Cell containing fractional index `idx` along an axis of `n` values.
    /// The cell is clamped to the axis, but not the parameter.
    pub fn of(idx: f64, n: usize) -> Self {
        let last = n.saturating_sub(2) as f64;
        let c = idx.floor().clamp(0.0, last);
        CellPos {
            cell: c as usize,
            t: idx - c,
        }
    }

    /// The fractional index
    pub fn index(&self) -> f64 {
        self.cell as f64 + self.t
    }
}

/// Range tests and extrapolation of one axis
#[derive(Debug, Clone, Copy, PartialEq)]
enum Overshoot {
    Before,
    Within,
    After,
}

fn overshoot(vals: &[f64], v: f64) -> Overshoot {
    let first = vals[0];
    let last = vals[vals.len() - 1];
    let dir = last - first;
    if (v - first) * dir < 0.0 {
        Overshoot::Before
    } else if (v - last) * dir > 0.0 {
        Overshoot::After
    } else {
        Overshoot::Within
    }
}

fn lerp_axis(vals: &[f64], idx: f64) -> f64 {
    let CellPos { cell, t } = CellPos::of(idx, vals.len());
    (1.0 - t) * vals[cell] + t * vals[cell + 1]
}

fn axis_index(vals: &[f64], v: f64) -> f64 {
    let n = vals.len();
    let i0 = find_bin(v, vals.into(), false).clamp(0, n as isize - 2) as usize;
    let v0 = vals[i0];
    let v1 = vals[i0 + 1];
    (i0 as f64 + (v - v0) / (v1 - v0)).clamp(0.0, (n - 1) as f64)
}

/// The carpet coordinate engine.
///
/// Built from monotonic axis values (at least 2 each) and dense coordinate grids of
/// `b.len()` rows by `a.len()` columns. The engine trusts its inputs:
/// validation is the job of the calc step.
#[derive(Debug, Clone)]
pub struct CoordinateEngine {
    a: Vec<f64>,
    b: Vec<f64>,
    x: Grid<f64>,
    y: Grid<f64>,
    a_smoothing: Smoothing,
    b_smoothing: Smoothing,
    ctrl: ControlGrid,
    evalxy: SplineEvaluator,
    dxydi: DerivativeEvaluator,
    dxydj: DerivativeEvaluator,
    a_bounds: NumBounds,
    b_bounds: NumBounds,
}

impl CoordinateEngine {
    /// Build the engine and compute its control grids.
    ///
    /// Smoothing is disabled on axes of less than 3 values.
    ///
    /// # Panics
    /// If an axis has less than 2 values, or if the grids do not match the axes.
    pub fn new(
        a: Vec<f64>,
        b: Vec<f64>,
        x: Grid<f64>,
        y: Grid<f64>,
        a_smoothing: Smoothing,
        b_smoothing: Smoothing,
    ) -> Self {
        assert!(a.len() >= 2 && b.len() >= 2, "carpet axes need 2 values");
        assert_eq!((x.na(), x.nb()), (a.len(), b.len()), "x grid shape");
        assert_eq!((y.na(), y.nb()), (a.len(), b.len()), "y grid shape");

        let a_smoothing = a_smoothing.effective(a.len());
        let b_smoothing = b_smoothing.effective(b.len());
        let a_bounds = NumBounds::from((a[0], a[a.len() - 1]));
        let b_bounds = NumBounds::from((b[0], b[b.len() - 1]));
        let interp = Interpolation::new(a_smoothing.is_smooth(), b_smoothing.is_smooth());
        let ctrl = ControlGrid::compute(&x, &y, a_smoothing, b_smoothing);

        CoordinateEngine {
            evalxy: SplineEvaluator::new(interp, a.len(), b.len()),
            dxydi: DerivativeEvaluator::along_i(interp),
            dxydj: DerivativeEvaluator::along_j(interp),
            a,
            b,
            x,
            y,
            a_smoothing,
            b_smoothing,
            ctrl,
            a_bounds,
            b_bounds,
        }
    }

    /// Rebuild the control grids and evaluators from the current data
    pub fn set_scale(&mut self) {
        let interp = Interpolation::new(self.a_smoothing.is_smooth(), self.b_smoothing.is_smooth());
        self.ctrl = ControlGrid::compute(&self.x, &self.y, self.a_smoothing, self.b_smoothing);
        self.evalxy = SplineEvaluator::new(interp, self.na(), self.nb());
        self.dxydi = DerivativeEvaluator::along_i(interp);
        self.dxydj = DerivativeEvaluator::along_j(interp);
        log::trace!(
            "carpet control grid rebuilt: {}x{} ({:?})",
            self.ctrl.nea(),
            self.ctrl.neb(),
            interp
        );
    }

    /// Replace the coordinate grids and rebuild the control grids.
    ///
    /// # Panics
    /// If the grids do not match the axes.
    pub fn update_xy(&mut self, x: Grid<f64>, y: Grid<f64>) {
        assert_eq!((x.na(), x.nb()), (self.na(), self.nb()), "x grid shape");
        assert_eq!((y.na(), y.nb()), (self.na(), self.nb()), "y grid shape");
        self.x = x;
        self.y = y;
        self.set_scale();
    }

    /// The a axis values
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// The b axis values
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// The values of axis `letter`
    pub fn axis(&self, letter: AxisLetter) -> &[f64] {
        match letter {
            AxisLetter::A => &self.a,
            AxisLetter::B => &self.b,
        }
    }

    /// Number of a values
    pub fn na(&self) -> usize {
        self.a.len()
    }

    /// Number of b values
    pub fn nb(&self) -> usize {
        self.b.len()
    }

    /// The dense x grid
    pub fn x(&self) -> &Grid<f64> {
        &self.x
    }

    /// The dense y grid
    pub fn y(&self) -> &Grid<f64> {
        &self.y
    }

    /// The control grids
    pub fn ctrl(&self) -> &ControlGrid {
        &self.ctrl
    }

    /// Effective smoothing along a
    pub fn a_smoothing(&self) -> Smoothing {
        self.a_smoothing
    }

    /// Effective smoothing along b
    pub fn b_smoothing(&self) -> Smoothing {
        self.b_smoothing
    }

    /// Effective smoothing along axis `letter`
    pub fn smoothing(&self, letter: AxisLetter) -> Smoothing {
        match letter {
            AxisLetter::A => self.a_smoothing,
            AxisLetter::B => self.b_smoothing,
        }
    }

    /// Bounds of the a values
    pub fn a_bounds(&self) -> NumBounds {
        self.a_bounds
    }

    /// Bounds of the b values
    pub fn b_bounds(&self) -> NumBounds {
        self.b_bounds
    }

    /// Axis value `a` at fractional index `i`.
    /// Always linear, and extrapolated from the end cells out of the grid.
    pub fn i2a(&self, i: f64) -> f64 {
        lerp_axis(&self.a, i)
    }

    /// Axis value `b` at fractional index `j`
    pub fn j2b(&self, j: f64) -> f64 {
        lerp_axis(&self.b, j)
    }

    /// Axis values at fractional indices `(i, j)`
    pub fn ij2ab(&self, (i, j): (f64, f64)) -> (f64, f64) {
        (self.i2a(i), self.j2b(j))
    }

    /// Fractional index of axis value `a`, clamped to `[0, na - 1]`
    pub fn a2i(&self, a: f64) -> f64 {
        axis_index(&self.a, a)
    }

    /// Fractional index of axis value `b`, clamped to `[0, nb - 1]`
    pub fn b2j(&self, b: f64) -> f64 {
        axis_index(&self.b, b)
    }

    /// Fractional indices of axis values `(a, b)`
    pub fn ab2ij(&self, (a, b): (f64, f64)) -> (f64, f64) {
        (self.a2i(a), self.b2j(b))
    }

    /// Cartesian position at fractional indices `(i, j)`, clamped to the grid
    pub fn evalxy(&self, i: f64, j: f64) -> Xy {
        self.evalxy.eval(&self.ctrl, i, j)
    }

    /// Cartesian position at fractional indices `(i, j)`
    pub fn i2c(&self, (i, j): (f64, f64)) -> Xy {
        self.evalxy(i, j)
    }

    fn eval_cell(&self, i0: usize, j0: usize, u: f64, v: f64) -> Xy {
        let mut out = [0.0; 2];
        spline::evaluate_into(
            Interpolation::new(self.a_smoothing.is_smooth(), self.b_smoothing.is_smooth()),
            spline::Quantity::Position,
            &[self.ctrl.x(), self.ctrl.y()],
            &mut out,
            (i0, j0),
            (u, v),
        );
        out.into()
    }

    fn clamp_cell(&self, i0: usize, j0: usize) -> (usize, usize) {
        (i0.min(self.na() - 2), j0.min(self.nb() - 2))
    }

    /// Derivative of the cartesian position with respect to `i`, in cell `(i0, j0)`
    pub fn dxydi(&self, i0: usize, j0: usize, u: f64, v: f64) -> Xy {
        let (i0, j0) = self.clamp_cell(i0, j0);
        self.dxydi.eval(&self.ctrl, i0, j0, u, v)
    }

    /// Derivative of the cartesian position with respect to `j`, in cell `(i0, j0)`
    pub fn dxydj(&self, i0: usize, j0: usize, u: f64, v: f64) -> Xy {
        let (i0, j0) = self.clamp_cell(i0, j0);
        self.dxydj.eval(&self.ctrl, i0, j0, u, v)
    }

    /// Spacing of the a values of cell `i0`
    pub fn dadi(&self, i0: usize) -> f64 {
        let i0 = i0.min(self.na() - 2);
        self.a[i0 + 1] - self.a[i0]
    }

    /// Spacing of the b values of cell `j0`
    pub fn dbdj(&self, j0: usize) -> f64 {
        let j0 = j0.min(self.nb() - 2);
        self.b[j0 + 1] - self.b[j0]
    }

    /// Derivative of the cartesian position with respect to `a`, in cell `(i0, j0)`
    pub fn dxyda(&self, i0: usize, j0: usize, u: f64, v: f64) -> Xy {
        self.dxydi(i0, j0, u, v) / self.dadi(i0)
    }

    /// Derivative of the cartesian position with respect to `b`, in cell `(i0, j0)`
    pub fn dxydb(&self, i0: usize, j0: usize, u: f64, v: f64) -> Xy {
        self.dxydj(i0, j0, u, v) / self.dbdj(j0)
    }

    /// Cartesian position of axis values `(a, b)`.
    ///
    /// Out of the axis ranges, returns `None` unless `extrapolate` is set.
    /// See [`Self::ab2xy_extrapolated`].
    pub fn ab2xy(&self, a: f64, b: f64, extrapolate: bool) -> Option<Xy> {
        let inside = overshoot(&self.a, a) == Overshoot::Within
            && overshoot(&self.b, b) == Overshoot::Within;
        if !inside && !extrapolate {
            return None;
        }
        Some(self.ab2xy_extrapolated(a, b))
    }

    /// Cartesian position of axis values `(a, b)`.
    ///
    /// Out of the axis ranges, the position is extrapolated linearly from the
    /// boundary cell, along its derivative scaled by the overshoot in grid index units.
    pub fn ab2xy_extrapolated(&self, a: f64, b: f64) -> Xy {
        let na = self.na();
        let nb = self.nb();

        let mut ip = CellPos::of(self.a2i(a), na);
        let mut jp = CellPos::of(self.b2j(b), nb);
        let mut iex = 0.0;
        let mut jex = 0.0;

        match overshoot(&self.a, a) {
            Overshoot::Before => {
                ip = CellPos { cell: 0, t: 0.0 };
                iex = (a - self.a[0]) / (self.a[1] - self.a[0]);
            }
            Overshoot::After => {
                ip = CellPos {
                    cell: na - 2,
                    t: 1.0,
                };
                iex = (a - self.a[na - 1]) / (self.a[na - 1] - self.a[na - 2]);
            }
            Overshoot::Within => (),
        }
        match overshoot(&self.b, b) {
            Overshoot::Before => {
                jp = CellPos { cell: 0, t: 0.0 };
                jex = (b - self.b[0]) / (self.b[1] - self.b[0]);
            }
            Overshoot::After => {
                jp = CellPos {
                    cell: nb - 2,
                    t: 1.0,
                };
                jex = (b - self.b[nb - 1]) / (self.b[nb - 1] - self.b[nb - 2]);
            }
            Overshoot::Within => (),
        }

        let mut pt = self.eval_cell(ip.cell, jp.cell, ip.t, jp.t);
        if iex != 0.0 {
            pt += self.dxydi(ip.cell, jp.cell, ip.t, jp.t) * iex;
        }
        if jex != 0.0 {
            pt += self.dxydj(ip.cell, jp.cell, ip.t, jp.t) * jex;
        }
        pt
    }

    fn tolerant_bounds(&self) -> (NumBounds, NumBounds) {
        let ta = self.a_bounds.span() * VISIBILITY_TOLERANCE;
        let tb = self.b_bounds.span() * VISIBILITY_TOLERANCE;
        (
            NumBounds::from((self.a_bounds.min() - ta, self.a_bounds.max() + ta)),
            NumBounds::from((self.b_bounds.min() - tb, self.b_bounds.max() + tb)),
        )
    }

    /// Whether `(a, b)` lies strictly within the axis ranges, with a small tolerance
    pub fn is_visible(&self, a: f64, b: f64) -> bool {
        let (ab, bb) = self.tolerant_bounds();
        a > ab.min() && a < ab.max() && b > bb.min() && b < bb.max()
    }

    /// Whether `(a, b)` lies out of the axis ranges, with a small tolerance
    pub fn is_occluded(&self, a: f64, b: f64) -> bool {
        let (ab, bb) = self.tolerant_bounds();
        a < ab.min() || a > ab.max() || b < bb.min() || b > bb.max()
    }

    /// Rough derivative of the cartesian position with respect to `a`.
    ///
    /// Central difference with a step of `rel_step` (default 0.1) times the a range.
    /// Good enough to orient labels, but not exact.
    pub fn dxyda_rough(&self, a: f64, b: f64, rel_step: Option<f64>) -> Xy {
        let h = (self.a[self.na() - 1] - self.a[0]) * rel_step.unwrap_or(ROUGH_DERIVATIVE_STEP);
        let plus = self.ab2xy_extrapolated(a + h, b);
        let minus = self.ab2xy_extrapolated(a - h, b);
        (plus - minus) * (0.5 / h)
    }

    /// Rough derivative of the cartesian position with respect to `b`.
    /// See [`Self::dxyda_rough`].
    pub fn dxydb_rough(&self, a: f64, b: f64, rel_step: Option<f64>) -> Xy {
        let h = (self.b[self.nb() - 1] - self.b[0]) * rel_step.unwrap_or(ROUGH_DERIVATIVE_STEP);
        let plus = self.ab2xy_extrapolated(a, b + h);
        let minus = self.ab2xy_extrapolated(a, b - h);
        (plus - minus) * (0.5 / h)
    }

    /// Map a cartesian position to the surface
    pub fn c2p(&self, xy: Xy, map: &CoordMapXy<'_>) -> Point {
        map.c2p(xy)
    }

    /// Map a surface position to cartesian space
    pub fn p2c(&self, p: Point, map: &CoordMapXy<'_>) -> Xy {
        map.p2c(p)
    }
}
