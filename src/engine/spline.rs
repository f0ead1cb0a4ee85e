//! Evaluation of positions and derivatives over a control point grid.
//!
//! Each axis is interpolated either linearly between data points, or by cubic
//! Bernstein polynomials over the expanded control grid. The surface is the tensor
//! product of both axis interpolations, so there are four evaluation variants.
//! Each variant is monomorphized from the [`Basis`] of both axes.

use plotive_carpet_base::geom::Xy;

use super::control::ControlGrid;
use crate::data::Grid;

/// Interpolation basis along one axis
pub(crate) trait Basis {
    /// Distance between two knots in the expanded grid
    const STRIDE: usize;
    /// Number of control points involved in one cell
    const ORDER: usize;

    /// Weights of the control points of a cell at parameter `t`
    fn weights(t: f64) -> [f64; 4];

    /// Weights of the control points for the derivative with respect to `t`
    fn derivative_weights(t: f64) -> [f64; 4];
}

/// Linear interpolation between two data points
#[derive(Debug)]
pub(crate) struct Linear;

/// Cubic Bézier interpolation between two knots and their two control points
#[derive(Debug)]
pub(crate) struct Cubic;

impl Basis for Linear {
    const STRIDE: usize = 1;
    const ORDER: usize = 2;

    #[inline]
    fn weights(t: f64) -> [f64; 4] {
        [1.0 - t, t, 0.0, 0.0]
    }

    #[inline]
    fn derivative_weights(_t: f64) -> [f64; 4] {
        [-1.0, 1.0, 0.0, 0.0]
    }
}

impl Basis for Cubic {
    const STRIDE: usize = 3;
    const ORDER: usize = 4;

    #[inline]
    fn weights(t: f64) -> [f64; 4] {
        let ot = 1.0 - t;
        [ot * ot * ot, 3.0 * ot * ot * t, 3.0 * ot * t * t, t * t * t]
    }

    #[inline]
    fn derivative_weights(t: f64) -> [f64; 4] {
        let ot = 1.0 - t;
        [
            -3.0 * ot * ot,
            3.0 * (ot * ot - 2.0 * ot * t),
            3.0 * (2.0 * ot * t - t * t),
            3.0 * t * t,
        ]
    }
}

/// Interpolation of both axes of a carpet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Linear along both axes
    Bilinear,
    /// Cubic along a, linear along b
    CubicA,
    /// Linear along a, cubic along b
    CubicB,
    /// Cubic along both axes
    Bicubic,
}

impl Interpolation {
    /// The interpolation given whether each axis is smoothed
    pub fn new(a_smooth: bool, b_smooth: bool) -> Self {
        match (a_smooth, b_smooth) {
            (false, false) => Interpolation::Bilinear,
            (true, false) => Interpolation::CubicA,
            (false, true) => Interpolation::CubicB,
            (true, true) => Interpolation::Bicubic,
        }
    }
}

/// Quantity computed by an evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// The position
    Position,
    /// The derivative with respect to the fractional a index
    DerivativeI,
    /// The derivative with respect to the fractional b index
    DerivativeJ,
}

/// Tensor product of the weights over the control points of one cell,
/// for each of the `arrays`, written into `out`.
#[inline]
fn tensor_into<A: Basis, B: Basis>(
    arrays: &[&Grid<f64>],
    out: &mut [f64],
    ie: usize,
    je: usize,
    wa: &[f64; 4],
    wb: &[f64; 4],
) {
    for (arr, o) in arrays.iter().zip(out.iter_mut()) {
        let mut acc = 0.0;
        for (r, wb) in wb.iter().enumerate().take(B::ORDER) {
            let row = &arr.row(je + r)[ie..ie + A::ORDER];
            let f: f64 = row.iter().zip(wa).map(|(v, w)| v * w).sum();
            acc += wb * f;
        }
        *o = acc;
    }
}

fn eval_into<A: Basis, B: Basis>(
    quantity: Quantity,
    arrays: &[&Grid<f64>],
    out: &mut [f64],
    i0: usize,
    j0: usize,
    u: f64,
    v: f64,
) {
    let (wa, wb) = match quantity {
        Quantity::Position => (A::weights(u), B::weights(v)),
        Quantity::DerivativeI => (A::derivative_weights(u), B::weights(v)),
        Quantity::DerivativeJ => (A::weights(u), B::derivative_weights(v)),
    };
    tensor_into::<A, B>(arrays, out, i0 * A::STRIDE, j0 * B::STRIDE, &wa, &wb);
}

/// Evaluate `quantity` in cell `(i0, j0)` at parameters `(u, v)` for each of `arrays`.
///
/// The arrays are control grids expanded according to `interp`.
/// `u` and `v` are not clamped, which extrapolates the cell polynomials.
pub(crate) fn evaluate_into(
    interp: Interpolation,
    quantity: Quantity,
    arrays: &[&Grid<f64>],
    out: &mut [f64],
    (i0, j0): (usize, usize),
    (u, v): (f64, f64),
) {
    match interp {
        Interpolation::Bilinear => {
            eval_into::<Linear, Linear>(quantity, arrays, out, i0, j0, u, v)
        }
        Interpolation::CubicA => eval_into::<Cubic, Linear>(quantity, arrays, out, i0, j0, u, v),
        Interpolation::CubicB => eval_into::<Linear, Cubic>(quantity, arrays, out, i0, j0, u, v),
        Interpolation::Bicubic => eval_into::<Cubic, Cubic>(quantity, arrays, out, i0, j0, u, v),
    }
}

/// Position evaluator over fractional grid indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplineEvaluator {
    interp: Interpolation,
    na: usize,
    nb: usize,
}

impl SplineEvaluator {
    /// Build an evaluator for a grid of `nb` rows by `na` data columns
    pub fn new(interp: Interpolation, na: usize, nb: usize) -> Self {
        SplineEvaluator { interp, na, nb }
    }

    /// Cell and in-cell parameter of fractional index `t` along an axis of `n` values.
    /// The parameter is clamped to the cell.
    fn cell(t: f64, n: usize) -> (usize, f64) {
        let last = n.saturating_sub(2) as f64;
        let t0 = t.floor().clamp(0.0, last);
        (t0 as usize, (t - t0).clamp(0.0, 1.0))
    }

    /// Evaluate the position at fractional grid indices `(i, j)` for each of `arrays`.
    /// Indices out of the grid are clamped to its boundary.
    pub fn eval_into(&self, arrays: &[&Grid<f64>], out: &mut [f64], i: f64, j: f64) {
        let (i0, u) = Self::cell(i, self.na);
        let (j0, v) = Self::cell(j, self.nb);
        evaluate_into(
            self.interp,
            Quantity::Position,
            arrays,
            out,
            (i0, j0),
            (u, v),
        );
    }

    /// Evaluate the cartesian position at fractional grid indices `(i, j)`
    pub fn eval(&self, ctrl: &ControlGrid, i: f64, j: f64) -> Xy {
        let mut out = [0.0; 2];
        self.eval_into(&[ctrl.x(), ctrl.y()], &mut out, i, j);
        out.into()
    }
}

/// Derivative evaluator with respect to one of the fractional grid indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivativeEvaluator {
    interp: Interpolation,
    quantity: Quantity,
}

impl DerivativeEvaluator {
    /// Evaluator of the derivatives with respect to `i`
    pub fn along_i(interp: Interpolation) -> Self {
        DerivativeEvaluator {
            interp,
            quantity: Quantity::DerivativeI,
        }
    }

    /// Evaluator of the derivatives with respect to `j`
    pub fn along_j(interp: Interpolation) -> Self {
        DerivativeEvaluator {
            interp,
            quantity: Quantity::DerivativeJ,
        }
    }

    /// Evaluate the derivative in cell `(i0, j0)` at parameters `(u, v)` for each of `arrays`.
    ///
    /// The derivatives are generally discontinuous across cells,
    /// so the cell is chosen by the caller rather than deduced from a fractional index.
    /// `i0` and `j0` must be lower than the number of values minus 1 along their axis.
    pub fn eval_into(
        &self,
        arrays: &[&Grid<f64>],
        out: &mut [f64],
        i0: usize,
        j0: usize,
        u: f64,
        v: f64,
    ) {
        evaluate_into(self.interp, self.quantity, arrays, out, (i0, j0), (u, v));
    }

    /// Evaluate the cartesian derivative in cell `(i0, j0)` at parameters `(u, v)`
    pub fn eval(&self, ctrl: &ControlGrid, i0: usize, j0: usize, u: f64, v: f64) -> Xy {
        let mut out = [0.0; 2];
        self.eval_into(&[ctrl.x(), ctrl.y()], &mut out, i0, j0, u, v);
        out.into()
    }
}
