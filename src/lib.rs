#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]
/*!
 * # plotive-carpet
 * _carpet axes_ for plotive.
 *
 * A carpet is a curvilinear coordinate system defined by two families of
 * data-dependent curves: the `a` and `b` axes. Each pair of axis values maps to a
 * cartesian position through grids of x and y coordinates, optionally smoothed by
 * centripetal Catmull-Rom splines along each axis.
 *
 * This crate computes everything needed to draw a carpet, but draws nothing:
 *  - conversions between grid indices, axis values, cartesian coordinates and surface pixels
 *  - exact and rough derivatives, to orient labels along the curves
 *  - major, minor and boundary gridlines
 *  - tick labels, axis title anchors and the clip region of the carpet
 *  - smooth filling of sparse coordinate grids, and synthetic coordinates for cheater plots
 *
 * ## Get started
 *
 * ```
 * use plotive_carpet::{Calc, des};
 *
 * // Design the carpet. Axis values and coordinate grids of b rows by a columns.
 * let a = vec![4.0, 5.0, 6.0];
 * let b = vec![1.0, 2.0, 3.0];
 * let y = vec![
 *     vec![2.0, 3.5, 4.0],
 *     vec![3.0, 4.5, 5.0],
 *     vec![5.5, 6.5, 7.5],
 * ];
 * let carpet = des::Carpet::new(a, b)
 *     .with_y(y.into())
 *     .with_b_axis(des::CarpetAxis::new().with_smoothing(0.0));
 *
 * // The calc step validates the design and computes everything.
 * let calc = carpet.calc().unwrap();
 *
 * // Axis values to cartesian coordinates
 * let xy = calc.engine().ab2xy(5.0, 2.0, false).unwrap();
 * assert!(xy.y > 3.0 && xy.y < 6.0);
 *
 * // Gridlines, ready to be converted to paths
 * assert_eq!(calc.a_lines().major.len(), 3);
 * ```
 *
 * ## Crate features
 *
 *  - `utils`: enables various utilities such as `linspace`. (See [`utils`])
 *
 * ## Notes about the design
 *
 * The carpet design lies in the [`des`] module. It describes the carpet in a declarative way.
 *
 * The [`calc`] module validates a design and runs the calc step:
 * missing coordinates are synthesized or filled, the [`engine::CoordinateEngine`] is built,
 * then gridlines, labels and the clip region are derived from the engine.
 *
 * The engine itself trusts its inputs. It can be used directly when the data is known
 * to be valid, for instance by plots that draw on top of a carpet.
 */
// Plotive is released under the MIT License with the following copyright:
// Copyright (c) 2025-2026 Rémi Thebault

pub mod calc;
pub mod data;
pub mod des;
pub mod engine;
pub mod path;
pub mod scale;
pub mod search;

pub use calc::{Calc, CarpetCalc};
pub use engine::{AxisLetter, CoordinateEngine, Smoothing};

/// Rexports of [`plotive_carpet_base::color`]` items
pub mod color {
    pub use plotive_carpet_base::color::*;
}
pub use color::ColorU8;

/// Rexports of [`plotive_carpet_base::geom`]` items
pub mod geom {
    pub use plotive_carpet_base::geom::*;
}

#[cfg(feature = "utils")]
pub mod utils {
    //! Utility functions for data generation

    /// Create a linearly spaced vector of `num` elements between `start` and `end`
    pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
        let step = (end - start) / (num as f64 - 1.0);
        (0..num).map(|i| start + i as f64 * step).collect()
    }

    /// Create a grid of `nb` rows by `na` columns by evaluating `f(a, b)`
    /// over all pairs of `a` and `b` values.
    pub fn meshgrid<F>(a: &[f64], b: &[f64], mut f: F) -> Vec<Vec<f64>>
    where
        F: FnMut(f64, f64) -> f64,
    {
        b.iter()
            .map(|&bv| a.iter().map(|&av| f(av, bv)).collect())
            .collect()
    }
}

/// Module containing missing configuration values
/// Basically we put here all magic values that would require proper parameters
mod params {
    use crate::ColorU8;

    /// Factor applied to the span of the cartesian extents to get the padded ones
    pub const EXTENT_PADDING: f64 = 1.1;

    pub const AXIS_COLOR: ColorU8 = ColorU8::from_html(b"#444444");
    pub const GRID_OPACITY: f32 = 0.3;
    pub const MINOR_GRID_OPACITY: f32 = 0.06;

    pub const LABEL_PADDING: f32 = 10.0;
    pub const TITLE_OFFSET: f32 = 10.0;

    pub const CHEATER_SLOPE: f64 = 1.0;
    pub const SMOOTHING: f64 = 1.0;
    pub const MAX_SMOOTHING: f64 = 1.3;

    /// Tolerance applied to tick bounds so that ticks landing on the
    /// first or last value are kept despite rounding errors
    pub const TICK_BOUNDS_EPS: f64 = 5e-15;

    /// Maximum number of major ticks of a linear tick mode
    pub const MAX_TICKS: usize = 1000;
}

#[cfg(test)]
pub(crate) mod tests {
    pub trait Near {
        fn near_abs(&self, other: &Self, tol: f64) -> bool;
        fn near_rel(&self, other: &Self, err: f64) -> bool;
    }

    impl Near for f64 {
        fn near_abs(&self, other: &Self, tol: f64) -> bool {
            (self - other).abs() <= tol
        }

        fn near_rel(&self, other: &Self, err: f64) -> bool {
            let diff = (self - other).abs();
            let largest = self.abs().max(other.abs());
            diff <= largest * err
        }
    }

    impl Near for f32 {
        fn near_abs(&self, other: &Self, tol: f64) -> bool {
            (self - other).abs() as f64 <= tol
        }

        fn near_rel(&self, other: &Self, err: f64) -> bool {
            let diff = (self - other).abs() as f64;
            let largest = self.abs().max(other.abs()) as f64;
            diff <= largest * err
        }
    }

    macro_rules! assert_near {
        (abs, $a:expr, $b:expr, $tol:expr) => {
            assert!($a.near_abs(&$b, $tol), "Assertion failed: Values are not close enough.\nValue 1: {:?}\nValue 2: {:?}\nTolerance: {}", $a, $b, $tol);
        };
        (abs, $a:expr, $b:expr) => {
            assert_near!(abs, $a, $b, 1e-8);
        };
        (rel, $a:expr, $b:expr, $err:expr) => {
            assert!($a.near_rel(&$b, $err), "Assertion failed: Values are not close enough.\nValue 1: {:?}\nValue 2: {:?}\nRelative error: {}", $a, $b, $err);
        };
        (rel, $a:expr, $b:expr) => {
            assert_near!(rel, $a, $b, 1e-8);
        };
    }

    pub(crate) use assert_near;

    #[test]
    fn test_close_to() {
        let a = 1.0;
        let b = 1.0 + 1e-9;
        assert_near!(abs, a, b);
        assert!(!a.near_abs(&b, 1e-10));
        assert_near!(rel, a, b);
        assert!(!a.near_rel(&b, 1e-10));
    }
}
