#![cfg(test)]

use plotive_carpet::utils::meshgrid;
use plotive_carpet::{Smoothing, data::Grid, des, engine::CoordinateEngine};

mod tests;

/// Get a predictable random number generator
pub fn predictable_rng(seed: Option<u64>) -> rand_chacha::ChaCha8Rng {
    use rand::SeedableRng;
    let seed = seed.unwrap_or(586350478348);
    rand_chacha::ChaCha8Rng::seed_from_u64(seed)
}

/// Axis values of the reference carpet
pub fn ref_axes() -> (Vec<f64>, Vec<f64>) {
    (vec![4.0, 4.5, 5.0, 6.0], vec![1.0, 2.0, 3.0, 4.0, 5.0])
}

/// Curved coordinates over the reference axes, as `(x, y)` rows
pub fn ref_coords() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let (a, b) = ref_axes();
    let x = meshgrid(&a, &b, |a, b| a + 0.4 * b + 0.05 * a * b);
    let y = meshgrid(&a, &b, |a, b| 0.3 * a * a - b + 0.1 * b * b);
    (x, y)
}

/// The reference carpet design, with smoothing on both axes
pub fn ref_carpet(a_smoothing: f64, b_smoothing: f64) -> des::Carpet {
    let (a, b) = ref_axes();
    let (x, y) = ref_coords();
    des::Carpet::new(a, b)
        .with_x(x.into())
        .with_y(y.into())
        .with_a_axis(des::CarpetAxis::new().with_smoothing(a_smoothing))
        .with_b_axis(des::CarpetAxis::new().with_smoothing(b_smoothing))
}

/// The coordinate engine of the reference carpet
pub fn ref_engine(a_smoothing: f64, b_smoothing: f64) -> CoordinateEngine {
    let (a, b) = ref_axes();
    let (x, y) = ref_coords();
    let x = Grid::from_rows(x).unwrap();
    let y = Grid::from_rows(y).unwrap();
    CoordinateEngine::new(
        a,
        b,
        x,
        y,
        Smoothing::from_factor(a_smoothing).unwrap(),
        Smoothing::from_factor(b_smoothing).unwrap(),
    )
}

#[macro_export]
macro_rules! assert_close {
    ($a:expr, $b:expr, $tol:expr) => {{
        let (a, b): (f64, f64) = ($a, $b);
        assert!(
            (a - b).abs() <= $tol,
            "Assertion failed: values are not close enough.\nValue 1: {a:?}\nValue 2: {b:?}\nTolerance: {}",
            $tol
        );
    }};
    ($a:expr, $b:expr) => {
        $crate::assert_close!($a, $b, 1e-9)
    };
}
