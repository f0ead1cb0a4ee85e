/*!
 * Data containers for carpet grids.
 *
 * A carpet is described by two axis series `a` (length `na`) and `b` (length `nb`),
 * and by `x` and `y` coordinate grids of `nb` rows by `na` columns.
 * Row `j` of a grid follows the `b` axis and column `i` follows the `a` axis.
 *
 * This module also hosts the data preparation steps run before the coordinate engine
 * is built: [`cheater`] basis generation and [`smooth_fill`] of missing values.
 */
use std::fmt;
use std::ops::{Index, IndexMut};

pub mod cheater;
pub mod smooth_fill;

pub use cheater::{CheaterAxis, cheater_basis};
pub use smooth_fill::{RelaxationParams, smooth_fill_2d};

/// A dense, row-major 2D array indexed by `(j, i)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    na: usize,
    nb: usize,
    vals: Vec<T>,
}

/// Error returned when building a [`Grid`] from rows of unequal lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeError {
    /// The index of the offending row
    pub row: usize,
    /// The length of the offending row
    pub len: usize,
    /// The length of the first row
    pub expected: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} has {} values, expected {}",
            self.row, self.len, self.expected
        )
    }
}

impl std::error::Error for ShapeError {}

impl<T> Grid<T> {
    /// Build a grid of `nb` rows by `na` columns from its values in row-major order.
    /// Panics if `vals.len() != na * nb`.
    pub fn from_vec(na: usize, nb: usize, vals: Vec<T>) -> Self {
        assert_eq!(vals.len(), na * nb, "grid values do not match its shape");
        Grid { na, nb, vals }
    }

    /// Build a grid by evaluating `f(j, i)` for every cell
    pub fn from_fn<F>(na: usize, nb: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut vals = Vec::with_capacity(na * nb);
        for j in 0..nb {
            for i in 0..na {
                vals.push(f(j, i));
            }
        }
        Grid { na, nb, vals }
    }

    /// Build a grid from its rows, which must all have the same length
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ShapeError> {
        let nb = rows.len();
        let na = rows.first().map_or(0, Vec::len);
        let mut vals = Vec::with_capacity(na * nb);
        for (row, r) in rows.into_iter().enumerate() {
            if r.len() != na {
                return Err(ShapeError {
                    row,
                    len: r.len(),
                    expected: na,
                });
            }
            vals.extend(r);
        }
        Ok(Grid { na, nb, vals })
    }

    /// Number of columns, along the `a` axis
    pub fn na(&self) -> usize {
        self.na
    }

    /// Number of rows, along the `b` axis
    pub fn nb(&self) -> usize {
        self.nb
    }

    /// Whether the grid has no value
    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    /// The cell at row `j` and column `i`, if in bounds
    pub fn get(&self, j: usize, i: usize) -> Option<&T> {
        if j < self.nb && i < self.na {
            Some(&self.vals[j * self.na + i])
        } else {
            None
        }
    }

    /// Row `j`
    pub fn row(&self, j: usize) -> &[T] {
        &self.vals[j * self.na..(j + 1) * self.na]
    }

    /// Iterator over the rows
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks panics on zero size
        self.vals.chunks(self.na.max(1)).take(self.nb)
    }

    /// All values in row-major order
    pub fn values(&self) -> &[T] {
        &self.vals
    }

    /// Build a new grid of the same shape by applying `f` to every value
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            na: self.na,
            nb: self.nb,
            vals: self.vals.iter().map(f).collect(),
        }
    }

    /// Consume the grid and return its values in row-major order
    pub fn into_vec(self) -> Vec<T> {
        self.vals
    }
}

impl<T: Clone> Grid<T> {
    /// Build a grid of `nb` rows by `na` columns, all set to `val`
    pub fn filled(na: usize, nb: usize, val: T) -> Self {
        Grid {
            na,
            nb,
            vals: vec![val; na * nb],
        }
    }

    /// Nested rows representation of the grid
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (j, i): (usize, usize)) -> &T {
        debug_assert!(j < self.nb && i < self.na);
        &self.vals[j * self.na + i]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (j, i): (usize, usize)) -> &mut T {
        debug_assert!(j < self.nb && i < self.na);
        &mut self.vals[j * self.na + i]
    }
}

/// Numerical bounds of a data set.
/// The first value is always lower or equal to the second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumBounds(f64, f64);

impl NumBounds {
    /// Bounds that contain nothing, and that adopt the first sample added to them
    pub const NAN: Self = Self(f64::NAN, f64::NAN);
}

impl Default for NumBounds {
    fn default() -> Self {
        Self::NAN
    }
}

impl From<f64> for NumBounds {
    fn from(value: f64) -> Self {
        Self(value, value)
    }
}

impl From<(f64, f64)> for NumBounds {
    fn from(value: (f64, f64)) -> Self {
        Self(value.0.min(value.1), value.0.max(value.1))
    }
}

impl From<NumBounds> for (f64, f64) {
    fn from(value: NumBounds) -> Self {
        (value.0, value.1)
    }
}

impl NumBounds {
    /// The lowest value
    pub fn min(&self) -> f64 {
        self.0
    }

    /// The highest value
    pub fn max(&self) -> f64 {
        self.1
    }

    /// The distance between min and max
    pub fn span(&self) -> f64 {
        self.1 - self.0
    }

    /// The middle point
    pub fn center(&self) -> f64 {
        0.5 * (self.0 + self.1)
    }

    /// Whether `point` is within the bounds, with a small tolerance
    pub fn contains(&self, point: f64) -> bool {
        const EPS: f64 = 1e-10;
        point >= (self.0 - EPS) && point <= (self.1 + EPS)
    }

    /// Extend the bounds to contain `point`. NaN samples are ignored.
    pub fn add_sample(&mut self, point: f64) {
        self.0 = self.0.min(point);
        self.1 = self.1.max(point);
    }

    /// Extend the bounds to contain `bounds`
    pub fn unite_with(&mut self, bounds: &NumBounds) {
        self.0 = self.0.min(bounds.0);
        self.1 = self.1.max(bounds.1);
    }

    /// Bounds with the same center, and span multiplied by `factor`
    pub fn grown(&self, factor: f64) -> NumBounds {
        let c = self.center();
        let h = 0.5 * self.span() * factor;
        NumBounds(c - h, c + h)
    }

    fn is_nan(&self) -> bool {
        self.0.is_nan() || self.1.is_nan()
    }
}

/// Types whose numerical extent can be scanned.
///
/// Implemented recursively for nested containers, so that a grid,
/// a `Vec<Vec<f64>>` or a sparse `Vec<Option<f64>>` are scanned alike.
pub trait Extent {
    /// Add every sample of `self` to `bounds`
    fn add_to_bounds(&self, bounds: &mut NumBounds);
}

impl Extent for f64 {
    fn add_to_bounds(&self, bounds: &mut NumBounds) {
        bounds.add_sample(*self);
    }
}

impl<T: Extent> Extent for Option<T> {
    fn add_to_bounds(&self, bounds: &mut NumBounds) {
        if let Some(v) = self {
            v.add_to_bounds(bounds);
        }
    }
}

impl<T: Extent> Extent for [T] {
    fn add_to_bounds(&self, bounds: &mut NumBounds) {
        for v in self {
            v.add_to_bounds(bounds);
        }
    }
}

impl<T: Extent> Extent for Vec<T> {
    fn add_to_bounds(&self, bounds: &mut NumBounds) {
        self.as_slice().add_to_bounds(bounds);
    }
}

impl<T: Extent> Extent for Grid<T> {
    fn add_to_bounds(&self, bounds: &mut NumBounds) {
        self.vals.add_to_bounds(bounds);
    }
}

/// Minimum and maximum over all the numbers of a (possibly nested) array.
/// Returns `None` if the input holds no number.
pub fn array_minmax<T>(data: &T) -> Option<NumBounds>
where
    T: Extent + ?Sized,
{
    let mut bounds = NumBounds::NAN;
    data.add_to_bounds(&mut bounds);
    if bounds.is_nan() { None } else { Some(bounds) }
}
