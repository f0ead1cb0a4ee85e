/*!
 * # Declarative design module for plotive-carpet
 *
 * This module contains the data structures describing a carpet:
 * its axis values, its coordinate grids and the design of both axes.
 * Nothing is computed here, see [`crate::calc`] for that.
 */
pub mod axis;

pub use axis::{
    CarpetAxis, CheaterType, Dash, LabelFormat, Line, LineColor, LinePattern, ShowTickLabels,
    TickMode,
};

use crate::data::RelaxationParams;
use crate::params;

/// A coordinate grid of `b.len()` rows by `a.len()` columns.
///
/// Grids can be dense, or sparse with missing values.
/// Missing and non-finite values are filled during the calc step.
#[derive(Debug, Clone, PartialEq)]
pub enum Coords {
    /// Every value is provided
    Dense(Vec<Vec<f64>>),
    /// Some values may be missing
    Sparse(Vec<Vec<Option<f64>>>),
}

impl Coords {
    /// The rows, with missing and non-finite values as `None`
    pub fn sparse_rows(&self) -> Vec<Vec<Option<f64>>> {
        let finite = |v: f64| if v.is_finite() { Some(v) } else { None };
        match self {
            Coords::Dense(rows) => rows
                .iter()
                .map(|r| r.iter().map(|&v| finite(v)).collect())
                .collect(),
            Coords::Sparse(rows) => rows
                .iter()
                .map(|r| r.iter().map(|v| v.and_then(finite)).collect())
                .collect(),
        }
    }
}

impl From<Vec<Vec<f64>>> for Coords {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Coords::Dense(rows)
    }
}

impl From<Vec<Vec<Option<f64>>>> for Coords {
    fn from(rows: Vec<Vec<Option<f64>>>) -> Self {
        Coords::Sparse(rows)
    }
}

/// A carpet design
///
/// The `a` and `b` axis values must be strictly monotonic, increasing or decreasing.
/// The y coordinates are required. Without x coordinates, a cheater carpet is built,
/// with x synthesized from the axis values and the cheater slope.
#[derive(Debug, Clone)]
pub struct Carpet {
    a: Vec<f64>,
    b: Vec<f64>,
    x: Option<Coords>,
    y: Option<Coords>,

    a_axis: CarpetAxis,
    b_axis: CarpetAxis,
    cheater_slope: f64,
    relaxation: RelaxationParams,
}

impl Carpet {
    /// Create a new carpet design with the given axis values
    pub fn new(a: Vec<f64>, b: Vec<f64>) -> Self {
        Carpet {
            a,
            b,
            x: None,
            y: None,
            a_axis: CarpetAxis::default(),
            b_axis: CarpetAxis::default(),
            cheater_slope: params::CHEATER_SLOPE,
            relaxation: RelaxationParams::default(),
        }
    }

    /// Set the x coordinates and return self for chaining
    pub fn with_x(self, x: Coords) -> Self {
        Self { x: Some(x), ..self }
    }

    /// Set the y coordinates and return self for chaining
    pub fn with_y(self, y: Coords) -> Self {
        Self { y: Some(y), ..self }
    }

    /// Set the a axis design and return self for chaining
    pub fn with_a_axis(self, a_axis: CarpetAxis) -> Self {
        Self { a_axis, ..self }
    }

    /// Set the b axis design and return self for chaining
    pub fn with_b_axis(self, b_axis: CarpetAxis) -> Self {
        Self { b_axis, ..self }
    }

    /// Set the slope of the synthetic x coordinates of cheater carpets,
    /// and return self for chaining
    pub fn with_cheater_slope(self, cheater_slope: f64) -> Self {
        Self {
            cheater_slope,
            ..self
        }
    }

    /// Set the parameters of the smooth filling of missing coordinates,
    /// and return self for chaining
    pub fn with_relaxation(self, relaxation: RelaxationParams) -> Self {
        Self { relaxation, ..self }
    }

    /// The a axis values
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// The b axis values
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// The x coordinates
    pub fn x(&self) -> Option<&Coords> {
        self.x.as_ref()
    }

    /// The y coordinates
    pub fn y(&self) -> Option<&Coords> {
        self.y.as_ref()
    }

    /// The a axis design
    pub fn a_axis(&self) -> &CarpetAxis {
        &self.a_axis
    }

    /// The b axis design
    pub fn b_axis(&self) -> &CarpetAxis {
        &self.b_axis
    }

    /// The slope of cheater carpets
    pub fn cheater_slope(&self) -> f64 {
        self.cheater_slope
    }

    /// The parameters of the smooth filling of missing coordinates
    pub fn relaxation(&self) -> &RelaxationParams {
        &self.relaxation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_rows() {
        let dense: Coords = vec![vec![1.0, f64::NAN], vec![f64::INFINITY, 2.0]].into();
        assert_eq!(
            dense.sparse_rows(),
            vec![vec![Some(1.0), None], vec![None, Some(2.0)]]
        );
        let sparse: Coords = vec![vec![None, Some(f64::NAN)], vec![Some(3.0), None]].into();
        assert_eq!(
            sparse.sparse_rows(),
            vec![vec![None, None], vec![Some(3.0), None]]
        );
    }
}
