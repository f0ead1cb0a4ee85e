//! Synthetic x coordinates for carpets given without x data ("cheater" plots).

use crate::data::Grid;

/// Source of the positions along one axis of a cheater basis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheaterAxis<'a> {
    /// Positions are evenly spaced by index, over `n` values
    Count(usize),
    /// Positions follow the axis values
    Values(&'a [f64]),
}

impl CheaterAxis<'_> {
    fn len(&self) -> usize {
        match self {
            CheaterAxis::Count(n) => *n,
            CheaterAxis::Values(v) => v.len(),
        }
    }

    /// Position of the `i`-th value, scaled so that the axis spans `[0, 1]`.
    /// Evenly spaced values give the same positions whether given by count or by value.
    fn position(&self, i: usize) -> f64 {
        let n = self.len();
        if n < 2 {
            return 0.0;
        }
        match self {
            CheaterAxis::Count(_) => i as f64 / (n - 1) as f64,
            CheaterAxis::Values(v) => (v[i] - v[0]) / (v[n - 1] - v[0]),
        }
    }
}

/// Build the x grid of a cheater carpet.
///
/// Each value is `pos_a - pos_b * slope`, where `pos_a` and `pos_b` are the
/// normalized positions along the axes. The result is then rescaled to span exactly `[0, 1]`.
/// A degenerate basis where every value is equal is returned as all zeros.
pub fn cheater_basis(a: CheaterAxis<'_>, b: CheaterAxis<'_>, slope: f64) -> Grid<f64> {
    let na = a.len();
    let nb = b.len();

    let mut grid = Grid::from_fn(na, nb, |j, i| a.position(i) - b.position(j) * slope);

    let Some(bounds) = crate::data::array_minmax(&grid) else {
        return grid;
    };
    let span = bounds.span();
    let (scale, offset) = if span > 0.0 {
        (1.0 / span, -bounds.min() / span)
    } else {
        (0.0, 0.0)
    };
    for j in 0..nb {
        for i in 0..na {
            let v = &mut grid[(j, i)];
            *v = scale * *v + offset;
        }
    }
    grid
}
