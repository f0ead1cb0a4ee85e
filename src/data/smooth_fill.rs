//! Fill the holes of a sparse coordinate grid.
//!
//! Carpet coordinates drive the layout of the whole carpet, so missing values
//! cannot simply be skipped: they are replaced by a smooth guess.
//! Missing interior cells are relaxed towards a solution of Laplace's equation,
//! using finite differences aware of the non-uniform axis spacing.
//! Missing boundary cells are extrapolated linearly from their inner neighbors,
//! and averaged with their neighbors along the boundary.

use crate::data::Grid;

/// Parameters of the Gauss-Seidel relaxation of [`smooth_fill_2d`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxationParams {
    /// Relaxation factor applied to interior cell updates
    pub interior_omega: f64,
    /// Relaxation factor applied to boundary cell updates
    pub boundary_omega: f64,
    /// Convergence threshold on the root sum of squares of the
    /// relative updates of one sweep
    pub tolerance: f64,
    /// Maximum number of sweeps
    pub max_iterations: usize,
}

impl Default for RelaxationParams {
    /// Over-relaxation of 1.85 on interior cells, plain Gauss-Seidel (1.0) on boundary cells,
    /// a tolerance of `1e-5` and at most 100 sweeps.
    fn default() -> Self {
        RelaxationParams {
            interior_omega: 1.85,
            boundary_omega: 1.0,
            tolerance: 1e-5,
            max_iterations: 100,
        }
    }
}

impl RelaxationParams {
    /// Set the relaxation factor of interior cells
    pub fn with_interior_omega(self, interior_omega: f64) -> Self {
        Self {
            interior_omega,
            ..self
        }
    }

    /// Set the relaxation factor of boundary cells
    pub fn with_boundary_omega(self, boundary_omega: f64) -> Self {
        Self {
            boundary_omega,
            ..self
        }
    }

    /// Set the convergence threshold
    pub fn with_tolerance(self, tolerance: f64) -> Self {
        Self { tolerance, ..self }
    }

    /// Set the maximum number of sweeps
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }
}

/// Linear extrapolation to `x` of the line through `(x0, d0)` and `(x1, d1)`.
/// Falls back to `d1` when both abscissas coincide.
fn extrapolate(d0: f64, d1: f64, x0: f64, x1: f64, x: f64) -> f64 {
    if x1 == x0 {
        d1
    } else {
        d1 + (d1 - d0) * (x - x1) / (x1 - x0)
    }
}

fn avg_surrounding(data: &Grid<Option<f64>>, j: usize, i: usize) -> f64 {
    let ni = data.na();
    let nj = data.nb();
    let mut sum = 0.0;
    let mut cnt = 0usize;
    let mut add = |v: Option<f64>| {
        if let Some(v) = v {
            sum += v;
            cnt += 1;
        }
    };
    if i > 0 {
        add(data[(j, i - 1)]);
    }
    if i + 1 < ni {
        add(data[(j, i + 1)]);
    }
    if j > 0 {
        add(data[(j - 1, i)]);
    }
    if j + 1 < nj {
        add(data[(j + 1, i)]);
    }
    sum / cnt.max(1) as f64
}

/// Fill the missing values of `data` so that the grid becomes dense.
///
/// `a` and `b` give the positions of the columns and rows of the grid,
/// and must have lengths `data.na()` and `data.nb()`.
/// Defined values are returned unchanged, and a grid without holes is returned as is.
///
/// Missing values are first seeded with the average of their defined neighbors,
/// then refined by Gauss-Seidel sweeps until the relative update
/// falls under `params.tolerance`, or after `params.max_iterations` sweeps.
pub fn smooth_fill_2d(
    data: Grid<Option<f64>>,
    a: &[f64],
    b: &[f64],
    params: &RelaxationParams,
) -> Grid<f64> {
    let ni = data.na();
    let nj = data.nb();
    debug_assert_eq!(a.len(), ni);
    debug_assert_eq!(b.len(), nj);

    let mut seeded = data;
    let mut holes = Vec::new();
    let mut dmax: f64 = 0.0;

    // column-major scan, seeded cells contribute to the seed of the next ones
    for i in 0..ni {
        for j in 0..nj {
            let v = match seeded[(j, i)] {
                Some(v) => v,
                None => {
                    holes.push((j, i));
                    let v = avg_surrounding(&seeded, j, i);
                    seeded[(j, i)] = Some(v);
                    v
                }
            };
            dmax = dmax.max(v.abs());
        }
    }

    let mut data = seeded.map(|v| v.unwrap_or_default());
    if holes.is_empty() {
        return data;
    }
    if dmax == 0.0 {
        dmax = 1.0;
    }

    let mut resid = 0.0;
    let mut iter = 0;
    while iter < params.max_iterations {
        iter += 1;
        resid = 0.0;

        for &(j, i) in &holes {
            let mut boundary_cnt = 0;
            let mut new_val = 0.0;

            if i == 0 && ni > 1 {
                let i0 = (ni - 1).min(2);
                new_val += extrapolate(data[(j, i0)], data[(j, 1)], a[i0], a[1], a[0]);
                boundary_cnt += 1;
            } else if i == ni - 1 && ni > 1 {
                let i0 = ni.saturating_sub(3);
                let i1 = ni - 2;
                new_val += extrapolate(data[(j, i0)], data[(j, i1)], a[i0], a[i1], a[ni - 1]);
                boundary_cnt += 1;
            }

            if (i == 0 || i == ni - 1) && j > 0 && j + 1 < nj {
                let dxp = b[j + 1] - b[j];
                let dxm = b[j] - b[j - 1];
                new_val += (dxm * data[(j + 1, i)] + dxp * data[(j - 1, i)]) / (dxm + dxp);
                boundary_cnt += 1;
            }

            if j == 0 && nj > 1 {
                let j0 = (nj - 1).min(2);
                new_val += extrapolate(data[(j0, i)], data[(1, i)], b[j0], b[1], b[0]);
                boundary_cnt += 1;
            } else if j == nj - 1 && nj > 1 {
                let j0 = nj.saturating_sub(3);
                let j1 = nj - 2;
                new_val += extrapolate(data[(j0, i)], data[(j1, i)], b[j0], b[j1], b[nj - 1]);
                boundary_cnt += 1;
            }

            if (j == 0 || j == nj - 1) && i > 0 && i + 1 < ni {
                let dxp = a[i + 1] - a[i];
                let dxm = a[i] - a[i - 1];
                new_val += (dxm * data[(j, i + 1)] + dxp * data[(j, i - 1)]) / (dxm + dxp);
                boundary_cnt += 1;
            }

            let on_boundary = i == 0 || i == ni - 1 || j == 0 || j == nj - 1;
            if !on_boundary {
                let dap = a[i + 1] - a[i];
                let dam = a[i] - a[i - 1];
                let dbp = b[j + 1] - b[j];
                let dbm = b[j] - b[j - 1];

                let c = dap * dam * (dap + dam);
                let d = dbp * dbm * (dbp + dbm);

                new_val = (c * (dbm * data[(j + 1, i)] + dbp * data[(j - 1, i)])
                    + d * (dam * data[(j, i + 1)] + dap * data[(j, i - 1)]))
                    / (d * (dam + dap) + c * (dbm + dbp));
            } else if boundary_cnt > 0 {
                new_val /= boundary_cnt as f64;
            } else {
                // a single cell grid has nothing to relax against
                new_val = data[(j, i)];
            }

            let diff = new_val - data[(j, i)];
            let rel_diff = diff / dmax;
            resid += rel_diff * rel_diff;

            let omega = if on_boundary {
                params.boundary_omega
            } else {
                params.interior_omega
            };
            data[(j, i)] += diff * omega;
        }

        resid = f64::sqrt(resid);
        if resid <= params.tolerance {
            break;
        }
    }

    if resid > params.tolerance {
        log::warn!(
            "smooth fill of {} missing values did not converge: residual {:e} after {} iterations",
            holes.len(),
            resid,
            iter
        );
    } else {
        log::debug!(
            "smooth fill of {} missing values converged to {:e} after {} iterations",
            holes.len(),
            resid,
            iter
        );
    }

    data
}
