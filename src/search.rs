//! Bin lookup and distinct value scans over sorted numerical series.

/// Tolerance applied to values before comparing them with bin edges,
/// so that values at a bin edge within rounding errors land in the expected bin.
const ROUNDING_ERROR: f64 = 1e-9;

/// Bound to the number of bisection steps of [`find_bin`].
/// A well-formed edge series of any practical length is searched in far fewer steps.
const MAX_BISECT_STEPS: usize = 100;

/// Description of a series of bins
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bins<'a> {
    /// Explicit bin edges, monotonically increasing or decreasing
    Edges(&'a [f64]),
    /// Regularly spaced bins
    Linear {
        /// The lower edge of bin 0
        start: f64,
        /// The width of every bin
        size: f64,
    },
}

impl<'a> From<&'a [f64]> for Bins<'a> {
    fn from(edges: &'a [f64]) -> Self {
        Bins::Edges(edges)
    }
}

impl<'a> From<&'a Vec<f64>> for Bins<'a> {
    fn from(edges: &'a Vec<f64>) -> Self {
        Bins::Edges(edges.as_slice())
    }
}

/// Find the bin containing `val`.
///
/// With explicit edges, the result is the index of the last edge before `val`,
/// so it ranges from `-1` (before the first edge) to `edges.len() - 1` (after the last edge).
/// Values landing exactly on an edge belong to the bin above the edge,
/// unless `line_low` is set in which case they belong to the bin below.
pub fn find_bin(val: f64, bins: Bins<'_>, line_low: bool) -> isize {
    match bins {
        Bins::Linear { start, size } => {
            let pos = (val - start) / size;
            if line_low {
                (pos - ROUNDING_ERROR).ceil() as isize - 1
            } else {
                (pos + ROUNDING_ERROR).floor() as isize
            }
        }
        Bins::Edges(edges) => find_edge(val, edges, line_low),
    }
}

fn find_edge(val: f64, edges: &[f64], line_low: bool) -> isize {
    let n = edges.len();
    if n == 0 {
        return -1;
    }
    let bin_size = if n > 1 {
        (edges[n - 1] - edges[0]) / (n - 1) as f64
    } else {
        1.0
    };
    let increasing = bin_size >= 0.0;
    let test = |e: f64, v: f64| match (increasing, line_low) {
        (true, true) => e < v,
        (true, false) => e <= v,
        (false, true) => e >= v,
        (false, false) => e > v,
    };
    let dir = if line_low { -1.0 } else { 1.0 };
    let sign = if increasing { 1.0 } else { -1.0 };
    let val = val + bin_size * ROUNDING_ERROR * dir * sign;

    let mut n1: isize = 0;
    let mut n2: isize = n as isize;
    let mut steps = 0;
    while n1 < n2 && steps < MAX_BISECT_STEPS {
        steps += 1;
        let mid = (n1 + n2) / 2;
        if test(edges[mid as usize], val) {
            n1 = mid + 1;
        } else {
            n2 = mid;
        }
    }
    if steps > 90 {
        log::warn!("long binary search: {} steps over {} edges", steps, n);
    }
    n1 - 1
}

/// Result of [`distinct_vals`]
#[derive(Debug, Clone, PartialEq)]
pub struct DistinctVals {
    /// Sorted distinct values
    pub vals: Vec<f64>,
    /// Smallest difference between two consecutive distinct values
    pub min_diff: f64,
}

/// Sort `vals` and collapse values that are equal within rounding errors.
///
/// Two consecutive sorted values are considered distinct when their difference
/// exceeds one ten-thousandth of the average spacing of the series.
/// NaN values are discarded.
pub fn distinct_vals(vals: &[f64]) -> DistinctVals {
    let mut sorted: Vec<f64> = vals.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);

    let Some((&first, rest)) = sorted.split_first() else {
        return DistinctVals {
            vals: Vec::new(),
            min_diff: 1.0,
        };
    };
    let last = sorted.len() - 1;
    let mut min_diff = sorted[last] - first;
    if min_diff == 0.0 {
        min_diff = 1.0;
    }
    let err_diff = min_diff / (last.max(1) as f64) / 10000.0;

    let mut distinct = vec![first];
    let mut prev = first;
    for &v in rest {
        let diff = v - prev;
        if diff > err_diff {
            min_diff = min_diff.min(diff);
            distinct.push(v);
            prev = v;
        }
    }

    DistinctVals {
        vals: distinct,
        min_diff,
    }
}
