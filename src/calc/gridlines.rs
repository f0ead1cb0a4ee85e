//! Major, minor and boundary gridlines of a carpet axis.
//!
//! A gridline of axis `a` is a line of constant `a`, walking the whole `b` range,
//! and conversely. Gridlines on data points are copied from the control grid.
//! Gridlines between data points are evaluated at every data point of the
//! crossing axis, with derivative based control points inserted between them
//! when the crossing axis is smoothed.

use plotive_carpet_base::geom::Xy;

use super::Stroke;
use crate::des::{self, TickMode};
use crate::engine::{AxisLetter, CellPos, CoordinateEngine};
use crate::params;
use crate::path::Curve;

/// Kind of a gridline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridlineKind {
    /// On a major tick
    Major,
    /// Between major ticks
    Minor,
    /// On the first or last axis value
    Boundary,
}

/// A line of constant value along one axis
#[derive(Debug, Clone)]
pub struct Gridline {
    /// The axis whose value is constant along the line
    pub letter: AxisLetter,
    /// The kind of gridline
    pub kind: GridlineKind,
    /// The constant axis value
    pub value: f64,
    /// The data index of the line, if it lies on data points
    pub index: Option<usize>,
    /// The fractional grid index of the line along its axis
    pub iso: f64,
    /// The cell and in-cell parameter of `iso`, used for derivatives
    pub iso_cell: CellPos,
    /// The points of the line, bicubic if the crossing axis is smoothed
    pub curve: Curve,
    /// The line style
    pub stroke: Stroke,
}

impl Gridline {
    /// Position at fractional index `k` along the crossing axis
    pub fn xy(&self, engine: &CoordinateEngine, k: f64) -> Xy {
        match self.letter {
            AxisLetter::A => engine.evalxy(self.iso, k),
            AxisLetter::B => engine.evalxy(k, self.iso),
        }
    }

    /// Tangent in cell `k0` of the crossing axis, at parameter `t`
    pub fn dxy(&self, engine: &CoordinateEngine, k0: usize, t: f64) -> Xy {
        let CellPos { cell, t: iso_t } = self.iso_cell;
        match self.letter {
            AxisLetter::A => engine.dxydj(cell, k0, iso_t, t),
            AxisLetter::B => engine.dxydi(k0, cell, t, iso_t),
        }
    }

    /// Number of data points along the crossing axis
    pub fn cross_len(&self, engine: &CoordinateEngine) -> usize {
        engine.axis(self.letter.other()).len()
    }
}

/// All the gridlines of an axis
#[derive(Debug, Clone, Default)]
pub struct AxisLines {
    /// Lines on major ticks
    pub major: Vec<Gridline>,
    /// Lines between major ticks
    pub minor: Vec<Gridline>,
    /// Start and end lines
    pub boundary: Vec<Gridline>,
}

impl AxisLines {
    /// Iterator over all lines, minor first, then major, then boundary
    pub fn iter(&self) -> impl Iterator<Item = &Gridline> {
        self.minor
            .iter()
            .chain(self.major.iter())
            .chain(self.boundary.iter())
    }
}

/// Range of `n` such that `tick0 + n * dtick` lies between `first` and `last`,
/// within a small tolerance. The range is given as `(n1, n2)`, both included.
fn tick_bounds(first: f64, last: f64, tick0: f64, dtick: f64) -> (i64, i64) {
    let eps = params::TICK_BOUNDS_EPS;
    let q1 = (first - tick0) / dtick;
    let q2 = (last - tick0) / dtick;
    let (lo, hi) = (q1.min(q2), q1.max(q2));
    // widen by magnitude, so that negative quotients are widened too
    let n1 = (lo - eps * lo.abs()).ceil() as i64;
    let n2 = (hi + eps * hi.abs()).floor() as i64;
    (n1, n2)
}

struct Builder<'a> {
    engine: &'a CoordinateEngine,
    letter: AxisLetter,
    axis: &'a des::CarpetAxis,
}

impl Builder<'_> {
    fn data(&self) -> &[f64] {
        self.engine.axis(self.letter)
    }

    fn stroke(&self, line: &des::Line) -> Stroke {
        Stroke::resolve(line, self.axis.color())
    }

    /// Gridline on data index `idx`, copied from the control grid
    fn array_line(&self, idx: usize, kind: GridlineKind, line: &des::Line) -> Gridline {
        let e = self.engine;
        let ctrl = e.ctrl();
        let stride = e.smoothing(self.letter).stride();
        let cross_smooth = e.smoothing(self.letter.other()).is_smooth();
        let n = self.data().len();

        let curve = match self.letter {
            AxisLetter::A => {
                let mut c = Curve::with_capacity(ctrl.neb(), cross_smooth);
                for je in 0..ctrl.neb() {
                    c.push(ctrl.point(je, idx * stride));
                }
                c
            }
            AxisLetter::B => {
                let row = idx * stride;
                Curve {
                    x: ctrl.x().row(row).to_vec(),
                    y: ctrl.y().row(row).to_vec(),
                    bicubic: cross_smooth,
                }
            }
        };

        let cell = idx.min(n - 2);
        Gridline {
            letter: self.letter,
            kind,
            value: self.data()[idx],
            index: Some(idx),
            iso: idx as f64,
            iso_cell: CellPos {
                cell,
                t: (idx - cell) as f64,
            },
            curve,
            stroke: self.stroke(line),
        }
    }

    /// Gridline at any axis value, evaluated along the crossing axis
    fn value_line(&self, value: f64, kind: GridlineKind, line: &des::Line) -> Gridline {
        let e = self.engine;
        let n = self.data().len();
        let cross_n = e.axis(self.letter.other()).len();
        let cross_smooth = e.smoothing(self.letter.other()).is_smooth();

        let iso = match self.letter {
            AxisLetter::A => e.a2i(value),
            AxisLetter::B => e.b2j(value),
        };
        let mut gl = Gridline {
            letter: self.letter,
            kind,
            value,
            index: None,
            iso,
            iso_cell: CellPos::of(iso, n),
            curve: Curve::new(cross_smooth),
            stroke: self.stroke(line),
        };

        let cap = if cross_smooth { 3 * cross_n - 2 } else { cross_n };
        let mut curve = Curve::with_capacity(cap, cross_smooth);
        let mut prev = Xy::ZERO;
        for k in 0..cross_n {
            let xy = gl.xy(e, k as f64);
            if cross_smooth && k > 0 {
                curve.push(prev + gl.dxy(e, k - 1, 0.0) / 3.0);
                curve.push(xy - gl.dxy(e, k - 1, 1.0) / 3.0);
            }
            curve.push(xy);
            prev = xy;
        }
        gl.curve = curve;
        gl
    }

    fn in_range(&self, v: f64) -> bool {
        let data = self.data();
        let first = data[0];
        let last = data[data.len() - 1];
        v >= first.min(last) && v <= first.max(last)
    }

    fn boundary_values(&self, lines: &mut AxisLines) {
        let data = self.data();
        if let Some(line) = self.axis.start_line() {
            lines
                .boundary
                .push(self.value_line(data[0], GridlineKind::Boundary, line));
        }
        if let Some(line) = self.axis.end_line() {
            lines.boundary.push(self.value_line(
                data[data.len() - 1],
                GridlineKind::Boundary,
                line,
            ));
        }
    }

    fn build(&self) -> AxisLines {
        let mut lines = AxisLines::default();
        let data = self.data();
        let n = data.len();
        let last = n - 1;
        let minor_count = self.axis.minor_grid_count();

        match self.axis.tick_mode() {
            TickMode::Array { tick0, dtick } => {
                let t0 = tick0 as i64;
                let dt = dtick as i64;
                let (n1, n2) = tick_bounds(0.0, last as f64, t0 as f64, dt as f64);
                let ticks = move || {
                    (n1 - 1..n2 + 1)
                        .map(move |k| t0 + dt * k)
                        .filter(move |&idx| idx >= 0 && idx <= last as i64)
                        .map(|idx| idx as usize)
                };

                if let Some(line) = self.axis.grid() {
                    for idx in ticks() {
                        lines
                            .major
                            .push(self.array_line(idx, GridlineKind::Major, line));
                    }
                }

                if let Some(line) = self.axis.minor_grid() {
                    for j0 in ticks() {
                        let j1 = (j0 + dtick).min(last);
                        if j1 <= j0 {
                            continue;
                        }
                        let d = (j1 - j0) as f64;
                        let v0 = data[j0];
                        let v1 = data[j1];
                        for i in 0..minor_count {
                            let frac = (i + 1) as f64 / (minor_count + 1) as f64;
                            let v = v0 + (v1 - v0) * frac * (dtick as f64 / d);
                            if !self.in_range(v) {
                                continue;
                            }
                            lines
                                .minor
                                .push(self.value_line(v, GridlineKind::Minor, line));
                        }
                    }
                }

                if let Some(line) = self.axis.start_line() {
                    lines
                        .boundary
                        .push(self.array_line(0, GridlineKind::Boundary, line));
                }
                if let Some(line) = self.axis.end_line() {
                    lines
                        .boundary
                        .push(self.array_line(last, GridlineKind::Boundary, line));
                }
            }
            TickMode::Linear { tick0, dtick } => {
                let (n1, n2) = tick_bounds(data[0], data[last], tick0, dtick);
                if n2.saturating_sub(n1) > params::MAX_TICKS as i64 {
                    log::warn!(
                        "{} axis tick step {} gives too many gridlines, only boundary lines are kept",
                        self.letter,
                        dtick
                    );
                    self.boundary_values(&mut lines);
                    return lines;
                }

                if let Some(line) = self.axis.grid() {
                    for k in n1..=n2 {
                        let v = tick0 + dtick * k as f64;
                        lines
                            .major
                            .push(self.value_line(v, GridlineKind::Major, line));
                    }
                }

                if let Some(line) = self.axis.minor_grid() {
                    for k in n1 - 1..n2 + 1 {
                        let v0 = tick0 + dtick * k as f64;
                        for i in 0..minor_count {
                            let v = v0 + dtick * (i + 1) as f64 / (minor_count + 1) as f64;
                            if !self.in_range(v) {
                                continue;
                            }
                            lines
                                .minor
                                .push(self.value_line(v, GridlineKind::Minor, line));
                        }
                    }
                }

                self.boundary_values(&mut lines);
            }
        }

        log::trace!(
            "{} axis gridlines: {} major, {} minor, {} boundary",
            self.letter,
            lines.major.len(),
            lines.minor.len(),
            lines.boundary.len()
        );
        lines
    }
}

/// Compute the gridlines of axis `letter`, designed by `axis`
pub fn calc_gridlines(
    engine: &CoordinateEngine,
    letter: AxisLetter,
    axis: &des::CarpetAxis,
) -> AxisLines {
    Builder {
        engine,
        letter,
        axis,
    }
    .build()
}
