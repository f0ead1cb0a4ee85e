/*!
 * The calc step of a carpet.
 *
 * [`Calc::calc`] validates a [`des::Carpet`], supplies its missing coordinates,
 * builds the [`CoordinateEngine`] and derives from it everything needed to draw the carpet:
 * gridlines, tick labels, the clip region and the cartesian extents.
 * The result is a [`CarpetCalc`].
 */
use std::fmt;

use plotive_carpet_base::geom::Path;

use crate::data::{self, CheaterAxis, Grid, NumBounds};
use crate::des::{self, CheaterType, TickMode};
use crate::engine::{AxisLetter, CoordinateEngine, Smoothing};
use crate::path::Curve;
use crate::scale::CoordMapXy;
use crate::search::distinct_vals;
use crate::{ColorU8, params};

pub mod axis_line;
pub mod clip;
pub mod gridlines;
pub mod labels;

pub use axis_line::axis_aligned_line;
pub use gridlines::{AxisLines, Gridline, GridlineKind};
pub use labels::{Label, Orientation, TitleAnchor};

/// Errors that can occur during the calc step
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// An axis has no value
    EmptyAxis(AxisLetter),
    /// An axis has a single value, so the carpet has no cell
    DegenerateAxis(AxisLetter),
    /// The values of an axis are neither strictly increasing nor strictly decreasing
    NonMonotonicAxis(AxisLetter),
    /// An axis has NaN or infinite values
    NonFiniteAxis(AxisLetter),
    /// Coordinate grids do not match the axes
    InconsistentData(String),
    /// Smoothing factor out of `[0, 1.3]`
    InvalidSmoothing(AxisLetter, f64),
    /// Tick step that is not strictly positive, non-finite tick values,
    /// or a step so small that the axis would get too many gridlines
    InvalidTickStep(AxisLetter),
    /// The y coordinates are missing
    MissingCoordinates,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyAxis(letter) => write!(f, "Carpet axis {letter} has no value"),
            Error::DegenerateAxis(letter) => {
                write!(f, "Carpet axis {letter} needs at least 2 values")
            }
            Error::NonMonotonicAxis(letter) => {
                write!(f, "Carpet axis {letter} is not strictly monotonic")
            }
            Error::NonFiniteAxis(letter) => {
                write!(f, "Carpet axis {letter} has non-finite values")
            }
            Error::InconsistentData(reason) => write!(f, "Inconsistent carpet data: {reason}"),
            Error::InvalidSmoothing(letter, smoothing) => write!(
                f,
                "Invalid smoothing {smoothing} on carpet axis {letter} (expected 0 to {})",
                params::MAX_SMOOTHING
            ),
            Error::InvalidTickStep(letter) => {
                write!(f, "Invalid tick step on carpet axis {letter}")
            }
            Error::MissingCoordinates => write!(f, "Carpet y coordinates are missing"),
        }
    }
}

impl std::error::Error for Error {}

/// Resolved style of a line
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Line color
    pub color: ColorU8,
    /// Line width in figure units
    pub width: f32,
    /// Line pattern
    pub pattern: des::LinePattern,
}

impl Stroke {
    /// Resolve the style of `line` on an axis of color `axis_color`
    pub fn resolve(line: &des::Line, axis_color: ColorU8) -> Self {
        Stroke {
            color: line.color.resolve(axis_color),
            width: line.width,
            pattern: line.pattern.clone(),
        }
    }
}

/// Trait for running the calc step of a design
pub trait Calc {
    /// Validate the design and compute the carpet
    fn calc(&self) -> Result<CarpetCalc, Error>;
}

impl Calc for des::Carpet {
    fn calc(&self) -> Result<CarpetCalc, Error> {
        check_axis(AxisLetter::A, self.a())?;
        check_axis(AxisLetter::B, self.b())?;
        let a_smoothing = check_axis_design(AxisLetter::A, self.a_axis(), self.a())?;
        let b_smoothing = check_axis_design(AxisLetter::B, self.b_axis(), self.b())?;

        let y = self.y().ok_or(Error::MissingCoordinates)?;
        let y = coords_grid('y', y, self.a(), self.b())?;
        let y = data::smooth_fill_2d(y, self.a(), self.b(), self.relaxation());

        let x = match self.x() {
            Some(x) => {
                let x = coords_grid('x', x, self.a(), self.b())?;
                data::smooth_fill_2d(x, self.a(), self.b(), self.relaxation())
            }
            None => data::cheater_basis(
                cheater_axis(self.a_axis().cheater_type(), self.a()),
                cheater_axis(self.b_axis().cheater_type(), self.b()),
                self.cheater_slope(),
            ),
        };

        let engine = CoordinateEngine::new(
            self.a().to_vec(),
            self.b().to_vec(),
            x,
            y,
            a_smoothing,
            b_smoothing,
        );
        Ok(CarpetCalc::new(
            engine,
            self.a_axis().clone(),
            self.b_axis().clone(),
        ))
    }
}

fn check_axis(letter: AxisLetter, vals: &[f64]) -> Result<(), Error> {
    match vals.len() {
        0 => return Err(Error::EmptyAxis(letter)),
        1 => return Err(Error::DegenerateAxis(letter)),
        _ => (),
    }
    if vals.iter().any(|v| !v.is_finite()) {
        return Err(Error::NonFiniteAxis(letter));
    }
    let increasing = vals.windows(2).all(|w| w[1] > w[0]);
    let decreasing = vals.windows(2).all(|w| w[1] < w[0]);
    if !increasing && !decreasing {
        return Err(Error::NonMonotonicAxis(letter));
    }
    // values equal within rounding errors would give degenerate cells
    if distinct_vals(vals).vals.len() != vals.len() {
        return Err(Error::NonMonotonicAxis(letter));
    }
    Ok(())
}

fn check_axis_design(
    letter: AxisLetter,
    axis: &des::CarpetAxis,
    vals: &[f64],
) -> Result<Smoothing, Error> {
    let s = axis.smoothing();
    if !(0.0..=params::MAX_SMOOTHING).contains(&s) {
        return Err(Error::InvalidSmoothing(letter, s));
    }
    let smoothing = Smoothing::from_factor(s).ok_or(Error::InvalidSmoothing(letter, s))?;

    let valid_ticks = match axis.tick_mode() {
        TickMode::Array { dtick, .. } => dtick > 0,
        TickMode::Linear { tick0, dtick } => {
            let span = (vals[vals.len() - 1] - vals[0]).abs();
            tick0.is_finite()
                && dtick.is_finite()
                && dtick > 0.0
                && span / dtick < params::MAX_TICKS as f64
        }
    };
    if !valid_ticks {
        return Err(Error::InvalidTickStep(letter));
    }
    Ok(smoothing)
}

fn coords_grid(
    name: char,
    coords: &des::Coords,
    a: &[f64],
    b: &[f64],
) -> Result<Grid<Option<f64>>, Error> {
    let grid = Grid::from_rows(coords.sparse_rows())
        .map_err(|err| Error::InconsistentData(format!("{name} grid: {err}")))?;
    if grid.na() != a.len() || grid.nb() != b.len() {
        return Err(Error::InconsistentData(format!(
            "{name} grid is {}x{}, expected {}x{} (b rows by a columns)",
            grid.nb(),
            grid.na(),
            b.len(),
            a.len()
        )));
    }
    if grid.values().iter().all(Option::is_none) {
        return Err(Error::InconsistentData(format!("{name} grid has no value")));
    }
    Ok(grid)
}

fn cheater_axis(ty: CheaterType, vals: &[f64]) -> CheaterAxis<'_> {
    match ty {
        CheaterType::Index => CheaterAxis::Count(vals.len()),
        CheaterType::Value => CheaterAxis::Values(vals),
    }
}

/// A computed carpet
#[derive(Debug, Clone)]
pub struct CarpetCalc {
    engine: CoordinateEngine,
    a_axis: des::CarpetAxis,
    b_axis: des::CarpetAxis,

    a_lines: AxisLines,
    b_lines: AxisLines,
    a_labels: Vec<Label>,
    b_labels: Vec<Label>,
    clip: [Curve; 4],
    x_extent: Option<NumBounds>,
    y_extent: Option<NumBounds>,
}

impl CarpetCalc {
    /// Derive everything from `engine` and the axis designs.
    /// The designs are trusted to have been validated.
    pub fn new(engine: CoordinateEngine, a_axis: des::CarpetAxis, b_axis: des::CarpetAxis) -> Self {
        let mut calc = CarpetCalc {
            engine,
            a_axis,
            b_axis,
            a_lines: AxisLines::default(),
            b_lines: AxisLines::default(),
            a_labels: Vec::new(),
            b_labels: Vec::new(),
            clip: Default::default(),
            x_extent: None,
            y_extent: None,
        };
        calc.derive();
        calc
    }

    fn derive(&mut self) {
        let e = &self.engine;
        self.a_lines = gridlines::calc_gridlines(e, AxisLetter::A, &self.a_axis);
        self.b_lines = gridlines::calc_gridlines(e, AxisLetter::B, &self.b_axis);
        self.a_labels = labels::calc_labels(e, AxisLetter::A, &self.a_axis, &self.a_lines.major);
        self.b_labels = labels::calc_labels(e, AxisLetter::B, &self.b_axis, &self.b_lines.major);
        self.clip = clip::clip_segments(
            e.ctrl(),
            e.a_smoothing().is_smooth(),
            e.b_smoothing().is_smooth(),
        );
        self.x_extent = data::array_minmax(e.x());
        self.y_extent = data::array_minmax(e.y());

        log::debug!(
            "carpet calc: {}x{} grid, smoothing a={} b={}, {} a lines, {} b lines, {} labels",
            e.na(),
            e.nb(),
            e.a_smoothing().factor(),
            e.b_smoothing().factor(),
            self.a_lines.iter().count(),
            self.b_lines.iter().count(),
            self.a_labels.len() + self.b_labels.len(),
        );
    }

    /// Rebuild the control grids, then everything derived from them
    pub fn set_scale(&mut self) {
        self.engine.set_scale();
        self.derive();
    }

    /// Replace the coordinate grids and recompute the carpet
    pub fn update_xy(&mut self, x: Grid<f64>, y: Grid<f64>) -> Result<(), Error> {
        let shape = (self.engine.na(), self.engine.nb());
        for (name, g) in [('x', &x), ('y', &y)] {
            if (g.na(), g.nb()) != shape {
                return Err(Error::InconsistentData(format!(
                    "{name} grid is {}x{}, expected {}x{} (b rows by a columns)",
                    g.nb(),
                    g.na(),
                    shape.1,
                    shape.0
                )));
            }
        }
        self.engine.update_xy(x, y);
        self.derive();
        Ok(())
    }

    /// The coordinate engine
    pub fn engine(&self) -> &CoordinateEngine {
        &self.engine
    }

    /// The design of axis `letter`
    pub fn axis(&self, letter: AxisLetter) -> &des::CarpetAxis {
        match letter {
            AxisLetter::A => &self.a_axis,
            AxisLetter::B => &self.b_axis,
        }
    }

    /// The gridlines of the a axis
    pub fn a_lines(&self) -> &AxisLines {
        &self.a_lines
    }

    /// The gridlines of the b axis
    pub fn b_lines(&self) -> &AxisLines {
        &self.b_lines
    }

    /// The gridlines of axis `letter`
    pub fn lines(&self, letter: AxisLetter) -> &AxisLines {
        match letter {
            AxisLetter::A => &self.a_lines,
            AxisLetter::B => &self.b_lines,
        }
    }

    /// The tick labels of axis `letter`
    pub fn labels(&self, letter: AxisLetter) -> &[Label] {
        match letter {
            AxisLetter::A => &self.a_labels,
            AxisLetter::B => &self.b_labels,
        }
    }

    /// The anchor of the title of axis `letter`, if the axis has a title
    pub fn title_anchor(&self, letter: AxisLetter) -> Option<TitleAnchor> {
        self.axis(letter)
            .title()
            .map(|_| labels::axis_title_anchor(&self.engine, letter))
    }

    /// The four boundary segments of the carpet
    pub fn clip_segments(&self) -> &[Curve; 4] {
        &self.clip
    }

    /// The closed boundary of the carpet on the surface
    pub fn clip_path(&self, map: &CoordMapXy<'_>) -> Option<Path> {
        clip::clip_path(&self.clip, map)
    }

    /// Line along axis `letter` between two of its values, at constant value `iso`
    /// of the other axis. See [`axis_aligned_line`].
    pub fn axis_line(&self, letter: AxisLetter, iso: f64, range: (f64, f64)) -> Curve {
        axis_aligned_line(&self.engine, letter, iso, range)
    }

    /// Extent of the x coordinates
    pub fn x_extent(&self) -> Option<NumBounds> {
        self.x_extent
    }

    /// Extent of the y coordinates
    pub fn y_extent(&self) -> Option<NumBounds> {
        self.y_extent
    }

    /// Extent of the x coordinates, with some padding
    pub fn padded_x_extent(&self) -> Option<NumBounds> {
        self.x_extent.map(|b| b.grown(params::EXTENT_PADDING))
    }

    /// Extent of the y coordinates, with some padding
    pub fn padded_y_extent(&self) -> Option<NumBounds> {
        self.y_extent.map(|b| b.grown(params::EXTENT_PADDING))
    }
}
