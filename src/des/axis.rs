//! Carpet axis design structures

use crate::ColorU8;
use crate::engine::AxisLetter;
use crate::params;

/// Where the gridlines of an axis are placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickMode {
    /// Gridlines on data points: every `dtick` index, starting at index `tick0`
    Array {
        /// Index of the first gridline
        tick0: usize,
        /// Number of data points between gridlines, at least 1
        dtick: usize,
    },
    /// Gridlines at the values `tick0 + n * dtick` within the data range
    Linear {
        /// Reference gridline value
        tick0: f64,
        /// Gridline step, strictly positive
        dtick: f64,
    },
}

impl Default for TickMode {
    fn default() -> Self {
        TickMode::Array { tick0: 0, dtick: 1 }
    }
}

/// Which ends of the major gridlines receive a tick label
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ShowTickLabels {
    /// At the start of each gridline (default)
    #[default]
    Start,
    /// At the end of each gridline
    End,
    /// At both ends
    Both,
    /// No tick label
    None,
}

impl ShowTickLabels {
    /// Whether labels are placed at the start of the gridlines
    pub fn at_start(&self) -> bool {
        matches!(self, ShowTickLabels::Start | ShowTickLabels::Both)
    }

    /// Whether labels are placed at the end of the gridlines
    pub fn at_end(&self) -> bool {
        matches!(self, ShowTickLabels::End | ShowTickLabels::Both)
    }
}

/// How an axis contributes to synthetic x coordinates, when x is not provided
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CheaterType {
    /// Positions are evenly spaced by data index
    Index,
    /// Positions follow the axis values (default)
    #[default]
    Value,
}

/// Formatting of the values in tick labels
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LabelFormat {
    /// Shortest representation, rounding errors removed (default)
    #[default]
    Auto,
    /// Fixed number of decimals
    Prec(usize),
}

impl LabelFormat {
    /// Format `value` into a string
    pub fn format(&self, value: f64) -> String {
        match *self {
            LabelFormat::Auto => {
                let rounded = format!("{value:.12e}").parse::<f64>().unwrap_or(value);
                if rounded == 0.0 {
                    "0".to_string()
                } else {
                    rounded.to_string()
                }
            }
            LabelFormat::Prec(prec) => format!("{value:.prec$}"),
        }
    }
}

/// Dash pattern for dashed lines
///
/// The lengths are relative to the line width.
#[derive(Debug, Clone, PartialEq)]
pub struct Dash(pub Vec<f32>);

impl Default for Dash {
    fn default() -> Self {
        Dash(vec![5.0, 5.0])
    }
}

/// Line pattern defines how the line is drawn
#[derive(Debug, Default, Clone, PartialEq)]
pub enum LinePattern {
    /// Solid line
    #[default]
    Solid,
    /// Dashed line. The pattern is relative to the line width.
    Dash(Dash),
    /// Dotted line. Equivalent to Dash(1.0, 1.0)
    Dot,
}

impl From<Dash> for LinePattern {
    fn from(dash: Dash) -> Self {
        LinePattern::Dash(dash)
    }
}

/// Color of a carpet line, either derived from the axis color or fixed
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum LineColor {
    /// The axis color (default)
    #[default]
    Axis,
    /// The axis color, faded for major gridlines
    Grid,
    /// The axis color, faded further for minor gridlines
    MinorGrid,
    /// A fixed color
    Custom(ColorU8),
}

impl LineColor {
    /// Resolve the color given the color of the axis
    pub fn resolve(&self, axis_color: ColorU8) -> ColorU8 {
        match self {
            LineColor::Axis => axis_color,
            LineColor::Grid => axis_color.with_opacity(params::GRID_OPACITY),
            LineColor::MinorGrid => axis_color.with_opacity(params::MINOR_GRID_OPACITY),
            LineColor::Custom(c) => *c,
        }
    }
}

impl From<ColorU8> for LineColor {
    fn from(color: ColorU8) -> Self {
        LineColor::Custom(color)
    }
}

/// Line style of gridlines and boundary lines
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Line color
    pub color: LineColor,
    /// Line width in figure units
    pub width: f32,
    /// Line pattern
    pub pattern: LinePattern,
}

impl Line {
    /// Set the line color, returning self for chaining
    pub fn with_color(self, color: LineColor) -> Self {
        Line { color, ..self }
    }

    /// Set the line width in figure units, returning self for chaining
    pub fn with_width(self, width: f32) -> Self {
        Line { width, ..self }
    }

    /// Set the line pattern, returning self for chaining
    pub fn with_pattern(self, pattern: LinePattern) -> Self {
        Line { pattern, ..self }
    }
}

impl Default for Line {
    fn default() -> Self {
        LineColor::Axis.into()
    }
}

impl From<LineColor> for Line {
    fn from(color: LineColor) -> Self {
        Line {
            color,
            width: 1.0,
            pattern: LinePattern::default(),
        }
    }
}

impl From<ColorU8> for Line {
    fn from(color: ColorU8) -> Self {
        LineColor::Custom(color).into()
    }
}

impl From<(ColorU8, f32)> for Line {
    fn from((color, width): (ColorU8, f32)) -> Self {
        Line {
            color: LineColor::Custom(color),
            width,
            pattern: LinePattern::default(),
        }
    }
}

impl From<(ColorU8, f32, Dash)> for Line {
    fn from((color, width, dash): (ColorU8, f32, Dash)) -> Self {
        Line {
            color: LineColor::Custom(color),
            width,
            pattern: LinePattern::Dash(dash),
        }
    }
}

/// Design of one of the two carpet axes
#[derive(Debug, Clone)]
pub struct CarpetAxis {
    smoothing: f64,
    cheater_type: CheaterType,
    tick_mode: TickMode,

    show_tick_labels: ShowTickLabels,
    label_prefix: Option<String>,
    label_suffix: String,
    label_format: LabelFormat,
    label_padding: f32,
    tick_angle: Option<f32>,

    title: Option<String>,
    title_offset: f32,

    color: ColorU8,
    grid: Option<Line>,
    minor_grid: Option<Line>,
    minor_grid_count: u32,
    start_line: Option<Line>,
    end_line: Option<Line>,
}

impl Default for CarpetAxis {
    fn default() -> Self {
        CarpetAxis {
            smoothing: params::SMOOTHING,
            cheater_type: CheaterType::default(),
            tick_mode: TickMode::default(),

            show_tick_labels: ShowTickLabels::default(),
            label_prefix: None,
            label_suffix: String::new(),
            label_format: LabelFormat::default(),
            label_padding: params::LABEL_PADDING,
            tick_angle: None,

            title: None,
            title_offset: params::TITLE_OFFSET,

            color: params::AXIS_COLOR,
            grid: Some(LineColor::Grid.into()),
            minor_grid: Some(LineColor::MinorGrid.into()),
            minor_grid_count: 0,
            start_line: Some(Line::default()),
            end_line: Some(Line::default()),
        }
    }
}

impl CarpetAxis {
    /// Create a new axis with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the smoothing factor and return self for chaining.
    /// 0 draws straight segments between data points, up to 1.3 for smoothed curves.
    pub fn with_smoothing(self, smoothing: f64) -> Self {
        Self { smoothing, ..self }
    }

    /// Set the cheater type and return self for chaining
    pub fn with_cheater_type(self, cheater_type: CheaterType) -> Self {
        Self {
            cheater_type,
            ..self
        }
    }

    /// Set the tick mode and return self for chaining
    pub fn with_tick_mode(self, tick_mode: TickMode) -> Self {
        Self { tick_mode, ..self }
    }

    /// Set where tick labels are shown and return self for chaining
    pub fn with_show_tick_labels(self, show_tick_labels: ShowTickLabels) -> Self {
        Self {
            show_tick_labels,
            ..self
        }
    }

    /// Set the label prefix and return self for chaining.
    /// Default is the axis letter followed by `" = "`.
    pub fn with_label_prefix(self, prefix: impl Into<String>) -> Self {
        Self {
            label_prefix: Some(prefix.into()),
            ..self
        }
    }

    /// Set the label suffix and return self for chaining
    pub fn with_label_suffix(self, suffix: impl Into<String>) -> Self {
        Self {
            label_suffix: suffix.into(),
            ..self
        }
    }

    /// Set the label number format and return self for chaining
    pub fn with_label_format(self, label_format: LabelFormat) -> Self {
        Self {
            label_format,
            ..self
        }
    }

    /// Set the padding between labels and gridline ends and return self for chaining
    pub fn with_label_padding(self, label_padding: f32) -> Self {
        Self {
            label_padding,
            ..self
        }
    }

    /// Set a fixed tick label angle in degrees and return self for chaining.
    /// By default labels follow the gridline tangent.
    pub fn with_tick_angle(self, angle: f32) -> Self {
        Self {
            tick_angle: Some(angle),
            ..self
        }
    }

    /// Set the axis title and return self for chaining
    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..self
        }
    }

    /// Set the extra offset of the title and return self for chaining
    pub fn with_title_offset(self, title_offset: f32) -> Self {
        Self {
            title_offset,
            ..self
        }
    }

    /// Set the axis color and return self for chaining
    pub fn with_color(self, color: ColorU8) -> Self {
        Self { color, ..self }
    }

    /// Set the major grid style and return self for chaining.
    /// `None` disables the major gridlines.
    pub fn with_grid(self, grid: Option<Line>) -> Self {
        Self { grid, ..self }
    }

    /// Set the minor grid style and return self for chaining.
    /// `None` disables the minor gridlines.
    pub fn with_minor_grid(self, minor_grid: Option<Line>) -> Self {
        Self { minor_grid, ..self }
    }

    /// Set the number of minor gridlines between two major ones and return self for chaining
    pub fn with_minor_grid_count(self, minor_grid_count: u32) -> Self {
        Self {
            minor_grid_count,
            ..self
        }
    }

    /// Set the style of the line on the first axis value and return self for chaining.
    /// `None` disables it.
    pub fn with_start_line(self, start_line: Option<Line>) -> Self {
        Self { start_line, ..self }
    }

    /// Set the style of the line on the last axis value and return self for chaining.
    /// `None` disables it.
    pub fn with_end_line(self, end_line: Option<Line>) -> Self {
        Self { end_line, ..self }
    }

    /// The smoothing factor
    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// The cheater type
    pub fn cheater_type(&self) -> CheaterType {
        self.cheater_type
    }

    /// The tick mode
    pub fn tick_mode(&self) -> TickMode {
        self.tick_mode
    }

    /// Where tick labels are shown
    pub fn show_tick_labels(&self) -> ShowTickLabels {
        self.show_tick_labels
    }

    /// The label prefix of axis `letter`, resolving the default
    pub fn label_prefix(&self, letter: AxisLetter) -> String {
        match &self.label_prefix {
            Some(p) => p.clone(),
            None => format!("{letter} = "),
        }
    }

    /// The label suffix
    pub fn label_suffix(&self) -> &str {
        &self.label_suffix
    }

    /// The label number format
    pub fn label_format(&self) -> LabelFormat {
        self.label_format
    }

    /// The padding between labels and gridline ends
    pub fn label_padding(&self) -> f32 {
        self.label_padding
    }

    /// The fixed tick label angle, if any
    pub fn tick_angle(&self) -> Option<f32> {
        self.tick_angle
    }

    /// The axis title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The extra offset of the title
    pub fn title_offset(&self) -> f32 {
        self.title_offset
    }

    /// The axis color
    pub fn color(&self) -> ColorU8 {
        self.color
    }

    /// The major grid style
    pub fn grid(&self) -> Option<&Line> {
        self.grid.as_ref()
    }

    /// The minor grid style
    pub fn minor_grid(&self) -> Option<&Line> {
        self.minor_grid.as_ref()
    }

    /// The number of minor gridlines between two major ones
    pub fn minor_grid_count(&self) -> u32 {
        self.minor_grid_count
    }

    /// The style of the line on the first axis value
    pub fn start_line(&self) -> Option<&Line> {
        self.start_line.as_ref()
    }

    /// The style of the line on the last axis value
    pub fn end_line(&self) -> Option<&Line> {
        self.end_line.as_ref()
    }
}
