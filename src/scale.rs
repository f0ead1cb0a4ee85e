//! Mapping between cartesian coordinates and surface pixels.

use plotive_carpet_base::geom::{Point, Xy};

use crate::data::NumBounds;

/// Maps coordinates from cartesian space to surface space, along one direction.
pub trait CoordMap: std::fmt::Debug {
    /// Map a cartesian coordinate to a surface coordinate
    fn c2p(&self, c: f64) -> f32;

    /// Map a surface coordinate to a cartesian coordinate
    fn p2c(&self, p: f32) -> f64;

    /// Surface units per cartesian unit.
    /// Negative when the surface direction is opposite to the cartesian one.
    fn dpdc(&self) -> f64;
}

/// Pair of coordinate maps for both directions of the surface
#[derive(Debug, Clone, Copy)]
pub struct CoordMapXy<'a> {
    /// Horizontal map
    pub x: &'a dyn CoordMap,
    /// Vertical map
    pub y: &'a dyn CoordMap,
}

impl<'a> CoordMapXy<'a> {
    /// Build the pair from its maps
    pub fn new(x: &'a dyn CoordMap, y: &'a dyn CoordMap) -> Self {
        CoordMapXy { x, y }
    }

    /// Map a cartesian point to the surface
    pub fn c2p(&self, xy: Xy) -> Point {
        Point::from_xy(self.x.c2p(xy.x), self.y.c2p(xy.y))
    }

    /// Map a surface point to cartesian space
    pub fn p2c(&self, p: Point) -> Xy {
        Xy::new(self.x.p2c(p.x), self.y.p2c(p.y))
    }

    /// Surface units per cartesian x unit
    pub fn dpdx(&self) -> f64 {
        self.x.dpdc()
    }

    /// Surface units per cartesian y unit
    pub fn dpdy(&self) -> f64 {
        self.y.dpdc()
    }
}

/// Linear map of cartesian bounds onto a surface extent.
///
/// Insets reserve some surface space before and after the mapped bounds.
#[derive(Debug, Clone, Copy)]
pub struct LinCoordMap {
    plot_size: f32,
    cb: NumBounds,
    reversed: bool,
}

impl LinCoordMap {
    /// Map `cb` onto `[insets.0, plot_size - insets.1]`
    pub fn new(plot_size: f32, insets: (f32, f32), cb: NumBounds) -> Self {
        let cb = Self::extend_bounds_with_insets(plot_size, insets, cb);
        LinCoordMap {
            plot_size,
            cb,
            reversed: false,
        }
    }

    /// Reverse the surface direction, as needed for vertical axes
    /// since surfaces have their origin at the top.
    pub fn reversed(self) -> Self {
        LinCoordMap {
            reversed: !self.reversed,
            ..self
        }
    }

    /// The cartesian bounds mapped to the whole surface extent
    pub fn bounds(&self) -> NumBounds {
        self.cb
    }

    fn extend_bounds_with_insets(plot_size: f32, insets: (f32, f32), cb: NumBounds) -> NumBounds {
        let plot_to_data = cb.span() / (plot_size - insets.0 - insets.1) as f64;
        NumBounds::from((
            cb.min() - insets.0 as f64 * plot_to_data,
            cb.max() + insets.1 as f64 * plot_to_data,
        ))
    }
}

impl CoordMap for LinCoordMap {
    fn c2p(&self, c: f64) -> f32 {
        let ratio = ((c - self.cb.min()) / self.cb.span()) as f32;
        if self.reversed {
            (1.0 - ratio) * self.plot_size
        } else {
            ratio * self.plot_size
        }
    }

    fn p2c(&self, p: f32) -> f64 {
        let mut ratio = (p / self.plot_size) as f64;
        if self.reversed {
            ratio = 1.0 - ratio;
        }
        self.cb.min() + ratio * self.cb.span()
    }

    fn dpdc(&self) -> f64 {
        let d = self.plot_size as f64 / self.cb.span();
        if self.reversed { -d } else { d }
    }
}
