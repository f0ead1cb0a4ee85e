//! Boundary of a carpet, used to clip plots drawn over it.

use plotive_carpet_base::geom::Path;

use crate::engine::ControlGrid;
use crate::path::{self, Curve};
use crate::scale::CoordMapXy;

/// The four boundary segments of a carpet, traversed counter-clockwise in grid space:
/// along the first row (lowest b), along the last column (highest a),
/// backwards along the last row (highest b), and backwards along the first column (lowest a).
///
/// Each segment comes from the control grid, and is bicubic if the axis
/// it runs along is smoothed.
pub fn clip_segments(ctrl: &ControlGrid, a_smooth: bool, b_smooth: bool) -> [Curve; 4] {
    let nea = ctrl.nea();
    let neb = ctrl.neb();

    let row = |je: usize| {
        let mut c = Curve::with_capacity(nea, a_smooth);
        for ie in 0..nea {
            c.push(ctrl.point(je, ie));
        }
        c
    };
    let col = |ie: usize| {
        let mut c = Curve::with_capacity(neb, b_smooth);
        for je in 0..neb {
            c.push(ctrl.point(je, ie));
        }
        c
    };

    [
        row(0),
        col(nea - 1),
        row(neb - 1).reversed(),
        col(0).reversed(),
    ]
}

/// Build the closed clip path of the carpet on the surface
pub fn clip_path(segments: &[Curve; 4], map: &CoordMapXy<'_>) -> Option<Path> {
    path::closed_path(segments.iter(), map)
}
