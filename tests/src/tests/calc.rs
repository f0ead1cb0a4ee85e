use plotive_carpet::calc::{Error, GridlineKind};
use plotive_carpet::des::{self, CarpetAxis, TickMode};
use plotive_carpet::geom::PathVerb;
use plotive_carpet::scale::{CoordMapXy, LinCoordMap};
use plotive_carpet::{AxisLetter, Calc};
use rand::seq::SliceRandom;

use crate::{assert_close, predictable_rng, ref_axes, ref_carpet, ref_coords};

#[test]
fn reference_carpet_lines() {
    let calc = ref_carpet(1.0, 1.0).calc().unwrap();

    let a_lines = calc.a_lines();
    assert_eq!(a_lines.major.len(), 4);
    assert_eq!(a_lines.boundary.len(), 2);
    assert!(a_lines.minor.is_empty());
    for gl in &a_lines.major {
        assert_eq!(gl.kind, GridlineKind::Major);
        assert!(gl.curve.bicubic);
        assert_eq!(gl.curve.len(), 13);
    }

    let b_lines = calc.b_lines();
    assert_eq!(b_lines.major.len(), 5);
    for gl in &b_lines.major {
        assert_eq!(gl.curve.len(), 10);
    }
    assert_eq!(calc.labels(AxisLetter::A).len(), 4);
    assert_eq!(calc.labels(AxisLetter::B).len(), 5);
    assert_eq!(calc.labels(AxisLetter::B)[0].text, "b = 1");
}

#[test]
fn linear_ticks_follow_the_carpet() {
    let (_, b) = ref_axes();
    let carpet = ref_carpet(1.0, 1.0).with_a_axis(
        CarpetAxis::new()
            .with_smoothing(1.0)
            .with_tick_mode(TickMode::Linear {
                tick0: 4.0,
                dtick: 0.5,
            })
            .with_minor_grid_count(1),
    );
    let calc = carpet.calc().unwrap();
    let lines = calc.a_lines();

    let values: Vec<f64> = lines.major.iter().map(|gl| gl.value).collect();
    assert_eq!(values, vec![4.0, 4.5, 5.0, 5.5, 6.0]);
    assert_eq!(lines.minor.len(), 4);

    let engine = calc.engine();
    for gl in &lines.major {
        for (k, knot) in gl.curve.knots().enumerate() {
            let xy = engine.ab2xy(gl.value, b[k], false).unwrap();
            assert_close!(knot.x, xy.x);
            assert_close!(knot.y, xy.y);
        }
    }
}

#[test]
fn clip_path_is_closed() {
    let calc = ref_carpet(1.0, 1.0).calc().unwrap();
    let xext = calc.padded_x_extent().unwrap();
    let yext = calc.padded_y_extent().unwrap();
    let xm = LinCoordMap::new(400.0, (0.0, 0.0), xext);
    let ym = LinCoordMap::new(300.0, (0.0, 0.0), yext).reversed();
    let map = CoordMapXy::new(&xm, &ym);

    let path = calc.clip_path(&map).unwrap();
    let verbs = path.verbs();
    assert_eq!(verbs[0], PathVerb::Move);
    assert_eq!(*verbs.last().unwrap(), PathVerb::Close);
    let cubics = verbs.iter().filter(|v| **v == PathVerb::Cubic).count();
    // 3 cubic pieces along a, 4 along b, on each side
    assert_eq!(cubics, 14);
}

#[test]
fn clip_segments_meet_at_the_corners() {
    let calc = ref_carpet(1.0, 0.0).calc().unwrap();
    let segs = calc.clip_segments();
    for k in 0..4 {
        let end = segs[k].point(segs[k].len() - 1);
        let start = segs[(k + 1) % 4].point(0);
        assert_eq!(end, start);
    }
    let engine = calc.engine();
    let corner = engine.ab2xy(6.0, 1.0, false).unwrap();
    assert_close!(segs[1].point(0).x, corner.x);
    assert_close!(segs[1].point(0).y, corner.y);
}

#[test]
fn cheater_carpet_spans_unit_range() {
    let (a, b) = ref_axes();
    let (_, y) = ref_coords();
    let carpet = des::Carpet::new(a, b).with_y(y.into());
    let calc = carpet.calc().unwrap();

    let x = calc.engine().x();
    let ext = calc.x_extent().unwrap();
    assert_close!(ext.min(), 0.0);
    assert_close!(ext.max(), 1.0);
    // a at its start and b at its end gives the lowest x
    assert_close!(x[(4, 0)], 0.0);
    assert_close!(x[(0, 3)], 1.0);
    assert_close!(x[(0, 0)], 0.5);
}

#[test]
fn sparse_coordinates_are_filled() {
    let (a, b) = ref_axes();
    let (_, y) = ref_coords();
    let mut sparse: Vec<Vec<Option<f64>>> = y
        .iter()
        .map(|row| row.iter().copied().map(Some).collect())
        .collect();
    sparse[2][1] = None;
    sparse[4][3] = None;
    let carpet = des::Carpet::new(a, b).with_y(sparse.into());
    let calc = carpet.calc().unwrap();

    let filled = calc.engine().y();
    for (j, row) in y.iter().enumerate() {
        for (i, &v) in row.iter().enumerate() {
            if (j, i) == (2, 1) || (j, i) == (4, 3) {
                assert!(filled[(j, i)].is_finite());
            } else {
                assert_eq!(filled[(j, i)], v);
            }
        }
    }
}

#[test]
fn shuffled_axis_is_rejected() {
    let (a, b) = ref_axes();
    let mut rng = predictable_rng(None);
    let mut shuffled = a.clone();
    while shuffled == a || shuffled.iter().rev().copied().eq(a.iter().copied()) {
        shuffled.shuffle(&mut rng);
    }
    let (x, y) = ref_coords();
    let carpet = des::Carpet::new(shuffled, b)
        .with_x(x.into())
        .with_y(y.into());
    assert_eq!(
        carpet.calc().unwrap_err(),
        Error::NonMonotonicAxis(AxisLetter::A)
    );
}

#[test]
fn mismatched_grid_is_rejected() {
    let (a, b) = ref_axes();
    let (_, mut y) = ref_coords();
    y.pop();
    let carpet = des::Carpet::new(a, b).with_y(y.into());
    assert!(matches!(carpet.calc(), Err(Error::InconsistentData(_))));
}

#[test]
fn axis_line_between_values() {
    let calc = ref_carpet(1.0, 1.0).calc().unwrap();
    let line = calc.axis_line(AxisLetter::A, 2.5, (4.2, 5.5));
    assert!(line.bicubic);
    // 4.2 -> 4.5 -> 5 -> 5.5
    assert_eq!(line.knots().count(), 4);

    let engine = calc.engine();
    let first = engine.ab2xy(4.2, 2.5, false).unwrap();
    let last = engine.ab2xy(5.5, 2.5, false).unwrap();
    assert_close!(line.point(0).x, first.x);
    assert_close!(line.point(0).y, first.y);
    assert_close!(line.point(line.len() - 1).x, last.x);
    assert_close!(line.point(line.len() - 1).y, last.y);
}
