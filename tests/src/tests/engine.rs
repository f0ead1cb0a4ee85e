use plotive_carpet::data::Grid;
use plotive_carpet::{CoordinateEngine, Smoothing};
use rand::Rng;

use crate::{assert_close, predictable_rng, ref_axes, ref_coords, ref_engine};

const SMOOTHINGS: [(f64, f64); 4] = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];

#[test]
fn index_value_inversion() {
    let engine = ref_engine(1.0, 1.0);
    let mut rng = predictable_rng(None);
    let imax = (engine.na() - 1) as f64;
    let jmax = (engine.nb() - 1) as f64;
    for _ in 0..200 {
        let i = rng.random_range(0.0..=imax);
        let j = rng.random_range(0.0..=jmax);
        let (ii, jj) = engine.ab2ij(engine.ij2ab((i, j)));
        assert_close!(ii, i);
        assert_close!(jj, j);
    }
}

#[test]
fn ab2xy_follows_the_evaluator() {
    let (a, b) = ref_axes();
    let mut rng = predictable_rng(Some(42));
    for (sa, sb) in SMOOTHINGS {
        let engine = ref_engine(sa, sb);
        for _ in 0..100 {
            let av = rng.random_range(a[0]..a[a.len() - 1]);
            let bv = rng.random_range(b[0]..b[b.len() - 1]);
            let xy = engine.ab2xy(av, bv, false).unwrap();
            let (i, j) = engine.ab2ij((av, bv));
            let ev = engine.evalxy(i, j);
            assert_close!(xy.x, ev.x);
            assert_close!(xy.y, ev.y);
        }
    }
}

#[test]
fn data_points_are_interpolated() {
    let (a, b) = ref_axes();
    let (x, y) = ref_coords();
    for (sa, sb) in SMOOTHINGS {
        let engine = ref_engine(sa, sb);
        for (j, &bv) in b.iter().enumerate() {
            for (i, &av) in a.iter().enumerate() {
                let xy = engine.ab2xy(av, bv, false).unwrap();
                assert_close!(xy.x, x[j][i]);
                assert_close!(xy.y, y[j][i]);
            }
        }
    }
}

#[test]
fn control_grid_size() {
    let engine = ref_engine(1.0, 0.0);
    assert_eq!(engine.ctrl().nea(), 3 * 4 - 2);
    assert_eq!(engine.ctrl().neb(), 5);

    let engine = ref_engine(0.5, 1.3);
    assert_eq!(engine.ctrl().nea(), 10);
    assert_eq!(engine.ctrl().neb(), 13);
}

#[test]
fn bilinear_scenario() {
    let x = Grid::from_fn(3, 2, |_, i| i as f64);
    let y = Grid::from_fn(3, 2, |j, _| 10.0 * j as f64);
    let engine = CoordinateEngine::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0, 10.0],
        x,
        y,
        Smoothing::Linear,
        Smoothing::Linear,
    );
    let xy = engine.ab2xy(1.0, 10.0, false).unwrap();
    assert_eq!((xy.x, xy.y), (1.0, 10.0));
    let xy = engine.ab2xy(1.5, 5.0, false).unwrap();
    assert_close!(xy.x, 1.5);
    assert_close!(xy.y, 5.0);
}

#[test]
fn out_of_range_needs_extrapolation() {
    let engine = ref_engine(1.0, 1.0);
    assert!(engine.ab2xy(3.9, 2.0, false).is_none());
    assert!(engine.ab2xy(5.0, 5.5, false).is_none());
    assert!(engine.ab2xy(3.9, 2.0, true).is_some());
}

#[test]
fn extrapolation_is_continuous_and_linear() {
    let engine = ref_engine(1.0, 1.0);
    let b = 2.5;
    let edge = engine.ab2xy(6.0, b, false).unwrap();
    let near = engine.ab2xy_extrapolated(6.0 + 1e-9, b);
    assert_close!(near.x, edge.x, 1e-6);
    assert_close!(near.y, edge.y, 1e-6);

    let p1 = engine.ab2xy_extrapolated(6.5, b);
    let p2 = engine.ab2xy_extrapolated(7.0, b);
    assert_close!(p2.x - p1.x, p1.x - edge.x);
    assert_close!(p2.y - p1.y, p1.y - edge.y);

    let before = engine.ab2xy_extrapolated(5.0, 0.0);
    let start = engine.ab2xy(5.0, 1.0, false).unwrap();
    let further = engine.ab2xy_extrapolated(5.0, -1.0);
    assert_close!(further.x - before.x, before.x - start.x);
    assert_close!(further.y - before.y, before.y - start.y);
}

#[test]
fn exact_derivatives_match_finite_differences() {
    let h = 1e-5;
    for (sa, sb) in SMOOTHINGS {
        let engine = ref_engine(sa, sb);
        // middle of cell (1, 1)
        let (a, b) = (4.75, 2.5);
        let da = engine.dxyda(1, 1, 0.5, 0.5);
        let db = engine.dxydb(1, 1, 0.5, 0.5);

        let fa = (engine.ab2xy(a + h, b, false).unwrap() - engine.ab2xy(a - h, b, false).unwrap())
            / (2.0 * h);
        let fb = (engine.ab2xy(a, b + h, false).unwrap() - engine.ab2xy(a, b - h, false).unwrap())
            / (2.0 * h);

        assert_close!(da.x, fa.x, 1e-5);
        assert_close!(da.y, fa.y, 1e-5);
        assert_close!(db.x, fb.x, 1e-5);
        assert_close!(db.y, fb.y, 1e-5);
    }
}

#[test]
fn rough_derivatives_of_planar_carpet() {
    let a = vec![0.0, 1.0, 3.0, 4.0];
    let b = vec![10.0, 20.0, 25.0];
    let x = Grid::from_fn(4, 3, |j, i| a[i] + 2.0 * b[j]);
    let y = Grid::from_fn(4, 3, |j, i| 3.0 * a[i] - b[j]);
    let engine = CoordinateEngine::new(
        a.clone(),
        b.clone(),
        x,
        y,
        Smoothing::Linear,
        Smoothing::Linear,
    );
    for (av, bv) in [(0.0, 10.0), (2.0, 22.0), (4.0, 25.0)] {
        let da = engine.dxyda_rough(av, bv, None);
        let db = engine.dxydb_rough(av, bv, Some(0.01));
        assert_close!(da.x, 1.0);
        assert_close!(da.y, 3.0);
        assert_close!(db.x, 2.0);
        assert_close!(db.y, -1.0);
    }
}

#[test]
fn visibility_of_random_points() {
    let engine = ref_engine(1.0, 1.0);
    let mut rng = predictable_rng(Some(7));
    for _ in 0..100 {
        let a = rng.random_range(4.01..5.99);
        let b = rng.random_range(1.01..4.99);
        assert!(engine.is_visible(a, b));
        assert!(!engine.is_occluded(a, b));

        let a_out = rng.random_range(6.01..8.0);
        assert!(!engine.is_visible(a_out, b));
        assert!(engine.is_occluded(a_out, b));
    }
    // the boundary is visible within the tolerance
    assert!(engine.is_visible(4.0, 3.0));
    assert!(!engine.is_occluded(6.0, 5.0));
    assert!(engine.is_occluded(4.0, 5.1));
}

#[test]
fn rescale_is_idempotent() {
    let mut engine = ref_engine(1.0, 0.5);
    let before = engine.ab2xy(4.7, 3.3, false).unwrap();
    engine.set_scale();
    let after = engine.ab2xy(4.7, 3.3, false).unwrap();
    assert_eq!(before, after);
}
