use plotive_carpet::data::{Grid, RelaxationParams, smooth_fill_2d};
use rand::Rng;

use crate::{assert_close, predictable_rng};

fn axes() -> (Vec<f64>, Vec<f64>) {
    (
        vec![0.0, 1.0, 1.5, 3.0, 4.0, 6.0],
        vec![-2.0, -1.0, 0.5, 1.0, 2.5, 3.0],
    )
}

fn plane(a: f64, b: f64) -> f64 {
    1.5 * a - 0.5 * b + 2.0
}

#[test]
fn dense_grid_is_returned_as_is() {
    let (a, b) = axes();
    let mut rng = predictable_rng(None);
    let dense = Grid::from_fn(a.len(), b.len(), |_, _| rng.random_range(-10.0..10.0));
    let sparse = dense.map(|v| Some(*v));
    let filled = smooth_fill_2d(sparse, &a, &b, &RelaxationParams::default());
    assert_eq!(filled.values(), dense.values());
}

#[test]
fn random_interior_holes_of_a_plane() {
    let (a, b) = axes();
    let params = RelaxationParams::default()
        .with_tolerance(1e-13)
        .with_max_iterations(20000);
    let mut rng = predictable_rng(None);

    for _ in 0..10 {
        let mut grid = Grid::from_fn(a.len(), b.len(), |j, i| Some(plane(a[i], b[j])));
        let mut holes = Vec::new();
        while holes.len() < 5 {
            let hole = (
                rng.random_range(1..b.len() - 1),
                rng.random_range(1..a.len() - 1),
            );
            if !holes.contains(&hole) {
                holes.push(hole);
                grid[hole] = None;
            }
        }

        let filled = smooth_fill_2d(grid, &a, &b, &params);
        for &(j, i) in &holes {
            assert_close!(filled[(j, i)], plane(a[i], b[j]), 1e-6);
        }
    }
}
