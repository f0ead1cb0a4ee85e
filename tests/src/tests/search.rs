use plotive_carpet::search::{Bins, distinct_vals, find_bin};
use rand::Rng;

use crate::predictable_rng;

fn random_edges(rng: &mut impl Rng, n: usize) -> Vec<f64> {
    let mut v = rng.random_range(-50.0..50.0);
    (0..n)
        .map(|_| {
            v += rng.random_range(1.0..5.0);
            v
        })
        .collect()
}

#[test]
fn bins_of_increasing_edges() {
    let mut rng = predictable_rng(None);
    let edges = random_edges(&mut rng, 20);
    for _ in 0..500 {
        let val = rng.random_range(edges[0] - 10.0..edges[19] + 10.0);
        let k = find_bin(val, Bins::Edges(&edges), false);
        if k < 0 {
            assert!(val < edges[0]);
        } else {
            let k = k as usize;
            assert!(edges[k] <= val);
            assert!(k == 19 || val < edges[k + 1]);
        }
    }
}

#[test]
fn bins_of_decreasing_edges() {
    let mut rng = predictable_rng(Some(1));
    let mut edges = random_edges(&mut rng, 12);
    edges.reverse();
    for _ in 0..500 {
        let val = rng.random_range(edges[11] - 10.0..edges[0] + 10.0);
        let k = find_bin(val, Bins::Edges(&edges), false);
        if k < 0 {
            assert!(val > edges[0]);
        } else {
            let k = k as usize;
            assert!(edges[k] >= val);
            assert!(k == 11 || val > edges[k + 1]);
        }
    }
}

#[test]
fn values_on_edges() {
    let edges = [0.0, 1.0, 2.0, 4.0];
    for (k, &e) in edges.iter().enumerate() {
        assert_eq!(find_bin(e, Bins::Edges(&edges), false), k as isize);
        assert_eq!(find_bin(e, Bins::Edges(&edges), true), k as isize - 1);
    }
    // decreasing edges flip the predicate: an edge value lands in bin k - 1, or k with line_low
    let edges = [3.0, 2.0, 1.0, 0.0];
    for (k, &e) in edges.iter().enumerate() {
        assert_eq!(find_bin(e, Bins::Edges(&edges), false), k as isize - 1);
        assert_eq!(find_bin(e, Bins::Edges(&edges), true), k as isize);
    }
    assert_eq!(find_bin(1.0, Bins::Edges(&[0.0, 1.0, 2.0, 3.0]), false), 1);
    assert_eq!(find_bin(1.0, Bins::Edges(&[0.0, 1.0, 2.0, 3.0]), true), 0);

    let bins = Bins::Linear {
        start: 1.0,
        size: 0.5,
    };
    assert_eq!(find_bin(2.0, bins, false), 2);
    assert_eq!(find_bin(2.0, bins, true), 1);
    assert_eq!(find_bin(0.9, bins, false), -1);
}

#[test]
fn distinct_integers() {
    let mut rng = predictable_rng(None);
    let vals: Vec<f64> = (0..50)
        .map(|_| rng.random_range(0..20) as f64 * 0.5)
        .collect();

    let mut expected = vals.clone();
    expected.sort_by(f64::total_cmp);
    expected.dedup();

    let distinct = distinct_vals(&vals);
    assert_eq!(distinct.vals, expected);
    let min_diff = expected
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(f64::INFINITY, f64::min);
    assert_eq!(distinct.min_diff, min_diff);
}
