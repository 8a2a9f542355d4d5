// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-tree checks against brute force, and read counts for pruning.

use alloc::vec::Vec;
use core::cell::Cell;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Boundary, Point, QuadTree};

/// A point that records whether its coordinates were ever looked at.
#[derive(Debug)]
struct Probe {
    id: usize,
    x: f64,
    y: f64,
    read: Cell<bool>,
}

impl Point for Probe {
    type Scalar = f64;

    fn x(&self) -> f64 {
        self.read.set(true);
        self.x
    }

    fn y(&self) -> f64 {
        self.read.set(true);
        self.y
    }
}

impl PartialEq for Probe {
    fn eq(&self, other: &Self) -> bool {
        self.read.set(true);
        other.read.set(true);
        self.id == other.id
    }
}

const WORLD: Boundary<f64> = Boundary::new(-100.0, -100.0, 100.0, 100.0);

fn probes(n: usize, seed: u64) -> Vec<Probe> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|id| Probe {
            id,
            x: rng.random_range(-100.0..100.0),
            y: rng.random_range(-100.0..100.0),
            read: Cell::new(false),
        })
        .collect()
}

fn build(probes: &[Probe]) -> QuadTree<&Probe> {
    let mut tree = QuadTree::new(4, WORLD).unwrap();
    for p in probes {
        tree.insert(p).unwrap();
    }
    reset(probes);
    tree
}

fn reset(probes: &[Probe]) {
    for p in probes {
        p.read.set(false);
    }
}

fn reads(probes: &[Probe]) -> usize {
    probes.iter().filter(|p| p.read.get()).count()
}

fn dist_sq(p: &Probe, x: f64, y: f64) -> f64 {
    let dx = p.x - x;
    let dy = p.y - y;
    dx * dx + dy * dy
}

/// Tree sizes paired with a radius that catches roughly twenty points.
const SIZES: [(usize, f64); 5] = [
    (5, 200.0),
    (100, 50.0),
    (1_000, 16.0),
    (10_000, 5.0),
    (100_000, 1.6),
];

#[test]
fn length_tracks_successful_mutations() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut tree: QuadTree<(f64, f64)> = QuadTree::default();
    let mut model: Vec<(f64, f64)> = Vec::new();
    for step in 0..2_000 {
        let p = (
            f64::from(rng.random_range(-12_i8..12)),
            f64::from(rng.random_range(-12_i8..12)),
        );
        if rng.random_bool(0.6) {
            tree.insert(p).unwrap();
            model.push(p);
        } else {
            let pos = model.iter().position(|q| *q == p);
            assert_eq!(tree.remove(&p), pos.is_some(), "step {step}");
            if let Some(i) = pos {
                model.swap_remove(i);
            }
        }
        assert_eq!(tree.len(), model.len(), "step {step}");
    }
    assert_eq!(tree.iter().count(), model.len());
    for p in &model {
        assert!(tree.contains(p), "{p:?} should be contained");
    }
    tree.clear();
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.iter().count(), 0);
}

#[test]
fn duplicates_insert_and_remove_cleanly() {
    let mut tree: QuadTree<(f64, f64)> = QuadTree::default();
    for _ in 0..100 {
        tree.insert((0.5, 0.5)).unwrap();
    }
    assert_eq!(tree.len(), 100);
    assert_eq!(tree.find_range(0.5, 0.5, 0.1).count(), 100);
    for _ in 0..100 {
        assert!(tree.remove(&(0.5, 0.5)));
    }
    assert!(!tree.remove(&(0.5, 0.5)));
    assert!(tree.is_empty());
}

#[test]
fn range_matches_brute_force() {
    let points = probes(2_000, 11);
    let tree = build(&points);
    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..50 {
        let x = rng.random_range(-120.0..120.0);
        let y = rng.random_range(-120.0..120.0);
        let r: f64 = rng.random_range(0.5..40.0);

        let mut found: Vec<usize> = tree.find_range(x, y, r).map(|p| p.id).collect();
        found.sort_unstable();
        let mut expected: Vec<usize> = points
            .iter()
            .filter(|p| dist_sq(p, x, y) < r * r)
            .map(|p| p.id)
            .collect();
        expected.sort_unstable();
        assert_eq!(found, expected, "query ({x}, {y}) radius {r}");

        let mut visited = Vec::new();
        tree.visit_range(x, y, r, |p| visited.push(p.id));
        visited.sort_unstable();
        assert_eq!(visited, expected);
    }
}

#[test]
fn nearest_matches_brute_force() {
    let points = probes(2_000, 21);
    let tree = build(&points);
    let mut rng = StdRng::seed_from_u64(22);
    for _ in 0..200 {
        let x = rng.random_range(-150.0..150.0);
        let y = rng.random_range(-150.0..150.0);
        let best = tree.find_nearest(x, y).unwrap();
        let expected = points
            .iter()
            .map(|p| dist_sq(p, x, y))
            .min_by(f64::total_cmp)
            .unwrap();
        assert_eq!(dist_sq(best, x, y), expected, "query ({x}, {y})");
    }
}

#[test]
fn range_reads_scale_with_result() {
    for (n, radius) in SIZES {
        let points = probes(n, n as u64);
        let tree = build(&points);
        let found = tree.find_range(5.0, 5.0, radius).count();
        let read = reads(&points);
        let log_n = n.ilog2() as usize;
        assert!(
            read <= 4 * (found + log_n) + 32,
            "n = {n}: read {read} points to find {found}"
        );
    }
}

#[test]
fn nearest_reads_stay_small() {
    for (n, _) in SIZES {
        let points = probes(n, n as u64 + 1);
        let tree = build(&points);
        for (x, y) in [(5.0, 5.0), (-73.2, 41.9), (99.0, -99.0)] {
            reset(&points);
            assert!(tree.find_nearest(x, y).is_some());
            let read = reads(&points);
            assert!(read <= 60, "n = {n}: read {read} points for ({x}, {y})");
        }
    }
}

#[test]
fn range_is_lazy() {
    let points = probes(10_000, 31);
    let tree = build(&points);
    let mut range = tree.find_range(0.0, 0.0, 1_000.0);
    assert!(range.next().is_some());
    assert!(reads(&points) <= 4, "first match reads a single bucket");
    assert_eq!(range.count(), 9_999);
    assert_eq!(reads(&points), 10_000);
}

#[test]
fn untouched_tree_reads_nothing() {
    let points = probes(1_000, 41);
    let tree = build(&points);
    assert_eq!(tree.find_range(0.0, 0.0, 0.0).count(), 0);
    assert_eq!(tree.find_range(500.0, 500.0, 10.0).count(), 0);
    assert_eq!(reads(&points), 0);
}

#[test]
fn single_precision_tree() {
    let mut tree: QuadTree<[f32; 2]> = QuadTree::default();
    for p in [[1.0, 1.0], [-3.5, 2.25], [11.0, -11.0]] {
        tree.insert(p).unwrap();
    }
    assert_eq!(tree.find_nearest(-3.0, 2.0), Some(&[-3.5, 2.25]));
    assert_eq!(tree.find_range(0.0, 0.0, 2.0).count(), 1);
}

#[cfg(feature = "kurbo")]
#[test]
fn kurbo_points() {
    use kurbo::Point as KPoint;

    let mut tree: QuadTree<KPoint> = QuadTree::default();
    tree.insert(KPoint::new(1.0, 2.0)).unwrap();
    tree.insert(KPoint::new(-4.0, 8.0)).unwrap();
    assert!(tree.contains(&KPoint::new(1.0, 2.0)));
    assert_eq!(tree.find_nearest(0.0, 0.0), Some(&KPoint::new(1.0, 2.0)));
}
