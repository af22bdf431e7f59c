//! TSP instances: indexed 2D points with precomputed pairwise distances.

mod matrix;
mod point;

pub use matrix::DistanceMatrix;
pub use point::Point;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// An instance of the problem: `n` points on the plane, addressed by the
/// vertex indices `0..n`, over the complete graph of Euclidean distances.
#[derive(Debug, Clone)]
pub struct Instance {
    points: Vec<Point>,
    distances: DistanceMatrix,
}

impl Instance {
    /// Builds an instance from explicit points.
    pub fn new(points: Vec<Point>) -> Self {
        let distances = DistanceMatrix::from_points(&points);
        Self { points, distances }
    }

    /// Generates `n` points uniformly in `[0, 100)²` from a fixed seed.
    ///
    /// The same `(n, seed)` pair always yields the same instance.
    pub fn random(n: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let points = (0..n)
            .map(|_| {
                Point::new(
                    rng.random_range(0.0..100.0),
                    rng.random_range(0.0..100.0),
                )
            })
            .collect();
        Self::new(points)
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Distance between vertices `i` and `j`.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances.get(i, j)
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_is_deterministic() {
        let a = Instance::random(10, 25);
        let b = Instance::random(10, 25);
        assert_eq!(a.points(), b.points());

        let c = Instance::random(10, 26);
        assert_ne!(a.points(), c.points());
    }

    #[test]
    fn test_random_in_bounds() {
        let instance = Instance::random(50, 7);
        assert_eq!(instance.len(), 50);
        for p in instance.points() {
            assert!((0.0..100.0).contains(&p.x));
            assert!((0.0..100.0).contains(&p.y));
        }
    }

    #[test]
    fn test_distances_match_points() {
        let instance = Instance::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ]);
        assert!((instance.distance(0, 1) - 1.0).abs() < 1e-12);
        assert!((instance.distance(0, 2) - 2f64.sqrt()).abs() < 1e-12);
        assert!((instance.distance(2, 0) - instance.distance(0, 2)).abs() < 1e-12);
    }
}
