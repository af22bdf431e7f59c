//! Minimum s-t cut via augmenting-path max flow.

use std::collections::VecDeque;

/// Residual capacities below this are treated as exhausted.
const FLOW_TOLERANCE: f64 = 1e-12;

/// A minimum s-t cut: its total capacity and the vertices on the sink
/// side.
#[derive(Debug, Clone)]
pub struct MinCut {
    pub value: f64,
    pub sink_side: Vec<usize>,
}

/// Computes a minimum cut between `source` and `sink` on a dense
/// undirected capacity matrix (`capacities[i * n + j]`, symmetric).
///
/// Edmonds–Karp: augment along shortest residual paths until none
/// remains; the sink side is then everything the source can no longer
/// reach in the residual network.
///
/// # Panics
///
/// Panics if the matrix is not `n × n` or the terminals are out of range
/// or equal.
pub fn min_cut(n: usize, capacities: &[f64], source: usize, sink: usize) -> MinCut {
    assert_eq!(capacities.len(), n * n);
    assert!(source < n && sink < n && source != sink);

    // Undirected input becomes a pair of directed residual arcs.
    let mut residual = capacities.to_vec();
    let mut value = 0.0;

    loop {
        let parent = match bfs_parents(n, &residual, source, sink) {
            Some(parent) => parent,
            None => break,
        };

        // Bottleneck along the augmenting path.
        let mut bottleneck = f64::INFINITY;
        let mut v = sink;
        while v != source {
            let u = parent[v];
            bottleneck = bottleneck.min(residual[u * n + v]);
            v = u;
        }

        // Push the bottleneck and open the reverse arcs.
        let mut v = sink;
        while v != source {
            let u = parent[v];
            residual[u * n + v] -= bottleneck;
            residual[v * n + u] += bottleneck;
            v = u;
        }
        value += bottleneck;
    }

    let reachable = residual_reachable(n, &residual, source);
    let sink_side = (0..n).filter(|&v| !reachable[v]).collect();
    MinCut { value, sink_side }
}

/// BFS over positive residual arcs; `None` once the sink is unreachable.
fn bfs_parents(n: usize, residual: &[f64], source: usize, sink: usize) -> Option<Vec<usize>> {
    let mut parent = vec![usize::MAX; n];
    parent[source] = source;
    let mut queue = VecDeque::from([source]);

    while let Some(u) = queue.pop_front() {
        if u == sink {
            return Some(parent);
        }
        for v in 0..n {
            if parent[v] == usize::MAX && residual[u * n + v] > FLOW_TOLERANCE {
                parent[v] = u;
                queue.push_back(v);
            }
        }
    }
    None
}

fn residual_reachable(n: usize, residual: &[f64], source: usize) -> Vec<bool> {
    let mut reachable = vec![false; n];
    reachable[source] = true;
    let mut queue = VecDeque::from([source]);

    while let Some(u) = queue.pop_front() {
        for v in 0..n {
            if !reachable[v] && residual[u * n + v] > FLOW_TOLERANCE {
                reachable[v] = true;
                queue.push_back(v);
            }
        }
    }
    reachable
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn symmetric(n: usize, edges: &[(usize, usize, f64)]) -> Vec<f64> {
        let mut capacities = vec![0.0; n * n];
        for &(i, j, cap) in edges {
            capacities[i * n + j] = cap;
            capacities[j * n + i] = cap;
        }
        capacities
    }

    #[test]
    fn test_path_graph() {
        // 0 -1- 1 -1- 2: every 0/2 cut crosses exactly one unit.
        let capacities = symmetric(3, &[(0, 1, 1.0), (1, 2, 1.0)]);
        let cut = min_cut(3, &capacities, 0, 2);
        assert!((cut.value - 1.0).abs() < 1e-9);
        assert!(cut.sink_side.contains(&2));
        assert!(!cut.sink_side.contains(&0));
    }

    #[test]
    fn test_triangle() {
        // All edges at 1: two disjoint unit paths between any terminals.
        let capacities = symmetric(3, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.0)]);
        for sink in 1..3 {
            let cut = min_cut(3, &capacities, 0, sink);
            assert!((cut.value - 2.0).abs() < 1e-9, "sink {sink}: {}", cut.value);
        }
    }

    #[test]
    fn test_bridge_between_clusters() {
        // Two dense clusters joined by a 1.5 bridge; the bridge is the cut.
        let capacities = symmetric(
            6,
            &[
                (0, 1, 3.0),
                (1, 2, 3.0),
                (0, 2, 3.0),
                (2, 3, 1.5),
                (3, 4, 3.0),
                (4, 5, 3.0),
                (3, 5, 3.0),
            ],
        );
        let cut = min_cut(6, &capacities, 0, 5);
        assert!((cut.value - 1.5).abs() < 1e-9);
        let mut sink_side = cut.sink_side.clone();
        sink_side.sort_unstable();
        assert_eq!(sink_side, vec![3, 4, 5]);
    }

    #[test]
    fn test_disconnected_terminals() {
        let capacities = symmetric(4, &[(0, 1, 2.0), (2, 3, 2.0)]);
        let cut = min_cut(4, &capacities, 0, 3);
        assert!(cut.value.abs() < 1e-12);
        let mut sink_side = cut.sink_side.clone();
        sink_side.sort_unstable();
        assert_eq!(sink_side, vec![2, 3]);
    }

    /// Exhaustive minimum over all source/sink-separating partitions.
    fn brute_force_cut(n: usize, capacities: &[f64], source: usize, sink: usize) -> f64 {
        let mut best = f64::INFINITY;
        for mask in 0u32..(1 << n) {
            if mask & (1 << source) != 0 || mask & (1 << sink) == 0 {
                continue;
            }
            let mut crossing = 0.0;
            for i in 0..n {
                for j in (i + 1)..n {
                    if (mask >> i & 1) != (mask >> j & 1) {
                        crossing += capacities[i * n + j];
                    }
                }
            }
            best = best.min(crossing);
        }
        best
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force(
            n in 3usize..7,
            raw in prop::collection::vec(0.0f64..3.0, 36),
        ) {
            let mut capacities = vec![0.0; n * n];
            for i in 0..n {
                for j in (i + 1)..n {
                    let cap = raw[i * 6 + j];
                    capacities[i * n + j] = cap;
                    capacities[j * n + i] = cap;
                }
            }
            let cut = min_cut(n, &capacities, 0, n - 1);
            let expected = brute_force_cut(n, &capacities, 0, n - 1);
            prop_assert!((cut.value - expected).abs() < 1e-6,
                "max flow {} vs brute force {}", cut.value, expected);
        }
    }
}
