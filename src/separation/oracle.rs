//! Min-cut separation for fractional edge solutions.

use log::debug;

use super::mincut::min_cut;
use crate::formulation::{EdgeSolution, Subtour};

/// Searches for a subtour constraint violated by `edges` at one sink.
///
/// The fractional edge values become capacities of an undirected graph
/// and the minimum cut between vertex 0 and `sink` is computed. Under the
/// degree-2 constraints every vertex set of a valid tour is crossed by at
/// least two units of edge weight, so a cut below `2 - epsilon` exposes
/// the sink side as an under-connected vertex set: a violated subtour.
///
/// `None` is the normal "no violation at this sink" outcome, not an
/// error.
pub fn separate(edges: &EdgeSolution, sink: usize, epsilon: f64) -> Option<Subtour> {
    let n = edges.vertex_count();
    let mut capacities = vec![0.0; n * n];
    for (i, j, value) in edges.iter() {
        capacities[i * n + j] = value;
        capacities[j * n + i] = value;
    }

    let cut = min_cut(n, &capacities, 0, sink);
    if cut.value < 2.0 - epsilon {
        debug!(
            "sink {sink}: cut {:.6} < 2, violated subtour of {} vertices",
            cut.value,
            cut.sink_side.len()
        );
        Some(cut.sink_side)
    } else {
        None
    }
}
