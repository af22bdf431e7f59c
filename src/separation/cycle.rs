//! Cycle extraction from integral edge solutions.

use crate::formulation::EdgeSolution;

/// Extracts the cycle through vertex 0 from an integral edge solution.
///
/// Starting at the lowest-index vertex, repeatedly follows an incident
/// edge whose value is within `epsilon` of 1 to a vertex not yet visited,
/// and stops when none remains (the walk has closed back on itself).
/// Vertices with spurious extra incident edges in numerically impure
/// solutions are tolerated: visited neighbors are simply skipped.
///
/// The returned sequence spans the whole instance exactly when the
/// solution is a single Hamiltonian cycle; anything shorter is a subtour.
pub fn find_cycle(edges: &EdgeSolution, epsilon: f64) -> Vec<usize> {
    let n = edges.vertex_count();
    if n == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    visited[0] = true;
    let mut cycle = vec![0];
    let mut current = 0;

    loop {
        let next = (0..n).find(|&j| {
            j != current && !visited[j] && (edges.get(current, j) - 1.0).abs() <= epsilon
        });
        match next {
            Some(j) => {
                visited[j] = true;
                cycle.push(j);
                current = j;
            }
            None => break,
        }
    }
    cycle
}
