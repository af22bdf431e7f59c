//! Time-indexed step formulation.

use super::types::{require_vertices, EdgeVars, Formulation, Subtour, TspModel};
use crate::error::Result;
use crate::instance::Instance;
use crate::lp::{Cmp, LinearExpr, LpModel, Var};

/// Time-indexed formulation: `x_ijt` means the tour travels from city `i`
/// to city `j` at step `t`.
///
/// Each city departs exactly once over all `(j, t)`. Arriving at a city
/// at step `t` forces its departure at step `t + 1`, and arrivals at the
/// final step feed the departures of step 0, closing the cycle. The step
/// structure leaves no room for disconnected cycles, so the cut set is
/// not consulted. Variable count grows as `n³`; this is the heaviest of
/// the formulations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeIndexedFormulation;

impl Formulation for TimeIndexedFormulation {
    fn name(&self) -> &'static str {
        "time-indexed"
    }

    fn build(&self, instance: &Instance, _cuts: &[Subtour]) -> Result<TspModel> {
        let n = require_vertices(instance)?;
        let last = n - 1;
        let mut lp = LpModel::new();

        // x_ijt for every ordered pair and step.
        let mut vars: Vec<Option<Var>> = vec![None; n * n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    for t in 0..n {
                        vars[(i * n + j) * n + t] = Some(lp.add_binary(instance.distance(i, j)));
                    }
                }
            }
        }
        let step = |i: usize, j: usize, t: usize| -> Var {
            vars[(i * n + j) * n + t].expect("off-diagonal step arc")
        };

        // Each city departs exactly once.
        for i in 0..n {
            let mut expr = LinearExpr::empty();
            for j in 0..n {
                if j != i {
                    for t in 0..n {
                        expr.add(step(i, j, t), 1.0);
                    }
                }
            }
            lp.add_constraint(expr, Cmp::Eq, 1.0);
        }

        // Arrivals at the final step feed the departures of step 0.
        for i in 0..n {
            let mut expr = LinearExpr::empty();
            for j in 0..n {
                if j != i {
                    expr.add(step(j, i, last), 1.0);
                    expr.add(step(i, j, 0), -1.0);
                }
            }
            lp.add_constraint(expr, Cmp::Eq, 0.0);
        }

        // Arriving at step t forces departing at step t + 1.
        for t in 0..last {
            for j in 0..n {
                let mut expr = LinearExpr::empty();
                for i in 0..n {
                    if i != j {
                        expr.add(step(i, j, t), 1.0);
                        expr.add(step(j, i, t + 1), -1.0);
                    }
                }
                lp.add_constraint(expr, Cmp::Eq, 0.0);
            }
        }

        Ok(TspModel {
            lp,
            edges: EdgeVars::TimeIndexed { n, vars },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Point;
    use crate::lp::MicrolpSolver;
    use crate::separation::find_cycle;

    #[test]
    fn test_time_indexed_square() {
        let instance = Instance::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]);
        let model = TimeIndexedFormulation
            .build(&instance, &[])
            .expect("valid instance");
        let (edges, objective) = model.solve(&MicrolpSolver::new()).expect("solvable");

        assert!((objective - 4.0).abs() < 1e-6, "objective {objective}");
        let cycle = find_cycle(&edges, 1e-6);
        assert_eq!(cycle.len(), 4, "not a spanning cycle: {cycle:?}");
    }

    #[test]
    fn test_time_indexed_model_shape() {
        let instance = Instance::random(4, 2);
        let model = TimeIndexedFormulation
            .build(&instance, &[])
            .expect("valid instance");
        // 4·3 arcs × 4 steps; 4 departure + 4 wraparound + 3·4 continuity.
        assert_eq!(model.lp().var_count(), 48);
        assert_eq!(model.lp().constraint_count(), 20);
    }
}
