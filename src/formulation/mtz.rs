//! Miller–Tucker–Zemlin formulation.

use super::types::{require_vertices, EdgeVars, Formulation, Subtour, TspModel};
use crate::error::Result;
use crate::instance::Instance;
use crate::lp::{Cmp, LinearExpr, LpModel, Var};

/// MTZ ordering formulation over binary directed arcs.
///
/// Continuous `u_i` encode the position of each city in the tour, with
/// `u_0` pinned to 1, and `u_i - u_j + n·x_ij <= n - 1` over non-depot
/// arcs makes every cycle that avoids the depot infeasible. Compact: no
/// separation rounds, the single solve is subtour-free, so the cut set is
/// not consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct MtzFormulation;

impl Formulation for MtzFormulation {
    fn name(&self) -> &'static str {
        "mtz"
    }

    fn build(&self, instance: &Instance, _cuts: &[Subtour]) -> Result<TspModel> {
        let n = require_vertices(instance)?;
        let mut lp = LpModel::new();

        // x_ij for every ordered pair.
        let mut arcs: Vec<Option<Var>> = vec![None; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    arcs[i * n + j] = Some(lp.add_binary(instance.distance(i, j)));
                }
            }
        }
        let arc = |i: usize, j: usize| -> Var { arcs[i * n + j].expect("off-diagonal arc") };

        // Position variables.
        let u: Vec<Var> = (0..n)
            .map(|_| lp.add_continuous(0.0, f64::INFINITY, 0.0))
            .collect();

        // Enter and leave each city exactly once.
        for j in 0..n {
            let mut expr = LinearExpr::empty();
            for i in 0..n {
                if i != j {
                    expr.add(arc(i, j), 1.0);
                }
            }
            lp.add_constraint(expr, Cmp::Eq, 1.0);
        }
        for i in 0..n {
            let mut expr = LinearExpr::empty();
            for j in 0..n {
                if i != j {
                    expr.add(arc(i, j), 1.0);
                }
            }
            lp.add_constraint(expr, Cmp::Eq, 1.0);
        }

        // Ordering: a used arc forces u_j >= u_i + 1 away from the depot.
        for i in 1..n {
            for j in 1..n {
                if i != j {
                    let mut expr = LinearExpr::empty();
                    expr.add(u[i], 1.0);
                    expr.add(u[j], -1.0);
                    expr.add(arc(i, j), n as f64);
                    lp.add_constraint(expr, Cmp::Le, n as f64 - 1.0);
                }
            }
        }

        // The depot is the first stop.
        let mut expr = LinearExpr::empty();
        expr.add(u[0], 1.0);
        lp.add_constraint(expr, Cmp::Eq, 1.0);

        Ok(TspModel {
            lp,
            edges: EdgeVars::Directed { n, vars: arcs },
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
    fn test_mtz_square() {
        let instance = Instance::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]);
        let model = MtzFormulation.build(&instance, &[]).expect("valid instance");
        let (edges, objective) = model.solve(&MicrolpSolver::new()).expect("solvable");

        assert!((objective - 4.0).abs() < 1e-6, "objective {objective}");
        let cycle = find_cycle(&edges, 1e-6);
        assert_eq!(cycle.len(), 4, "not a spanning cycle: {cycle:?}");
    }

    #[test]
    fn test_mtz_model_shape() {
        let instance = Instance::random(5, 3);
        let model = MtzFormulation.build(&instance, &[]).expect("valid instance");
        // 20 arcs + 5 position vars; 5 in + 5 out + 12 ordering + 1 depot.
        assert_eq!(model.lp().var_count(), 25);
        assert_eq!(model.lp().constraint_count(), 23);
    }

    #[test]
    fn test_mtz_too_few_points() {
        let instance = Instance::new(vec![Point::new(0.0, 0.0)]);
        assert!(MtzFormulation.build(&instance, &[]).is_err());
    }
}
