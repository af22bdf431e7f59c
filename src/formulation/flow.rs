//! Single-commodity flow formulation.

use super::types::{require_vertices, EdgeVars, Formulation, Subtour, TspModel};
use crate::error::Result;
use crate::instance::Instance;
use crate::lp::{Cmp, LinearExpr, LpModel, Var};

/// Flow formulation: binary arc selectors `x` coupled to continuous
/// flows `y`.
///
/// The depot injects flow; every other city must receive at least one
/// unit and re-emit it with a small gain. A disjoint cycle away from the
/// depot would have to conserve flow exactly, which the strictly positive
/// gain forbids, so no subtour survives. An arc budget of `n` and the
/// coupling `y_ij <= (1 + n·gain)·x_ij` tie flow to paid-for arcs.
/// Compact: the cut set is not consulted.
#[derive(Debug, Clone, Copy)]
pub struct FlowFormulation {
    /// Net flow gain required at each non-depot city.
    pub gain: f64,
}

impl Default for FlowFormulation {
    fn default() -> Self {
        Self { gain: 0.01 }
    }
}

impl Formulation for FlowFormulation {
    fn name(&self) -> &'static str {
        "flow"
    }

    fn build(&self, instance: &Instance, _cuts: &[Subtour]) -> Result<TspModel> {
        let n = require_vertices(instance)?;
        let mut lp = LpModel::new();

        // Arc selectors and flows for every ordered pair.
        let mut arcs: Vec<Option<Var>> = vec![None; n * n];
        let mut flows: Vec<Option<Var>> = vec![None; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    arcs[i * n + j] = Some(lp.add_binary(instance.distance(i, j)));
                    flows[i * n + j] = Some(lp.add_continuous(0.0, f64::INFINITY, 0.0));
                }
            }
        }
        let arc = |i: usize, j: usize| -> Var { arcs[i * n + j].expect("off-diagonal arc") };
        let flow = |i: usize, j: usize| -> Var { flows[i * n + j].expect("off-diagonal flow") };

        // Every non-depot city receives at least one unit of flow.
        for i in 1..n {
            let mut expr = LinearExpr::empty();
            for j in 0..n {
                if j != i {
                    expr.add(flow(j, i), 1.0);
                }
            }
            lp.add_constraint(expr, Cmp::Ge, 1.0);
        }

        // ... and re-emits it with the gain.
        for i in 1..n {
            let mut expr = LinearExpr::empty();
            for j in 0..n {
                if j != i {
                    expr.add(flow(i, j), 1.0);
                    expr.add(flow(j, i), -1.0);
                }
            }
            lp.add_constraint(expr, Cmp::Eq, self.gain);
        }

        // Arc budget.
        let mut budget = LinearExpr::empty();
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    budget.add(arc(i, j), 1.0);
                }
            }
        }
        lp.add_constraint(budget, Cmp::Le, n as f64);

        // Flow may only travel on selected arcs.
        let cap = 1.0 + n as f64 * self.gain;
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let mut expr = LinearExpr::empty();
                    expr.add(flow(i, j), 1.0);
                    expr.add(arc(i, j), -cap);
                    lp.add_constraint(expr, Cmp::Le, 0.0);
                }
            }
        }

        Ok(TspModel {
            lp,
            edges: EdgeVars::Directed { n, vars: arcs },
        })
    }
}
