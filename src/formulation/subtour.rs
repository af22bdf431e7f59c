//! Degree-2 subtour formulation, integral and relaxed.

use super::types::{edge_index, require_vertices, EdgeVars, Formulation, Subtour, TspModel};
use crate::error::Result;
use crate::instance::Instance;
use crate::lp::{Cmp, LinearExpr, LpModel, Var};

/// The degree-2 formulation over undirected edge variables.
///
/// Every vertex must meet exactly two tour edges. Subtour elimination is
/// not part of the base model: each supplied cut `S` becomes
/// `sum(x_ij : i, j in S, i < j) <= |S| - 1`, and the driver grows that
/// set between solves.
///
/// With the binary domain this is the Dantzig–Fulkerson–Johnson model
/// with lazy cuts; with the continuous domain it is the LP relaxation
/// used for min-cut separation.
#[derive(Debug, Clone, Copy)]
pub struct SubtourFormulation {
    integral: bool,
}

impl SubtourFormulation {
    /// Binary edge variables; cycles are cut away from integral solutions.
    pub fn integral() -> Self {
        Self { integral: true }
    }

    /// Continuous edge variables in `[0, 1]`; the relaxation for
    /// separation.
    pub fn relaxed() -> Self {
        Self { integral: false }
    }
}

impl Formulation for SubtourFormulation {
    fn name(&self) -> &'static str {
        if self.integral {
            "subtour"
        } else {
            "subtour-relaxation"
        }
    }

    fn build(&self, instance: &Instance, cuts: &[Subtour]) -> Result<TspModel> {
        let n = require_vertices(instance)?;
        let mut lp = LpModel::new();

        // One variable per unordered pair, i < j.
        let mut vars = Vec::with_capacity(n * (n - 1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                let cost = instance.distance(i, j);
                vars.push(if self.integral {
                    lp.add_binary(cost)
                } else {
                    lp.add_continuous(0.0, 1.0, cost)
                });
            }
        }
        let edge = |i: usize, j: usize| -> Var {
            let (a, b) = if i < j { (i, j) } else { (j, i) };
            vars[edge_index(n, a, b)]
        };

        // Each vertex meets exactly two tour edges.
        for v in 0..n {
            let mut expr = LinearExpr::empty();
            for u in 0..n {
                if u != v {
                    expr.add(edge(u, v), 1.0);
                }
            }
            lp.add_constraint(expr, Cmp::Eq, 2.0);
        }

        // Accumulated subtour cuts: at most |S| - 1 edges inside S.
        for cut in cuts {
            let mut expr = LinearExpr::empty();
            for (k, &i) in cut.iter().enumerate() {
                for &j in &cut[k + 1..] {
                    expr.add(edge(i, j), 1.0);
                }
            }
            lp.add_constraint(expr, Cmp::Le, cut.len() as f64 - 1.0);
        }

        Ok(TspModel {
            lp,
            edges: EdgeVars::Undirected { n, vars },
        })
    }
}
