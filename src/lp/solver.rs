//! Solver capability and the microlp-backed implementation.

use log::debug;

use super::model::{Cmp, LpModel, Var, VarDomain};
use crate::error::{Error, Result};

/// Optimal variable values of a solved model.
#[derive(Debug, Clone)]
pub struct LpSolution {
    objective: f64,
    values: Vec<f64>,
}

impl LpSolution {
    /// Objective value at the optimum.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Value of `var` at the optimum.
    pub fn value(&self, var: Var) -> f64 {
        self.values[var.0]
    }
}

/// An external mathematical-programming solver.
///
/// The model is handed over whole, optimized in one exclusive session, and
/// the optimal values read back. A non-optimal outcome (infeasible,
/// unbounded) is an error, never a partial solution.
pub trait LpSolver {
    fn solve(&self, model: &LpModel) -> Result<LpSolution>;
}

/// [`LpSolver`] backed by the pure-Rust `microlp` engine (simplex for
/// continuous models, branch and bound for binary variables).
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpSolver;

impl MicrolpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl LpSolver for MicrolpSolver {
    fn solve(&self, model: &LpModel) -> Result<LpSolution> {
        model.validate().map_err(Error::invalid_input)?;

        let mut problem = microlp::Problem::new(microlp::OptimizationDirection::Minimize);
        let vars: Vec<microlp::Variable> = model
            .vars
            .iter()
            .map(|&(domain, obj)| match domain {
                VarDomain::Continuous { lb, ub } => problem.add_var(obj, (lb, ub)),
                VarDomain::Binary => problem.add_integer_var(obj, (0, 1)),
            })
            .collect();

        for constraint in &model.constraints {
            let mut expr = microlp::LinearExpr::empty();
            for &(var, coeff) in &constraint.expr.terms {
                expr.add(vars[var.0], coeff);
            }
            let op = match constraint.cmp {
                Cmp::Eq => microlp::ComparisonOp::Eq,
                Cmp::Le => microlp::ComparisonOp::Le,
                Cmp::Ge => microlp::ComparisonOp::Ge,
            };
            problem.add_constraint(expr, op, constraint.rhs);
        }

        let solution = problem.solve()?;
        debug!(
            "optimized model: {} vars, {} constraints, objective {:.6}",
            model.var_count(),
            model.constraint_count(),
            solution.objective()
        );

        let values = vars.iter().map(|&v| solution[v]).collect();
        Ok(LpSolution {
            objective: solution.objective(),
            values,
        })
    }
}
