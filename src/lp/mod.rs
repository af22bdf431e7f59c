//! Minimal linear-model layer and the external solver capability.
//!
//! This is not a modeling DSL: it carries exactly what the TSP
//! formulations need (variables with continuous or binary domains, linear
//! constraints, a linear minimization objective) and hands the finished
//! model to an [`LpSolver`]. The bundled [`MicrolpSolver`] delegates to
//! the `microlp` crate; any solver with the same primitives can be plugged
//! in behind the trait.

mod model;
mod solver;

pub use model::{Cmp, LinearConstraint, LinearExpr, LpModel, Var, VarDomain};
pub use solver::{LpSolution, LpSolver, MicrolpSolver};
