//! The four TSP formulations behind one trait.
//!
//! All formulations price the same complete Euclidean graph and differ
//! only in how they exclude subtours:
//!
//! - [`SubtourFormulation`] leaves exclusion to the caller: the driver
//!   feeds back one cut per detected cycle (integral domain) or per
//!   violated min-cut (continuous relaxation);
//! - [`MtzFormulation`], [`FlowFormulation`], and
//!   [`TimeIndexedFormulation`] are compact: one solve, no separation.
//!
//! # References
//!
//! - Dantzig, Fulkerson & Johnson (1954), "Solution of a Large-Scale
//!   Traveling-Salesman Problem"
//! - Miller, Tucker & Zemlin (1960), "Integer Programming Formulation of
//!   Traveling Salesman Problems"

mod flow;
mod mtz;
mod subtour;
mod time_indexed;
mod types;

pub use flow::FlowFormulation;
pub use mtz::MtzFormulation;
pub use subtour::SubtourFormulation;
pub use time_indexed::TimeIndexedFormulation;
pub use types::{EdgeSolution, Formulation, FormulationKind, Subtour, TspModel};
