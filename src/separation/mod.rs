//! Subtour detection: cycle extraction for integral solutions and
//! min-cut separation for fractional ones.
//!
//! Both entry points read an [`EdgeSolution`](crate::formulation::EdgeSolution)
//! and report vertex sets; neither mutates anything. Finding nothing is a
//! normal outcome, not an error.
//!
//! # References
//!
//! - Edmonds & Karp (1972), "Theoretical Improvements in Algorithmic
//!   Efficiency for Network Flow Problems"

mod cycle;
mod mincut;
mod oracle;

pub use cycle::find_cycle;
pub use mincut::{min_cut, MinCut};
pub use oracle::separate;
