//! TSP via mixed-integer/linear programming with cutting planes.
//!
//! Formulates the Traveling Salesman Problem over a complete graph of 2D
//! points in four interchangeable ways and solves it through an external
//! LP/MIP engine, separating subtour elimination constraints iteratively
//! where the formulation calls for it:
//!
//! - [`formulation::SubtourFormulation`] — degree-2 model; binary domain
//!   with lazy cuts, or continuous relaxation with min-cut separation
//! - [`formulation::MtzFormulation`] — Miller–Tucker–Zemlin ordering model
//! - [`formulation::FlowFormulation`] — single-commodity flow model
//! - [`formulation::TimeIndexedFormulation`] — time-indexed step model
//!
//! # Modules
//!
//! - [`instance`] — points, distances, seeded instance generation
//! - [`lp`] — minimal model layer and the external solver capability
//! - [`formulation`] — the four formulations behind one trait
//! - [`separation`] — cycle extraction and min-cut subtour separation
//! - [`driver`] — the cutting-plane loop tying it all together
//!
//! # Example
//!
//! ```
//! use tsp_cutplane::driver::{CutPlaneConfig, CutPlaneRunner, Termination};
//! use tsp_cutplane::instance::Instance;
//! use tsp_cutplane::lp::MicrolpSolver;
//!
//! let instance = Instance::random(8, 25);
//! let config = CutPlaneConfig::default();
//! let result = CutPlaneRunner::run(&instance, &config, &MicrolpSolver::new()).unwrap();
//! assert_eq!(result.termination, Termination::Converged);
//! assert_eq!(result.tour.map(|tour| tour.len()), Some(8));
//! ```

pub mod driver;
pub mod error;
pub mod formulation;
pub mod instance;
pub mod lp;
pub mod separation;

pub use error::{Error, Result};
