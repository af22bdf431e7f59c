//! Shared formulation types: edge solutions, subtours, built models.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::lp::{LpModel, LpSolution, LpSolver, Var};

use super::flow::FlowFormulation;
use super::mtz::MtzFormulation;
use super::subtour::SubtourFormulation;
use super::time_indexed::TimeIndexedFormulation;

/// Vertices of a cycle over a strict subset of the instance.
///
/// Sizes outside `2..n` carry no information; the driver discards them.
pub type Subtour = Vec<usize>;

/// Index of the unordered pair `{i, j}`, `i < j`, in a row-major upper
/// triangle over `n` vertices.
pub(crate) fn edge_index(n: usize, i: usize, j: usize) -> usize {
    debug_assert!(i < j && j < n);
    i * n - i * (i + 1) / 2 + (j - i - 1)
}

/// Read-only snapshot of solved undirected edge values.
///
/// One value per unordered vertex pair; a fresh snapshot is produced by
/// every solve. Values are fractional for relaxations and 0/1 (up to
/// solver noise) for integral models.
#[derive(Debug, Clone)]
pub struct EdgeSolution {
    vertex_count: usize,
    values: Vec<f64>,
}

impl EdgeSolution {
    pub(crate) fn zeros(vertex_count: usize) -> Self {
        let pairs = vertex_count * vertex_count.saturating_sub(1) / 2;
        Self {
            vertex_count,
            values: vec![0.0; pairs],
        }
    }

    /// Value of edge `{i, j}`; endpoint order does not matter.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let (a, b) = if i < j { (i, j) } else { (j, i) };
        self.values[edge_index(self.vertex_count, a, b)]
    }

    pub(crate) fn set(&mut self, i: usize, j: usize, value: f64) {
        let (a, b) = if i < j { (i, j) } else { (j, i) };
        self.values[edge_index(self.vertex_count, a, b)] = value;
    }

    pub(crate) fn accumulate(&mut self, i: usize, j: usize, delta: f64) {
        let (a, b) = if i < j { (i, j) } else { (j, i) };
        self.values[edge_index(self.vertex_count, a, b)] += delta;
    }

    /// Number of vertices in the underlying instance.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Iterates over `(i, j, value)` with `i < j`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.vertex_count;
        (0..n)
            .flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
            .zip(self.values.iter().copied())
            .map(|((i, j), value)| (i, j, value))
    }

    /// Sum of incident edge values at `v`.
    pub fn degree(&self, v: usize) -> f64 {
        (0..self.vertex_count)
            .filter(|&u| u != v)
            .map(|u| self.get(u, v))
            .sum()
    }
}

/// How a built model's variables map back to undirected edges.
pub(crate) enum EdgeVars {
    /// One variable per unordered pair, row-major upper triangle.
    Undirected { n: usize, vars: Vec<Var> },
    /// One variable per ordered pair `(i, j)`, `i != j`; diagonal unused.
    Directed { n: usize, vars: Vec<Option<Var>> },
    /// One variable per `(i, j, t)`, flattened as `(i * n + j) * n + t`.
    TimeIndexed { n: usize, vars: Vec<Option<Var>> },
}

/// Directed arcs below this solved value are treated as unused when
/// mapping back to undirected edges.
const ARC_CUTOFF: f64 = 0.5;

/// A formulation instantiated over a concrete instance and cut set,
/// ready to optimize.
pub struct TspModel {
    pub(crate) lp: LpModel,
    pub(crate) edges: EdgeVars,
}

impl TspModel {
    /// The underlying linear model.
    pub fn lp(&self) -> &LpModel {
        &self.lp
    }

    /// Optimizes the model and maps variable values back to undirected
    /// edge weights. Returns the edge snapshot and the objective value.
    pub fn solve(&self, solver: &impl LpSolver) -> Result<(EdgeSolution, f64)> {
        let solution = solver.solve(&self.lp)?;
        Ok((self.extract(&solution), solution.objective()))
    }

    fn extract(&self, solution: &LpSolution) -> EdgeSolution {
        match &self.edges {
            EdgeVars::Undirected { n, vars } => {
                let n = *n;
                let mut edges = EdgeSolution::zeros(n);
                for i in 0..n {
                    for j in (i + 1)..n {
                        let var = vars[edge_index(n, i, j)];
                        edges.set(i, j, solution.value(var));
                    }
                }
                edges
            }
            EdgeVars::Directed { n, vars } => {
                let n = *n;
                let mut edges = EdgeSolution::zeros(n);
                for i in 0..n {
                    for j in 0..n {
                        if let Some(var) = vars[i * n + j] {
                            let value = solution.value(var);
                            if value > ARC_CUTOFF {
                                edges.accumulate(i, j, value);
                            }
                        }
                    }
                }
                edges
            }
            EdgeVars::TimeIndexed { n, vars } => {
                let n = *n;
                let mut edges = EdgeSolution::zeros(n);
                for i in 0..n {
                    for j in 0..n {
                        for t in 0..n {
                            if let Some(var) = vars[(i * n + j) * n + t] {
                                let value = solution.value(var);
                                if value > ARC_CUTOFF {
                                    edges.accumulate(i, j, value);
                                }
                            }
                        }
                    }
                }
                edges
            }
        }
    }
}

/// One of the interchangeable TSP formulations.
///
/// A formulation is a pure construction: the same instance and cut set
/// always produce the same model, and nothing is kept between builds.
pub trait Formulation {
    fn name(&self) -> &'static str;

    /// Builds the model for `instance` with the supplied subtour cuts.
    ///
    /// Fails with [`Error::InvalidInput`] for instances of fewer than
    /// three points. The cut list is read, never mutated.
    fn build(&self, instance: &Instance, cuts: &[Subtour]) -> Result<TspModel>;
}

pub(crate) fn require_vertices(instance: &Instance) -> Result<usize> {
    let n = instance.len();
    if n < 3 {
        return Err(Error::invalid_input(format!(
            "need at least 3 points, got {n}"
        )));
    }
    Ok(n)
}

/// Selects one of the four formulations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormulationKind {
    /// Degree-2 model over binary edges with lazily added subtour cuts.
    Subtour,
    /// Continuous relaxation of [`FormulationKind::Subtour`], tightened by
    /// min-cut separation.
    SubtourRelaxation,
    /// Miller–Tucker–Zemlin ordering model.
    Mtz,
    /// Single-commodity flow model.
    Flow,
    /// Time-indexed step model.
    TimeIndexed,
}

impl FormulationKind {
    /// Instantiates the formulation behind this selector.
    pub fn formulation(&self) -> Box<dyn Formulation> {
        match self {
            Self::Subtour => Box::new(SubtourFormulation::integral()),
            Self::SubtourRelaxation => Box::new(SubtourFormulation::relaxed()),
            Self::Mtz => Box::new(MtzFormulation),
            Self::Flow => Box::new(FlowFormulation::default()),
            Self::TimeIndexed => Box::new(TimeIndexedFormulation),
        }
    }

    /// Whether the driver must separate subtour cuts iteratively. The
    /// compact formulations are subtour-free after a single solve.
    pub fn needs_cuts(&self) -> bool {
        matches!(self, Self::Subtour | Self::SubtourRelaxation)
    }
}

impl FromStr for FormulationKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "subtour" | "dfj" => Ok(Self::Subtour),
            "relaxation" => Ok(Self::SubtourRelaxation),
            "mtz" => Ok(Self::Mtz),
            "flow" => Ok(Self::Flow),
            "time-indexed" | "step" => Ok(Self::TimeIndexed),
            other => Err(format!(
                "unknown formulation '{other}' (expected subtour, relaxation, mtz, flow, or time-indexed)"
            )),
        }
    }
}
