//! The cutting-plane loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info};

use super::config::CutPlaneConfig;
use crate::error::{Error, Result};
use crate::formulation::{EdgeSolution, Formulation, FormulationKind, Subtour};
use crate::instance::Instance;
use crate::lp::LpSolver;
use crate::separation::{find_cycle, separate};

/// Why the driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// No violated subtour remains, or the formulation needs none.
    Converged,
    /// The round budget ran out with violations still open. The result is
    /// a bound, not a proven tour.
    RoundBudgetExhausted,
    /// The wall-clock limit passed between rounds.
    TimeLimitReached,
    /// Cancelled through the external flag.
    Cancelled,
}

/// Result of a cutting-plane run.
#[derive(Debug, Clone)]
pub struct CutPlaneResult {
    /// Edge values of the final solve.
    pub edges: EdgeSolution,
    /// Objective value of the final solve.
    pub objective: f64,
    /// The spanning cycle, when the final solution is one.
    pub tour: Option<Vec<usize>>,
    /// Subtour cuts accumulated across all rounds.
    pub cuts: Vec<Subtour>,
    /// Number of solve rounds performed.
    pub rounds: usize,
    /// Objective after each round; non-decreasing while cuts accumulate.
    pub objective_history: Vec<f64>,
    /// Why the loop stopped.
    pub termination: Termination,
    /// Total wall-clock time.
    pub elapsed: Duration,
}

/// Executes the cutting-plane loop: build, solve, look for subtours, cut,
/// rebuild.
///
/// Every round rebuilds the model from scratch out of the instance and
/// the cut list; there is no live solver state between rounds, so each
/// round is independently reproducible. Solver failure at any round is
/// fatal and propagates immediately.
pub struct CutPlaneRunner;

impl CutPlaneRunner {
    /// Runs the loop to completion.
    pub fn run<S: LpSolver>(
        instance: &Instance,
        config: &CutPlaneConfig,
        solver: &S,
    ) -> Result<CutPlaneResult> {
        Self::run_with_cancel(instance, config, solver, None)
    }

    /// Runs the loop with an optional cancellation token, checked between
    /// rounds.
    pub fn run_with_cancel<S: LpSolver>(
        instance: &Instance,
        config: &CutPlaneConfig,
        solver: &S,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<CutPlaneResult> {
        config.validate().map_err(Error::invalid_input)?;

        let started = Instant::now();
        let n = instance.len();
        let formulation = config.formulation.formulation();
        let relaxed = config.formulation == FormulationKind::SubtourRelaxation;

        let mut cuts: Vec<Subtour> = Vec::new();
        let mut objective_history = Vec::new();
        let mut rounds = 0;

        loop {
            let model = formulation.build(instance, &cuts)?;
            let (edges, objective) = model.solve(solver)?;
            rounds += 1;
            objective_history.push(objective);
            info!(
                "{} round {rounds}: objective {objective:.4}, {} cuts",
                formulation.name(),
                cuts.len()
            );

            if !config.formulation.needs_cuts() {
                // Compact formulations are subtour-free after one solve.
                let tour = spanning_cycle(&edges, n, config.epsilon);
                return Ok(Self::finish(
                    edges,
                    objective,
                    tour,
                    cuts,
                    rounds,
                    objective_history,
                    Termination::Converged,
                    started,
                ));
            }

            let new_cuts: Vec<Subtour> = if relaxed {
                (1..n)
                    .filter_map(|sink| separate(&edges, sink, config.epsilon))
                    .collect()
            } else {
                let cycle = find_cycle(&edges, config.epsilon);
                if cycle.len() == n {
                    return Ok(Self::finish(
                        edges,
                        objective,
                        Some(cycle),
                        cuts,
                        rounds,
                        objective_history,
                        Termination::Converged,
                        started,
                    ));
                }
                vec![cycle]
            };

            if new_cuts.is_empty() {
                // A full separation sweep found nothing: the solution
                // satisfies every subtour constraint it can check.
                let tour = spanning_cycle(&edges, n, config.epsilon);
                return Ok(Self::finish(
                    edges,
                    objective,
                    tour,
                    cuts,
                    rounds,
                    objective_history,
                    Termination::Converged,
                    started,
                ));
            }

            for cut in new_cuts {
                if cut.len() >= 2 && cut.len() < n {
                    debug!("adding subtour cut over {} vertices", cut.len());
                    cuts.push(cut);
                } else {
                    debug!("discarding degenerate subtour of size {}", cut.len());
                }
            }

            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    let tour = spanning_cycle(&edges, n, config.epsilon);
                    return Ok(Self::finish(
                        edges,
                        objective,
                        tour,
                        cuts,
                        rounds,
                        objective_history,
                        Termination::Cancelled,
                        started,
                    ));
                }
            }
            if let Some(limit) = config.time_limit {
                if started.elapsed() >= limit {
                    let tour = spanning_cycle(&edges, n, config.epsilon);
                    return Ok(Self::finish(
                        edges,
                        objective,
                        tour,
                        cuts,
                        rounds,
                        objective_history,
                        Termination::TimeLimitReached,
                        started,
                    ));
                }
            }
            if config.max_rounds > 0 && rounds >= config.max_rounds {
                let tour = spanning_cycle(&edges, n, config.epsilon);
                return Ok(Self::finish(
                    edges,
                    objective,
                    tour,
                    cuts,
                    rounds,
                    objective_history,
                    Termination::RoundBudgetExhausted,
                    started,
                ));
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        edges: EdgeSolution,
        objective: f64,
        tour: Option<Vec<usize>>,
        cuts: Vec<Subtour>,
        rounds: usize,
        objective_history: Vec<f64>,
        termination: Termination,
        started: Instant,
    ) -> CutPlaneResult {
        CutPlaneResult {
            edges,
            objective,
            tour,
            cuts,
            rounds,
            objective_history,
            termination,
            elapsed: started.elapsed(),
        }
    }
}

/// The detected cycle, but only when it spans the whole instance.
fn spanning_cycle(edges: &EdgeSolution, n: usize, epsilon: f64) -> Option<Vec<usize>> {
    let cycle = find_cycle(edges, epsilon);
    (cycle.len() == n).then_some(cycle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Point;
    use crate::lp::MicrolpSolver;

    fn unit_square() -> Instance {
        Instance::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
    }

    fn two_clusters() -> Instance {
        Instance::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(100.0, 0.0),
            Point::new(101.0, 0.0),
            Point::new(100.0, 1.0),
        ])
    }

    #[test]
    fn test_square_converges_immediately() {
        let config = CutPlaneConfig::default();
        let result =
            CutPlaneRunner::run(&unit_square(), &config, &MicrolpSolver::new()).expect("solvable");

        assert_eq!(result.termination, Termination::Converged);
        assert_eq!(result.rounds, 1);
        assert!(result.cuts.is_empty());
        assert!((result.objective - 4.0).abs() < 1e-6);
        assert_eq!(result.tour.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn test_two_clusters_needs_cuts() {
        let config = CutPlaneConfig::default();
        let result = CutPlaneRunner::run(&two_clusters(), &config, &MicrolpSolver::new())
            .expect("solvable");

        assert_eq!(result.termination, Termination::Converged);
        assert!(result.rounds > 1, "expected at least one cut round");
        assert!(!result.cuts.is_empty());
        let tour = result.tour.expect("spanning tour");
        assert_eq!(tour.len(), 6);
        // The tour must bridge the clusters: the objective includes two
        // long cross edges.
        assert!(result.objective > 190.0, "objective {}", result.objective);
    }

    #[test]
    fn test_relaxation_objective_monotone() {
        let instance = Instance::random(8, 25);
        let config = CutPlaneConfig::default()
            .with_formulation(FormulationKind::SubtourRelaxation);
        let result =
            CutPlaneRunner::run(&instance, &config, &MicrolpSolver::new()).expect("solvable");

        assert!(!result.objective_history.is_empty());
        for window in result.objective_history.windows(2) {
            assert!(
                window[1] >= window[0] - 1e-7,
                "objective dropped: {} -> {}",
                window[0],
                window[1]
            );
        }
        assert!(matches!(
            result.termination,
            Termination::Converged | Termination::RoundBudgetExhausted
        ));
    }

    #[test]
    fn test_relaxation_two_clusters_separates() {
        let config = CutPlaneConfig::default()
            .with_formulation(FormulationKind::SubtourRelaxation);
        let result = CutPlaneRunner::run(&two_clusters(), &config, &MicrolpSolver::new())
            .expect("solvable");

        assert!(!result.cuts.is_empty(), "expected separated subtours");
        // Cutting the disjoint triangles forces cross-cluster mass.
        assert!(result.objective > 100.0, "objective {}", result.objective);
    }

    #[test]
    fn test_round_budget_is_respected() {
        let config = CutPlaneConfig::default()
            .with_formulation(FormulationKind::SubtourRelaxation)
            .with_max_rounds(1);
        let result = CutPlaneRunner::run(&two_clusters(), &config, &MicrolpSolver::new())
            .expect("solvable");

        assert_eq!(result.rounds, 1);
        assert_eq!(result.termination, Termination::RoundBudgetExhausted);
    }

    #[test]
    fn test_cancellation() {
        // Flag set before the run: the driver stops after the first round
        // that wants another iteration.
        let cancel = Arc::new(AtomicBool::new(true));
        let config = CutPlaneConfig::default();
        let result = CutPlaneRunner::run_with_cancel(
            &two_clusters(),
            &config,
            &MicrolpSolver::new(),
            Some(cancel),
        )
        .expect("solvable");

        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.rounds, 1);
    }

    #[test]
    fn test_compact_formulations_converge() {
        let instance = unit_square();
        for kind in [
            FormulationKind::Mtz,
            FormulationKind::Flow,
            FormulationKind::TimeIndexed,
        ] {
            let config = CutPlaneConfig::default().with_formulation(kind);
            let result = CutPlaneRunner::run(&instance, &config, &MicrolpSolver::new())
                .unwrap_or_else(|e| panic!("{kind:?} failed: {e}"));

            assert_eq!(result.termination, Termination::Converged, "{kind:?}");
            assert_eq!(result.rounds, 1, "{kind:?}");
            assert!((result.objective - 4.0).abs() < 1e-6, "{kind:?}");
            assert_eq!(result.tour.as_ref().map(Vec::len), Some(4), "{kind:?}");
        }
    }

    #[test]
    fn test_cut_set_replays_into_fresh_model() {
        // A finished run's cut set must always be a valid model input.
        let instance = two_clusters();
        let config = CutPlaneConfig::default();
        let result =
            CutPlaneRunner::run(&instance, &config, &MicrolpSolver::new()).expect("solvable");
        assert!(!result.cuts.is_empty());

        let formulation = FormulationKind::Subtour.formulation();
        let empty = formulation.build(&instance, &[]).expect("empty cut set");
        let replay = formulation
            .build(&instance, &result.cuts)
            .expect("accumulated cut set");
        assert!(empty.lp().validate().is_ok());
        assert!(replay.lp().validate().is_ok());
        assert_eq!(
            replay.lp().constraint_count(),
            empty.lp().constraint_count() + result.cuts.len()
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = CutPlaneConfig::default().with_epsilon(2.0);
        let result = CutPlaneRunner::run(&unit_square(), &config, &MicrolpSolver::new());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
