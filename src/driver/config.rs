//! Cutting-plane driver configuration.

use std::time::Duration;

use crate::formulation::FormulationKind;

/// Configuration for [`CutPlaneRunner`](super::CutPlaneRunner).
///
/// # Examples
///
/// ```
/// use tsp_cutplane::driver::CutPlaneConfig;
/// use tsp_cutplane::formulation::FormulationKind;
///
/// let config = CutPlaneConfig::default()
///     .with_formulation(FormulationKind::SubtourRelaxation)
///     .with_max_rounds(20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CutPlaneConfig {
    /// Which formulation the driver builds each round.
    pub formulation: FormulationKind,

    /// Maximum number of solve rounds. 0 = no limit.
    ///
    /// The default of 10 is a heuristic guard, not an optimality proof:
    /// exhausting it is reported as
    /// [`Termination::RoundBudgetExhausted`](super::Termination) so the
    /// caller can tell a bound from a proven tour.
    pub max_rounds: usize,

    /// Numeric tolerance: edges within `epsilon` of 1 count as tour edges
    /// and cuts below `2 - epsilon` count as violated.
    pub epsilon: f64,

    /// Optional wall-clock limit, checked between rounds. The solve in
    /// flight when the limit passes still completes.
    pub time_limit: Option<Duration>,
}

impl Default for CutPlaneConfig {
    fn default() -> Self {
        Self {
            formulation: FormulationKind::Subtour,
            max_rounds: 10,
            epsilon: 1e-6,
            time_limit: None,
        }
    }
}

impl CutPlaneConfig {
    pub fn with_formulation(mut self, formulation: FormulationKind) -> Self {
        self.formulation = formulation;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.epsilon > 0.0 && self.epsilon < 1.0) {
            return Err(format!("epsilon must be in (0, 1), got {}", self.epsilon));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CutPlaneConfig::default();
        assert_eq!(config.formulation, FormulationKind::Subtour);
        assert_eq!(config.max_rounds, 10);
        assert!(config.time_limit.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = CutPlaneConfig::default()
            .with_formulation(FormulationKind::Mtz)
            .with_max_rounds(0)
            .with_epsilon(1e-9)
            .with_time_limit(Duration::from_secs(5));
        assert_eq!(config.formulation, FormulationKind::Mtz);
        assert_eq!(config.max_rounds, 0);
        assert_eq!(config.time_limit, Some(Duration::from_secs(5)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_epsilon() {
        assert!(CutPlaneConfig::default().with_epsilon(0.0).validate().is_err());
        assert!(CutPlaneConfig::default().with_epsilon(1.5).validate().is_err());
        assert!(CutPlaneConfig::default()
            .with_epsilon(f64::NAN)
            .validate()
            .is_err());
    }
}
