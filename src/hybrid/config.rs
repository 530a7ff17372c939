//! Orchestrator configuration.

use crate::error::RouteError;
use crate::local_search::TwoOptConfig;
use crate::quantum::QuantumConfig;
use crate::whale::WhaleConfig;
use std::time::Duration;

/// Configuration for a full hybrid optimization run.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_routeplan::hybrid::HybridConfig;
///
/// let config = HybridConfig::default()
///     .with_seed(42)
///     .with_deadline(Duration::from_millis(500))
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// assert!(!config.quantum.parallel);
/// ```
#[derive(Debug, Clone)]
pub struct HybridConfig {
    /// Exploration phase parameters.
    pub quantum: QuantumConfig,

    /// Exploitation phase parameters.
    pub whale: WhaleConfig,

    /// Refinement parameters.
    pub two_opt: TwoOptConfig,

    /// Random seed; `None` draws one and reports it in the result.
    pub seed: Option<u64>,

    /// Wall-clock limit for the whole run.
    pub deadline: Option<Duration>,

    /// Master switch for parallel batch evaluation; a phase runs in
    /// parallel only if both this and its own flag are set.
    pub parallel: bool,

    /// Multiplier applied to great-circle distances in the fallback matrix.
    pub road_factor: f64,

    /// Speed used to derive fallback durations, km/h.
    pub average_speed_kmh: f64,

    /// Maximum number of alternative routes reported.
    pub max_alternatives: usize,

    /// Interior sizes up to this are also solved by enumeration.
    pub exhaustive_limit: usize,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            quantum: QuantumConfig::default(),
            whale: WhaleConfig::default(),
            two_opt: TwoOptConfig::default(),
            seed: None,
            deadline: None,
            parallel: true,
            road_factor: 1.3,
            average_speed_kmh: 60.0,
            max_alternatives: 5,
            exhaustive_limit: 4,
        }
    }
}

impl HybridConfig {
    pub fn with_quantum(mut self, quantum: QuantumConfig) -> Self {
        self.quantum = quantum;
        self
    }

    pub fn with_whale(mut self, whale: WhaleConfig) -> Self {
        self.whale = whale;
        self
    }

    pub fn with_two_opt(mut self, two_opt: TwoOptConfig) -> Self {
        self.two_opt = two_opt;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Toggles parallel batch evaluation in both population phases.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self.quantum.parallel = parallel;
        self.whale.parallel = parallel;
        self
    }

    pub fn with_road_factor(mut self, factor: f64) -> Self {
        self.road_factor = factor;
        self
    }

    pub fn with_average_speed(mut self, kmh: f64) -> Self {
        self.average_speed_kmh = kmh;
        self
    }

    pub fn with_max_alternatives(mut self, n: usize) -> Self {
        self.max_alternatives = n;
        self
    }

    /// Set to 0 to disable enumeration.
    pub fn with_exhaustive_limit(mut self, n: usize) -> Self {
        self.exhaustive_limit = n;
        self
    }

    /// Validates this configuration and every phase configuration.
    pub fn validate(&self) -> Result<(), RouteError> {
        self.quantum.validate().map_err(RouteError::InvalidConfig)?;
        self.whale.validate().map_err(RouteError::InvalidConfig)?;
        self.two_opt.validate().map_err(RouteError::InvalidConfig)?;
        if !self.road_factor.is_finite() || self.road_factor < 1.0 {
            return Err(RouteError::InvalidConfig(format!(
                "road_factor must be finite and >= 1.0, got {}",
                self.road_factor
            )));
        }
        if !self.average_speed_kmh.is_finite() || self.average_speed_kmh <= 0.0 {
            return Err(RouteError::InvalidConfig(format!(
                "average_speed_kmh must be finite and positive, got {}",
                self.average_speed_kmh
            )));
        }
        if self.exhaustive_limit > 8 {
            return Err(RouteError::InvalidConfig(format!(
                "exhaustive_limit must be at most 8, got {}",
                self.exhaustive_limit
            )));
        }
        Ok(())
    }
}
