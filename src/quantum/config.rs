//! Quantum exploration configuration.

use std::f64::consts::PI;

/// Configuration for the quantum-inspired exploration phase.
///
/// # Examples
///
/// ```
/// use u_routeplan::quantum::QuantumConfig;
///
/// let config = QuantumConfig::default()
///     .with_population_size(32)
///     .with_max_iterations(200)
///     .with_cooling_factor(0.97);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct QuantumConfig {
    /// Number of candidates in the population.
    pub population_size: usize,

    /// Iteration budget (T1).
    pub max_iterations: usize,

    /// Consecutive iterations without a new global best before stopping
    /// (0 to disable).
    pub patience: usize,

    /// Starting temperature as a fraction of the seed population's best cost.
    ///
    /// Scaling by cost keeps acceptance behavior independent of units.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1): `T_{k+1} = cooling_factor * T_k`.
    pub cooling_factor: f64,

    /// Amplitude rotation angle at `t = 0`, in radians. Decays linearly to
    /// zero at `t = T1`.
    pub max_rotation: f64,

    /// Per-dimension probability of a NOT gate (swapping α and β) each iteration.
    pub mutation_rate: f64,

    /// Whether to evaluate candidates in parallel.
    pub parallel: bool,
}

impl Default for QuantumConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            max_iterations: 100,
            patience: 30,
            initial_temperature: 0.1,
            cooling_factor: 0.95,
            max_rotation: 0.1 * PI,
            mutation_rate: 0.05,
            parallel: true,
        }
    }
}

impl QuantumConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_patience(mut self, n: usize) -> Self {
        self.patience = n;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_factor(mut self, alpha: f64) -> Self {
        self.cooling_factor = alpha;
        self
    }

    pub fn with_max_rotation(mut self, radians: f64) -> Self {
        self.max_rotation = radians;
        self
    }

    pub fn with_mutation_rate(mut self, p: f64) -> Self {
        self.mutation_rate = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("quantum population_size must be at least 1".into());
        }
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(format!(
                "quantum initial_temperature must be finite and positive, got {}",
                self.initial_temperature
            ));
        }
        if !self.cooling_factor.is_finite()
            || self.cooling_factor <= 0.0
            || self.cooling_factor >= 1.0
        {
            return Err(format!(
                "quantum cooling_factor must be in (0, 1), got {}",
                self.cooling_factor
            ));
        }
        if !(0.0..=PI / 2.0).contains(&self.max_rotation) {
            return Err(format!(
                "quantum max_rotation must be in [0, pi/2], got {}",
                self.max_rotation
            ));
        }
        Ok(())
    }
}
