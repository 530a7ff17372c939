//! Whale optimization configuration.

/// Largest accepted `|spiral_constant|`; keeps `e^{b·l}` finite for `l ∈ [-1, 1]`.
pub const MAX_SPIRAL_CONSTANT: f64 = 100.0;

/// Configuration for the whale exploitation phase.
///
/// # Examples
///
/// ```
/// use u_routeplan::whale::WhaleConfig;
///
/// let config = WhaleConfig::default()
///     .with_population_size(40)
///     .with_max_iterations(300)
///     .with_spiral_constant(0.8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct WhaleConfig {
    /// Number of whales. The seeded population is truncated (keeping the
    /// best) or topped up with random whales to reach this size.
    pub population_size: usize,

    /// Iteration budget (T2).
    pub max_iterations: usize,

    /// Consecutive iterations without a new global best before stopping
    /// (0 to disable).
    pub patience: usize,

    /// Logarithmic spiral shape constant `b`.
    pub spiral_constant: f64,

    /// Whether to evaluate whales in parallel.
    pub parallel: bool,
}

impl Default for WhaleConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            max_iterations: 150,
            patience: 40,
            spiral_constant: 1.0,
            parallel: true,
        }
    }
}

impl WhaleConfig {
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

    pub fn with_spiral_constant(mut self, b: f64) -> Self {
        self.spiral_constant = b;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("whale population_size must be at least 1".into());
        }
        if !self.spiral_constant.is_finite()
            || self.spiral_constant.abs() > MAX_SPIRAL_CONSTANT
        {
            return Err(format!(
                "whale spiral_constant must be within [-{}, {}], got {}",
                MAX_SPIRAL_CONSTANT, MAX_SPIRAL_CONSTANT, self.spiral_constant
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WhaleConfig::default();
        assert_eq!(config.population_size, 30);
        assert_eq!(config.max_iterations, 150);
        assert!((config.spiral_constant - 1.0).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_population() {
        assert!(WhaleConfig::default().with_population_size(0).validate().is_err());
    }

    #[test]
    fn test_validate_spiral_constant() {
        let config = WhaleConfig::default().with_spiral_constant(f64::INFINITY);
        assert!(config.validate().is_err());
        let config = WhaleConfig::default().with_spiral_constant(1e6);
        assert!(config.validate().is_err());
        let config = WhaleConfig::default().with_spiral_constant(-MAX_SPIRAL_CONSTANT);
        assert!(config.validate().is_ok());
    }
}
