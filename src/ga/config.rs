//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use super::selection::SelectionWeighting;
use crate::error::{OptimError, Result};

/// What to do with the last slot when the population size is odd.
///
/// Offspring are bred in pairs, so an odd population leaves one slot that
/// pairing alone cannot fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OddPolicy {
    /// Breed one extra pair and keep only its first child.
    #[default]
    BreedExtra,
    /// Copy the last individual of the current generation unchanged.
    CarryLast,
}

/// Configuration for the bit-string Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_popsearch::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert!((config.crossover_rate - 0.6).abs() < 1e-12);
/// assert!((config.effective_mutation_rate() - 0.01).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_popsearch::ga::{GaConfig, SelectionWeighting};
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_crossover_rate(0.7)
///     .with_mutation_rate(0.05)
///     .with_weighting(SelectionWeighting::Inverted);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of genomes in the population.
    pub population_size: usize,

    /// Probability that a selected pair is recombined rather than copied.
    ///
    /// Values above 1 always recombine, values below 0 never do.
    pub crossover_rate: f64,

    /// Per-bit flip probability.
    ///
    /// `None` means `1 / population_size`.
    pub mutation_rate: Option<f64>,

    /// How fitness values turn into selection weights.
    pub weighting: SelectionWeighting,

    /// Handling of the unpaired slot in odd-sized populations.
    pub odd_policy: OddPolicy,

    /// Whether to evaluate genomes in parallel using rayon.
    ///
    /// Only takes effect when the crate is built with the `parallel` feature.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            crossover_rate: 0.6,
            mutation_rate: None,
            weighting: SelectionWeighting::default(),
            odd_policy: OddPolicy::default(),
            parallel: false,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the per-bit mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = Some(rate);
        self
    }

    /// Sets the selection weighting.
    pub fn with_weighting(mut self, weighting: SelectionWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Sets the odd-population policy.
    pub fn with_odd_policy(mut self, policy: OddPolicy) -> Self {
        self.odd_policy = policy;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The mutation rate actually used, resolving the `1 / N` default.
    pub fn effective_mutation_rate(&self) -> f64 {
        self.mutation_rate
            .unwrap_or_else(|| 1.0 / self.population_size.max(1) as f64)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(OptimError::invalid_dimension("population_size", 0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert!((config.crossover_rate - 0.6).abs() < 1e-12);
        assert!(config.mutation_rate.is_none());
        assert_eq!(config.weighting, SelectionWeighting::Proportional);
        assert_eq!(config.odd_policy, OddPolicy::BreedExtra);
        assert!(!config.parallel);
    }

    #[test]
    fn test_mutation_rate_follows_population() {
        let config = GaConfig::default().with_population_size(20);
        assert!((config.effective_mutation_rate() - 0.05).abs() < 1e-12);

        let config = config.with_mutation_rate(0.3);
        assert!((config.effective_mutation_rate() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_rates_are_stored_verbatim() {
        let config = GaConfig::default()
            .with_crossover_rate(1.5)
            .with_mutation_rate(-0.2);
        assert!((config.crossover_rate - 1.5).abs() < 1e-12);
        assert!((config.effective_mutation_rate() + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(GaConfig::default().validate().is_ok());
        assert_eq!(
            GaConfig::default().with_population_size(0).validate(),
            Err(OptimError::invalid_dimension("population_size", 0))
        );
        assert!(GaConfig::default().with_population_size(1).validate().is_ok());
    }
}
