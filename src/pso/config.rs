//! PSO configuration.

use crate::error::{OptimError, Result};

/// How a particle's velocity magnitude is measured against `v_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VelocityCap {
    /// Compare the *squared* magnitude `Σ v²` against `v_max` and rescale
    /// by `v_max / Σ v²`.
    ///
    /// After capping, `Σ v² = v_max² / m < v_max`, so the squared magnitude
    /// never exceeds `v_max`. The true speed bound is therefore `√v_max`.
    #[default]
    Squared,

    /// Compare the Euclidean norm `√Σ v²` against `v_max` and rescale to
    /// exactly `v_max`.
    Euclidean,
}

impl VelocityCap {
    /// Magnitude of `velocity` under this definition.
    pub fn magnitude(self, velocity: &[f64]) -> f64 {
        let squared: f64 = velocity.iter().map(|v| v * v).sum();
        match self {
            VelocityCap::Squared => squared,
            VelocityCap::Euclidean => squared.sqrt(),
        }
    }
}

/// Configuration for the Particle Swarm Optimizer.
///
/// # Examples
///
/// ```
/// use u_popsearch::pso::{PsoConfig, VelocityCap};
///
/// let config = PsoConfig::default()
///     .with_population_size(40)
///     .with_inertia(0.7)
///     .with_cognitive(1.5)
///     .with_social(1.5)
///     .with_radius(2)
///     .with_velocity_cap(VelocityCap::Euclidean)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of particles.
    pub population_size: usize,

    /// Weight on the previous velocity.
    pub inertia: f64,

    /// Weight of the pull toward the particle's own best.
    pub cognitive: f64,

    /// Weight of the pull toward the neighborhood (or global) best.
    pub social: f64,

    /// Velocity magnitude limit, measured per [`VelocityCap`].
    pub v_max: f64,

    /// Ring-lattice radius. `0` uses the global best for every particle.
    pub radius: usize,

    /// Magnitude definition used for the velocity cap.
    pub velocity_cap: VelocityCap,

    /// Whether to evaluate particles in parallel using rayon.
    ///
    /// Only takes effect when the crate is built with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            inertia: 1.0,
            cognitive: 2.0,
            social: 2.0,
            v_max: 1.0,
            radius: 0,
            velocity_cap: VelocityCap::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl PsoConfig {
    /// Sets the number of particles.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the inertia weight.
    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = inertia;
        self
    }

    /// Sets the cognitive (personal-best) coefficient.
    pub fn with_cognitive(mut self, cognitive: f64) -> Self {
        self.cognitive = cognitive;
        self
    }

    /// Sets the social (neighborhood-best) coefficient.
    pub fn with_social(mut self, social: f64) -> Self {
        self.social = social;
        self
    }

    /// Sets the velocity limit.
    pub fn with_v_max(mut self, v_max: f64) -> Self {
        self.v_max = v_max;
        self
    }

    /// Enables the ring lattice with the given radius (`0` disables it).
    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the velocity magnitude definition.
    pub fn with_velocity_cap(mut self, cap: VelocityCap) -> Self {
        self.velocity_cap = cap;
        self
    }

    /// Enables or disables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(OptimError::invalid_dimension("population_size", 0));
        }
        Ok(())
    }
}
