//! Particle swarm state and the three-phase update.
//!
//! Each iteration runs, in strict order:
//!
//! 1. **Evaluate**: score every position, then reconcile personal, global
//!    and (with a ring lattice) local bests.
//! 2. **Velocity**: `v ← w·v + c₁·r₁·(p − x) + c₂·r₂·(n − x)`, with `r₁, r₂`
//!    drawn once per particle, followed by the magnitude cap.
//! 3. **Position**: `x ← x + v`. Positions are not clamped to the bounds.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"
//! - Kennedy & Mendes (2002), "Population Structure and Particle Swarm Performance"

use super::bound::Bound;
use super::config::{PsoConfig, VelocityCap};
use crate::error::{OptimError, Result};
use crate::layout::Stride;
use crate::objective::Objective;
use crate::random::RandomSource;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

/// The best position the swarm has visited.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwarmBest {
    /// Best position found. Empty before the first evaluation.
    pub position: Vec<f64>,
    /// Its fitness; `-inf` before the first evaluation.
    pub fitness: f64,
    /// Particle that found it.
    pub owner: Option<usize>,
}

/// A particle swarm maximizing an objective over `D` continuous dimensions.
///
/// Higher fitness is better, unlike the GA engine.
///
/// # Usage
///
/// ```
/// use u_popsearch::pso::{Bound, ParticleSwarm, PsoConfig};
///
/// let objective = |x: &[f64]| -(x[0] - 5.0).powi(2);
/// let config = PsoConfig::default()
///     .with_population_size(20)
///     .with_inertia(0.7)
///     .with_cognitive(1.5)
///     .with_social(1.5)
///     .with_seed(42);
///
/// let mut swarm =
///     ParticleSwarm::with_config(1, objective, vec![Bound::new(0.0, 10.0)], config).unwrap();
/// swarm.init();
/// let best = swarm.optimize(200);
/// assert!(best.fitness <= 0.0);
/// ```
pub struct ParticleSwarm<F> {
    dim: usize,
    stride: Stride,
    population_size: usize,
    inertia: f64,
    cognitive: f64,
    social: f64,
    v_max: f64,
    radius: usize,
    velocity_cap: VelocityCap,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel: bool,
    seed: Option<u64>,
    bounds: Vec<Bound>,
    position: Vec<f64>,
    velocity: Vec<f64>,
    best_position: Vec<f64>,
    best_fitness: Vec<f64>,
    fitness: Vec<f64>,
    local_best: Vec<usize>,
    global_best: Option<usize>,
    global_best_position: Vec<f64>,
    global_best_fitness: f64,
    objective: F,
    rng: RandomSource,
    iteration: usize,
    initialized: bool,
}

impl<F: Objective<[f64]>> ParticleSwarm<F> {
    /// Creates a swarm of `population_size` particles in `dim` dimensions.
    ///
    /// Defaults: inertia 1.0, cognitive 2.0, social 2.0, `v_max` 1.0,
    /// global topology.
    ///
    /// # Errors
    /// - [`OptimError::InvalidDimension`] if `dim` or `population_size` is 0
    /// - [`OptimError::BoundsMismatch`] if `bounds.len() != dim`
    /// - [`OptimError::InvalidBound`] if a bound is inverted or not finite
    pub fn new(
        dim: usize,
        population_size: usize,
        objective: F,
        bounds: Vec<Bound>,
    ) -> Result<Self> {
        Self::with_config(
            dim,
            objective,
            bounds,
            PsoConfig::default().with_population_size(population_size),
        )
    }

    /// Creates a swarm from a full configuration.
    #[instrument(level = "debug", skip(objective, bounds), fields(population_size = config.population_size))]
    pub fn with_config(
        dim: usize,
        objective: F,
        bounds: Vec<Bound>,
        config: PsoConfig,
    ) -> Result<Self> {
        if dim == 0 {
            return Err(OptimError::invalid_dimension("dim", dim));
        }
        config.validate()?;
        if bounds.len() != dim {
            return Err(OptimError::BoundsMismatch {
                expected: dim,
                actual: bounds.len(),
            });
        }
        for (d, bound) in bounds.iter().enumerate() {
            bound.validate(d)?;
        }

        let n = config.population_size;
        let rng = match config.seed {
            Some(seed) => RandomSource::new(seed),
            None => RandomSource::from_entropy(),
        };
        Ok(Self {
            dim,
            stride: Stride(dim),
            population_size: n,
            inertia: config.inertia,
            cognitive: config.cognitive,
            social: config.social,
            v_max: config.v_max,
            radius: config.radius,
            velocity_cap: config.velocity_cap,
            parallel: config.parallel,
            seed: config.seed,
            bounds,
            position: vec![0.0; n * dim],
            velocity: vec![0.0; n * dim],
            best_position: vec![0.0; n * dim],
            best_fitness: vec![f64::NEG_INFINITY; n],
            fitness: vec![f64::NEG_INFINITY; n],
            local_best: (0..n).collect(),
            global_best: None,
            global_best_position: Vec::with_capacity(dim),
            global_best_fitness: f64::NEG_INFINITY,
            objective,
            rng,
            iteration: 0,
            initialized: false,
        })
    }

    /// Scatters particles uniformly inside the bounds.
    ///
    /// Velocities are drawn from `[0, 1)` per dimension. Personal bests start
    /// at the initial positions with fitness `-inf`; the global best is
    /// cleared. With a configured seed the sequence restarts from it.
    pub fn init(&mut self) {
        if let Some(seed) = self.seed {
            self.rng.reseed(seed);
        }
        self.scatter();
    }

    /// Like [`init`](Self::init) but with an explicit seed.
    pub fn init_with_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
        self.rng.reseed(seed);
        self.scatter();
    }

    #[instrument(level = "debug", skip(self), fields(dim = self.dim, population_size = self.population_size))]
    fn scatter(&mut self) {
        for i in 0..self.population_size {
            for d in 0..self.dim {
                let k = self.stride.index(i, d);
                self.position[k] = self.bounds[d].sample(&mut self.rng);
                self.velocity[k] = self.rng.uniform();
            }
            self.local_best[i] = i;
        }
        self.best_position.copy_from_slice(&self.position);
        self.best_fitness.fill(f64::NEG_INFINITY);
        self.fitness.fill(f64::NEG_INFINITY);
        self.global_best = None;
        self.global_best_position.clear();
        self.global_best_fitness = f64::NEG_INFINITY;
        self.iteration = 0;
        self.initialized = true;

        tracing::info!(seed = ?self.seed, radius = self.radius, "swarm initialized");
    }

    /// Enables the ring lattice with radius `r`; `0` returns to the global
    /// topology.
    pub fn set_radius(&mut self, r: usize) {
        self.radius = r;
    }

    /// Replaces the inertia weight.
    pub fn set_inertia(&mut self, inertia: f64) {
        self.inertia = inertia;
    }

    /// Replaces the cognitive (personal-best) coefficient.
    pub fn set_cognitive(&mut self, cognitive: f64) {
        self.cognitive = cognitive;
    }

    /// Replaces the social (neighborhood-best) coefficient.
    pub fn set_social(&mut self, social: f64) {
        self.social = social;
    }

    /// Sets the velocity limit. Non-positive values collapse every capped
    /// velocity to zero or reverse it.
    pub fn set_vmax(&mut self, v_max: f64) {
        self.v_max = v_max;
    }

    /// Switches how velocity magnitude is measured against `v_max`.
    pub fn set_velocity_cap(&mut self, cap: VelocityCap) {
        self.velocity_cap = cap;
    }

    /// One iteration: evaluate, update velocities, move.
    ///
    /// An uninitialized swarm is initialized first.
    pub fn update(&mut self) {
        if !self.initialized {
            tracing::warn!("update called before init; initializing swarm");
            self.init();
        }
        self.evaluate();
        self.update_velocities();
        self.update_positions();
        self.iteration += 1;

        tracing::debug!(
            iteration = self.iteration,
            global_best = self.global_best_fitness,
            "swarm iteration complete"
        );
    }

    /// Runs `iterations` updates and returns the global best.
    pub fn optimize(&mut self, iterations: usize) -> SwarmBest {
        for _ in 0..iterations {
            self.update();
        }
        self.best()
    }

    /// The global best found so far.
    pub fn best(&self) -> SwarmBest {
        SwarmBest {
            position: self.global_best_position.clone(),
            fitness: self.global_best_fitness,
            owner: self.global_best,
        }
    }

    fn evaluate(&mut self) {
        let scores = self.score_swarm();

        for (i, &f) in scores.iter().enumerate() {
            let row = self.stride.range(i);
            if f > self.best_fitness[i] {
                self.best_fitness[i] = f;
                self.best_position[row.clone()].copy_from_slice(&self.position[row.clone()]);
            }
            if f > self.global_best_fitness {
                self.global_best_fitness = f;
                self.global_best = Some(i);
                self.global_best_position.clear();
                self.global_best_position
                    .extend_from_slice(&self.position[row]);
            }
        }
        self.fitness = scores;

        if self.radius > 0 {
            self.refresh_local_best();
        }
    }

    fn score_swarm(&self) -> Vec<f64> {
        let objective = &self.objective;

        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                return self
                    .position
                    .par_chunks(self.dim)
                    .map(|x| objective.evaluate(x))
                    .collect();
            }
        }

        self.position
            .chunks(self.dim)
            .map(|x| objective.evaluate(x))
            .collect()
    }

    /// Points each particle at the neighbor with the highest personal-best
    /// fitness, itself included. A tie with the particle keeps the particle;
    /// other ties keep the first candidate in window order `i-r..=i+r`.
    fn refresh_local_best(&mut self) {
        let n = self.population_size as isize;
        let r = self.radius as isize;
        for i in 0..self.population_size {
            let mut best = i;
            for offset in -r..=r {
                let j = (i as isize + offset).rem_euclid(n) as usize;
                if self.best_fitness[j] > self.best_fitness[best] {
                    best = j;
                }
            }
            self.local_best[i] = best;
        }
    }

    fn update_velocities(&mut self) {
        for i in 0..self.population_size {
            let r1 = self.rng.uniform();
            let r2 = self.rng.uniform();
            let row = self.stride.range(i);

            let neighbor: &[f64] = if self.radius > 0 {
                &self.best_position[self.stride.range(self.local_best[i])]
            } else if self.global_best.is_some() {
                &self.global_best_position
            } else {
                &self.best_position[row.clone()]
            };
            let position = &self.position[row.clone()];
            let personal = &self.best_position[row.clone()];
            let velocity = &mut self.velocity[row];

            for d in 0..self.dim {
                let cognitive = self.cognitive * r1 * (personal[d] - position[d]);
                let social = self.social * r2 * (neighbor[d] - position[d]);
                velocity[d] = self.inertia * velocity[d] + cognitive + social;
            }

            let magnitude = self.velocity_cap.magnitude(velocity);
            if magnitude > self.v_max && magnitude > 0.0 {
                let scale = self.v_max / magnitude;
                for v in velocity.iter_mut() {
                    *v *= scale;
                }
            }
        }
    }

    fn update_positions(&mut self) {
        for (x, v) in self.position.iter_mut().zip(&self.velocity) {
            *x += v;
        }
    }

    /// Ring-lattice neighbors of particle `i`, in window order
    /// `i-r, …, i, …, i+r` (mod P), without repeats.
    ///
    /// With the ring disabled every particle is a neighbor.
    ///
    /// # Panics
    /// Panics if `i >= population_size`.
    pub fn neighbors(&self, i: usize) -> Vec<usize> {
        assert!(i < self.population_size, "particle {i} out of range");
        if self.radius == 0 {
            return (0..self.population_size).collect();
        }

        let n = self.population_size as isize;
        let r = self.radius as isize;
        let mut seen = vec![false; self.population_size];
        let mut out = Vec::with_capacity((2 * self.radius + 1).min(self.population_size));
        for offset in -r..=r {
            let j = (i as isize + offset).rem_euclid(n) as usize;
            if !seen[j] {
                seen[j] = true;
                out.push(j);
            }
        }
        out
    }

    /// Velocity magnitude of particle `i` under the active [`VelocityCap`].
    pub fn velocity_magnitude(&self, i: usize) -> f64 {
        self.velocity_cap.magnitude(self.velocity(i))
    }

    /// Current position of particle `i`.
    pub fn position(&self, i: usize) -> &[f64] {
        self.stride.row(&self.position, i)
    }

    /// Current velocity of particle `i`.
    pub fn velocity(&self, i: usize) -> &[f64] {
        self.stride.row(&self.velocity, i)
    }

    /// Personal-best position and fitness of particle `i`.
    pub fn personal_best(&self, i: usize) -> (&[f64], f64) {
        (self.stride.row(&self.best_position, i), self.best_fitness[i])
    }

    /// Index of the particle whose personal best steers particle `i`.
    ///
    /// Only meaningful with the ring lattice enabled.
    pub fn local_best(&self, i: usize) -> usize {
        self.local_best[i]
    }

    /// Fitness of each particle at its last evaluated position.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Initialization bounds, one per dimension.
    pub fn bounds(&self) -> &[Bound] {
        &self.bounds
    }

    /// Completed iterations since `init`.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Number of dimensions.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of particles.
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Current inertia weight.
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Current cognitive coefficient.
    pub fn cognitive(&self) -> f64 {
        self.cognitive
    }

    /// Current social coefficient.
    pub fn social(&self) -> f64 {
        self.social
    }

    /// Current velocity limit.
    pub fn v_max(&self) -> f64 {
        self.v_max
    }

    /// Ring-lattice radius; 0 means global topology.
    pub fn radius(&self) -> usize {
        self.radius
    }
}

// ============================================================================
// Tests
// ============================================================================
