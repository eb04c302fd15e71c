//! Generational bit-string GA.
//!
//! [`GeneticAlgorithm`] owns a population of fixed-length genomes stored in
//! one flat buffer and advances it one generation at a time:
//! evaluate → select → recombine → mutate → replace.

use super::config::{GaConfig, OddPolicy};
use super::operators::{bit_flip_mutation, random_genome, single_point_crossover};
use super::selection::{CumulativeDistribution, SelectionWeighting};
use crate::error::{OptimError, Result};
use crate::layout::Stride;
use crate::objective::Objective;
use crate::random::RandomSource;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

/// The best genome of a population.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaBest {
    /// Position of the genome within the population.
    pub index: usize,
    /// The genome itself.
    pub genome: Vec<bool>,
    /// Its fitness (lowest in the population).
    pub fitness: f64,
}

/// Summary of the current generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generations produced since `init` (0 right after `init`).
    pub generation: usize,
    /// Lowest fitness in the population.
    pub best_fitness: f64,
    /// Mean fitness of the population.
    pub average_fitness: f64,
}

/// A fully generational GA over bit strings of length `L`.
///
/// Lower fitness is reported as better by [`best`](Self::best). Parent
/// selection is roulette-wheel over a [`CumulativeDistribution`] whose
/// weights depend on the configured [`SelectionWeighting`].
///
/// # Usage
///
/// ```
/// use u_popsearch::ga::{GaConfig, GeneticAlgorithm, SelectionWeighting};
///
/// // Count zero bits; the all-ones genome scores 0.
/// let zeros = |g: &[bool]| g.iter().filter(|&&b| !b).count() as f64;
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_weighting(SelectionWeighting::Inverted);
///
/// let mut ga = GeneticAlgorithm::with_config(8, zeros, config).unwrap();
/// ga.init(42).unwrap();
/// let best = ga.run(50).unwrap();
/// assert_eq!(best.genome.len(), 8);
/// ```
pub struct GeneticAlgorithm<F> {
    length: usize,
    stride: Stride,
    population_size: usize,
    crossover_rate: f64,
    mutation_rate: f64,
    weighting: SelectionWeighting,
    odd_policy: OddPolicy,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel: bool,
    population: Vec<bool>,
    fitness: Vec<f64>,
    distribution: CumulativeDistribution,
    objective: F,
    rng: RandomSource,
    generation: usize,
    initialized: bool,
    fitness_current: bool,
}

impl<F: Objective<[bool]>> GeneticAlgorithm<F> {
    /// Creates a GA with `population_size` genomes of `length` bits.
    ///
    /// Crossover rate defaults to 0.6 and mutation rate to
    /// `1 / population_size`.
    ///
    /// # Errors
    /// [`OptimError::InvalidDimension`] if either size is zero.
    pub fn new(length: usize, population_size: usize, objective: F) -> Result<Self> {
        Self::with_config(
            length,
            objective,
            GaConfig::default().with_population_size(population_size),
        )
    }

    /// Creates a GA from a full configuration.
    #[instrument(level = "debug", skip(objective), fields(population_size = config.population_size))]
    pub fn with_config(length: usize, objective: F, config: GaConfig) -> Result<Self> {
        if length == 0 {
            return Err(OptimError::invalid_dimension("length", length));
        }
        config.validate()?;

        let n = config.population_size;
        Ok(Self {
            length,
            stride: Stride(length),
            population_size: n,
            crossover_rate: config.crossover_rate,
            mutation_rate: config.effective_mutation_rate(),
            weighting: config.weighting,
            odd_policy: config.odd_policy,
            parallel: config.parallel,
            population: vec![false; n * length],
            fitness: vec![0.0; n],
            distribution: CumulativeDistribution::default(),
            objective,
            rng: RandomSource::new(0),
            generation: 0,
            initialized: false,
            fitness_current: false,
        })
    }

    /// Fills the population with random bits and evaluates it.
    ///
    /// `seed` fixes every subsequent stochastic decision of this instance.
    #[instrument(level = "debug", skip(self), fields(length = self.length, population_size = self.population_size))]
    pub fn init(&mut self, seed: u64) -> Result<()> {
        self.rng.reseed(seed);
        random_genome(&mut self.population, &mut self.rng);
        self.generation = 0;
        self.initialized = true;
        self.evaluate_fitness()?;

        tracing::info!(
            seed,
            average_fitness = self.average_fitness(),
            "GA population initialized"
        );
        Ok(())
    }

    /// Replaces the crossover probability.
    pub fn set_crossover_probability(&mut self, cp: f64) {
        self.crossover_rate = cp;
    }

    /// Replaces the per-bit mutation probability.
    pub fn set_mutation_probability(&mut self, mp: f64) {
        self.mutation_rate = mp;
    }

    /// Evaluates every genome and rebuilds the cumulative distribution.
    ///
    /// All evaluations complete before the distribution is built.
    ///
    /// # Errors
    /// - [`OptimError::NotInitialized`] before [`init`](Self::init)
    /// - [`OptimError::DegenerateFitness`] when the selection weights sum to
    ///   zero, are not finite, or mix signs; the fitness vector is still
    ///   updated
    pub fn evaluate_fitness(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(OptimError::NotInitialized);
        }
        self.fitness = self.score_population();
        self.fitness_current = false;

        match CumulativeDistribution::build(&self.fitness, self.weighting) {
            Ok(distribution) => {
                self.distribution = distribution;
                self.fitness_current = true;
                Ok(())
            }
            Err(err) => {
                tracing::error!(generation = self.generation, error = %err, "fitness evaluation failed");
                Err(err)
            }
        }
    }

    fn score_population(&self) -> Vec<f64> {
        let objective = &self.objective;

        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                return self
                    .population
                    .par_chunks(self.length)
                    .map(|genome| objective.evaluate(genome))
                    .collect();
            }
        }

        self.population
            .chunks(self.length)
            .map(|genome| objective.evaluate(genome))
            .collect()
    }

    /// Roulette-wheel lookup: smallest index whose cumulative weight is at
    /// least `u`.
    ///
    /// `select_index(0.0)` is always 0.
    pub fn select_index(&self, u: f64) -> usize {
        self.distribution.select(u)
    }

    /// Recombines genomes `index_a` and `index_b` at one random cut point.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn crossover(&mut self, index_a: usize, index_b: usize) -> (Vec<bool>, Vec<bool>) {
        let a = self.stride.row(&self.population, index_a);
        let b = self.stride.row(&self.population, index_b);
        single_point_crossover(a, b, &mut self.rng)
    }

    /// Flips each bit of `genome` with the mutation probability.
    pub fn mutate(&mut self, genome: &mut [bool]) {
        bit_flip_mutation(genome, self.mutation_rate, &mut self.rng);
    }

    /// Breeds the next generation and replaces the population wholesale.
    ///
    /// Pairs of parents are drawn by roulette selection, recombined with the
    /// crossover probability (copied otherwise), mutated and written in
    /// order. No individual survives by reference. The new population is
    /// evaluated before returning.
    pub fn next_generation(&mut self) -> Result<()> {
        if !self.fitness_current {
            self.evaluate_fitness()?;
        }

        let n = self.population_size;
        let total = n * self.length;
        let pairs = match self.odd_policy {
            OddPolicy::BreedExtra => n.div_ceil(2),
            OddPolicy::CarryLast => n / 2,
        };

        let mut next = Vec::with_capacity(total);
        for _ in 0..pairs {
            let u_a = self.rng.uniform();
            let u_b = self.rng.uniform();
            let idx_a = self.select_index(u_a);
            let idx_b = self.select_index(u_b);

            let (mut child_a, mut child_b) = if self.rng.chance(self.crossover_rate) {
                self.crossover(idx_a, idx_b)
            } else {
                (
                    self.stride.row(&self.population, idx_a).to_vec(),
                    self.stride.row(&self.population, idx_b).to_vec(),
                )
            };
            self.mutate(&mut child_a);
            self.mutate(&mut child_b);

            next.extend_from_slice(&child_a);
            if next.len() < total {
                next.extend_from_slice(&child_b);
            }
        }
        if next.len() < total {
            next.extend_from_slice(self.stride.row(&self.population, n - 1));
        }
        debug_assert_eq!(next.len(), total);

        self.population = next;
        self.generation += 1;
        self.evaluate_fitness()?;

        tracing::debug!(
            generation = self.generation,
            average_fitness = self.average_fitness(),
            "GA generation complete"
        );
        Ok(())
    }

    /// Runs `generations` generations and returns the final best genome.
    pub fn run(&mut self, generations: usize) -> Result<GaBest> {
        for _ in 0..generations {
            self.next_generation()?;
        }
        self.best()
    }

    /// The genome with the lowest fitness; ties go to the lowest index.
    ///
    /// Fitness is re-evaluated whenever the population changes, so this
    /// reads the current values directly.
    pub fn best(&self) -> Result<GaBest> {
        if !self.initialized {
            return Err(OptimError::NotInitialized);
        }
        let mut index = 0;
        let mut fitness = f64::INFINITY;
        for (i, &f) in self.fitness.iter().enumerate() {
            if f < fitness {
                fitness = f;
                index = i;
            }
        }
        Ok(GaBest {
            index,
            genome: self.genome(index).to_vec(),
            fitness: self.fitness[index],
        })
    }

    /// Arithmetic mean of the fitness vector.
    pub fn average_fitness(&self) -> f64 {
        self.fitness.iter().sum::<f64>() / self.population_size as f64
    }

    /// Best and average fitness of the current generation.
    pub fn stats(&self) -> Result<GenerationStats> {
        let best = self.best()?;
        Ok(GenerationStats {
            generation: self.generation,
            best_fitness: best.fitness,
            average_fitness: self.average_fitness(),
        })
    }

    /// Genome `index`.
    ///
    /// # Panics
    /// Panics if `index >= population_size`.
    pub fn genome(&self, index: usize) -> &[bool] {
        self.stride.row(&self.population, index)
    }

    /// Fitness values, index-aligned with the population.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// The current cumulative selection distribution.
    pub fn distribution(&self) -> &CumulativeDistribution {
        &self.distribution
    }

    /// Generations produced since `init`.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Genome length `L`.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Population size `N`.
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Current crossover probability.
    pub fn crossover_probability(&self) -> f64 {
        self.crossover_rate
    }

    /// Current mutation probability.
    pub fn mutation_probability(&self) -> f64 {
        self.mutation_rate
    }
}

// ============================================================================
// Tests
// ============================================================================
