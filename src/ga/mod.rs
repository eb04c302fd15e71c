//! Bit-string Genetic Algorithm.
//!
//! A fully generational GA over fixed-length `bool` genomes. The whole
//! population lives in one contiguous buffer; each generation is bred
//! pairwise through roulette-wheel selection, single-point crossover and
//! bit-flip mutation, then replaces the previous one wholesale.
//!
//! # Key Types
//!
//! - [`GeneticAlgorithm`]: The engine (init, evaluate, next generation, best)
//! - [`GaConfig`]: Population size, operator rates, weighting, policies
//! - [`CumulativeDistribution`]: Normalized running sum used for selection
//! - [`GaBest`] / [`GenerationStats`]: Query results
//!
//! # Conventions
//!
//! [`GeneticAlgorithm::best`] reports the genome with the **lowest**
//! fitness. Selection weights follow [`SelectionWeighting`]; with the
//! default `Proportional` weighting, higher fitness is selected more often.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod engine;
pub mod operators;
mod selection;

pub use config::{GaConfig, OddPolicy};
pub use engine::{GaBest, GenerationStats, GeneticAlgorithm};
pub use selection::{CumulativeDistribution, SelectionWeighting};
