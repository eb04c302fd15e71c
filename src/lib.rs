//! Population-based black-box optimization.
//!
//! Two independent engines that need nothing but a scalar objective:
//!
//! - **Genetic Algorithm (GA)**: Fixed-length bit-string genomes evolved by
//!   roulette-wheel selection, single-point crossover and bit-flip mutation.
//!   Reports the genome with the lowest fitness.
//! - **Particle Swarm Optimization (PSO)**: Particles in a bounded continuous
//!   space with cognitive/social velocity updates, an optional ring-lattice
//!   neighborhood and a velocity cap. Maximizes fitness.
//!
//! Both engines own a [`RandomSource`], so runs are reproducible from a seed
//! and independent of each other. Fitness evaluation can run on rayon with
//! the `parallel` feature.
//!
//! # Example
//!
//! ```
//! use u_popsearch::pso::{Bound, ParticleSwarm};
//!
//! let mut swarm = ParticleSwarm::new(
//!     2,
//!     20,
//!     |x: &[f64]| -(x[0] * x[0] + x[1] * x[1]),
//!     vec![Bound::new(-5.0, 5.0); 2],
//! )
//! .unwrap();
//! swarm.init_with_seed(42);
//! let best = swarm.optimize(100);
//! assert_eq!(best.position.len(), 2);
//! ```

pub mod error;
pub mod ga;
mod layout;
pub mod objective;
pub mod pso;
pub mod random;

pub use error::{OptimError, Result};
pub use objective::Objective;
pub use random::RandomSource;
