//! Particle Swarm Optimization (PSO).
//!
//! A swarm of particles moves through a bounded continuous space, each
//! pulled toward its own best position and toward the best position known
//! to its neighborhood. The neighborhood is either the whole swarm (global
//! best) or a ring lattice of radius `r` over particle indices.
//!
//! # Key Types
//!
//! - [`ParticleSwarm`]: The engine (init, update, optimize, best)
//! - [`PsoConfig`]: Coefficients, velocity limit, topology, seed
//! - [`Bound`]: Per-dimension initialization interval
//! - [`VelocityCap`]: Squared or Euclidean magnitude for the `v_max` cap
//!
//! # Conventions
//!
//! The swarm **maximizes** fitness. For minimization, negate the objective.

mod bound;
mod config;
mod swarm;

pub use bound::Bound;
pub use config::{PsoConfig, VelocityCap};
pub use swarm::{ParticleSwarm, SwarmBest};
