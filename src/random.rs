//! Seedable random source owned by each engine instance.
//!
//! [`RandomSource`] replaces a process-global generator: every optimizer
//! holds its own, so two engines seeded alike replay the same sequence
//! regardless of what else runs in the process.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// A seedable pseudo-random generator.
///
/// Implements [`RngCore`], so it can be handed to any function generic
/// over `R: Rng`.
///
/// # Examples
///
/// ```
/// use u_popsearch::RandomSource;
///
/// let mut a = RandomSource::new(7);
/// let mut b = RandomSource::new(7);
/// assert_eq!(a.uniform(), b.uniform());
/// ```
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    rng: StdRng,
}

impl RandomSource {
    /// Creates a source from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a source from a random seed.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restarts the sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Uniform float in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform float in `[lower, upper)`; returns `lower` for an empty range.
    pub fn uniform_in(&mut self, lower: f64, upper: f64) -> f64 {
        lower + self.uniform() * (upper - lower)
    }

    /// Uniform integer in `[lower, upper)`.
    ///
    /// # Panics
    /// Panics if `lower >= upper`.
    pub fn index_in(&mut self, lower: usize, upper: usize) -> usize {
        self.rng.random_range(lower..upper)
    }

    /// Returns `true` with probability `p`.
    ///
    /// `p <= 0` never fires and `p >= 1` always fires.
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }

    /// Derives an independent child source for worker `stream`.
    ///
    /// The child depends only on this source's seed and `stream`, not on
    /// how many values have been drawn so far.
    pub fn derive(&self, stream: u64) -> Self {
        Self::new(splitmix64(self.seed ^ splitmix64(stream.wrapping_add(1))))
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RngCore for RandomSource {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.rng.fill_bytes(dst)
    }
}

/// SplitMix64 finalizer (Steele, Lea & Flood 2014).
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
