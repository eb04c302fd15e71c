//! Fitness-proportionate (roulette wheel) selection.
//!
//! Fitness values are turned into weights, accumulated into a running sum
//! and normalized so the last entry is exactly 1.0. Drawing `u` uniformly
//! from `[0, 1)` and taking the first index whose cumulative value reaches
//! `u` selects each individual with probability equal to its weight share.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1
//! - Baker (1987), "Reducing Bias and Inefficiency in the Selection Algorithm"

use crate::error::{OptimError, Result};

/// Offset keeping inverted weights strictly positive.
const INVERTED_EPSILON: f64 = 1e-10;

/// How raw fitness values map to roulette weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionWeighting {
    /// Weight equals fitness.
    ///
    /// Larger fitness is selected more often, even though
    /// [`GeneticAlgorithm::best`](super::GeneticAlgorithm::best) reports the
    /// *smallest* fitness. The weights must share one sign and must not sum
    /// to zero.
    #[default]
    Proportional,

    /// Weight is `max_fitness - fitness + ε`.
    ///
    /// Lower fitness is selected more often, matching the minimization
    /// convention. Never degenerate for finite fitness.
    Inverted,
}

impl SelectionWeighting {
    fn weights(self, fitness: &[f64]) -> Vec<f64> {
        match self {
            SelectionWeighting::Proportional => fitness.to_vec(),
            SelectionWeighting::Inverted => {
                let max = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                fitness
                    .iter()
                    .map(|&f| max - f + INVERTED_EPSILON)
                    .collect()
            }
        }
    }
}

/// A normalized, non-decreasing running sum of selection weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CumulativeDistribution {
    values: Vec<f64>,
}

impl CumulativeDistribution {
    /// Builds the distribution for `fitness` under `weighting`.
    ///
    /// # Errors
    /// [`OptimError::DegenerateFitness`] when the weight total is zero or
    /// not finite, or when some weight has the opposite sign to the total
    /// (the normalized running sum would decrease).
    pub fn build(fitness: &[f64], weighting: SelectionWeighting) -> Result<Self> {
        let mut values = weighting.weights(fitness);
        let total: f64 = values.iter().sum();
        if total == 0.0 || !total.is_finite() || values.iter().any(|&w| w * total < 0.0) {
            return Err(OptimError::degenerate(total));
        }

        let mut running = 0.0;
        for v in values.iter_mut() {
            running += *v;
            *v = running;
        }
        for v in values.iter_mut() {
            *v /= total;
        }
        Ok(Self { values })
    }

    /// Smallest index whose cumulative value is at least `u`.
    ///
    /// Binary search, O(log N). Values of `u` past the last entry (only
    /// possible through rounding) resolve to the last index.
    pub fn select(&self, u: f64) -> usize {
        let idx = self.values.partition_point(|&c| c < u);
        idx.min(self.values.len().saturating_sub(1))
    }

    /// The normalized cumulative values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the distribution has been built yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RandomSource;
    use proptest::prelude::*;

    #[test]
    fn test_normalized_running_sum() {
        let cdf =
            CumulativeDistribution::build(&[1.0, 1.0, 2.0], SelectionWeighting::Proportional)
                .unwrap();
        assert_eq!(cdf.values(), &[0.25, 0.5, 1.0]);
    }

    #[test]
    fn test_all_negative_fitness_still_normalizes() {
        let cdf =
            CumulativeDistribution::build(&[-1.0, -3.0], SelectionWeighting::Proportional)
                .unwrap();
        assert_eq!(cdf.values(), &[0.25, 1.0]);
    }

    #[test]
    fn test_zero_total_is_degenerate() {
        let err = CumulativeDistribution::build(&[0.0, 0.0], SelectionWeighting::Proportional)
            .unwrap_err();
        assert_eq!(err, OptimError::DegenerateFitness { total: 0.0 });

        let err = CumulativeDistribution::build(&[1.0, -1.0], SelectionWeighting::Proportional)
            .unwrap_err();
        assert!(matches!(err, OptimError::DegenerateFitness { .. }));
    }

    #[test]
    fn test_mixed_sign_weights_are_degenerate() {
        let err =
            CumulativeDistribution::build(&[3.0, -1.0, 0.5], SelectionWeighting::Proportional)
                .unwrap_err();
        assert_eq!(err, OptimError::DegenerateFitness { total: 2.5 });

        let err =
            CumulativeDistribution::build(&[-2.0, 0.5, -1.0], SelectionWeighting::Proportional)
                .unwrap_err();
        assert!(matches!(err, OptimError::DegenerateFitness { .. }));

        // Zero weights alongside one sign are fine
        let cdf =
            CumulativeDistribution::build(&[0.0, -1.0, 0.0], SelectionWeighting::Proportional)
                .unwrap();
        assert_eq!(cdf.values(), &[0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_nan_is_degenerate() {
        let result =
            CumulativeDistribution::build(&[1.0, f64::NAN], SelectionWeighting::Inverted);
        assert!(matches!(result, Err(OptimError::DegenerateFitness { .. })));
    }

    #[test]
    fn test_inverted_equal_fitness_is_uniform() {
        let cdf = CumulativeDistribution::build(&[0.0; 4], SelectionWeighting::Inverted).unwrap();
        for (i, &c) in cdf.values().iter().enumerate() {
            assert!((c - (i + 1) as f64 / 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_select_boundaries() {
        let cdf =
            CumulativeDistribution::build(&[1.0, 1.0, 2.0], SelectionWeighting::Proportional)
                .unwrap();
        assert_eq!(cdf.select(0.0), 0);
        assert_eq!(cdf.select(0.25), 0);
        assert_eq!(cdf.select(0.2500001), 1);
        assert_eq!(cdf.select(0.5), 1);
        assert_eq!(cdf.select(0.75), 2);
        assert_eq!(cdf.select(1.0 - f64::EPSILON), 2);
        assert_eq!(cdf.select(1.5), 2);
    }

    #[test]
    fn test_select_skips_zero_weight() {
        let cdf =
            CumulativeDistribution::build(&[0.0, 3.0, 0.0, 1.0], SelectionWeighting::Proportional)
                .unwrap();
        let mut rng = RandomSource::new(42);
        for _ in 0..1_000 {
            let idx = cdf.select(rng.uniform());
            assert!(idx == 1 || idx == 3, "zero-weight index {idx} selected");
        }
    }

    #[test]
    fn test_inverted_favors_lowest() {
        let fitness = [100.0, 50.0, 1.0, 80.0];
        let cdf = CumulativeDistribution::build(&fitness, SelectionWeighting::Inverted).unwrap();
        let mut rng = RandomSource::new(42);

        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            counts[cdf.select(rng.uniform())] += 1;
        }
        assert!(
            counts[2] > counts[1] && counts[1] > counts[3] && counts[3] > counts[0],
            "expected ordering by inverse fitness, got {counts:?}"
        );
    }

    #[test]
    fn test_proportional_favors_highest() {
        let fitness = [1.0, 8.0, 1.0];
        let cdf =
            CumulativeDistribution::build(&fitness, SelectionWeighting::Proportional).unwrap();
        let mut rng = RandomSource::new(7);

        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            counts[cdf.select(rng.uniform())] += 1;
        }
        assert!(counts[1] > 7_000, "expected index 1 to dominate: {counts:?}");
    }

    proptest! {
        #[test]
        fn prop_distribution_is_normalized_and_monotone(
            fitness in prop::collection::vec(0.001f64..1000.0, 1..64)
        ) {
            let cdf = CumulativeDistribution::build(&fitness, SelectionWeighting::Proportional)
                .unwrap();
            prop_assert_eq!(cdf.len(), fitness.len());
            let last = *cdf.values().last().unwrap();
            prop_assert!((last - 1.0).abs() < 1e-12);
            for w in cdf.values().windows(2) {
                prop_assert!(w[0] <= w[1]);
            }
        }

        #[test]
        fn prop_select_returns_first_reaching_index(
            fitness in prop::collection::vec(-1000.0f64..1000.0, 1..64),
            u in 0.0f64..1.0,
        ) {
            let cdf = CumulativeDistribution::build(&fitness, SelectionWeighting::Inverted)
                .unwrap();
            let idx = cdf.select(u);
            prop_assert!(idx < fitness.len());
            prop_assert!(cdf.values()[idx] >= u);
            if idx > 0 {
                prop_assert!(cdf.values()[idx - 1] < u);
            }
            prop_assert_eq!(cdf.select(0.0), 0);
        }
    }
}
