//! Bit-string genetic operators.
//!
//! These operate on `&[bool]` genomes and are independent of the engine, so
//! they can be reused or tested in isolation.
//!
//! - [`single_point_crossover`]: splice two parents at one cut point
//! - [`bit_flip_mutation`]: flip each bit independently
//! - [`random_genome`]: fair coin flip per bit

use rand::Rng;

/// Single-point crossover.
///
/// Draws a cut point uniformly from `[1, L-1]` and returns
/// `(a[..cut] ++ b[cut..], b[..cut] ++ a[cut..])`. Genomes of length 1 have
/// no interior cut point and come back unchanged.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn single_point_crossover<R: Rng>(
    parent_a: &[bool],
    parent_b: &[bool],
    rng: &mut R,
) -> (Vec<bool>, Vec<bool>) {
    let n = parent_a.len();
    assert_eq!(n, parent_b.len(), "parents must have equal length");

    if n < 2 {
        return (parent_a.to_vec(), parent_b.to_vec());
    }
    let cut = rng.random_range(1..n);
    splice(parent_a, parent_b, cut)
}

/// Splices two equal-length parents at `cut`.
pub(crate) fn splice(parent_a: &[bool], parent_b: &[bool], cut: usize) -> (Vec<bool>, Vec<bool>) {
    let mut child_a = Vec::with_capacity(parent_a.len());
    child_a.extend_from_slice(&parent_a[..cut]);
    child_a.extend_from_slice(&parent_b[cut..]);

    let mut child_b = Vec::with_capacity(parent_b.len());
    child_b.extend_from_slice(&parent_b[..cut]);
    child_b.extend_from_slice(&parent_a[cut..]);

    (child_a, child_b)
}

/// Flips every bit independently with probability `rate`.
///
/// Returns the number of flipped bits.
pub fn bit_flip_mutation<R: Rng>(genome: &mut [bool], rate: f64, rng: &mut R) -> usize {
    let mut flipped = 0;
    for bit in genome.iter_mut() {
        if rng.random::<f64>() < rate {
            *bit = !*bit;
            flipped += 1;
        }
    }
    flipped
}

/// Fills `genome` with independent fair coin flips.
pub fn random_genome<R: Rng>(genome: &mut [bool], rng: &mut R) {
    for bit in genome.iter_mut() {
        *bit = rng.random_bool(0.5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RandomSource;

    #[test]
    fn test_splice() {
        let a = [true; 5];
        let b = [false; 5];
        let (ca, cb) = splice(&a, &b, 2);
        assert_eq!(ca, vec![true, true, false, false, false]);
        assert_eq!(cb, vec![false, false, true, true, true]);
    }

    #[test]
    fn test_crossover_cut_is_interior() {
        let a = [true; 8];
        let b = [false; 8];
        let mut rng = RandomSource::new(42);
        for _ in 0..500 {
            let (ca, cb) = single_point_crossover(&a, &b, &mut rng);
            let cut = ca.iter().take_while(|&&x| x).count();
            assert!((1..8).contains(&cut), "cut {cut} not interior");
            // Each child is a prefix of one parent followed by the other's suffix
            assert!(ca[cut..].iter().all(|&x| !x));
            assert!(cb[..cut].iter().all(|&x| !x));
            assert!(cb[cut..].iter().all(|&x| x));
        }
    }

    #[test]
    fn test_crossover_preserves_gene_counts() {
        let a = [true, false, true, true, false, false];
        let b = [false, false, true, false, true, true];
        let mut rng = RandomSource::new(3);
        let (ca, cb) = single_point_crossover(&a, &b, &mut rng);
        for i in 0..a.len() {
            let mut before = [a[i], b[i]];
            let mut after = [ca[i], cb[i]];
            before.sort();
            after.sort();
            assert_eq!(before, after, "locus {i} not conserved");
        }
    }

    #[test]
    fn test_crossover_length_one() {
        let mut rng = RandomSource::new(1);
        let (ca, cb) = single_point_crossover(&[true], &[false], &mut rng);
        assert_eq!(ca, vec![true]);
        assert_eq!(cb, vec![false]);
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_crossover_length_mismatch_panics() {
        let mut rng = RandomSource::new(1);
        single_point_crossover(&[true, false], &[true], &mut rng);
    }

    #[test]
    fn test_mutation_extremes() {
        let mut rng = RandomSource::new(42);
        let mut genome = vec![false; 16];

        assert_eq!(bit_flip_mutation(&mut genome, 0.0, &mut rng), 0);
        assert!(genome.iter().all(|&b| !b));

        assert_eq!(bit_flip_mutation(&mut genome, 1.0, &mut rng), 16);
        assert!(genome.iter().all(|&b| b));
    }

    #[test]
    fn test_mutation_rate_is_per_bit() {
        let mut rng = RandomSource::new(5);
        let mut genome = vec![false; 10_000];
        let flipped = bit_flip_mutation(&mut genome, 0.1, &mut rng);
        assert!(
            (800..1200).contains(&flipped),
            "expected ~1000 flips, got {flipped}"
        );
        assert_eq!(genome.iter().filter(|&&b| b).count(), flipped);
    }

    #[test]
    fn test_random_genome_is_mixed() {
        let mut rng = RandomSource::new(42);
        let mut genome = vec![false; 1_000];
        random_genome(&mut genome, &mut rng);
        let ones = genome.iter().filter(|&&b| b).count();
        assert!((400..600).contains(&ones), "got {ones} ones");
    }
}
