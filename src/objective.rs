//! Objective function capability.

/// Maps a candidate (a genome `[bool]` or a vector `[f64]`) to a scalar
/// fitness.
///
/// Any `Fn(&T) -> f64 + Send + Sync` closure implements this trait, so
/// most callers never implement it by hand. The `Send + Sync` bound lets
/// the engines evaluate candidates in parallel; implementations should be
/// pure.
///
/// # Examples
///
/// ```
/// use u_popsearch::Objective;
///
/// let ones = |g: &[bool]| g.iter().filter(|&&b| b).count() as f64;
/// assert_eq!(ones.evaluate(&[true, false, true][..]), 2.0);
/// ```
pub trait Objective<T: ?Sized>: Send + Sync {
    /// Evaluates one candidate.
    fn evaluate(&self, candidate: &T) -> f64;
}

impl<T: ?Sized, F> Objective<T> for F
where
    F: Fn(&T) -> f64 + Send + Sync,
{
    fn evaluate(&self, candidate: &T) -> f64 {
        self(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sphere;

    impl Objective<[f64]> for Sphere {
        fn evaluate(&self, x: &[f64]) -> f64 {
            x.iter().map(|v| v * v).sum()
        }
    }

    #[test]
    fn test_closure_and_struct() {
        let neg = |x: &[f64]| -x[0];
        assert_eq!(neg.evaluate(&[3.0][..]), -3.0);
        assert_eq!(Sphere.evaluate(&[1.0, 2.0][..]), 5.0);
    }
}
