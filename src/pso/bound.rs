//! Per-dimension search bounds.

use crate::error::{OptimError, Result};
use crate::random::RandomSource;

/// A closed `[lower, upper]` interval for one dimension.
///
/// Bounds define where particles are placed at initialization. They are not
/// enforced afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bound {
    pub lower: f64,
    pub upper: f64,
}

impl Bound {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `upper - lower`.
    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }

    /// Uniform sample in `[lower, upper)`.
    pub fn sample(&self, rng: &mut RandomSource) -> f64 {
        rng.uniform_in(self.lower, self.upper)
    }

    /// Checks `lower <= upper` with both ends finite.
    pub(crate) fn validate(&self, dimension: usize) -> Result<()> {
        if self.lower.is_finite() && self.upper.is_finite() && self.lower <= self.upper {
            Ok(())
        } else {
            Err(OptimError::InvalidBound {
                dimension,
                lower: self.lower,
                upper: self.upper,
            })
        }
    }
}

impl From<(f64, f64)> for Bound {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self::new(lower, upper)
    }
}
