//! Conversion from fractional probabilities to integer trigger thresholds.

use crate::random::MAX_RANGE;
use std::fmt;

/// Errors from building a [`Probability`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ProbabilityError {
    /// The fraction was below 0.0, above 1.0, or NaN.
    #[error("probability {value} is outside [0.0, 1.0]")]
    OutOfRange {
        /// The rejected input.
        value: f64,
    },
}

/// Trigger threshold in `[0, MAX_RANGE]`.
///
/// A sample `s` triggers the fault when `s < threshold`. A threshold of zero
/// never triggers; [`Probability::ALWAYS`] triggers for every sample except
/// `MAX_RANGE` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Probability(i64);

impl Probability {
    /// Never triggers.
    pub const NEVER: Probability = Probability(0);

    /// Triggers on every sample below `MAX_RANGE`.
    pub const ALWAYS: Probability = Probability(MAX_RANGE);

    /// Convert a fraction in `[0.0, 1.0]` to a threshold of `floor(p * MAX_RANGE)`.
    pub fn new(p: f64) -> Result<Self, ProbabilityError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(ProbabilityError::OutOfRange { value: p });
        }
        // `as` saturates at i64::MAX, which is exactly the p = 1.0 case.
        Ok(Probability((p * MAX_RANGE as f64) as i64))
    }

    /// The integer threshold.
    pub fn threshold(self) -> i64 {
        self.0
    }

    /// The threshold as a fraction of `MAX_RANGE`.
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / MAX_RANGE as f64
    }

    /// Whether `sample` falls under the threshold.
    pub fn triggers(self, sample: i64) -> bool {
        sample < self.0
    }
}

impl Default for Probability {
    fn default() -> Self {
        Self::ALWAYS
    }
}

impl TryFrom<f64> for Probability {
    type Error = ProbabilityError;

    fn try_from(p: f64) -> Result<Self, Self::Error> {
        Self::new(p)
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.as_f64())
    }
}
