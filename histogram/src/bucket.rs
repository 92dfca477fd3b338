use crate::BuildError;

/// A contiguous value range `[min, max]` and the number of samples observed
/// within it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bucket {
    pub(crate) min: f64,
    pub(crate) max: f64,
    pub(crate) frequency: u64,
}

impl Bucket {
    /// Create a new bucket. Both bounds must be finite and `min <= max`.
    pub fn new(min: f64, max: f64, frequency: u64) -> Result<Self, BuildError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(BuildError::InvalidBucket { min, max });
        }

        Ok(Self { min, max, frequency })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    /// The width of the bucket. Zero when the bucket holds a single
    /// repeated value.
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn range(&self) -> std::ops::RangeInclusive<f64> {
        std::ops::RangeInclusive::new(self.min, self.max)
    }
}

// bounds are never NaN
impl Eq for Bucket {}

impl std::hash::Hash for Bucket {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // adding zero folds -0.0 into 0.0
        (self.min + 0.0).to_bits().hash(state);
        (self.max + 0.0).to_bits().hash(state);
        self.frequency.hash(state);
    }
}
