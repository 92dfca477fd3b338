//! Bucket construction strategies.
//!
//! A strategy only decides how samples are grouped into buckets. Everything
//! else, publishing and estimation included, is shared by all strategies.

mod equi_depth;
mod equi_width;

pub use equi_depth::EquiDepth;
pub use equi_width::EquiWidth;

use crate::{Bucket, BuildError, Config};

pub trait Strategy: Send + Sync {
    /// A short name used in log messages.
    fn name(&self) -> &'static str;

    /// Group the samples into buckets. The returned buckets must be sorted
    /// ascending by `min`, pairwise disjoint, and each must have a non-zero
    /// frequency. The result must not depend on the order of the samples.
    fn buckets(&self, samples: &[f64], config: &Config) -> Result<Vec<Bucket>, BuildError>;
}

/// Returns the global min and max of the samples in a single pass, rejecting
/// empty sample sets and non-finite values.
pub(crate) fn bounds(samples: &[f64]) -> Result<(f64, f64), BuildError> {
    if samples.is_empty() {
        return Err(BuildError::EmptySamples);
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for value in samples.iter().copied() {
        if !value.is_finite() {
            return Err(BuildError::NonFinite(value));
        }
        min = min.min(value);
        max = max.max(value);
    }

    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_scan() {
        assert_eq!(bounds(&[5.0, 1.0, 9.0, 1.0]), Ok((1.0, 9.0)));
        assert_eq!(bounds(&[-3.5]), Ok((-3.5, -3.5)));
        assert_eq!(bounds(&[]), Err(BuildError::EmptySamples));
        assert_eq!(
            bounds(&[1.0, f64::INFINITY]),
            Err(BuildError::NonFinite(f64::INFINITY))
        );
        assert!(matches!(
            bounds(&[f64::NAN, 1.0]),
            Err(BuildError::NonFinite(v)) if v.is_nan()
        ));
    }
}
