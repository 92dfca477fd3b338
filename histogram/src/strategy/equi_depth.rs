use super::{bounds, Strategy};
use crate::{Bucket, BuildError, Config};

/// Equal-depth construction.
///
/// Samples are sorted and cut into runs of roughly the same number of
/// samples. A run is extended rather than split when the cut would fall
/// between two equal values, so buckets never overlap.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EquiDepth;

impl Strategy for EquiDepth {
    fn name(&self) -> &'static str {
        "equi-depth"
    }

    fn buckets(&self, samples: &[f64], config: &Config) -> Result<Vec<Bucket>, BuildError> {
        bounds(samples)?;

        let mut sorted = samples.to_vec();
        sorted.sort_unstable_by(f64::total_cmp);

        let count = config.target_buckets(sorted.len());
        let depth = sorted.len().div_ceil(count);

        let mut buckets = Vec::with_capacity(count);
        let mut start = 0;

        while start < sorted.len() {
            let mut end = (start + depth).min(sorted.len());
            while end < sorted.len() && sorted[end] == sorted[end - 1] {
                end += 1;
            }

            buckets.push(Bucket {
                min: sorted[start],
                max: sorted[end - 1],
                frequency: (end - start) as u64,
            });

            start = end;
        }

        Ok(buckets)
    }
}
