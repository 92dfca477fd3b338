use super::{bounds, Strategy};
use crate::{Bucket, BuildError, Config};

/// Equal-width construction with compaction.
///
/// The observed value range is divided into buckets of equal width. Empty
/// buckets are then dropped and the remaining buckets are narrowed to the
/// values that were actually observed within them, which saves space and
/// improves estimation accuracy over plain equal-width binning.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EquiWidth;

impl Strategy for EquiWidth {
    fn name(&self) -> &'static str {
        "equi-width"
    }

    fn buckets(&self, samples: &[f64], config: &Config) -> Result<Vec<Bucket>, BuildError> {
        let (min, max) = bounds(samples)?;
        let count = config.target_buckets(samples.len());

        if min == max {
            return Ok(vec![single(min, max, samples.len())]);
        }

        // when the span overflows, work on halved values
        let scale = if (max - min).is_finite() { 1.0 } else { 0.5 };
        let origin = min * scale;
        let width = (max * scale - origin) / count as f64;

        // the span is too small to divide
        if width == 0.0 {
            return Ok(vec![single(min, max, samples.len())]);
        }

        let mut bins = vec![Bin::EMPTY; count];

        for value in samples.iter().copied() {
            let position = ((value * scale - origin) / width).floor();

            // the top edge lands one past the end, anything further is a bug
            if position.is_nan() || position < 0.0 || position > count as f64 {
                return Err(BuildError::BucketIndex {
                    value,
                    buckets: count,
                });
            }

            let index = (position as usize).min(count - 1);
            bins[index].record(value);
        }

        Ok(bins
            .into_iter()
            .filter(|bin| bin.frequency > 0)
            .map(|bin| Bucket {
                min: bin.min,
                max: bin.max,
                frequency: bin.frequency,
            })
            .collect())
    }
}

fn single(min: f64, max: f64, samples: usize) -> Bucket {
    Bucket {
        min,
        max,
        frequency: samples as u64,
    }
}

/// Running state for one equal-width bin during the scan.
#[derive(Copy, Clone)]
struct Bin {
    min: f64,
    max: f64,
    frequency: u64,
}

impl Bin {
    const EMPTY: Bin = Bin {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
        frequency: 0,
    };

    fn record(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.frequency += 1;
    }
}
