//! This crate contains column histograms for cost-based query optimization.
//! A histogram summarizes the distribution of a numeric column from a sample
//! of its values and answers "how many values fall in `[from, to]`?" by
//! interpolating across its buckets.
//!
//! Construction strategies decide how samples are grouped into buckets while
//! estimation is shared by all of them:
//!
//! * `EquiWidth` - equal-width buckets, with empty buckets dropped and bucket
//!    bounds narrowed to the observed values
//! * `EquiDepth` - buckets holding roughly the same number of samples
//!
//! A `Histogram` publishes immutable `Snapshot`s, so it can be read from many
//! threads while it is being rebuilt. Snapshots can be persisted in a binary
//! wire form and inspected in a JSON text form.
//!
//! The `serde` feature only adds (de)serialization to `Config`; snapshots
//! are always serializable. `schemars` adds JSON schemas for both.
//!
//! ```
//! use column_histogram::{Histogram, Range};
//!
//! let histogram = Histogram::new();
//! histogram.construct([1.0, 1.0, 1.0, 5.0, 5.0, 9.0]).unwrap();
//!
//! assert_eq!(histogram.estimate_frequency(Range::full()), Ok(6));
//! assert_eq!(histogram.estimate_frequency(Range::less_than(6.0)), Ok(5));
//! ```

pub mod codec;
pub mod strategy;

mod bucket;
mod config;
mod errors;
mod range;
mod snapshot;
mod standard;
mod timestamp;

pub use bucket::Bucket;
pub use config::{Builder, Config, DEFAULT_MAX_BUCKETS};
pub use errors::{BuildError, CodecError, Error};
pub use range::Range;
pub use snapshot::Snapshot;
pub use standard::Histogram;
pub use strategy::{EquiDepth, EquiWidth, Strategy};
pub use timestamp::Timestamp;

/// The selectivity an optimizer should assume for a range predicate when no
/// usable histogram is available.
pub const DEFAULT_SELECTIVITY: f64 = 0.33;

/// Frequency and selectivity estimation over an ordered bucket sequence.
///
/// Implementors only provide the buckets, which must be sorted ascending by
/// `min` and pairwise disjoint. Within a bucket values are assumed to be
/// uniformly distributed.
pub trait Estimate {
    fn buckets(&self) -> &[Bucket];

    /// A histogram is ready once it holds at least one bucket.
    fn is_ready(&self) -> bool {
        !self.buckets().is_empty()
    }

    fn total_frequency(&self) -> u64 {
        self.buckets()
            .iter()
            .fold(0_u64, |total, b| total.saturating_add(b.frequency))
    }

    /// Returns the estimated number of values in the range, without rounding.
    fn estimate_count(&self, range: Range) -> Result<f64, Error> {
        let (whole, partial) = overlap(self.buckets(), &range)?;
        Ok(whole as f64 + partial)
    }

    /// Returns the estimated number of values in the range, rounded to the
    /// nearest integer.
    fn estimate_frequency(&self, range: Range) -> Result<u64, Error> {
        let (whole, partial) = overlap(self.buckets(), &range)?;
        Ok(whole.saturating_add(partial.round() as u64))
    }

    /// Returns the estimated fraction of values in the range, in `[0, 1]`.
    fn estimate_selectivity(&self, range: Range) -> Result<f64, Error> {
        let total = self.total_frequency();
        if total == 0 {
            range.validate()?;
            return Err(Error::NotReady);
        }

        let count = self.estimate_count(range)?;
        Ok((count / total as f64).clamp(0.0, 1.0))
    }

    /// Like `estimate_selectivity` but falls back to `default` on any error.
    fn estimate_selectivity_or(&self, range: Range, default: f64) -> f64 {
        self.estimate_selectivity(range).unwrap_or(default)
    }
}

/// Sums the contribution of every bucket that overlaps the range. Buckets
/// fully inside the range are counted exactly in the first value, partially
/// overlapped buckets are interpolated into the second.
fn overlap(buckets: &[Bucket], range: &Range) -> Result<(u64, f64), Error> {
    range.validate()?;

    if buckets.is_empty() {
        return Err(Error::NotReady);
    }

    let mut whole = 0_u64;
    let mut partial = 0.0;

    for bucket in buckets {
        // buckets are sorted, so neither this nor any later bucket overlaps
        if !range.admits_to(bucket.min) {
            break;
        }

        // entirely below the range
        if !range.admits_from(bucket.max) {
            continue;
        }

        if range.admits_from(bucket.min) && range.admits_to(bucket.max) {
            whole = whole.saturating_add(bucket.frequency);
            continue;
        }

        // a zero width bucket that is not disjoint is always fully
        // contained, so the width here is positive
        let lower = bucket.min.max(range.from);
        let upper = bucket.max.min(range.to);

        partial += bucket.frequency as f64 * fraction(lower, upper, bucket.min, bucket.max);
    }

    Ok((whole, partial))
}

/// The fraction of `[min, max]` covered by `[lower, upper]`. Requires
/// `min < max`.
fn fraction(lower: f64, upper: f64, min: f64, max: f64) -> f64 {
    if upper <= lower {
        return 0.0;
    }

    let width = max - min;
    let (covered, width) = if width.is_finite() {
        (upper - lower, width)
    } else {
        // spans near the limits of f64 only stay finite when halved
        (upper / 2.0 - lower / 2.0, max / 2.0 - min / 2.0)
    };

    (covered / width).clamp(0.0, 1.0)
}
