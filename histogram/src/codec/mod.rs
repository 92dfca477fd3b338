//! Wire and text encodings for histograms.
//!
//! The wire form is a protobuf message (see `histogram.proto`) and is what a
//! catalog persists. The text form is JSON with a fixed key order,
//! `lastAnalyzed` followed by `buckets`, and is meant for tooling and
//! debugging. Both forms round-trip a [`Snapshot`] exactly and both are
//! validated on decode: malformed input is rejected, never repaired.

mod pb;
mod text;

pub use pb::{BucketProto, HistogramProto};
pub(crate) use text::TextHistogram;

use log::debug;
use prost::Message;

use crate::{Bucket, CodecError, Snapshot, Timestamp};

impl Snapshot {
    /// Encode into the binary wire form.
    pub fn encode(&self) -> Vec<u8> {
        HistogramProto::from(self).encode_to_vec()
    }

    /// Decode from the binary wire form.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let proto = HistogramProto::decode(bytes).map_err(|e| {
            debug!("failed to decode histogram: {e}");
            CodecError::from(e)
        })?;
        Self::try_from(proto)
    }

    /// Render the human-readable text form.
    pub fn to_text(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(&TextHistogram::from(self))?)
    }

    /// Parse the human-readable text form.
    pub fn from_text(text: &str) -> Result<Self, CodecError> {
        let parsed: TextHistogram = serde_json::from_str(text).map_err(|e| {
            debug!("failed to parse histogram text: {e}");
            CodecError::from(e)
        })?;
        Self::try_from(parsed)
    }
}

/// Build a snapshot from decoded fields, enforcing the same invariants that
/// construction guarantees.
pub(crate) fn assemble<I>(last_analyzed: Option<u64>, buckets: I) -> Result<Snapshot, CodecError>
where
    I: IntoIterator<Item = (f64, f64, i64)>,
{
    let mut decoded: Vec<Bucket> = Vec::new();

    for (min, max, frequency) in buckets {
        let frequency = match u64::try_from(frequency) {
            Ok(0) => return Err(CodecError::ZeroFrequency { min, max }),
            Ok(frequency) => frequency,
            Err(_) => return Err(CodecError::NegativeFrequency(frequency)),
        };

        let bucket = Bucket::new(min, max, frequency)
            .map_err(|_| CodecError::InvalidBucket { min, max })?;

        if let Some(previous) = decoded.last() {
            // bounds are finite once the bucket is built
            if previous.max >= bucket.min {
                return Err(CodecError::Unordered {
                    previous_max: previous.max,
                    min: bucket.min,
                });
            }
        }

        decoded.push(bucket);
    }

    Ok(Snapshot::from_parts(
        last_analyzed.map(Timestamp::from_millis),
        decoded,
    ))
}

/// Returns true if the buckets satisfy the ordering and compaction
/// invariants.
pub(crate) fn is_well_formed(buckets: &[Bucket]) -> bool {
    buckets.iter().all(|b| b.frequency > 0)
        && buckets.windows(2).all(|w| w[0].max < w[1].min)
}
