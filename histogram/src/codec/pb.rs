//! Protobuf messages for the wire form. Kept in sync with `histogram.proto`
//! by hand.

use crate::{CodecError, Snapshot};

#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HistogramProto {
    /// Milliseconds since the Unix epoch. Absent when never analyzed.
    #[prost(uint64, optional, tag = "1")]
    pub last_analyzed: ::core::option::Option<u64>,
    #[prost(message, repeated, tag = "2")]
    pub buckets: ::prost::alloc::vec::Vec<BucketProto>,
}

#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BucketProto {
    #[prost(double, tag = "1")]
    pub min: f64,
    #[prost(double, tag = "2")]
    pub max: f64,
    #[prost(int64, tag = "3")]
    pub frequency: i64,
}

impl From<&Snapshot> for HistogramProto {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            last_analyzed: snapshot.last_analyzed.map(|t| t.as_millis()),
            buckets: snapshot
                .buckets
                .iter()
                .map(|b| BucketProto {
                    min: b.min,
                    max: b.max,
                    frequency: i64::try_from(b.frequency).unwrap_or(i64::MAX),
                })
                .collect(),
        }
    }
}

impl TryFrom<HistogramProto> for Snapshot {
    type Error = CodecError;

    fn try_from(proto: HistogramProto) -> Result<Self, Self::Error> {
        super::assemble(
            proto.last_analyzed,
            proto
                .buckets
                .into_iter()
                .map(|b| (b.min, b.max, b.frequency)),
        )
    }
}
