use thiserror::Error;

/// Errors returned when building a histogram or one of its parts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("cannot build a histogram from an empty sample set")]
    EmptySamples,
    #[error("sample value is not finite: {0}")]
    NonFinite(f64),
    #[error("max buckets must be at least one")]
    ZeroBuckets,
    #[error("invalid bucket bounds: min {min} max {max}")]
    InvalidBucket { min: f64, max: f64 },
    #[error("sample {value} maps outside of {buckets} buckets")]
    BucketIndex { value: f64, buckets: usize },
    #[error("strategy produced an invalid bucket sequence")]
    InvalidBuckets,
}

/// Errors returned by estimation operations.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("invalid range: from {from} to {to}")]
    InvalidRange { from: f64, to: f64 },
    #[error("histogram has not been analyzed")]
    NotReady,
}

/// Errors returned when decoding a serialized histogram.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("malformed wire encoding: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("malformed text encoding: {0}")]
    Text(#[from] serde_json::Error),
    #[error("invalid bucket bounds: min {min} max {max}")]
    InvalidBucket { min: f64, max: f64 },
    #[error("bucket [{min}, {max}] has zero frequency")]
    ZeroFrequency { min: f64, max: f64 },
    #[error("bucket has negative frequency: {0}")]
    NegativeFrequency(i64),
    #[error("bucket starting at {min} overlaps or precedes the bucket ending at {previous_max}")]
    Unordered { previous_max: f64, min: f64 },
}
