use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;

use crate::codec::is_well_formed;
use crate::{
    Bucket, BuildError, CodecError, Config, Error, Estimate, EquiWidth, Range, Snapshot,
    Strategy, Timestamp,
};

/// A column histogram that can be rebuilt while it is being read.
///
/// Each successful [`construct`] builds a new [`Snapshot`] off to the side and
/// then publishes it with a single pointer swap. Estimation always runs
/// against the most recently published snapshot, so readers never observe a
/// partially built bucket sequence and a failed construction leaves the
/// previous snapshot in place.
///
/// Concurrent calls to `construct` on the same histogram are safe but the
/// last one to finish wins; callers are expected to serialize re-analysis.
///
/// [`construct`]: Histogram::construct
pub struct Histogram<S = EquiWidth> {
    state: RwLock<Arc<Snapshot>>,
    config: Config,
    strategy: S,
}

impl Histogram<EquiWidth> {
    /// An empty equal-width histogram with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_strategy(EquiWidth, config)
    }
}

impl Default for Histogram<EquiWidth> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Strategy> Histogram<S> {
    pub fn with_strategy(strategy: S, config: Config) -> Self {
        Self::from_snapshot(Snapshot::default(), strategy, config)
    }

    /// Wrap a previously published or decoded snapshot, for example one that
    /// was loaded from the catalog.
    pub fn from_snapshot(snapshot: Snapshot, strategy: S, config: Config) -> Self {
        Self {
            state: RwLock::new(Arc::new(snapshot)),
            config,
            strategy,
        }
    }

    /// Rebuild the histogram from a sample set.
    ///
    /// The samples are consumed once. On success the new buckets are
    /// published together with a fresh `last_analyzed` time. On failure the
    /// previously published state is left untouched.
    pub fn construct<I>(&self, samples: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = f64>,
    {
        let samples: Vec<f64> = samples.into_iter().collect();

        let buckets = self
            .strategy
            .buckets(&samples, &self.config)
            .and_then(|buckets| {
                if is_well_formed(&buckets) {
                    Ok(buckets)
                } else {
                    Err(BuildError::InvalidBuckets)
                }
            })
            .map_err(|e| {
                warn!(
                    "{} construction over {} samples failed: {e}",
                    self.strategy.name(),
                    samples.len()
                );
                e
            })?;

        debug!(
            "{} construction over {} samples produced {} buckets",
            self.strategy.name(),
            samples.len(),
            buckets.len()
        );

        let snapshot = Snapshot::from_parts(Some(Timestamp::now()), buckets);
        *self.state.write() = Arc::new(snapshot);

        Ok(())
    }

    /// Replace the published state with the given snapshot.
    pub fn publish(&self, snapshot: Snapshot) {
        *self.state.write() = Arc::new(snapshot);
    }

    /// The currently published state. The returned snapshot is unaffected
    /// by later constructions.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.state.read().clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn is_ready(&self) -> bool {
        self.snapshot().is_ready()
    }

    pub fn last_analyzed(&self) -> Option<Timestamp> {
        self.snapshot().last_analyzed()
    }

    pub fn bucket_count(&self) -> usize {
        self.snapshot().bucket_count()
    }

    pub fn buckets(&self) -> Vec<Bucket> {
        self.snapshot().buckets().to_vec()
    }

    pub fn total_frequency(&self) -> u64 {
        self.snapshot().total_frequency()
    }

    /// See [`Estimate::estimate_count`].
    pub fn estimate_count(&self, range: Range) -> Result<f64, Error> {
        self.snapshot().estimate_count(range)
    }

    /// See [`Estimate::estimate_frequency`].
    pub fn estimate_frequency(&self, range: Range) -> Result<u64, Error> {
        self.snapshot().estimate_frequency(range)
    }

    /// See [`Estimate::estimate_selectivity`].
    pub fn estimate_selectivity(&self, range: Range) -> Result<f64, Error> {
        self.snapshot().estimate_selectivity(range)
    }

    /// See [`Estimate::estimate_selectivity_or`].
    pub fn estimate_selectivity_or(&self, range: Range, default: f64) -> f64 {
        self.snapshot().estimate_selectivity_or(range, default)
    }

    /// Encode the published state into the binary wire form.
    pub fn encode(&self) -> Vec<u8> {
        self.snapshot().encode()
    }

    /// Render the published state in the text form.
    pub fn to_text(&self) -> Result<String, CodecError> {
        self.snapshot().to_text()
    }
}

impl<S: Strategy + Default> Histogram<S> {
    /// Decode a histogram from the binary wire form using the default
    /// configuration.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let snapshot = Snapshot::decode(bytes)?;
        Ok(Self::from_snapshot(snapshot, S::default(), Config::default()))
    }

    /// Parse a histogram from the text form using the default configuration.
    pub fn from_text(text: &str) -> Result<Self, CodecError> {
        let snapshot = Snapshot::from_text(text)?;
        Ok(Self::from_snapshot(snapshot, S::default(), Config::default()))
    }
}

impl<S> PartialEq for Histogram<S> {
    fn eq(&self, other: &Self) -> bool {
        let this = self.state.read().clone();
        let that = other.state.read().clone();
        this == that
    }
}

impl<S: core::fmt::Debug> core::fmt::Debug for Histogram<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Histogram")
            .field("strategy", &self.strategy)
            .field("config", &self.config)
            .field("snapshot", &*self.state.read().clone())
            .finish()
    }
}

impl<S> core::fmt::Display for Histogram<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let snapshot = self.state.read().clone();
        core::fmt::Display::fmt(&*snapshot, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use crate::EquiDepth;

    use std::thread;

    fn config(max_buckets: usize) -> Config {
        Builder::new().max_buckets(max_buckets).build().unwrap()
    }

    #[test]
    fn construct() {
        let histogram = Histogram::with_config(config(3));
        assert!(!histogram.is_ready());
        assert_eq!(histogram.last_analyzed(), None);

        histogram
            .construct([1.0, 1.0, 1.0, 5.0, 5.0, 9.0])
            .unwrap();

        assert!(histogram.is_ready());
        assert!(histogram.last_analyzed().is_some());
        assert_eq!(histogram.bucket_count(), 3);
        assert_eq!(histogram.total_frequency(), 6);
        assert_eq!(
            histogram.buckets().iter().map(|b| b.frequency()).collect::<Vec<_>>(),
            vec![3, 2, 1]
        );
    }

    #[test]
    fn empty_samples() {
        let histogram = Histogram::new();
        assert_eq!(
            histogram.construct(Vec::new()),
            Err(BuildError::EmptySamples)
        );
        assert!(!histogram.is_ready());
        assert_eq!(
            histogram.estimate_selectivity(Range::full()),
            Err(Error::NotReady)
        );
    }

    #[test]
    fn failure_keeps_previous_state() {
        let histogram = Histogram::new();
        histogram.construct([1.0, 2.0, 3.0]).unwrap();
        let before = histogram.snapshot();

        assert_eq!(
            histogram.construct(Vec::new()),
            Err(BuildError::EmptySamples)
        );
        assert!(histogram.construct([1.0, f64::NAN]).is_err());

        assert!(histogram.is_ready());
        assert_eq!(histogram.snapshot(), before);
    }

    #[test]
    fn snapshots_are_isolated() {
        let histogram = Histogram::new();
        histogram.construct([1.0, 2.0, 3.0]).unwrap();
        let first = histogram.snapshot();

        histogram.construct([10.0, 20.0]).unwrap();

        assert_eq!(first.total_frequency(), 3);
        assert_eq!(histogram.total_frequency(), 2);
    }

    #[test]
    fn strategies() {
        let histogram = Histogram::with_strategy(EquiDepth, config(2));
        histogram.construct((1..=10).map(f64::from)).unwrap();

        assert_eq!(histogram.strategy().name(), "equi-depth");
        assert_eq!(histogram.bucket_count(), 2);
        assert_eq!(histogram.estimate_frequency(Range::full()), Ok(10));
    }

    #[test]
    fn invalid_strategy_output() {
        struct Broken;

        impl Strategy for Broken {
            fn name(&self) -> &'static str {
                "broken"
            }

            fn buckets(&self, _: &[f64], _: &Config) -> Result<Vec<Bucket>, BuildError> {
                Ok(vec![Bucket::new(0.0, 1.0, 0)?])
            }
        }

        let histogram = Histogram::with_strategy(Broken, Config::default());
        assert_eq!(
            histogram.construct([1.0]),
            Err(BuildError::InvalidBuckets)
        );
        assert!(!histogram.is_ready());
    }

    #[test]
    fn publish_decoded() {
        let source = Histogram::new();
        source.construct([2.0, 4.0, 4.0, 8.0]).unwrap();
        let snapshot = Snapshot::decode(&source.encode()).unwrap();

        let histogram = Histogram::new();
        assert!(!histogram.is_ready());

        histogram.publish(snapshot);

        assert!(histogram.is_ready());
        assert_eq!(histogram, source);
        assert_eq!(histogram.last_analyzed(), source.last_analyzed());
        assert_eq!(histogram.estimate_frequency(Range::point(4.0)), Ok(2));

        // publishing an empty snapshot makes the histogram unready again
        histogram.publish(Snapshot::default());
        assert_eq!(
            histogram.estimate_frequency(Range::full()),
            Err(Error::NotReady)
        );
    }

    #[test]
    fn codec_round_trip() {
        let histogram = Histogram::new();
        histogram
            .construct([0.5, 1.5, 1.5, 2.25, 8.0, 9.75, 9.75, 9.75])
            .unwrap();

        let decoded: Histogram = Histogram::decode(&histogram.encode()).unwrap();
        assert_eq!(decoded, histogram);
        assert!(decoded.is_ready());

        let parsed: Histogram = Histogram::from_text(&histogram.to_text().unwrap()).unwrap();
        assert_eq!(parsed, histogram);
        assert_eq!(parsed.to_string(), histogram.to_string());
    }

    #[test]
    fn concurrent_readers() {
        let histogram = Arc::new(Histogram::new());
        histogram.construct((0..1000).map(f64::from)).unwrap();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let histogram = histogram.clone();
                thread::spawn(move || {
                    for _ in 0..1000 {
                        // every published snapshot covers the full sample set
                        let total = histogram.estimate_frequency(Range::full()).unwrap();
                        assert!(total == 1000 || total == 500);
                    }
                })
            })
            .collect();

        for round in 0..100 {
            let samples = if round % 2 == 0 { 500 } else { 1000 };
            histogram.construct((0..samples).map(f64::from)).unwrap();
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
