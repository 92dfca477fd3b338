use crate::BuildError;

/// The number of buckets a histogram is limited to unless configured
/// otherwise.
pub const DEFAULT_MAX_BUCKETS: usize = 100;

/// Parameters that control how a histogram is constructed.
///
/// With the `serde` feature enabled the config can be embedded in a host
/// configuration file. Deserialized configs are not validated; use
/// [`Config::new`] or the [`Builder`] when the value comes from user input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    max_buckets: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_buckets: DEFAULT_MAX_BUCKETS,
        }
    }
}

impl Config {
    pub fn new(max_buckets: usize) -> Result<Self, BuildError> {
        if max_buckets == 0 {
            return Err(BuildError::ZeroBuckets);
        }

        Ok(Self { max_buckets })
    }

    /// The upper bound on the number of buckets produced by construction.
    pub fn max_buckets(&self) -> usize {
        self.max_buckets
    }

    /// The number of buckets to target for a sample set of the given size.
    pub(crate) fn target_buckets(&self, samples: usize) -> usize {
        // a zero config can only arrive through deserialization
        samples.min(self.max_buckets).max(1)
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Builder {
    max_buckets: Option<usize>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_buckets(mut self, max_buckets: usize) -> Self {
        self.max_buckets = Some(max_buckets);
        self
    }

    pub fn build(self) -> Result<Config, BuildError> {
        Config::new(self.max_buckets.unwrap_or(DEFAULT_MAX_BUCKETS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(Config::default().max_buckets(), DEFAULT_MAX_BUCKETS);
        assert_eq!(Builder::new().build(), Ok(Config::default()));
    }

    #[test]
    fn zero_buckets() {
        assert_eq!(Config::new(0), Err(BuildError::ZeroBuckets));
        assert_eq!(
            Builder::new().max_buckets(0).build(),
            Err(BuildError::ZeroBuckets)
        );
    }

    #[test]
    fn target_buckets() {
        let config = Builder::new().max_buckets(3).build().unwrap();
        assert_eq!(config.target_buckets(6), 3);
        assert_eq!(config.target_buckets(2), 2);
        assert_eq!(Config::default().target_buckets(10_000), 100);
    }
}
