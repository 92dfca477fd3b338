use crate::codec::TextHistogram;
use crate::{Bucket, Estimate, Timestamp};

/// An immutable view of a histogram: the ordered bucket sequence and the
/// time it was analyzed.
///
/// Snapshots are what a [`crate::Histogram`] publishes after each successful
/// construction and what the wire and text encodings carry. Equality is
/// structural.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "TextHistogram", into = "TextHistogram")]
pub struct Snapshot {
    pub(crate) last_analyzed: Option<Timestamp>,
    pub(crate) buckets: Box<[Bucket]>,
}

impl Snapshot {
    /// Only for bucket sequences that have already been checked.
    pub(crate) fn from_parts(last_analyzed: Option<Timestamp>, buckets: Vec<Bucket>) -> Self {
        Self {
            last_analyzed,
            buckets: buckets.into(),
        }
    }

    /// The time of the construction that produced this snapshot. `None` means
    /// the histogram was never analyzed.
    pub fn last_analyzed(&self) -> Option<Timestamp> {
        self.last_analyzed
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Bucket> {
        self.buckets.iter()
    }
}

impl Estimate for Snapshot {
    fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Bucket;
    type IntoIter = core::slice::Iter<'a, Bucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl core::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = self.to_text().map_err(|_| core::fmt::Error)?;
        f.write_str(&text)
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for Snapshot {
    fn schema_name() -> String {
        "Histogram".to_owned()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <TextHistogram as schemars::JsonSchema>::json_schema(gen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_ready() {
        let snapshot = Snapshot::default();
        assert!(!snapshot.is_ready());
        assert_eq!(snapshot.last_analyzed(), None);
        assert_eq!(snapshot.bucket_count(), 0);
        assert_eq!(snapshot.total_frequency(), 0);
    }

    #[test]
    fn structural_equality() {
        let bucket = Bucket::new(0.0, 10.0, 5).unwrap();
        let a = Snapshot::from_parts(Some(Timestamp::from_millis(1)), vec![bucket]);
        let b = Snapshot::from_parts(Some(Timestamp::from_millis(1)), vec![bucket]);
        let c = Snapshot::from_parts(Some(Timestamp::from_millis(2)), vec![bucket]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!((&a).into_iter().count(), 1);
    }
}
