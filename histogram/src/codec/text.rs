use serde::{Deserialize, Serialize};

use crate::{CodecError, Snapshot};

// field order here is the key order of the text form
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename = "Histogram", rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct TextHistogram {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_analyzed: Option<u64>,
    #[serde(default)]
    buckets: Vec<TextBucket>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename = "Bucket", deny_unknown_fields)]
struct TextBucket {
    min: f64,
    max: f64,
    frequency: i64,
}

impl From<&Snapshot> for TextHistogram {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            last_analyzed: snapshot.last_analyzed.map(|t| t.as_millis()),
            buckets: snapshot
                .buckets
                .iter()
                .map(|b| TextBucket {
                    min: b.min,
                    max: b.max,
                    frequency: i64::try_from(b.frequency).unwrap_or(i64::MAX),
                })
                .collect(),
        }
    }
}

impl From<Snapshot> for TextHistogram {
    fn from(snapshot: Snapshot) -> Self {
        Self::from(&snapshot)
    }
}

impl TryFrom<TextHistogram> for Snapshot {
    type Error = CodecError;

    fn try_from(text: TextHistogram) -> Result<Self, Self::Error> {
        super::assemble(
            text.last_analyzed,
            text.buckets
                .into_iter()
                .map(|b| (b.min, b.max, b.frequency)),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{Bucket, Snapshot, Timestamp};

    #[test]
    fn layout() {
        let snapshot = Snapshot::from_parts(
            Some(Timestamp::from_millis(42)),
            vec![Bucket::new(1.0, 2.5, 3).unwrap()],
        );

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "lastAnalyzed": 42,
                "buckets": [{ "min": 1.0, "max": 2.5, "frequency": 3 }]
            })
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let text = r#"{"buckets":[],"isReady":true}"#;
        assert!(Snapshot::from_text(text).is_err());
    }

    #[test]
    fn serde_path_validates() {
        // deserializing a `Snapshot` directly goes through the same checks
        let text = r#"{"buckets":[{"min":3.0,"max":1.0,"frequency":1}]}"#;
        assert!(serde_json::from_str::<Snapshot>(text).is_err());
    }
}
