//! Raw connector settings as supplied by a configuration loader.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Constructor inputs for a [`ConnectorDescriptor`](crate::ConnectorDescriptor).
///
/// Every field is optional at this level; presence and emptiness rules are
/// applied by [`ConnectorDescriptor::new`](crate::ConnectorDescriptor::new).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Source topic to consume.
    #[serde(default, deserialize_with = "scalar::optional")]
    pub topic: Option<String>,

    /// In-process handler path for local dispatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatch_path: Option<String>,

    /// URL that events are replayed to for remote dispatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_endpoint: Option<String>,

    /// Process each event to completion before consuming the next one.
    #[serde(default)]
    pub sync_topic: bool,

    /// Re-read the topic from its earliest retained offset on startup.
    #[serde(default)]
    pub replay_topic: bool,

    /// Where the consumer persists its progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<String>,

    /// Passed through untouched to the event-source client.
    ///
    /// Numeric and boolean values in the source document are kept as their
    /// textual form.
    #[serde(default, deserialize_with = "scalar::string_map")]
    pub source_properties: BTreeMap<String, String>,
}

impl ConnectorConfig {
    /// Settings for `topic` with no dispatch target and all flags off.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_dispatch_path(mut self, path: impl Into<String>) -> Self {
        self.dispatch_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_remote_endpoint(mut self, url: impl Into<String>) -> Self {
        self.remote_endpoint = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_state_file(mut self, path: impl Into<String>) -> Self {
        self.state_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_sync_topic(mut self, sync: bool) -> Self {
        self.sync_topic = sync;
        self
    }

    #[must_use]
    pub fn with_replay_topic(mut self, replay: bool) -> Self {
        self.replay_topic = replay;
        self
    }

    /// Add one source-client property.
    #[must_use]
    pub fn with_source_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.source_properties.insert(key.into(), value.into());
        self
    }
}

/// Lenient scalar-to-string deserialization.
///
/// Client properties such as `max.poll.records: 500` arrive as typed YAML
/// scalars; the event-source client expects them as strings.
mod scalar {
    use std::collections::BTreeMap;
    use std::fmt;

    use serde::de::{self, Deserializer, Visitor};
    use serde::Deserialize;

    #[derive(PartialEq, Eq, PartialOrd, Ord)]
    struct Scalar(String);

    impl<'de> Deserialize<'de> for Scalar {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(ScalarVisitor)
        }
    }

    struct ScalarVisitor;

    impl Visitor<'_> for ScalarVisitor {
        type Value = Scalar;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
            Ok(Scalar(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
            Ok(Scalar(v))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
            Ok(Scalar(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
            Ok(Scalar(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
            Ok(Scalar(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
            Ok(Scalar(v.to_string()))
        }
    }

    pub(super) fn optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| s.0))
    }

    pub(super) fn string_map<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, String>, D::Error> {
        let raw = BTreeMap::<Scalar, Scalar>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|(k, v)| (k.0, v.0)).collect())
    }
}
