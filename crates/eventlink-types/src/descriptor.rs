//! Connector descriptor: one topic bound to one dispatch target.
//!
//! A [`ConnectorDescriptor`] is built once from a [`ConnectorConfig`],
//! validated on construction, and then shared (typically behind an `Arc`)
//! between the event consumer, the dispatcher, and the controller that owns
//! its lifecycle. Everything except the lifecycle state is immutable after
//! construction.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::advisory::DispatchAdvisory;
use crate::config::ConnectorConfig;
use crate::error::{DescriptorError, Result};
use crate::lifecycle::{AtomicLifecycle, LifecycleState};

/// Property keys whose values are masked in the diagnostic representation.
const SECRET_KEY_MARKERS: &[&str] = &["password", "secret", "sasl.jaas.config"];

/// Where events from the topic are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchTarget<'a> {
    /// In-process handler path.
    Local(&'a str),
    /// Remote URL the event is replayed to.
    Remote(&'a str),
    /// Topic-only processing.
    None,
}

/// Immutable binding of a source topic to a dispatch target, plus a
/// forward-only lifecycle flag.
#[derive(Debug)]
pub struct ConnectorDescriptor {
    topic: String,
    dispatch_path: Option<String>,
    remote_endpoint: Option<String>,
    sync_topic: bool,
    replay_topic: bool,
    state_file: Option<String>,
    source_properties: Arc<BTreeMap<String, String>>,
    advisories: Vec<DispatchAdvisory>,
    state: AtomicLifecycle,
}

impl ConnectorDescriptor {
    /// Build and validate a descriptor.
    ///
    /// Empty optional strings are treated as unset. A missing or ambiguous
    /// dispatch target is not an error; it is logged once and recorded in
    /// [`advisories`](Self::advisories).
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::InvalidConfiguration`] if `topic` is
    /// missing or blank.
    pub fn new(config: ConnectorConfig) -> Result<Self> {
        let ConnectorConfig {
            topic,
            dispatch_path,
            remote_endpoint,
            sync_topic,
            replay_topic,
            state_file,
            source_properties,
        } = config;

        let topic = match topic {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(DescriptorError::invalid_config("topic must not be empty")),
        };

        let dispatch_path = non_empty(dispatch_path);
        let remote_endpoint = non_empty(remote_endpoint);

        let advisories: Vec<DispatchAdvisory> =
            DispatchAdvisory::evaluate(dispatch_path.is_some(), remote_endpoint.is_some())
                .into_iter()
                .collect();
        for advisory in &advisories {
            warn!(topic = %topic, code = advisory.code(), "{advisory}");
        }

        Ok(Self {
            topic,
            dispatch_path,
            remote_endpoint,
            sync_topic,
            replay_topic,
            state_file: non_empty(state_file),
            source_properties: Arc::new(source_properties),
            advisories,
            state: AtomicLifecycle::new(),
        })
    }

    /// Transition `Initialized -> Running`.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::InvalidTransition`] if the connector has
    /// already been started or shut down.
    pub fn start(&self) -> Result<()> {
        self.state
            .advance(&[LifecycleState::Initialized], LifecycleState::Running)?;
        debug!(topic = %self.topic, "connector running");
        Ok(())
    }

    /// Transition to `Shutdown` from `Initialized` or `Running`.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::InvalidTransition`] if the connector is
    /// already shut down.
    pub fn shutdown(&self) -> Result<()> {
        let prev = self.state.advance(
            &[LifecycleState::Initialized, LifecycleState::Running],
            LifecycleState::Shutdown,
        )?;
        debug!(topic = %self.topic, from = %prev, "connector shut down");
        Ok(())
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// In-process handler path, when dispatch is local.
    #[must_use]
    pub fn local_dispatch_path(&self) -> Option<&str> {
        self.dispatch_path.as_deref()
    }

    /// Remote URL, when dispatch is a network replay.
    #[must_use]
    pub fn remote_endpoint(&self) -> Option<&str> {
        self.remote_endpoint.as_deref()
    }

    /// True iff a local dispatch path is configured, regardless of any
    /// remote endpoint.
    #[must_use]
    pub fn dispatches_locally(&self) -> bool {
        self.dispatch_path.is_some()
    }

    /// Resolved dispatch target. Local dispatch wins when both are set.
    #[must_use]
    pub fn dispatch_target(&self) -> DispatchTarget<'_> {
        match (&self.dispatch_path, &self.remote_endpoint) {
            (Some(path), _) => DispatchTarget::Local(path),
            (None, Some(url)) => DispatchTarget::Remote(url),
            (None, None) => DispatchTarget::None,
        }
    }

    #[must_use]
    pub fn sync_topic(&self) -> bool {
        self.sync_topic
    }

    #[must_use]
    pub fn replay_topic(&self) -> bool {
        self.replay_topic
    }

    #[must_use]
    pub fn state_file(&self) -> Option<&Path> {
        self.state_file.as_deref().map(Path::new)
    }

    /// Source-client properties. Never mutated after construction.
    #[must_use]
    pub fn source_properties(&self) -> &BTreeMap<String, String> {
        &self.source_properties
    }

    /// Shared handle to the source-client properties, for clients that
    /// outlive a borrow of the descriptor.
    #[must_use]
    pub fn shared_source_properties(&self) -> Arc<BTreeMap<String, String>> {
        Arc::clone(&self.source_properties)
    }

    /// Advisories raised at construction.
    #[must_use]
    pub fn advisories(&self) -> &[DispatchAdvisory] {
        &self.advisories
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state.load()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state() == LifecycleState::Running
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn is_secret_key(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    SECRET_KEY_MARKERS.iter().any(|marker| lower.contains(marker))
}

impl fmt::Display for ConnectorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unset = "-";
        write!(
            f,
            "ConnectorDescriptor [topic={}, dispatch_path={}, remote_endpoint={}, sync_topic={}, replay_topic={}, state_file={}, source_properties={{",
            self.topic,
            self.dispatch_path.as_deref().unwrap_or(unset),
            self.remote_endpoint.as_deref().unwrap_or(unset),
            self.sync_topic,
            self.replay_topic,
            self.state_file.as_deref().unwrap_or(unset),
        )?;
        for (i, (key, value)) in self.source_properties.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if is_secret_key(key) {
                write!(f, "{key}=****")?;
            } else {
                write!(f, "{key}={value}")?;
            }
        }
        write!(f, "}}, state={}]", self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_events() -> ConnectorConfig {
        ConnectorConfig::new("events")
            .with_dispatch_path("/ds/data")
            .with_remote_endpoint("")
            .with_sync_topic(true)
            .with_replay_topic(false)
    }

    #[test]
    fn local_dispatch_scenario() {
        let d = ConnectorDescriptor::new(local_events()).unwrap();
        assert!(d.dispatches_locally());
        assert!(d.advisories().is_empty());
        assert_eq!(d.remote_endpoint(), None);
        assert!(d.to_string().contains("topic=events"));
        assert_eq!(d.dispatch_target(), DispatchTarget::Local("/ds/data"));
    }

    #[test]
    fn missing_topic_is_invalid() {
        let err = ConnectorDescriptor::new(ConnectorConfig::default()).unwrap_err();
        assert!(matches!(err, DescriptorError::InvalidConfiguration(_)));
    }

    #[test]
    fn blank_topic_is_invalid() {
        for topic in ["", "   "] {
            let err = ConnectorDescriptor::new(ConnectorConfig::new(topic)).unwrap_err();
            assert!(matches!(err, DescriptorError::InvalidConfiguration(_)), "topic {topic:?}");
        }
    }

    #[test]
    fn no_target_emits_single_advisory() {
        let d = ConnectorDescriptor::new(ConnectorConfig::new("events")).unwrap();
        assert_eq!(d.advisories(), &[DispatchAdvisory::NoTarget]);
        assert!(!d.dispatches_locally());
        assert_eq!(d.dispatch_target(), DispatchTarget::None);
    }

    #[test]
    fn both_targets_emit_single_advisory() {
        let d = ConnectorDescriptor::new(
            ConnectorConfig::new("events")
                .with_dispatch_path("svc")
                .with_remote_endpoint("http://x"),
        )
        .unwrap();
        assert_eq!(d.advisories(), &[DispatchAdvisory::AmbiguousTarget]);
        assert!(d.dispatches_locally());
        assert_eq!(d.remote_endpoint(), Some("http://x"));
        assert_eq!(d.dispatch_target(), DispatchTarget::Local("svc"));
    }

    #[test]
    fn remote_only_dispatches_remotely() {
        let d = ConnectorDescriptor::new(
            ConnectorConfig::new("events").with_remote_endpoint("http://replica:3030/ds"),
        )
        .unwrap();
        assert!(!d.dispatches_locally());
        assert!(d.advisories().is_empty());
        assert_eq!(
            d.dispatch_target(),
            DispatchTarget::Remote("http://replica:3030/ds")
        );
    }

    #[test]
    fn lifecycle_moves_forward() {
        let d = ConnectorDescriptor::new(local_events()).unwrap();
        assert_eq!(d.state(), LifecycleState::Initialized);
        assert!(!d.is_running());

        d.start().unwrap();
        assert_eq!(d.state(), LifecycleState::Running);
        assert!(d.is_running());

        d.shutdown().unwrap();
        assert_eq!(d.state(), LifecycleState::Shutdown);
    }

    #[test]
    fn start_twice_is_rejected() {
        let d = ConnectorDescriptor::new(local_events()).unwrap();
        d.start().unwrap();
        let err = d.start().unwrap_err();
        assert_eq!(
            err,
            DescriptorError::InvalidTransition {
                from: LifecycleState::Running,
                to: LifecycleState::Running,
            }
        );
    }

    #[test]
    fn no_transition_out_of_shutdown() {
        let d = ConnectorDescriptor::new(local_events()).unwrap();
        d.shutdown().unwrap();
        assert!(d.start().is_err());
        assert!(d.shutdown().is_err());
        assert_eq!(d.state(), LifecycleState::Shutdown);
    }

    #[test]
    fn empty_state_file_is_unset() {
        let d = ConnectorDescriptor::new(local_events().with_state_file("")).unwrap();
        assert_eq!(d.state_file(), None);

        let d = ConnectorDescriptor::new(local_events().with_state_file("/var/lib/events.state"))
            .unwrap();
        assert_eq!(d.state_file(), Some(Path::new("/var/lib/events.state")));
    }

    #[test]
    fn source_properties_are_shared() {
        let d = ConnectorDescriptor::new(
            local_events().with_source_property("bootstrap.servers", "localhost:9092"),
        )
        .unwrap();
        let shared = d.shared_source_properties();
        assert!(std::ptr::eq(shared.as_ref(), d.source_properties()));
        assert_eq!(shared["bootstrap.servers"], "localhost:9092");
    }

    #[test]
    fn display_is_deterministic_and_masks_secrets() {
        let config = local_events()
            .with_source_property("sasl.password", "hunter2")
            .with_source_property("bootstrap.servers", "localhost:9092")
            .with_source_property("group.id", "eventlink");
        let d = ConnectorDescriptor::new(config.clone()).unwrap();
        let text = d.to_string();

        assert_eq!(
            text,
            "ConnectorDescriptor [topic=events, dispatch_path=/ds/data, remote_endpoint=-, \
             sync_topic=true, replay_topic=false, state_file=-, \
             source_properties={bootstrap.servers=localhost:9092, group.id=eventlink, sasl.password=****}, \
             state=initialized]"
        );
        assert!(!text.contains("hunter2"));
        assert_eq!(text, ConnectorDescriptor::new(config).unwrap().to_string());
    }

    #[test]
    fn display_tracks_state() {
        let d = ConnectorDescriptor::new(local_events()).unwrap();
        d.start().unwrap();
        assert!(d.to_string().ends_with("state=running]"));
    }

    #[test]
    fn concurrent_start_succeeds_once() {
        let d = Arc::new(ConnectorDescriptor::new(local_events()).unwrap());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let d = Arc::clone(&d);
                std::thread::spawn(move || d.start().is_ok())
            })
            .collect();
        let started = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(started, 1);
        assert!(d.is_running());
    }

    #[test]
    fn descriptor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConnectorDescriptor>();
    }
}
