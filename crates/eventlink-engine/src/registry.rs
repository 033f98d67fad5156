//! Registry of connector descriptors and their lifecycle controller.

use std::sync::Arc;

use eventlink_types::{ConnectorDescriptor, DispatchAdvisory};
use tracing::info;

use crate::config::types::ConnectorFile;
use crate::errors::EngineError;

/// Named set of descriptors built from one connector file, in file order.
///
/// The registry is the only party that drives descriptor lifecycles; other
/// components hold `Arc<ConnectorDescriptor>` clones and read from them.
#[derive(Debug, Default)]
pub struct ConnectorRegistry {
    entries: Vec<(String, Arc<ConnectorDescriptor>)>,
}

impl ConnectorRegistry {
    /// Build a descriptor for every entry in `file`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Descriptor`] for the first entry whose
    /// descriptor cannot be built, or [`EngineError::DuplicateName`] if two
    /// entries share a name.
    pub fn from_file(file: &ConnectorFile) -> Result<Self, EngineError> {
        let mut registry = Self::default();
        for entry in &file.connectors {
            let name = entry.effective_name().to_string();
            let descriptor = ConnectorDescriptor::new(entry.config.clone())
                .map_err(|e| EngineError::descriptor(&name, e))?;
            registry.insert(name, descriptor)?;
        }
        Ok(registry)
    }

    /// Register a descriptor under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateName`] if `name` is already taken.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        descriptor: ConnectorDescriptor,
    ) -> Result<Arc<ConnectorDescriptor>, EngineError> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(EngineError::DuplicateName(name));
        }
        let descriptor = Arc::new(descriptor);
        self.entries.push((name, Arc::clone(&descriptor)));
        Ok(descriptor)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<ConnectorDescriptor>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    /// All descriptors consuming `topic`.
    pub fn by_topic<'a>(
        &'a self,
        topic: &'a str,
    ) -> impl Iterator<Item = &'a Arc<ConnectorDescriptor>> + 'a {
        self.entries
            .iter()
            .filter(move |(_, d)| d.topic() == topic)
            .map(|(_, d)| d)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<ConnectorDescriptor>)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every advisory raised while building the registry, by connector name.
    #[must_use]
    pub fn advisories(&self) -> Vec<(&str, DispatchAdvisory)> {
        self.iter()
            .flat_map(|(name, d)| d.advisories().iter().map(move |a| (name, *a)))
            .collect()
    }

    /// Start every connector in file order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first connector that cannot be started.
    pub fn start_all(&self) -> Result<(), EngineError> {
        for (name, descriptor) in self.iter() {
            descriptor
                .start()
                .map_err(|e| EngineError::descriptor(name, e))?;
            info!(connector = %name, topic = descriptor.topic(), "Connector started");
        }
        Ok(())
    }

    /// Shut down every connector in reverse file order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first connector that cannot be shut down.
    pub fn shutdown_all(&self) -> Result<(), EngineError> {
        for (name, descriptor) in self.entries.iter().rev() {
            descriptor
                .shutdown()
                .map_err(|e| EngineError::descriptor(name, e))?;
            info!(connector = %name, topic = descriptor.topic(), "Connector shut down");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parser::parse_connectors_str;
    use eventlink_types::{ConnectorConfig, DescriptorError, LifecycleState};

    const TWO_CONNECTORS: &str = r#"
version: "1.0"
connectors:
  - name: orders-local
    topic: orders
    dispatch_path: /ds/upload
  - name: orders-replica
    topic: orders
    remote_endpoint: http://replica:3030/ds/update
  - topic: audit
"#;

    fn registry() -> ConnectorRegistry {
        ConnectorRegistry::from_file(&parse_connectors_str(TWO_CONNECTORS).unwrap()).unwrap()
    }

    #[test]
    fn builds_in_file_order() {
        let reg = registry();
        let names: Vec<&str> = reg.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["orders-local", "orders-replica", "audit"]);
        assert_eq!(reg.len(), 3);
        assert!(!reg.is_empty());
    }

    #[test]
    fn lookup_by_name_and_topic() {
        let reg = registry();
        assert!(reg.get("orders-local").unwrap().dispatches_locally());
        assert!(!reg.get("orders-replica").unwrap().dispatches_locally());
        assert!(reg.get("missing").is_none());
        assert_eq!(reg.by_topic("orders").count(), 2);
        assert_eq!(reg.by_topic("audit").count(), 1);
    }

    #[test]
    fn collects_advisories() {
        let reg = registry();
        assert_eq!(reg.advisories(), vec![("audit", DispatchAdvisory::NoTarget)]);
    }

    #[test]
    fn blank_topic_reports_connector() {
        let yaml = r#"
version: "1.0"
connectors:
  - name: broken
    topic: ""
"#;
        let err = ConnectorRegistry::from_file(&parse_connectors_str(yaml).unwrap()).unwrap_err();
        assert!(matches!(
            err.as_descriptor_error(),
            Some(DescriptorError::InvalidConfiguration(_))
        ));
        assert!(err.to_string().starts_with("connector 'broken'"));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut reg = registry();
        let d = ConnectorDescriptor::new(ConnectorConfig::new("audit")).unwrap();
        let err = reg.insert("audit", d).unwrap_err();
        assert!(matches!(&err, EngineError::DuplicateName(name) if name == "audit"));
        assert_eq!(err.to_string(), "Duplicate connector name 'audit'");
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn duplicate_names_in_file_are_rejected() {
        let yaml = r#"
version: "1.0"
connectors:
  - name: orders
    topic: orders
  - name: orders
    topic: orders-v2
"#;
        let err = ConnectorRegistry::from_file(&parse_connectors_str(yaml).unwrap()).unwrap_err();
        assert!(matches!(&err, EngineError::DuplicateName(name) if name == "orders"));
        assert!(err.as_descriptor_error().is_none());
    }

    #[test]
    fn start_then_shutdown_all() {
        let reg = registry();
        let held = Arc::clone(reg.get("orders-local").unwrap());

        reg.start_all().unwrap();
        assert!(reg.iter().all(|(_, d)| d.state() == LifecycleState::Running));
        assert!(held.is_running());

        reg.shutdown_all().unwrap();
        assert!(reg.iter().all(|(_, d)| d.state() == LifecycleState::Shutdown));
        assert_eq!(held.state(), LifecycleState::Shutdown);
    }

    #[test]
    fn start_all_twice_fails_on_first_connector() {
        let reg = registry();
        reg.start_all().unwrap();
        let err = reg.start_all().unwrap_err();
        assert!(err.to_string().starts_with("connector 'orders-local'"));
        assert!(matches!(
            err.as_descriptor_error(),
            Some(DescriptorError::InvalidTransition { .. })
        ));
    }
}
