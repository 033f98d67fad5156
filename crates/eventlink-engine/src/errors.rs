//! Engine error model.

use eventlink_types::DescriptorError;

/// Error raised while building or driving a set of connectors.
///
/// `Descriptor` wraps a typed [`DescriptorError`] together with the name of
/// the connector it came from. `DuplicateName` rejects a second connector
/// registered under an existing name. `Infrastructure` wraps opaque loader errors
/// (file I/O, YAML, environment substitution, validation).
#[derive(Debug)]
pub enum EngineError {
    /// Typed descriptor error for a named connector.
    Descriptor {
        connector: String,
        source: DescriptorError,
    },
    /// A connector with this name is already registered.
    DuplicateName(String),
    /// Loader or validation failure.
    Infrastructure(anyhow::Error),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Descriptor { connector, source } => write!(f, "connector '{connector}': {source}"),
            Self::DuplicateName(name) => write!(f, "Duplicate connector name '{name}'"),
            Self::Infrastructure(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Descriptor { source, .. } => Some(source),
            Self::DuplicateName(_) => None,
            Self::Infrastructure(e) => Some(e.as_ref()),
        }
    }
}

impl From<anyhow::Error> for EngineError {
    fn from(e: anyhow::Error) -> Self {
        Self::Infrastructure(e)
    }
}

impl EngineError {
    pub(crate) fn descriptor(connector: impl Into<String>, source: DescriptorError) -> Self {
        Self::Descriptor {
            connector: connector.into(),
            source,
        }
    }

    /// Returns the typed descriptor error if this is a `Descriptor` variant.
    pub fn as_descriptor_error(&self) -> Option<&DescriptorError> {
        match self {
            Self::Descriptor { source, .. } => Some(source),
            Self::DuplicateName(_) | Self::Infrastructure(_) => None,
        }
    }
}
