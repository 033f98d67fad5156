//! Descriptor error types.

use crate::lifecycle::LifecycleState;

/// Errors produced while building or transitioning a
/// [`ConnectorDescriptor`](crate::ConnectorDescriptor).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// A required configuration value is missing or malformed.
    #[error("invalid connector configuration: {0}")]
    InvalidConfiguration(String),

    /// A lifecycle transition was requested from a state that does not allow it.
    #[error("invalid lifecycle transition: {from} -> {to}")]
    InvalidTransition {
        from: LifecycleState,
        to: LifecycleState,
    },
}

impl DescriptorError {
    /// Shorthand for [`DescriptorError::InvalidConfiguration`].
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, DescriptorError>;
