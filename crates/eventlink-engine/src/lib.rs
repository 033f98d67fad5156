//! Connector file loading, validation, and lifecycle control.

pub mod config;
pub mod errors;
pub mod registry;

pub use errors::EngineError;
pub use registry::ConnectorRegistry;
