//! Connector descriptor, lifecycle, and error model types.
//!
//! A [`ConnectorDescriptor`] binds one source topic to one dispatch target.
//! This crate performs no I/O; loading and orchestration live in
//! `eventlink-engine`.

#![warn(clippy::pedantic)]

pub mod advisory;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod lifecycle;

pub use advisory::DispatchAdvisory;
pub use config::ConnectorConfig;
pub use descriptor::{ConnectorDescriptor, DispatchTarget};
pub use error::{DescriptorError, Result};
pub use lifecycle::LifecycleState;
