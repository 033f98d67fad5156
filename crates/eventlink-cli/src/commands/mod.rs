pub mod check;
pub mod list;

use std::path::Path;

use anyhow::{Context, Result};
use eventlink_engine::config::{parser, validator};
use eventlink_engine::ConnectorRegistry;

/// Parse, validate, and build the registry for a connector file.
fn load_registry(path: &Path) -> Result<ConnectorRegistry> {
    let file = parser::parse_connectors(path)
        .with_context(|| format!("Failed to parse connectors: {}", path.display()))?;
    validator::validate_connector_file(&file)?;
    let registry = ConnectorRegistry::from_file(&file)?;
    Ok(registry)
}
