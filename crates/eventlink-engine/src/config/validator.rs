//! Semantic validation for a parsed connector file.

use std::collections::HashSet;

use anyhow::{bail, Result};

use crate::config::types::{ConnectorFile, SUPPORTED_VERSION};

/// Validate a parsed connector file.
///
/// Dispatch-target problems are advisory and are reported by the descriptor
/// itself, not here.
///
/// # Errors
///
/// Returns an error listing every validation failure found in the file.
pub fn validate_connector_file(file: &ConnectorFile) -> Result<()> {
    let mut errors = Vec::new();

    if file.version != SUPPORTED_VERSION {
        errors.push(format!(
            "Unsupported connector file version '{}', expected '{SUPPORTED_VERSION}'",
            file.version
        ));
    }

    if file.connectors.is_empty() {
        errors.push("Connector file must define at least one connector".to_string());
    }

    let mut seen = HashSet::new();
    for (i, entry) in file.connectors.iter().enumerate() {
        let topic_blank = entry
            .config
            .topic
            .as_deref()
            .map_or(true, |t| t.trim().is_empty());
        if topic_blank {
            errors.push(format!("Connector {i} has an empty topic"));
            continue;
        }

        let name = entry.effective_name();
        if !seen.insert(name) {
            errors.push(format!("Duplicate connector name '{name}'"));
        }
    }

    if !errors.is_empty() {
        bail!(
            "Connector file validation failed:\n  - {}",
            errors.join("\n  - ")
        );
    }

    Ok(())
}
