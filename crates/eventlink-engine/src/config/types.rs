//! Connector file model.

use eventlink_types::ConnectorConfig;
use serde::{Deserialize, Serialize};

/// The only connector file version currently understood.
pub const SUPPORTED_VERSION: &str = "1.0";

/// Top-level connector file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorFile {
    pub version: String,
    #[serde(default)]
    pub connectors: Vec<ConnectorEntry>,
}

/// One connector binding in a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorEntry {
    /// Registry name. Defaults to the topic when omitted.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub config: ConnectorConfig,
}

impl ConnectorEntry {
    /// Name used for registry lookups and error reporting.
    ///
    /// Falls back to the topic, then to an empty string.
    #[must_use]
    pub fn effective_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.config.topic.as_deref())
            .unwrap_or("")
    }
}
