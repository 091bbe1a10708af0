use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading a report configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// How much of a region the inspector shows.
///
/// Every field is optional in the YAML file:
/// ```yaml
/// entity_rows: 5
/// chunk_rows: 3
/// sentinel: "-"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Maximum entity-type rows listed for the selected region.
    pub entity_rows: usize,
    /// Maximum chunk rows listed for the selected region.
    pub chunk_rows: usize,
    /// Text shown where a value is missing.
    pub sentinel: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            entity_rows: 10,
            chunk_rows: 10,
            sentinel: "N/A".into(),
        }
    }
}

impl ReportConfig {
    /// Load a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config: Self = serde_yaml::from_reader(std::fs::File::open(path)?)?;
        tracing::debug!(path = %path.display(), ?config, "loaded report config");
        Ok(config)
    }

    /// Parse a YAML configuration document.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }
}
