//! Mode configuration
//!
//! Settings shared by all edit modes. Files are stored as RON; every field
//! has a default so partial files load.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default hit radius for guide picking, in coordinate units
pub const DEFAULT_PICK_TOLERANCE: f64 = 0.0005;

/// Edit mode configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModeConfig {
    /// View bearing override in degrees (takes precedence over the camera)
    pub bearing: Option<f64>,
    /// Align the scale box with the view bearing
    pub rotate_bounding_box: bool,
    /// Add edge-midpoint handles to the scale box
    pub axis_handles: bool,
    /// Hit radius used when resolving pointer positions to guides
    pub pick_tolerance: f64,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            bearing: None,
            rotate_bounding_box: false,
            axis_handles: false,
            pick_tolerance: DEFAULT_PICK_TOLERANCE,
        }
    }
}

impl ModeConfig {
    /// Parse from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Serialize to pretty RON text
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Save to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
