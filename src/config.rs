use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::clean::DatePolicy;

/// File looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "homeexchange-viewer.json";

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// Startup settings. Every field is optional in the file.
///
/// ```json
/// { "date_policy": "strict", "timeline_row_height": 24.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// How unparseable dates are handled on load.
    pub date_policy: DatePolicy,
    pub timeline_row_height: f32,
    pub timeline_min_height: f32,
    pub window_size: [f32; 2],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            date_policy: DatePolicy::Tolerant,
            timeline_row_height: 30.0,
            timeline_min_height: 400.0,
            window_size: [1200.0, 800.0],
        }
    }
}

impl ViewerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// [`CONFIG_FILE`] if it exists and parses, defaults otherwise.
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring configuration file: {e:#}");
                Self::default()
            }
        }
    }
}
