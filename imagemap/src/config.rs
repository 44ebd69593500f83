use crate::error::{ImageMapError, Result};
use crate::geometry::limits::{DEFAULT_DEBOUNCE_MS, DEFAULT_SELECTOR, MAX_DEBOUNCE_MS};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResizeConfig {
    /// Quiet period after the last resize before regions are rescaled.
    pub debounce_ms: u32,
    /// Selector used by `attach_all` when no target is given.
    pub default_selector: String,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        ResizeConfig { debounce_ms: DEFAULT_DEBOUNCE_MS, default_selector: DEFAULT_SELECTOR.to_string() }
    }
}

impl ResizeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ImageMapError::InvalidConfig(format!(
                "debounceMs must be at most {} (got {})",
                MAX_DEBOUNCE_MS, self.debounce_ms
            )));
        }
        if self.default_selector.trim().is_empty() {
            return Err(ImageMapError::InvalidConfig("defaultSelector must not be empty".into()));
        }
        Ok(())
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<ResizeConfig> {
        let cfg: ResizeConfig = serde_json::from_value(v).map_err(|e| ImageMapError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
