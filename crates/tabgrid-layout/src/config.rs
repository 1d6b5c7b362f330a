//! Engine configuration.
//!
//! [`EngineConfig`] gathers the few tunables of the layout engine: the
//! minimum share a frame may be dragged down to and the splitter thickness.
//! It can be loaded from TOML (with the `config-file` feature) or JSON.
//!
//! ```toml
//! # tabgrid.toml
//! min_frame_width = 0.15
//! min_frame_height = 0.10
//! separator_px = 2
//! ```
//!
//! Missing keys fall back to the defaults, so `EngineConfig::default()`
//! behaves exactly like an empty file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tabgrid_core::Axis;
use thiserror::Error;

/// Smallest share of the container width a pane can be dragged down to.
pub const MIN_FRAME_WIDTH: f64 = 0.15;

/// Smallest share of the container height a pane can be dragged down to.
pub const MIN_FRAME_HEIGHT: f64 = 0.10;

/// Splitter thickness along its drag axis, in pixels.
pub const SEPARATOR_PX: u32 = 2;

/// Upper bound accepted for `separator_px`.
const MAX_SEPARATOR_PX: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum pane `flex_width` after a drag.
    pub min_frame_width: f64,
    /// Minimum pane `flex_height` after a drag.
    pub min_frame_height: f64,
    /// Splitter thickness in pixels.
    pub separator_px: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_frame_width: MIN_FRAME_WIDTH,
            min_frame_height: MIN_FRAME_HEIGHT,
            separator_px: SEPARATOR_PX,
        }
    }
}

impl EngineConfig {
    /// Minimum pane fraction along `axis`.
    #[must_use]
    pub const fn min_along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.min_frame_width,
            Axis::Y => self.min_frame_height,
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        // Two frames must always fit side by side at their minimum.
        if !(self.min_frame_width > 0.0 && self.min_frame_width <= 0.5) {
            errors.push(format!(
                "min_frame_width must be in (0, 0.5], got {}",
                self.min_frame_width
            ));
        }
        if !(self.min_frame_height > 0.0 && self.min_frame_height <= 0.5) {
            errors.push(format!(
                "min_frame_height must be in (0, 0.5], got {}",
                self.min_frame_height
            ));
        }
        if self.separator_px > MAX_SEPARATOR_PX {
            errors.push(format!(
                "separator_px must be <= {MAX_SEPARATOR_PX}, got {}",
                self.separator_px
            ));
        }

        errors
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Failure to load an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config-file")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
