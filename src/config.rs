//! Tracker configuration.
//!
//! [`TrackerConfig`] is the serializable tuning for one [`Joystick`](crate::Joystick).
//! Defaults reproduce the plain engine: a deadzone factor of `1e-4` and every new
//! axis starting at full sensitivity.
//!
//! ```toml
//! deadzone = 0.0001
//! default_sensitivity = 1.0
//!
//! [[axis]]
//! index = 0   # left stick X
//! sensitivity = 0.8
//!
//! [[axis]]
//! index = 1   # left stick Y
//! sensitivity = 0.8
//! ```
//!
//! The `[[axis]]` entries only seed axes when they are first observed; after
//! that, [`Joystick::set_sensitivity`](crate::Joystick::set_sensitivity) owns the value.

use crate::error::ConfigError;
use crate::state::clamp_sensitivity;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Half-width of the deadzone band at full sensitivity.
pub const DEFAULT_DEADZONE: f32 = 1e-4;

/// Sensitivity of a freshly observed axis.
pub const DEFAULT_SENSITIVITY: f32 = 1.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Deadzone half-width at sensitivity `1.0`; scaled linearly by sensitivity.
    pub deadzone: f32,
    /// Initial sensitivity for axes without an `[[axis]]` entry.
    pub default_sensitivity: f32,
    /// Initial sensitivity per axis index. Later entries win.
    #[serde(rename = "axis")]
    pub axes: Vec<AxisSensitivity>,
}

/// One `[[axis]]` entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisSensitivity {
    pub index: u16,
    pub sensitivity: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            deadzone: DEFAULT_DEADZONE,
            default_sensitivity: DEFAULT_SENSITIVITY,
            axes: Vec::new(),
        }
    }
}

impl TrackerConfig {
    /// Parses and validates a TOML document. Sensitivities are clamped like any
    /// other sensitivity write; a negative or non-finite deadzone is rejected.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let raw: TrackerConfig = toml::from_str(src)?;
        raw.validated()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&src)?;
        tracing::info!(
            path = %path.display(),
            axes = config.axes.len(),
            "loaded tracker config"
        );
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Sensitivity an axis starts with when the reducer first creates it.
    pub fn initial_sensitivity(&self, axis: u16) -> f32 {
        self.axes
            .iter()
            .rev()
            .find(|entry| entry.index == axis)
            .map_or(self.default_sensitivity, |entry| entry.sensitivity)
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        if !self.deadzone.is_finite() || self.deadzone < 0.0 {
            return Err(ConfigError::Invalid {
                field: "deadzone",
                reason: format!("expected a finite value >= 0, got {}", self.deadzone),
            });
        }
        self.default_sensitivity =
            clamp_sensitivity(self.default_sensitivity).ok_or(ConfigError::Invalid {
                field: "default_sensitivity",
                reason: "NaN is not a sensitivity".to_string(),
            })?;
        for entry in self.axes.iter_mut() {
            entry.sensitivity =
                clamp_sensitivity(entry.sensitivity).ok_or_else(|| ConfigError::Invalid {
                    field: "axis.sensitivity",
                    reason: format!("axis {}: NaN is not a sensitivity", entry.index),
                })?;
        }
        Ok(self)
    }
}
