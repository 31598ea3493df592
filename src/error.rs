//! Error types.
//!
//! Nothing here is fatal to the engine: a [`ReduceError`] means one event was
//! rejected and the store was left exactly as it was before the event.

use std::path::PathBuf;
use thiserror::Error;

/// An event that contradicts the recorded channel history or carries an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReduceError {
    /// A button was released without ever being observed pressed.
    #[error("button {button} on device {device} released without a recorded press")]
    ReleaseWithoutPress { device: u32, button: u16 },

    /// An axis sample was NaN or infinite.
    #[error("axis {axis} on device {device} reported a non-finite value")]
    NonFiniteAxisValue { device: u32, axis: u16 },
}

/// Failure to load or validate a [`TrackerConfig`](crate::TrackerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
