//! Error types
//!
//! Only the failures a caller can act on are surfaced. Out-of-range grid
//! coordinates and coincident circle centers are handled in place.

use std::error::Error;
use std::fmt;

/// A circle could not be added to the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnError {
    /// The world already holds its configured maximum number of circles
    CapacityExceeded { capacity: usize },
    /// Radius must be finite and positive
    InvalidRadius { radius: f32 },
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::CapacityExceeded { capacity } => {
                write!(f, "circle capacity ({capacity}) exceeded")
            }
            SpawnError::InvalidRadius { radius } => write!(f, "invalid circle radius {radius}"),
        }
    }
}

impl Error for SpawnError {}

/// Invalid or unreadable settings
#[derive(Debug)]
pub enum SettingsError {
    /// A field holds a value the engines cannot run with
    Invalid { field: &'static str, reason: String },
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl SettingsError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SettingsError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Invalid { field, reason } => write!(f, "invalid {field}: {reason}"),
            SettingsError::Json(e) => write!(f, "settings JSON: {e}"),
            SettingsError::Io(e) => write!(f, "settings file: {e}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SettingsError::Json(e) => Some(e),
            SettingsError::Io(e) => Some(e),
            SettingsError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Json(err)
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err)
    }
}
