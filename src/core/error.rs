//! Error types for camera configuration.

use std::fmt;

/// Errors produced while loading, saving or validating camera settings.
#[derive(Debug)]
pub enum CameraConfigError {
    /// Reading or writing the settings file failed.
    Io(std::io::Error),
    /// The settings file is not valid TOML for `RtsCameraSettings`.
    Parse(String),
    /// The settings parsed but a value is out of range.
    Invalid(String),
}

impl fmt::Display for CameraConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(msg) => write!(f, "camera settings parse error: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid camera settings: {msg}"),
        }
    }
}

impl std::error::Error for CameraConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CameraConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
