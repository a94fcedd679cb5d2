// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the fusion library.
//!
//! Expected per-frame absences (no body, no hand, low visibility) are not errors; they are
//! `Ok(None)` results. Everything here is a hard fault the caller must handle.

use std::fmt;

use crate::side::Side;

/// Result type alias for fusion operations.
pub type Result<T> = std::result::Result<T, FusionError>;

/// Main error type for the fusion library.
#[derive(Debug)]
pub enum FusionError {
    /// A side was requested that the engine is not configured to fuse.
    UnsupportedSide(Side),
    /// Detector output is structurally inconsistent (wrong landmark count, unknown label).
    MalformedDetectorOutput(String),
    /// A detector implementation failed.
    DetectorError(String),
    /// Invalid configuration provided.
    ConfigError(String),
    /// Error processing images.
    ImageError(String),
    /// Error parsing a detector recording.
    ParseError(String),
    /// IO error (file not found, permission denied, etc.).
    IoError(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
}

impl FusionError {
    /// Returns whether this error signals an unsupported side request.
    #[must_use]
    pub const fn is_unsupported_side(&self) -> bool {
        matches!(self, Self::UnsupportedSide(_))
    }
}

impl fmt::Display for FusionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSide(side) => {
                write!(f, "Unsupported side: fusion for '{side}' is not enabled")
            }
            Self::MalformedDetectorOutput(msg) => write!(f, "Malformed detector output: {msg}"),
            Self::DetectorError(msg) => write!(f, "Detector error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
            Self::IoError(msg) => write!(f, "IO error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for FusionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FusionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for FusionError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageError(err.to_string())
    }
}

impl From<serde_json::Error> for FusionError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FusionError::UnsupportedSide(Side::Left);
        assert_eq!(
            err.to_string(),
            "Unsupported side: fusion for 'left' is not enabled"
        );

        let err = FusionError::MalformedDetectorOutput("test".to_string());
        assert_eq!(err.to_string(), "Malformed detector output: test");
    }

    #[test]
    fn test_unsupported_side_is_distinct() {
        assert!(FusionError::UnsupportedSide(Side::Right).is_unsupported_side());
        assert!(!FusionError::ConfigError("x".to_string()).is_unsupported_side());
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error;
        let err = FusionError::from(std::io::Error::other("disk"));
        assert!(err.source().is_some());
    }
}
