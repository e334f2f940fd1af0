// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the overlay library.
//!
//! The overlay engine and viewport mapping never fail; these errors only come
//! from the edges of the crate (parsing payloads, reading files, writing renders).

use std::fmt;

/// Result type alias for overlay operations.
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Main error type for the overlay library.
#[derive(Debug)]
pub enum OverlayError {
    /// Analysis payload is structurally invalid.
    PayloadError(String),
    /// Wrapped `serde_json::Error` from payload deserialization.
    Json(serde_json::Error),
    /// Invalid frame geometry (rotation, frame or viewport size).
    GeometryError(String),
    /// Invalid configuration provided.
    ConfigError(String),
    /// Error loading or encoding images.
    ImageError(String),
    /// IO error (file not found, permission denied, etc.).
    IoError(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
    /// Feature not enabled.
    FeatureNotEnabled(String),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PayloadError(msg) => write!(f, "Payload error: {msg}"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
            Self::GeometryError(msg) => write!(f, "Geometry error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::IoError(msg) => write!(f, "IO error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::FeatureNotEnabled(msg) => write!(f, "Feature not enabled: {msg}"),
        }
    }
}

impl std::error::Error for OverlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OverlayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for OverlayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<image::ImageError> for OverlayError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = OverlayError::PayloadError("test".to_string());
        assert_eq!(err.to_string(), "Payload error: test");

        let err = OverlayError::GeometryError("rotation 45".to_string());
        assert_eq!(err.to_string(), "Geometry error: rotation 45");
    }

    #[test]
    fn test_json_error_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = OverlayError::from(json_err);
        assert!(err.to_string().starts_with("JSON error:"));
        assert!(err.source().is_some());
    }
}
