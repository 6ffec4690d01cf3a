//! Error types shared across driftview crates.

use std::path::PathBuf;

/// Top-level error type for driftview operations.
#[derive(Debug, thiserror::Error)]
pub enum DriftError {
    /// A caller-supplied bound cannot produce a finite animation.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// A sampler distance does not fit the 32-bit unsigned draw range.
    #[error("Sample distance {distance} exceeds the representable range")]
    DistanceOverflow { distance: i64 },

    #[error("Image not found: {identifier}")]
    ImageNotFound { identifier: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using DriftError.
pub type DriftResult<T> = Result<T, DriftError>;

impl DriftError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: msg.into(),
        }
    }

    pub fn image_not_found(identifier: impl Into<String>) -> Self {
        Self::ImageNotFound {
            identifier: identifier.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error is a caller-side precondition violation rather than
    /// an environmental failure.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::DistanceOverflow { .. }
        )
    }
}
