//! Error types for trigger sources.
//!
//! Covers the failure modes of the button panel and the beacon proximity
//! service: missing or disabled radio, connection problems, and channels
//! closing underneath a device.

/// Result type alias for trigger source operations.
pub type Result<T> = std::result::Result<T, TriggerError>;

/// Errors that can occur while producing trigger events.
#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    /// Source is not connected or has been disconnected.
    #[error("Source disconnected: {source_name}")]
    Disconnected { source_name: String },

    /// The host has no short-range radio.
    #[error("Device does not have Bluetooth Low Energy")]
    RadioUnavailable,

    /// The radio exists but is switched off.
    #[error("Bluetooth not enabled")]
    RadioDisabled,

    /// The proximity service is not ready for the requested operation.
    #[error("Proximity service not ready: {message}")]
    NotReady { message: String },

    /// Region definition rejected by the proximity service.
    #[error("Invalid region: {message}")]
    InvalidRegion { message: String },
}

impl TriggerError {
    /// Create a new disconnected error.
    pub fn disconnected(source_name: impl Into<String>) -> Self {
        Self::Disconnected {
            source_name: source_name.into(),
        }
    }

    /// Create a new not-ready error.
    pub fn not_ready(message: impl Into<String>) -> Self {
        Self::NotReady {
            message: message.into(),
        }
    }

    /// Create a new invalid region error.
    pub fn invalid_region(message: impl Into<String>) -> Self {
        Self::InvalidRegion {
            message: message.into(),
        }
    }
}
