//! Error types for wheel geometry, spin lifecycle and record storage

use thiserror::Error;

/// Errors raised by the wheel engine and editor
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WheelError {
    /// Every weight is zero or negative, so the wheel has no geometry
    #[error("total section weight must be positive (got {total})")]
    InvalidWeight { total: f64 },
    /// Resolver called without any arcs
    #[error("cannot resolve a spin against an empty arc set")]
    EmptyArcSet,
    #[error("a wheel needs at least 2 sections (has {count})")]
    InsufficientOptions { count: usize },
    #[error("a spin is already in progress")]
    SpinInProgress,
    #[error("no section with id {id:?}")]
    UnknownSection { id: String },
    #[error("no spin is pending")]
    NotSpinning,
}

impl WheelError {
    /// Message to show the user, if any. Repeated spin presses during an
    /// animation are dropped silently.
    pub fn user_notice(&self) -> Option<String> {
        match self {
            WheelError::SpinInProgress => None,
            other => Some(other.to_string()),
        }
    }
}

/// Errors raised by the key-value record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
