//! Controller error types

use thiserror::Error;

/// Failure reported by an [`AdaptiveTracker`](crate::tracking::AdaptiveTracker) operation.
///
/// Every variant is returned to the immediate caller; the controller never
/// retries on its own.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("tracker has not been initialized")]
    NotInitialized,

    #[error("no live tracker instance; call init again")]
    NoActiveTracker,

    #[error("failed to create tracker instance: {0}")]
    CreationFailed(#[source] anyhow::Error),

    #[error("tracker instance rejected the initial box: {0}")]
    InitFailed(#[source] anyhow::Error),

    #[error("tracker update failed: {0}")]
    UpdateFailed(#[source] anyhow::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TrackError {
    /// Per-frame failures leave the tracker instance in place.
    pub fn is_transient(&self) -> bool {
        matches!(self, TrackError::UpdateFailed(_))
    }
}
