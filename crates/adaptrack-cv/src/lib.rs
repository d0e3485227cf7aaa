//! Adaptrack Computer Vision Library
//!
//! Supervisory layer for single-object visual trackers whose parameters are
//! fixed at construction: watches quality and target size, and rebuilds the
//! tracker with fresh parameters when its state stops being trustworthy.

pub mod batch;
pub mod bbox;
pub mod error;
pub mod tracking;

// Re-export commonly used types
pub use bbox::{PixelRect, Rect2d, Size2d};
pub use error::TrackError;
pub use tracking::{
    AdaptiveConfig, AdaptiveTracker, ReinitReason, TrackerParams, TrackingHistory, TrackingState,
    TrackingStats,
};

// Error handling
pub type Result<T> = anyhow::Result<T>;

/// Capabilities required from the underlying tracker
pub mod traits {
    use super::*;

    /// A single-object tracker instance
    pub trait VisualTracker {
        type Frame;

        /// Seed the tracker with the target location
        fn init(&mut self, frame: &Self::Frame, bbox: &Rect2d) -> Result<()>;

        /// Locate the target in the next frame
        fn update(&mut self, frame: &Self::Frame) -> Result<Rect2d>;

        /// Raw peak-to-sidelobe ratio of the last update
        fn raw_quality(&self) -> f64;

        /// Quality normalized to [0, 1]
        fn quality_score(&self) -> f64;

        fn is_target_lost(&self) -> bool;

        fn statistics(&self) -> TrackingStats;
    }

    /// Builds tracker instances; parameters cannot change after creation
    pub trait TrackerFactory {
        type Tracker: VisualTracker;

        fn create(&self, params: &TrackerParams) -> Result<Self::Tracker>;
    }

    /// Frame type consumed by the trackers a factory builds
    pub type FrameOf<F> = <<F as TrackerFactory>::Tracker as VisualTracker>::Frame;
}
