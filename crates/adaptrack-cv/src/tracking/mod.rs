//! Adaptive tracking: history, size heuristic, reinitialization policy and
//! the controller tying them together

pub mod config;
pub mod controller;
pub mod history;
pub mod policy;
pub mod sizing;
pub mod state;
pub mod stats;

pub use config::{AdaptiveConfig, DEFAULT_ADAPTIVE_CONFIG, DEFAULT_TRACKER_PARAMS, TrackerParams};
pub use controller::AdaptiveTracker;
pub use history::{HISTORY_SIZE, TrackingHistory};
pub use sizing::{SizeRecommendation, TargetClass};
pub use state::{ReinitReason, TrackingState};
pub use stats::TrackingStats;
