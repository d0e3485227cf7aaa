//! Mutable tracking state owned by the controller

use super::history::TrackingHistory;
use crate::bbox::Rect2d;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the tracker instance was rebuilt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReinitReason {
    /// Quality stayed under the floor for `consecutive` frames
    LowQuality { consecutive: u32 },
    /// Target area moved away from its historical average by `change`
    SizeDrift { change: f64 },
    /// A structural parameter changed in a live configuration update
    ConfigChanged,
}

impl fmt::Display for ReinitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReinitReason::LowQuality { consecutive } => {
                write!(f, "low quality for {} consecutive frames", consecutive)
            }
            ReinitReason::SizeDrift { change } => {
                write!(f, "size drift of {:.1}%", change * 100.0)
            }
            ReinitReason::ConfigChanged => write!(f, "structural configuration change"),
        }
    }
}

/// Snapshot of everything the controller knows about the current target
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingState {
    pub is_initialized: bool,
    pub is_tracking: bool,
    pub current_bbox: Rect2d,
    pub initial_bbox: Rect2d,
    /// Raw quality (PSR) of the last successful frame
    pub current_quality: f64,
    /// Normalized quality in [0, 1]
    pub tracking_score: f64,
    pub frame_count: u64,
    pub consecutive_low_quality: u32,
    pub frames_since_reinit: u32,
    pub reinit_count: u32,
    pub last_reinit: Option<ReinitReason>,
    pub history: TrackingHistory,
}

impl TrackingState {
    /// Fresh state for a target seeded at `bbox`
    pub fn started_at(bbox: Rect2d) -> Self {
        Self {
            is_initialized: true,
            is_tracking: true,
            current_bbox: bbox,
            initial_bbox: bbox,
            ..Default::default()
        }
    }

    /// Counters stick at their maximum on very long streams
    pub(crate) fn advance_frame(&mut self) {
        self.frame_count = self.frame_count.saturating_add(1);
        self.frames_since_reinit = self.frames_since_reinit.saturating_add(1);
    }

    /// Counter reset after a rebuild; history is kept
    pub(crate) fn mark_reinitialized(&mut self, reason: ReinitReason) {
        self.consecutive_low_quality = 0;
        self.frames_since_reinit = 0;
        self.reinit_count = self.reinit_count.saturating_add(1);
        self.last_reinit = Some(reason);
    }

    pub(crate) fn note_quality(&mut self, quality: f64, floor: f64) {
        if quality < floor {
            self.consecutive_low_quality = self.consecutive_low_quality.saturating_add(1);
        } else {
            self.consecutive_low_quality = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::Size2d;

    #[test]
    fn test_reinit_keeps_history() {
        let mut state = TrackingState::started_at(Rect2d::new(0.0, 0.0, 10.0, 10.0));
        state.history.record(0.5, Size2d::new(10.0, 10.0));
        state.history.record(0.4, Size2d::new(11.0, 10.0));
        state.consecutive_low_quality = 4;
        state.frames_since_reinit = 17;
        let before = state.history.clone();

        state.mark_reinitialized(ReinitReason::ConfigChanged);

        assert_eq!(state.consecutive_low_quality, 0);
        assert_eq!(state.frames_since_reinit, 0);
        assert_eq!(state.reinit_count, 1);
        assert_eq!(state.history, before);
    }

    #[test]
    fn test_low_quality_counter() {
        let mut state = TrackingState::default();
        state.note_quality(0.01, 0.02);
        state.note_quality(0.0, 0.02);
        assert_eq!(state.consecutive_low_quality, 2);

        // the floor itself is not low quality
        state.note_quality(0.02, 0.02);
        assert_eq!(state.consecutive_low_quality, 0);
    }

    #[test]
    fn test_counters_saturate() {
        let mut state = TrackingState {
            frame_count: u64::MAX,
            frames_since_reinit: u32::MAX,
            consecutive_low_quality: u32::MAX,
            reinit_count: u32::MAX,
            ..Default::default()
        };

        state.advance_frame();
        state.note_quality(0.0, 0.02);
        assert_eq!(state.frame_count, u64::MAX);
        assert_eq!(state.frames_since_reinit, u32::MAX);
        assert_eq!(state.consecutive_low_quality, u32::MAX);

        state.mark_reinitialized(ReinitReason::ConfigChanged);
        assert_eq!(state.reinit_count, u32::MAX);
        assert_eq!(state.frames_since_reinit, 0);
    }
}
