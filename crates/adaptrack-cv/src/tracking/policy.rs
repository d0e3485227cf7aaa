//! Reinitialization decision
//!
//! Checked once per successful frame, in order: cooldown gate, quality
//! trigger, size-drift trigger. The low-quality counter is maintained by the
//! controller; this module only reads it.

use super::config::AdaptiveConfig;
use super::state::{ReinitReason, TrackingState};
use crate::bbox::Rect2d;

/// Decide whether the tracker must be rebuilt, and why
pub fn evaluate(
    current_bbox: &Rect2d,
    state: &TrackingState,
    config: &AdaptiveConfig,
) -> Option<ReinitReason> {
    if state.frames_since_reinit < config.reinit_cooldown_frames {
        return None;
    }

    if config.enable_quality_monitoring
        && state.consecutive_low_quality >= config.consecutive_low_quality_limit
    {
        return Some(ReinitReason::LowQuality {
            consecutive: state.consecutive_low_quality,
        });
    }

    if config.enable_size_adaptation {
        if let Some(change) = size_change(current_bbox, state) {
            if change > config.size_change_threshold {
                return Some(ReinitReason::SizeDrift { change });
            }
        }
    }

    None
}

pub fn should_reinitialize(
    current_bbox: &Rect2d,
    state: &TrackingState,
    config: &AdaptiveConfig,
) -> bool {
    evaluate(current_bbox, state, config).is_some()
}

/// Fractional change of the current area against the historical average.
/// `None` when there is no usable average to compare against.
pub fn size_change(current_bbox: &Rect2d, state: &TrackingState) -> Option<f64> {
    if state.history.is_empty() {
        return None;
    }

    let average_area = state.history.average_area();
    if !average_area.is_finite() || average_area <= f64::EPSILON {
        return None;
    }

    Some((current_bbox.area() - average_area).abs() / average_area)
}
