//! Driving several independent targets over the same frame
//!
//! Each target has its own controller; nothing is shared between them, so
//! with the `parallel` feature the controllers are updated on the rayon pool.

use crate::bbox::Rect2d;
use crate::error::TrackError;
use crate::tracking::AdaptiveTracker;
use crate::traits::{FrameOf, TrackerFactory};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Update every controller with `frame`, one result per controller
#[cfg(feature = "parallel")]
pub fn update_all<F>(
    trackers: &mut [AdaptiveTracker<F>],
    frame: &FrameOf<F>,
) -> Vec<Result<Rect2d, TrackError>>
where
    F: TrackerFactory + Send,
    F::Tracker: Send,
    FrameOf<F>: Clone + Send + Sync,
{
    trackers
        .par_iter_mut()
        .map(|tracker| tracker.update(frame))
        .collect()
}

/// Update every controller with `frame`, one result per controller
#[cfg(not(feature = "parallel"))]
pub fn update_all<F>(
    trackers: &mut [AdaptiveTracker<F>],
    frame: &FrameOf<F>,
) -> Vec<Result<Rect2d, TrackError>>
where
    F: TrackerFactory,
    FrameOf<F>: Clone,
{
    trackers
        .iter_mut()
        .map(|tracker| tracker.update(frame))
        .collect()
}

/// Indices of controllers that are still tracking with a live instance
pub fn active_targets<F>(trackers: &[AdaptiveTracker<F>]) -> Vec<usize>
where
    F: TrackerFactory,
    FrameOf<F>: Clone,
{
    trackers
        .iter()
        .enumerate()
        .filter(|(_, tracker)| tracker.state().is_tracking && tracker.has_tracker())
        .map(|(index, _)| index)
        .collect()
}
