//! Adaptive controller around a rebuild-only tracker

use super::config::AdaptiveConfig;
use super::policy;
use super::sizing;
use super::state::{ReinitReason, TrackingState};
use super::stats::TrackingStats;
use crate::bbox::Rect2d;
use crate::error::TrackError;
use crate::traits::{FrameOf, TrackerFactory, VisualTracker};
use tracing::{debug, info, warn};

/// Owns one tracker instance and rebuilds it when its state degrades.
///
/// Frames are processed strictly in call order; for several targets use one
/// controller each.
pub struct AdaptiveTracker<F: TrackerFactory> {
    factory: F,
    config: AdaptiveConfig,
    tracker: Option<F::Tracker>,
    state: TrackingState,
    last_frame: Option<FrameOf<F>>,
}

impl<F> AdaptiveTracker<F>
where
    F: TrackerFactory,
    FrameOf<F>: Clone,
{
    /// Create new controller; no tracker exists until `init`.
    ///
    /// The configuration is taken as is; use [`AdaptiveTracker::try_new`]
    /// for one that has not been validated yet.
    pub fn new(factory: F, config: AdaptiveConfig) -> Self {
        Self {
            factory,
            config,
            tracker: None,
            state: TrackingState::default(),
            last_frame: None,
        }
    }

    /// Like `new`, but rejects an invalid configuration
    pub fn try_new(factory: F, config: AdaptiveConfig) -> Result<Self, TrackError> {
        config.validate()?;
        Ok(Self::new(factory, config))
    }

    pub fn with_default_config(factory: F) -> Self {
        Self::new(factory, AdaptiveConfig::default())
    }

    /// Start tracking the target at `bbox`.
    ///
    /// On failure the controller is left uninitialized.
    pub fn init(&mut self, frame: &FrameOf<F>, bbox: Rect2d) -> Result<(), TrackError> {
        if self.config.auto_adjust_template_size {
            let rec = sizing::apply(&bbox, &mut self.config.tracker);
            debug!(
                class = ?rec.class,
                template_size = rec.template_size,
                number_of_scales = rec.number_of_scales,
                "Sized tracker for initial box"
            );
        }

        self.tracker = None;
        self.state.is_initialized = false;
        self.state.is_tracking = false;

        let tracker = self.build_tracker(frame, &bbox)?;
        self.tracker = Some(tracker);
        self.state = TrackingState::started_at(bbox);
        self.last_frame = Some(frame.clone());

        info!(
            x = bbox.x,
            y = bbox.y,
            width = bbox.width,
            height = bbox.height,
            "Tracker initialized"
        );
        Ok(())
    }

    /// Track the target into `frame`, rebuilding the tracker when the
    /// reinitialization policy asks for it.
    pub fn update(&mut self, frame: &FrameOf<F>) -> Result<Rect2d, TrackError> {
        if !self.state.is_initialized {
            return Err(TrackError::NotInitialized);
        }
        let Some(tracker) = self.tracker.as_mut() else {
            return Err(TrackError::NoActiveTracker);
        };

        self.state.advance_frame();

        let bbox = match tracker.update(frame) {
            Ok(bbox) => bbox,
            Err(e) => {
                warn!(frame = self.state.frame_count, error = %e, "Tracker update failed");
                self.last_frame = Some(frame.clone());
                return Err(TrackError::UpdateFailed(e));
            }
        };

        let quality = tracker.raw_quality();
        self.state.current_bbox = bbox;
        self.state.current_quality = quality;
        self.state.tracking_score = tracker.quality_score();
        self.state.history.record(quality, bbox.size());

        debug!(
            frame = self.state.frame_count,
            quality,
            score = self.state.tracking_score,
            area = bbox.area(),
            "Frame tracked"
        );

        let result = match policy::evaluate(&bbox, &self.state, &self.config) {
            Some(reason) => self.rebuild(frame, bbox, reason).map(|()| bbox),
            None => {
                self.state.note_quality(quality, self.config.quality_floor);
                Ok(bbox)
            }
        };

        self.last_frame = Some(frame.clone());
        result
    }

    /// Replace the live configuration.
    ///
    /// A change to a structural tracker parameter rebuilds the tracker from
    /// the last frame and box, since the tracker cannot be reconfigured.
    pub fn update_config(&mut self, new_config: AdaptiveConfig) -> Result<(), TrackError> {
        new_config.validate()?;

        let needs_rebuild = self
            .config
            .tracker
            .differs_structurally(&new_config.tracker);
        self.config = new_config;

        // a handle lost to a failed rebuild only comes back through init
        if !needs_rebuild || !self.state.is_tracking || self.tracker.is_none() {
            return Ok(());
        }

        let Some(frame) = self.last_frame.take() else {
            return Ok(());
        };

        let bbox = self.state.current_bbox;
        let result = self.rebuild(&frame, bbox, ReinitReason::ConfigChanged);
        self.last_frame = Some(frame);
        result
    }

    /// Swap in a new tracker instance seeded at `bbox`; history is kept.
    fn rebuild(
        &mut self,
        frame: &FrameOf<F>,
        bbox: Rect2d,
        reason: ReinitReason,
    ) -> Result<(), TrackError> {
        if self.config.auto_adjust_template_size {
            sizing::apply(&bbox, &mut self.config.tracker);
        }

        // the old instance is gone whether or not the new one comes up
        self.tracker = None;

        let tracker = self.build_tracker(frame, &bbox).inspect_err(|e| {
            warn!(%reason, error = %e, "Rebuild failed, tracker lost until next init");
        })?;
        self.tracker = Some(tracker);
        self.state.mark_reinitialized(reason);

        info!(
            %reason,
            frame = self.state.frame_count,
            rebuilds = self.state.reinit_count,
            template_size = self.config.tracker.template_size,
            number_of_scales = self.config.tracker.number_of_scales,
            "Tracker rebuilt"
        );
        Ok(())
    }

    fn build_tracker(
        &self,
        frame: &FrameOf<F>,
        bbox: &Rect2d,
    ) -> Result<F::Tracker, TrackError> {
        let mut tracker = self
            .factory
            .create(&self.config.tracker)
            .map_err(TrackError::CreationFailed)?;

        // backends work on whole pixels
        let seed = Rect2d::from(bbox.to_pixel_rect());
        tracker.init(frame, &seed).map_err(TrackError::InitFailed)?;

        Ok(tracker)
    }

    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    pub fn config(&self) -> &AdaptiveConfig {
        &self.config
    }

    /// Whether a live tracker instance exists
    pub fn has_tracker(&self) -> bool {
        self.tracker.is_some()
    }

    pub fn quality_score(&self) -> f64 {
        self.tracker.as_ref().map_or(0.0, |t| t.quality_score())
    }

    pub fn raw_quality(&self) -> f64 {
        self.tracker.as_ref().map_or(0.0, |t| t.raw_quality())
    }

    /// Without a tracker instance the target counts as lost
    pub fn is_target_lost(&self) -> bool {
        self.tracker.as_ref().is_none_or(|t| t.is_target_lost())
    }

    pub fn statistics(&self) -> TrackingStats {
        self.tracker
            .as_ref()
            .map(|t| t.statistics())
            .unwrap_or_default()
    }
}
