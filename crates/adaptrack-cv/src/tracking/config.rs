//! Tracker and supervision configuration

use crate::error::TrackError;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tolerance used when comparing floating point structural fields
const STRUCTURAL_EPSILON: f64 = 1e-6;

/// Parameters fixed at tracker creation time.
///
/// The underlying tracker cannot be reconfigured once built, so any change
/// to the structural fields means building a new instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerParams {
    pub use_hog: bool,
    pub use_color_names: bool,
    pub use_gray: bool,
    pub use_rgb: bool,
    pub use_channel_weights: bool,
    pub use_segmentation: bool,
    /// Template resolution (structural)
    pub template_size: f32,
    pub gsl_sigma: f32,
    pub hog_orientations: f32,
    pub hog_clip: f32,
    pub padding: f32,
    pub filter_lr: f32,
    pub weights_lr: f32,
    pub num_hog_channels_used: u32,
    pub admm_iterations: u32,
    pub histogram_bins: u32,
    pub histogram_lr: f32,
    pub background_ratio: u32,
    /// Number of scale hypotheses (structural)
    pub number_of_scales: u32,
    pub scale_sigma_factor: f32,
    /// Maximum area of the scale model (structural)
    pub scale_model_max_area: f32,
    pub scale_lr: f32,
    pub scale_step: f32,
    pub psr_threshold: f32,
}

pub const DEFAULT_TRACKER_PARAMS: TrackerParams = TrackerParams {
    use_hog: true,
    use_color_names: true,
    use_gray: true,
    use_rgb: false,
    use_channel_weights: true,
    use_segmentation: true,
    template_size: 200.0,
    gsl_sigma: 1.0,
    hog_orientations: 9.0,
    hog_clip: 0.2,
    padding: 3.0,
    filter_lr: 0.02,
    weights_lr: 0.02,
    num_hog_channels_used: 18,
    admm_iterations: 4,
    histogram_bins: 16,
    histogram_lr: 0.04,
    background_ratio: 2,
    number_of_scales: 33,
    scale_sigma_factor: 0.25,
    scale_model_max_area: 512.0,
    scale_lr: 0.025,
    scale_step: 1.02,
    psr_threshold: 0.035,
};

impl Default for TrackerParams {
    fn default() -> Self {
        DEFAULT_TRACKER_PARAMS
    }
}

impl TrackerParams {
    /// True when `other` can only be applied by rebuilding the tracker.
    pub fn differs_structurally(&self, other: &TrackerParams) -> bool {
        let float_differs =
            |a: f32, b: f32| (f64::from(a) - f64::from(b)).abs() > STRUCTURAL_EPSILON;

        float_differs(self.template_size, other.template_size)
            || self.number_of_scales != other.number_of_scales
            || float_differs(self.scale_model_max_area, other.scale_model_max_area)
    }
}

/// Supervision thresholds plus the parameters of the supervised tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveConfig {
    pub tracker: TrackerParams,
    /// Fractional area change versus history that forces a rebuild
    pub size_change_threshold: f64,
    /// Raw quality below which a frame counts as low quality
    pub quality_floor: f64,
    pub consecutive_low_quality_limit: u32,
    /// Frames that must pass after a rebuild before another is allowed
    pub reinit_cooldown_frames: u32,
    pub enable_size_adaptation: bool,
    pub enable_quality_monitoring: bool,
    pub auto_adjust_template_size: bool,
    pub auto_adjust_quality_threshold: bool,
}

pub const DEFAULT_ADAPTIVE_CONFIG: AdaptiveConfig = AdaptiveConfig {
    tracker: DEFAULT_TRACKER_PARAMS,
    size_change_threshold: 0.3,
    quality_floor: 0.02,
    consecutive_low_quality_limit: 5,
    reinit_cooldown_frames: 10,
    enable_size_adaptation: true,
    enable_quality_monitoring: true,
    auto_adjust_template_size: true,
    auto_adjust_quality_threshold: true,
};

impl Default for AdaptiveConfig {
    fn default() -> Self {
        DEFAULT_ADAPTIVE_CONFIG
    }
}

impl AdaptiveConfig {
    /// Fewer rebuilds: long cooldown, only large size jumps
    pub fn conservative() -> Self {
        Self {
            size_change_threshold: 0.5,
            consecutive_low_quality_limit: 10,
            reinit_cooldown_frames: 30,
            ..Default::default()
        }
    }

    /// Rebuild quickly on fast scale changes or short quality drops
    pub fn responsive() -> Self {
        Self {
            size_change_threshold: 0.2,
            consecutive_low_quality_limit: 3,
            reinit_cooldown_frames: 5,
            ..Default::default()
        }
    }

    /// Check thresholds before the configuration reaches a controller
    pub fn validate(&self) -> std::result::Result<(), TrackError> {
        let thresholds = [
            ("size_change_threshold", self.size_change_threshold),
            ("quality_floor", self.quality_floor),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(TrackError::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        let template_size = self.tracker.template_size;
        if !template_size.is_finite() || template_size <= 0.0 {
            return Err(TrackError::InvalidConfig(format!(
                "template_size must be positive, got {}",
                template_size
            )));
        }

        if self.tracker.number_of_scales == 0 {
            return Err(TrackError::InvalidConfig(
                "number_of_scales must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;

        let config: AdaptiveConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config: {:?}", path))?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constant() {
        let config = AdaptiveConfig::default();
        assert_eq!(config, DEFAULT_ADAPTIVE_CONFIG);
        assert_eq!(config.size_change_threshold, 0.3);
        assert_eq!(config.quality_floor, 0.02);
        assert_eq!(config.consecutive_low_quality_limit, 5);
        assert_eq!(config.reinit_cooldown_frames, 10);
        assert_eq!(config.tracker.template_size, 200.0);
        assert_eq!(config.tracker.number_of_scales, 33);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_structural_difference() {
        let base = TrackerParams::default();

        let mut monitoring_only = base.clone();
        monitoring_only.psr_threshold = 0.01;
        monitoring_only.filter_lr = 0.5;
        assert!(!base.differs_structurally(&monitoring_only));

        let mut tiny_drift = base.clone();
        tiny_drift.template_size += 1e-9;
        assert!(!base.differs_structurally(&tiny_drift));

        let mut template = base.clone();
        template.template_size = 250.0;
        assert!(base.differs_structurally(&template));

        let mut scales = base.clone();
        scales.number_of_scales = 25;
        assert!(base.differs_structurally(&scales));

        let mut max_area = base.clone();
        max_area.scale_model_max_area = 1024.0;
        assert!(base.differs_structurally(&max_area));
    }

    #[test]
    fn test_validate_rejects_negative_thresholds() {
        let config = AdaptiveConfig {
            size_change_threshold: -0.1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TrackError::InvalidConfig(_))));

        let config = AdaptiveConfig {
            quality_floor: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let mut config = AdaptiveConfig::default();
        config.tracker.number_of_scales = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "reinit_cooldown_frames": 3, "tracker": { "number_of_scales": 17 } }"#;
        let config: AdaptiveConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.reinit_cooldown_frames, 3);
        assert_eq!(config.tracker.number_of_scales, 17);
        assert_eq!(config.tracker.template_size, 200.0);
        assert_eq!(config.quality_floor, 0.02);
    }

    #[test]
    fn test_presets_are_valid() {
        for config in [AdaptiveConfig::conservative(), AdaptiveConfig::responsive()] {
            assert!(config.validate().is_ok());
        }
        assert!(
            AdaptiveConfig::responsive().reinit_cooldown_frames
                < AdaptiveConfig::conservative().reinit_cooldown_frames
        );
    }
}
