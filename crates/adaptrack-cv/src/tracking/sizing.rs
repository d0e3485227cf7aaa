//! Tracker configuration derived from target size
//!
//! Large targets get a coarser template and fewer scale hypotheses so the
//! per-frame cost stays bounded; small targets keep a finer template.

use super::config::{DEFAULT_TRACKER_PARAMS, TrackerParams};
use crate::bbox::Rect2d;
use serde::{Deserialize, Serialize};

/// Upper area bound (exclusive) for small targets, about 100x100
pub const SMALL_TARGET_AREA: f64 = 10_000.0;
/// Upper area bound (exclusive) for medium targets, about 200x200
pub const MEDIUM_TARGET_AREA: f64 = 40_000.0;
/// Targets strictly larger than this search fewer scales
pub const REDUCED_SCALES_AREA: f64 = 50_000.0;

pub const REDUCED_NUMBER_OF_SCALES: u32 = 25;

/// Size class of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetClass {
    Small,
    Medium,
    Large,
}

impl TargetClass {
    pub fn from_area(area: f64) -> Self {
        if area < SMALL_TARGET_AREA {
            TargetClass::Small
        } else if area < MEDIUM_TARGET_AREA {
            TargetClass::Medium
        } else {
            TargetClass::Large
        }
    }

    pub fn template_size(&self) -> f32 {
        match self {
            TargetClass::Small => 150.0,
            TargetClass::Medium => 200.0,
            TargetClass::Large => 250.0,
        }
    }
}

/// Configuration fragment recommended for a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRecommendation {
    pub class: TargetClass,
    pub template_size: f32,
    pub number_of_scales: u32,
}

pub fn number_of_scales_for_area(area: f64) -> u32 {
    if area > REDUCED_SCALES_AREA {
        REDUCED_NUMBER_OF_SCALES
    } else {
        DEFAULT_TRACKER_PARAMS.number_of_scales
    }
}

pub fn recommend_for_area(area: f64) -> SizeRecommendation {
    let class = TargetClass::from_area(area);
    SizeRecommendation {
        class,
        template_size: class.template_size(),
        number_of_scales: number_of_scales_for_area(area),
    }
}

/// Recommend template resolution and scale count for a bounding box
pub fn recommend(bbox: &Rect2d) -> SizeRecommendation {
    recommend_for_area(bbox.area())
}

/// Write the recommendation for `bbox` into `params`
pub fn apply(bbox: &Rect2d, params: &mut TrackerParams) -> SizeRecommendation {
    let recommendation = recommend(bbox);
    params.template_size = recommendation.template_size;
    params.number_of_scales = recommendation.number_of_scales;
    recommendation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_size_boundaries() {
        assert_eq!(recommend_for_area(0.0).template_size, 150.0);
        assert_eq!(recommend_for_area(9_999.9).template_size, 150.0);
        assert_eq!(recommend_for_area(10_000.0).template_size, 200.0);
        assert_eq!(recommend_for_area(39_999.0).template_size, 200.0);
        assert_eq!(recommend_for_area(40_000.0).template_size, 250.0);
        assert_eq!(recommend_for_area(1e7).class, TargetClass::Large);
    }

    #[test]
    fn test_scale_count_boundaries() {
        assert_eq!(recommend_for_area(40_000.0).number_of_scales, 33);
        assert_eq!(recommend_for_area(50_000.0).number_of_scales, 33);
        assert_eq!(recommend_for_area(50_000.5).number_of_scales, 25);
    }

    #[test]
    fn test_apply_only_touches_size_fields() {
        let mut params = TrackerParams::default();
        let bbox = Rect2d::new(0.0, 0.0, 300.0, 200.0);

        let rec = apply(&bbox, &mut params);

        assert_eq!(rec.class, TargetClass::Large);
        assert_eq!(params.template_size, 250.0);
        assert_eq!(params.number_of_scales, 25);
        assert_eq!(params.scale_model_max_area, DEFAULT_TRACKER_PARAMS.scale_model_max_area);
        assert_eq!(params.psr_threshold, DEFAULT_TRACKER_PARAMS.psr_threshold);
    }

    #[test]
    fn test_small_box() {
        let rec = recommend(&Rect2d::new(5.0, 5.0, 50.0, 40.0));
        assert_eq!(rec.class, TargetClass::Small);
        assert_eq!(rec.template_size, 150.0);
        assert_eq!(rec.number_of_scales, 33);
    }
}
