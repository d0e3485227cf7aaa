//! Tracking statistics reported by tracker instances

use crate::Result;
use adaptrack_core::Summary;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Aggregate quality and success counters of one tracker instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingStats {
    pub current_quality: f64,
    pub avg_quality: f64,
    pub min_quality: f64,
    pub max_quality: f64,
    pub successful_frames: u64,
    pub total_frames: u64,
    pub success_rate: f64,
}

impl TrackingStats {
    /// Build statistics from the qualities of successful frames
    pub fn from_qualities<I: IntoIterator<Item = f64>>(
        current_quality: f64,
        qualities: I,
        total_frames: u64,
    ) -> Self {
        let summary = Summary::from_values(qualities);
        let successful_frames = summary.count as u64;
        let success_rate = if total_frames == 0 {
            0.0
        } else {
            successful_frames as f64 / total_frames as f64
        };

        Self {
            current_quality,
            avg_quality: summary.mean,
            min_quality: summary.min,
            max_quality: summary.max,
            successful_frames,
            total_frames,
            success_rate,
        }
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize tracking statistics")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_qualities() {
        let stats = TrackingStats::from_qualities(0.3, [0.2, 0.4, 0.3], 4);

        assert_eq!(stats.successful_frames, 3);
        assert_eq!(stats.total_frames, 4);
        assert_eq!(stats.success_rate, 0.75);
        assert_eq!(stats.min_quality, 0.2);
        assert_eq!(stats.max_quality, 0.4);
        assert!((stats.avg_quality - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_no_frames() {
        let stats = TrackingStats::from_qualities(0.0, std::iter::empty(), 0);
        assert_eq!(stats, TrackingStats::default());
    }

    #[test]
    fn test_json_export() {
        let json = TrackingStats::default().to_json().unwrap();
        assert!(json.contains("\"success_rate\""));
    }
}
