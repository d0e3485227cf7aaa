//! Rolling window of recent quality scores and target sizes

use crate::bbox::Size2d;
use adaptrack_core::{RingBuffer, Summary};

/// Number of observations kept in the history
pub const HISTORY_SIZE: usize = 10;

/// Recent observations of the tracked object.
///
/// Describes the object rather than the tracker instance, so it survives
/// rebuilds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingHistory {
    quality: RingBuffer<f64, HISTORY_SIZE>,
    sizes: RingBuffer<Size2d, HISTORY_SIZE>,
}

impl TrackingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation, evicting the oldest when full
    pub fn record(&mut self, quality: f64, size: Size2d) {
        self.quality.push(quality);
        self.sizes.push(size);
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        HISTORY_SIZE
    }

    /// Mean quality, 0.0 when empty
    pub fn average_quality(&self) -> f64 {
        Summary::from_values(self.quality.iter()).mean
    }

    /// Per-axis mean size, zero when empty
    pub fn average_size(&self) -> Size2d {
        if self.sizes.is_empty() {
            return Size2d::default();
        }

        let width = Summary::from_values(self.sizes.iter().map(|s| s.width)).mean;
        let height = Summary::from_values(self.sizes.iter().map(|s| s.height)).mean;
        Size2d::new(width, height)
    }

    /// Area of the average size
    pub fn average_area(&self) -> f64 {
        self.average_size().area()
    }

    pub fn quality_summary(&self) -> Summary {
        Summary::from_values(self.quality.iter())
    }

    /// Quality scores, oldest first
    pub fn qualities(&self) -> impl Iterator<Item = f64> + '_ {
        self.quality.iter()
    }

    /// Target sizes, oldest first
    pub fn sizes(&self) -> impl Iterator<Item = Size2d> + '_ {
        self.sizes.iter()
    }
}
