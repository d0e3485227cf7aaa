//! Running summaries over scalar observations

use serde::{Deserialize, Serialize};

/// Count, mean and extrema of a sequence of values.
///
/// An empty sequence summarises to all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut count = 0usize;
        let mut total = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in values {
            count += 1;
            total += value;
            min = min.min(value);
            max = max.max(value);
        }

        if count == 0 {
            return Self::default();
        }

        Self {
            count,
            mean: total / count as f64,
            min,
            max,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl FromIterator<f64> for Summary {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self::from_values(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary_is_zero() {
        let summary = Summary::from_values(std::iter::empty());
        assert!(summary.is_empty());
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.mean, 0.0);
    }

    #[test]
    fn test_single_value() {
        let summary: Summary = [0.42].into_iter().collect();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.mean, 0.42);
        assert_eq!(summary.min, 0.42);
        assert_eq!(summary.max, 0.42);
    }

    #[test]
    fn test_mean_and_extrema() {
        let summary = Summary::from_values([1.0, 4.0, 2.5, 0.5]);
        assert_eq!(summary.count, 4);
        assert!((summary.mean - 2.0).abs() < 1e-12);
        assert_eq!(summary.min, 0.5);
        assert_eq!(summary.max, 4.0);
    }
}
