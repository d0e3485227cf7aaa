//! Bounding box and size primitives
//!
//! Floating-point rectangles as reported by single-object trackers.

use serde::{Deserialize, Serialize};

/// Width and height of a target
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size2d {
    pub width: f64,
    pub height: f64,
}

impl Size2d {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Axis-aligned bounding box with sub-pixel precision
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect2d {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Integer rectangle, truncated from a [`Rect2d`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect2d {
    /// Create a new bounding box
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Calculate area of the bounding box
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn size(&self) -> Size2d {
        Size2d::new(self.width, self.height)
    }

    /// Calculate center point
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when the box covers no area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Calculate intersection over union (IoU) with another box
    pub fn iou(&self, other: &Rect2d) -> f64 {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);

        if x2 <= x1 || y2 <= y1 {
            return 0.0;
        }

        let intersection = (x2 - x1) * (y2 - y1);
        let union = self.area() + other.area() - intersection;

        intersection / union
    }

    /// Grow the box around its center by `factor` on each axis
    pub fn scaled(&self, factor: f64) -> Self {
        let (cx, cy) = self.center();
        let width = self.width * factor;
        let height = self.height * factor;
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    /// Truncate to an integer rectangle
    pub fn to_pixel_rect(&self) -> PixelRect {
        PixelRect {
            x: self.x as i32,
            y: self.y as i32,
            width: self.width as i32,
            height: self.height as i32,
        }
    }
}

impl From<PixelRect> for Rect2d {
    fn from(rect: PixelRect) -> Self {
        Self::new(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_area_and_size() {
        let rect = Rect2d::new(100.0, 100.0, 200.0, 150.0);
        assert_eq!(rect.area(), 30_000.0);
        assert_eq!(rect.size(), Size2d::new(200.0, 150.0));
        assert_eq!(rect.center(), (200.0, 175.0));
    }

    #[test]
    fn test_rect_iou() {
        let box1 = Rect2d::new(0.0, 0.0, 10.0, 10.0);
        let box2 = Rect2d::new(5.0, 5.0, 10.0, 10.0);

        let iou = box1.iou(&box2);
        assert!(iou > 0.0 && iou < 1.0);
        assert_eq!(box1.iou(&Rect2d::new(50.0, 50.0, 5.0, 5.0)), 0.0);
    }

    #[test]
    fn test_pixel_rect_truncates() {
        let rect = Rect2d::new(10.7, 3.2, 20.9, 8.5);
        assert_eq!(
            rect.to_pixel_rect(),
            PixelRect {
                x: 10,
                y: 3,
                width: 20,
                height: 8
            }
        );
    }

    #[test]
    fn test_scaled_keeps_center() {
        let rect = Rect2d::new(10.0, 10.0, 20.0, 10.0);
        let grown = rect.scaled(2.0);
        assert_eq!(grown.center(), rect.center());
        assert_eq!(grown.area(), rect.area() * 4.0);
    }
}
