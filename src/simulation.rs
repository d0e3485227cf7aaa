//! Synthetic scene and a threshold-based blob tracker backend

use adaptrack_cv::{
    traits::{TrackerFactory, VisualTracker},
    Rect2d, TrackerParams, TrackingStats,
};
use anyhow::{bail, Result};
use image::{GrayImage, Luma};
use rand::{rngs::StdRng, Rng, SeedableRng};

const BACKGROUND_LEVEL: u8 = 30;
const TARGET_LEVEL: u8 = 200;
/// Minimum mean intensity gap between target and surroundings at init
const MIN_CONTRAST: f64 = 40.0;

/// A bright rectangle drifting and growing over a noisy background
pub struct SyntheticScene {
    width: u32,
    height: u32,
    target: Rect2d,
    velocity: (f64, f64),
    growth: f64,
    noise: u8,
    occluded: bool,
    rng: StdRng,
}

impl SyntheticScene {
    pub fn new(width: u32, height: u32, target: Rect2d, seed: u64) -> Self {
        Self {
            width,
            height,
            target,
            velocity: (0.0, 0.0),
            growth: 1.0,
            noise: 20,
            occluded: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_motion(mut self, vx: f64, vy: f64) -> Self {
        self.velocity = (vx, vy);
        self
    }

    /// Per-frame scale factor applied to both sides
    pub fn with_growth(mut self, growth: f64) -> Self {
        self.growth = growth;
        self
    }

    pub fn target(&self) -> Rect2d {
        self.target
    }

    /// Hide the target (drawn as background) until called again with false
    pub fn set_occluded(&mut self, occluded: bool) {
        self.occluded = occluded;
    }

    /// Sudden scale change around the target center, like a camera zoom
    pub fn zoom(&mut self, factor: f64) {
        self.target = self.target.scaled(factor);
        self.keep_inside();
    }

    pub fn next_frame(&mut self) -> GrayImage {
        self.advance();
        self.render()
    }

    pub fn render(&mut self) -> GrayImage {
        let target = self.target;
        let occluded = self.occluded;
        let noise = self.noise;
        let rng = &mut self.rng;

        GrayImage::from_fn(self.width, self.height, |x, y| {
            let (fx, fy) = (x as f64, y as f64);
            let inside = fx >= target.x
                && fx < target.x + target.width
                && fy >= target.y
                && fy < target.y + target.height;

            let base = if inside && !occluded {
                TARGET_LEVEL
            } else {
                BACKGROUND_LEVEL
            };
            Luma([base.saturating_add(rng.gen_range(0..=noise))])
        })
    }

    fn advance(&mut self) {
        let max_width = self.width as f64 / 2.0;
        let max_height = self.height as f64 / 2.0;
        if self.target.width * self.growth < max_width
            && self.target.height * self.growth < max_height
        {
            self.target = self.target.scaled(self.growth);
        }

        self.target.x += self.velocity.0;
        self.target.y += self.velocity.1;

        if self.target.x < 0.0 || self.target.x + self.target.width > self.width as f64 {
            self.velocity.0 = -self.velocity.0;
        }
        if self.target.y < 0.0 || self.target.y + self.target.height > self.height as f64 {
            self.velocity.1 = -self.velocity.1;
        }
        self.keep_inside();
    }

    fn keep_inside(&mut self) {
        let width = self.width as f64;
        let height = self.height as f64;
        self.target.width = self.target.width.min(width);
        self.target.height = self.target.height.min(height);
        self.target.x = self.target.x.clamp(0.0, width - self.target.width);
        self.target.y = self.target.y.clamp(0.0, height - self.target.height);
    }
}

/// Locates the brightest blob inside a padded window around the last box.
///
/// Quality is the fill ratio of the found box weighted by contrast.
pub struct BlobTracker {
    padding: f64,
    lost_threshold: f64,
    bbox: Rect2d,
    threshold: f64,
    contrast: f64,
    raw_quality: f64,
    qualities: Vec<f64>,
    total_frames: u64,
}

impl BlobTracker {
    pub fn new(params: &TrackerParams) -> Self {
        Self {
            padding: params.padding as f64,
            lost_threshold: params.psr_threshold as f64,
            bbox: Rect2d::default(),
            threshold: 0.0,
            contrast: 0.0,
            raw_quality: 0.0,
            qualities: Vec::new(),
            total_frames: 0,
        }
    }

    fn window(&self, frame: &GrayImage) -> (u32, u32, u32, u32) {
        let window = self.bbox.scaled(1.0 + self.padding);
        let x0 = window.x.max(0.0) as u32;
        let y0 = window.y.max(0.0) as u32;
        let x1 = ((window.x + window.width).ceil().max(0.0) as u32).min(frame.width());
        let y1 = ((window.y + window.height).ceil().max(0.0) as u32).min(frame.height());
        (x0, y0, x1, y1)
    }
}

fn mean_intensity(frame: &GrayImage, rect: &Rect2d) -> Option<f64> {
    let x0 = rect.x.max(0.0) as u32;
    let y0 = rect.y.max(0.0) as u32;
    let x1 = ((rect.x + rect.width).max(0.0) as u32).min(frame.width());
    let y1 = ((rect.y + rect.height).max(0.0) as u32).min(frame.height());

    let mut total = 0.0;
    let mut count = 0u64;
    for y in y0..y1 {
        for x in x0..x1 {
            total += frame.get_pixel(x, y)[0] as f64;
            count += 1;
        }
    }

    (count > 0).then(|| total / count as f64)
}

impl VisualTracker for BlobTracker {
    type Frame = GrayImage;

    fn init(&mut self, frame: &GrayImage, bbox: &Rect2d) -> Result<()> {
        if bbox.is_empty() {
            bail!("empty initial box");
        }

        let Some(inside) = mean_intensity(frame, bbox) else {
            bail!("initial box lies outside the frame");
        };
        let surround = mean_intensity(frame, &bbox.scaled(1.0 + self.padding)).unwrap_or(inside);
        if inside - surround < MIN_CONTRAST {
            bail!(
                "target not distinguishable from background (contrast {:.1})",
                inside - surround
            );
        }

        self.bbox = *bbox;
        self.contrast = inside - surround;
        self.threshold = surround + self.contrast / 2.0;
        Ok(())
    }

    fn update(&mut self, frame: &GrayImage) -> Result<Rect2d> {
        self.total_frames += 1;
        let (x0, y0, x1, y1) = self.window(frame);

        let mut count = 0u64;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (u32::MAX, u32::MAX, 0, 0);
        for y in y0..y1 {
            for x in x0..x1 {
                if frame.get_pixel(x, y)[0] as f64 > self.threshold {
                    count += 1;
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }

        if count == 0 {
            self.raw_quality = 0.0;
            bail!("target not found in search window");
        }

        let found = Rect2d::new(
            min_x as f64,
            min_y as f64,
            (max_x - min_x + 1) as f64,
            (max_y - min_y + 1) as f64,
        );
        let fill = count as f64 / found.area();

        self.bbox = found;
        self.raw_quality = fill * (self.contrast / 255.0);
        self.qualities.push(self.raw_quality);
        Ok(found)
    }

    fn raw_quality(&self) -> f64 {
        self.raw_quality
    }

    fn quality_score(&self) -> f64 {
        self.raw_quality.clamp(0.0, 1.0)
    }

    fn is_target_lost(&self) -> bool {
        self.raw_quality < self.lost_threshold
    }

    fn statistics(&self) -> TrackingStats {
        TrackingStats::from_qualities(
            self.raw_quality,
            self.qualities.iter().copied(),
            self.total_frames,
        )
    }
}

/// Builds [`BlobTracker`] instances
pub struct BlobTrackerFactory;

impl TrackerFactory for BlobTrackerFactory {
    type Tracker = BlobTracker;

    fn create(&self, params: &TrackerParams) -> Result<BlobTracker> {
        if params.padding < 0.0 {
            bail!("padding must be non-negative, got {}", params.padding);
        }
        Ok(BlobTracker::new(params))
    }
}
