use adaptrack_cv::{AdaptiveConfig, AdaptiveTracker, Rect2d, TrackError};
use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod simulation;

use simulation::{BlobTrackerFactory, SyntheticScene};

const FRAMES: u32 = 150;
const ZOOM_FRAME: u32 = 60;
const OCCLUSION_FRAMES: std::ops::Range<u32> = 100..103;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config_path = format!("{}/assets/config.json", env!("CARGO_MANIFEST_DIR"));
    let config = load_config(&config_path)?;

    let mut scene = SyntheticScene::new(640, 480, Rect2d::new(100.0, 100.0, 80.0, 60.0), 7)
        .with_motion(2.0, 1.0)
        .with_growth(1.003);

    let mut tracker = AdaptiveTracker::try_new(BlobTrackerFactory, config)?;
    let first = scene.render();
    tracker.init(&first, scene.target())?;

    let mut failures = 0u32;
    for frame_index in 1..=FRAMES {
        if frame_index == ZOOM_FRAME {
            info!(frame = frame_index, "Zooming scene by 1.6x");
            scene.zoom(1.6);
        }
        scene.set_occluded(OCCLUSION_FRAMES.contains(&frame_index));

        let frame = scene.next_frame();
        match tracker.update(&frame) {
            Ok(bbox) => {
                let iou = bbox.iou(&scene.target());
                if frame_index % 25 == 0 {
                    info!(
                        frame = frame_index,
                        iou,
                        score = tracker.quality_score(),
                        "Tracking"
                    );
                }
            }
            Err(e @ TrackError::UpdateFailed(_)) => {
                failures += 1;
                warn!(frame = frame_index, error = %e, "Frame lost");
            }
            Err(e) => {
                warn!(frame = frame_index, error = %e, "Tracking stopped");
                break;
            }
        }
    }

    let state = tracker.state();
    println!("Tracking completed:");
    println!("  - Frames: {}", state.frame_count);
    println!("  - Failed frames: {}", failures);
    println!("  - Rebuilds: {}", state.reinit_count);
    if let Some(reason) = state.last_reinit {
        println!("  - Last rebuild: {}", reason);
    }
    let recent = state.history.quality_summary();
    println!(
        "  - Quality over last {} frames: avg {:.3}, min {:.3}, max {:.3}",
        recent.count, recent.mean, recent.min, recent.max
    );
    println!("Statistics of the live tracker instance:");
    println!("{}", tracker.statistics().to_json()?);

    Ok(())
}

fn load_config(path: &str) -> Result<AdaptiveConfig> {
    if Path::new(path).exists() {
        info!(path, "Loading configuration");
        AdaptiveConfig::from_json_file(path)
    } else {
        info!(path, "No configuration file, using defaults");
        Ok(AdaptiveConfig::default())
    }
}
