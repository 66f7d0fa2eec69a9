//! Synthetic stand-ins for the camera/tracking backend. The feed alternates
//! between dark "empty room" frames and frames dominated by a bright blob
//! that the pixel-statistics predictor reads as a hand.

use std::collections::VecDeque;

use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use overlay_core::prelude::{
    Anchor, Frame, TrackingConfig, TrackingError, TrackingEvent, TrackingFactory, TrackingProvider,
};

const FRAME_SIZE: u32 = 64;
/// Frames of warmup before the feed "recognizes" the target.
const TARGET_FOUND_FRAME: u64 = 30;
/// The synthetic hand waves in and out on this cycle.
const HAND_PERIOD: u64 = 240;

pub struct SyntheticTrackingFactory {
    pub seed: u64,
}

impl TrackingFactory for SyntheticTrackingFactory {
    fn create(
        &self,
        config: &TrackingConfig,
    ) -> Result<Box<dyn TrackingProvider + Send + Sync>, TrackingError> {
        if config.target_descriptor.as_os_str().is_empty() {
            return Err(TrackingError::InvalidDescriptor {
                path: config.target_descriptor.display().to_string(),
                reason: "empty descriptor path".into(),
            });
        }
        Ok(Box::new(SyntheticTracking {
            rng: StdRng::seed_from_u64(self.seed),
            frame_id: 0,
            running: false,
            events: VecDeque::new(),
        }))
    }
}

struct SyntheticTracking {
    rng: StdRng,
    frame_id: u64,
    running: bool,
    events: VecDeque<TrackingEvent>,
}

impl SyntheticTracking {
    fn hand_in_view(frame_id: u64) -> bool {
        frame_id % HAND_PERIOD < HAND_PERIOD / 2
    }

    fn synthesize(&mut self) -> Frame {
        let mut img = RgbaImage::from_pixel(FRAME_SIZE, FRAME_SIZE, Rgba([24, 26, 30, 255]));
        if Self::hand_in_view(self.frame_id) {
            let cx = 32 + self.rng.gen_range(-6i32..=6);
            let cy = 32 + self.rng.gen_range(-6i32..=6);
            for (x, y, px) in img.enumerate_pixels_mut() {
                let dx = x as i32 - cx;
                let dy = y as i32 - cy;
                if dx * dx + dy * dy <= 144 {
                    let v = 220 + self.rng.gen_range(0u8..=30);
                    *px = Rgba([v, v.saturating_sub(20), v.saturating_sub(35), 255]);
                }
            }
        }
        Frame {
            id: self.frame_id,
            timestamp: self.frame_id as f64 / 60.0,
            rgba: Some(img.into_raw()),
            size: (FRAME_SIZE, FRAME_SIZE),
            path: None,
        }
    }
}

impl TrackingProvider for SyntheticTracking {
    fn start(&mut self) -> Result<(), TrackingError> {
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), TrackingError> {
        self.running = false;
        Ok(())
    }

    fn video_frame(&mut self) -> Option<Frame> {
        if !self.running {
            return None;
        }
        self.frame_id += 1;
        if self.frame_id == TARGET_FOUND_FRAME {
            self.events.push_back(TrackingEvent::TargetFound { anchor: 0 });
        }
        Some(self.synthesize())
    }

    fn add_anchor(&mut self, index: usize) -> Result<Anchor, TrackingError> {
        Ok(Anchor { index })
    }

    fn poll_events(&mut self) -> Vec<TrackingEvent> {
        self.events.drain(..).collect()
    }

    fn render_scene(&mut self) -> Result<(), TrackingError> {
        // The overlay scene is drawn by Bevy itself; nothing to composite.
        Ok(())
    }
}
