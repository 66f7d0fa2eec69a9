use std::time::Duration;

use bevy::prelude::*;
use overlay_core::prelude::{HandPredictor, TrackingProvider};

/// Loop-local state for the frame-rate-capped render loop.
pub struct RenderLoop {
    pub frame_interval: Timer,
}

impl RenderLoop {
    pub fn new(target_fps: f32) -> Self {
        Self {
            frame_interval: Timer::from_seconds(1.0 / target_fps, TimerMode::Repeating),
        }
    }
}

/// Loop-local state for the throttled detection loop.
pub struct DetectionLoop {
    /// Minimum spacing between predictor samples; the timer carries the
    /// last-sample timestamp implicitly.
    pub sample_interval: Timer,
    pub last_detected: bool,
}

impl DetectionLoop {
    pub fn new(interval: Duration) -> Self {
        Self {
            sample_interval: Timer::new(interval, TimerMode::Repeating),
            last_detected: false,
        }
    }
}

/// Owns the collaborator handles and the armed loops.
///
/// Single-writer discipline: the lifecycle controller mutates the handles,
/// each loop system mutates only its own loop state. `initialized == true`
/// implies all four handles are `Some`.
#[derive(Resource, Default)]
pub struct Session {
    pub tracking: Option<Box<dyn TrackingProvider + Send + Sync>>,
    pub predictor: Option<Box<dyn HandPredictor + Send + Sync>>,
    pub render_loop: Option<RenderLoop>,
    pub detection_loop: Option<DetectionLoop>,
    pub initialized: bool,
    /// Consecutive self-healing cycles since the last good sample.
    pub recovery_attempts: u32,
}

impl Session {
    /// Release everything. Safe to call repeatedly and from any partially
    /// constructed state; collaborator stop/dispose failures are logged and
    /// never propagated.
    pub fn teardown(&mut self) {
        self.render_loop = None;
        self.detection_loop = None;
        if let Some(mut tracking) = self.tracking.take() {
            if let Err(err) = tracking.stop() {
                warn!("cleanup: tracking provider stop failed: {err}");
            }
        }
        if let Some(mut predictor) = self.predictor.take() {
            if let Err(err) = predictor.dispose() {
                warn!("cleanup: predictor dispose failed: {err}");
            }
        }
        self.initialized = false;
    }

    pub fn is_torn_down(&self) -> bool {
        self.tracking.is_none()
            && self.predictor.is_none()
            && self.render_loop.is_none()
            && self.detection_loop.is_none()
            && !self.initialized
    }
}
