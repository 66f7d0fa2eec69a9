use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{PredictorConfig, TrackingConfig};
use crate::error::{PredictorError, TrackingError};

/// A camera frame handed from the tracking provider to the predictor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub id: u64,
    /// Capture timestamp (seconds).
    pub timestamp: f64,
    /// Raw RGBA8 data; `None` when the source exposes file-based frames.
    pub rgba: Option<Vec<u8>>,
    /// Image dimensions (width, height).
    pub size: (u32, u32),
    /// Optional on-disk location for lazy loading.
    pub path: Option<PathBuf>,
}

/// One hand estimate returned by the predictor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandEstimate {
    /// Presence confidence in 0..1.
    pub score: f32,
    /// Keypoint positions in pixel space, `[x, y, z]` per landmark. May be
    /// empty for predictors that only report presence.
    pub landmarks: Vec<[f32; 3]>,
}

/// Per-call sampling options.
#[derive(Debug, Clone, Copy)]
pub struct EstimateOptions {
    /// Mirror the frame before inference (selfie-style camera feeds).
    pub flip_horizontal: bool,
    pub max_hands: u32,
}

impl Default for EstimateOptions {
    fn default() -> Self {
        Self {
            flip_horizontal: true,
            max_hands: 1,
        }
    }
}

/// A coordinate frame attached to a recognized image target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub index: usize,
}

/// Target visibility change reported by the tracking provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingEvent {
    TargetFound { anchor: usize },
    TargetLost { anchor: usize },
}

/// Recognizes a planar image target in a camera feed and owns the camera
/// frames plus the composited overlay scene.
pub trait TrackingProvider {
    fn start(&mut self) -> Result<(), TrackingError>;
    fn stop(&mut self) -> Result<(), TrackingError>;
    /// Latest camera frame, or `None` while the video source is down.
    fn video_frame(&mut self) -> Option<Frame>;
    /// Register an anchor for the target at `index`.
    fn add_anchor(&mut self, index: usize) -> Result<Anchor, TrackingError>;
    /// Drain target found/lost events observed since the last call.
    fn poll_events(&mut self) -> Vec<TrackingEvent>;
    /// Composite one frame of the overlay scene.
    fn render_scene(&mut self) -> Result<(), TrackingError>;
}

/// Builds a tracking provider from a compiled target descriptor.
pub trait TrackingFactory {
    fn create(
        &self,
        config: &TrackingConfig,
    ) -> Result<Box<dyn TrackingProvider + Send + Sync>, TrackingError>;
}

/// Estimates hand presence from a video frame.
pub trait HandPredictor {
    fn estimate_hands(
        &mut self,
        frame: &Frame,
        options: &EstimateOptions,
    ) -> Result<Vec<HandEstimate>, PredictorError>;

    /// Release model resources. No-op by default for stateless predictors.
    fn dispose(&mut self) -> Result<(), PredictorError> {
        Ok(())
    }
}

/// Loads predictor handles. `prepare` readies the inference backend once per
/// process and is separate from `load` so the loader can be retried alone.
pub trait PredictorFactory {
    fn prepare(&self) -> Result<(), PredictorError> {
        Ok(())
    }

    fn load(
        &self,
        config: &PredictorConfig,
    ) -> Result<Box<dyn HandPredictor + Send + Sync>, PredictorError>;
}
