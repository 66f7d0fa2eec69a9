use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Model variant requested from the predictor backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelComplexity {
    Lite,
    Full,
}

/// Configuration handed to `PredictorFactory::load`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    pub max_hands: u32,
    pub complexity: ModelComplexity,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            max_hands: 1,
            complexity: ModelComplexity::Lite,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

/// Configuration handed to `TrackingFactory::create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Compiled planar-target descriptor consumed by the tracking backend.
    /// The format is owned by that backend; opaque here.
    pub target_descriptor: PathBuf,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            target_descriptor: PathBuf::from("assets/marker.tgt"),
        }
    }
}
