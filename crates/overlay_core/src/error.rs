use thiserror::Error;

/// Failures raised by a tracking provider or its factory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingError {
    #[error("tracking backend: {0}")]
    Backend(String),
    #[error("target descriptor {path}: {reason}")]
    InvalidDescriptor { path: String, reason: String },
    #[error("provider already stopped")]
    Stopped,
}

/// Failures raised by a hand predictor or its loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictorError {
    #[error("model load failed: {0}")]
    Load(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("video source unavailable")]
    SourceUnavailable,
    #[error("predictor disposed")]
    Disposed,
}
