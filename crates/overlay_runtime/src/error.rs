use hand_inference::AcquisitionError;
use overlay_core::prelude::{PredictorError, TrackingError};
use thiserror::Error;

/// Failures surfaced by the coordination engine.
///
/// Sampling errors are recovered inside the detection loop; everything else
/// reaches the top-level initialization handler, which logs, clears the
/// loading state, shows the wrapped message, and forces a teardown.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A startup step outside the collaborator paths failed.
    #[error("initialization failed: {0}")]
    Initialization(String),
    #[error("tracking provider unavailable: {0}")]
    TrackingProvider(#[from] TrackingError),
    #[error(transparent)]
    ModelAcquisition(#[from] AcquisitionError),
    #[error("hand sampling failed: {0}")]
    Sampling(#[from] PredictorError),
}
