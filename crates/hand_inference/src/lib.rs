//! hand_inference: predictor acquisition with bounded, fixed-delay retry,
//! plus a pixel-statistics predictor used when no real model is wired in.

pub mod retry;

use std::time::Duration;

use overlay_core::prelude::{
    EstimateOptions, Frame, HandEstimate, HandPredictor, PredictorConfig, PredictorError,
    PredictorFactory,
};
use retry::{run_fixed_with, RetryPolicy};

/// The acquisition retry cap was reached without obtaining a usable handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("model acquisition failed after {attempts} attempts: {last_error}")]
pub struct AcquisitionError {
    pub attempts: u32,
    pub last_error: PredictorError,
}

/// Acquire a predictor handle, retrying on a fixed schedule. A factory that
/// returns without a usable handle is treated the same as one that errors.
/// On exhaustion the caller must treat the failure as fatal to startup.
pub fn acquire_predictor(
    factory: &dyn PredictorFactory,
    config: &PredictorConfig,
    policy: RetryPolicy,
) -> Result<Box<dyn HandPredictor + Send + Sync>, AcquisitionError> {
    acquire_predictor_with(factory, config, policy, std::thread::sleep)
}

/// [`acquire_predictor`] with an injectable sleep, for deterministic tests.
pub fn acquire_predictor_with(
    factory: &dyn PredictorFactory,
    config: &PredictorConfig,
    policy: RetryPolicy,
    sleep: impl FnMut(Duration),
) -> Result<Box<dyn HandPredictor + Send + Sync>, AcquisitionError> {
    run_fixed_with(
        policy,
        |attempt| {
            tracing::debug!("loading hand model, attempt {attempt}");
            factory.load(config)
        },
        sleep,
    )
    .map_err(|err| AcquisitionError {
        attempts: err.attempts,
        last_error: err.last_error,
    })
}

/// Presence predictor driven by bright-pixel statistics. A hand close to the
/// camera dominates the frame with bright skin tones, so the fraction of
/// bright pixels is a workable stand-in score when no trained model is
/// available.
pub struct HeuristicHandPredictor {
    luminance_floor: f32,
    disposed: bool,
}

impl HeuristicHandPredictor {
    pub fn new() -> Self {
        Self {
            luminance_floor: 170.0,
            disposed: false,
        }
    }
}

impl Default for HeuristicHandPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl HandPredictor for HeuristicHandPredictor {
    fn estimate_hands(
        &mut self,
        frame: &Frame,
        options: &EstimateOptions,
    ) -> Result<Vec<HandEstimate>, PredictorError> {
        if self.disposed {
            return Err(PredictorError::Disposed);
        }
        let Some(rgba) = frame.rgba.as_deref() else {
            return Err(PredictorError::SourceUnavailable);
        };
        let mut bright = 0usize;
        let mut total = 0usize;
        for px in rgba.chunks_exact(4) {
            let luminance =
                0.2126 * px[0] as f32 + 0.7152 * px[1] as f32 + 0.0722 * px[2] as f32;
            if luminance >= self.luminance_floor {
                bright += 1;
            }
            total += 1;
        }
        if total == 0 {
            return Err(PredictorError::Inference("empty frame".into()));
        }
        let ratio = bright as f32 / total as f32;
        let score = (ratio * 4.0).min(1.0);
        let mut hands = Vec::new();
        if ratio > 0.02 {
            hands.push(HandEstimate {
                score,
                landmarks: Vec::new(),
            });
        }
        hands.truncate(options.max_hands as usize);
        Ok(hands)
    }

    fn dispose(&mut self) -> Result<(), PredictorError> {
        self.disposed = true;
        Ok(())
    }
}

/// Factory for [`HeuristicHandPredictor`]. Always succeeds; useful as the
/// demo backend and as the non-flaky end of acquisition tests.
pub struct HeuristicPredictorFactory;

impl PredictorFactory for HeuristicPredictorFactory {
    fn load(
        &self,
        _config: &PredictorConfig,
    ) -> Result<Box<dyn HandPredictor + Send + Sync>, PredictorError> {
        Ok(Box::new(HeuristicHandPredictor::new()))
    }
}
