use bevy::prelude::*;
use overlay_core::prelude::{EstimateOptions, PredictorError};

use crate::error::RuntimeError;
use crate::lifecycle::{initialize, RuntimeConfig, RuntimeDeps};
use crate::session::{DetectionLoop, Session};
use crate::status::StatusSurface;

pub const STATUS_HAND_DETECTED: &str = "Hand detected!";
pub const STATUS_SHOW_HAND: &str = "Show your hand to the camera";

/// Which of the two overlay indicators an entity is.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indicator {
    /// Shown while no hand is in view.
    Idle,
    /// Shown while a hand is in view.
    HandPresent,
}

/// Throttled detection loop. Ticks every frame, samples the predictor at
/// most once per `detection_interval`, and flips indicator visibility only
/// on edges of the detected state. A failed sample never kills the loop; if
/// the session is not marked initialized it additionally runs one bounded
/// self-healing cycle.
pub fn run_detection_loop(
    time: Res<Time>,
    mut session: ResMut<Session>,
    deps: Res<RuntimeDeps>,
    config: Res<RuntimeConfig>,
    mut status: ResMut<StatusSurface>,
    mut indicators: Query<(&mut Visibility, &Indicator)>,
) {
    let Some(detection) = session.detection_loop.as_mut() else {
        return;
    };
    detection.sample_interval.tick(time.delta());
    if !detection.sample_interval.is_finished() {
        return;
    }

    match sample_hands(&mut session, &config) {
        Ok(detected) => {
            session.recovery_attempts = 0;
            let Some(detection) = session.detection_loop.as_mut() else {
                return;
            };
            if detected != detection.last_detected {
                detection.last_detected = detected;
                apply_indicator_visibility(detected, &mut indicators);
                status.update_status(if detected {
                    STATUS_HAND_DETECTED
                } else {
                    STATUS_SHOW_HAND
                });
            }
        }
        Err(err) => {
            warn!("detection sample dropped: {err}");
            if !session.initialized {
                recover(&mut session, &deps, &config, &mut status);
            }
        }
    }
}

/// One predictor sample. A missing predictor, provider, or video frame is an
/// error case, not a silent skip.
fn sample_hands(session: &mut Session, config: &RuntimeConfig) -> Result<bool, RuntimeError> {
    let (Some(tracking), Some(predictor)) =
        (session.tracking.as_mut(), session.predictor.as_mut())
    else {
        return Err(PredictorError::SourceUnavailable.into());
    };
    let frame = tracking
        .video_frame()
        .ok_or(PredictorError::SourceUnavailable)?;
    let options = EstimateOptions {
        flip_horizontal: true,
        max_hands: config.predictor.max_hands,
    };
    let hands = predictor.estimate_hands(&frame, &options)?;
    Ok(hands
        .iter()
        .any(|hand| hand.score > config.detection_threshold))
}

/// One teardown + initialize cycle, capped at `max_recovery_attempts`. When
/// re-initialization itself fails the detection loop is re-armed so later
/// ticks keep healing; past the cap the loop is cancelled and the failure is
/// surfaced instead of retrying forever.
fn recover(
    session: &mut Session,
    deps: &RuntimeDeps,
    config: &RuntimeConfig,
    status: &mut StatusSurface,
) {
    if session.recovery_attempts >= config.max_recovery_attempts {
        error!(
            "giving up after {} recovery attempts; stopping hand detection",
            session.recovery_attempts
        );
        status.show_error("Hand detection stopped after repeated failures");
        session.detection_loop = None;
        return;
    }
    session.recovery_attempts += 1;
    let attempt = session.recovery_attempts;
    info!("recovering overlay session (attempt {attempt})");
    session.teardown();
    match initialize(session, deps, config, status) {
        Ok(()) => {
            session.recovery_attempts = 0;
        }
        Err(err) => {
            error!("recovery attempt {attempt} failed: {err}");
            // Keep sampling so the next tick can try again.
            session.detection_loop = Some(DetectionLoop::new(config.detection_interval));
        }
    }
}

fn apply_indicator_visibility(
    detected: bool,
    indicators: &mut Query<(&mut Visibility, &Indicator)>,
) {
    for (mut visibility, indicator) in indicators.iter_mut() {
        let visible = match indicator {
            Indicator::HandPresent => detected,
            Indicator::Idle => !detected,
        };
        *visibility = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
