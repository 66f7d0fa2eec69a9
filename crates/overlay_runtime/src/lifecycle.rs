use std::time::Duration;

use bevy::app::AppExit;
use bevy::prelude::*;
use hand_inference::{acquire_predictor, retry::RetryPolicy};
use overlay_core::prelude::{PredictorConfig, PredictorFactory, TrackingConfig, TrackingFactory};

use crate::error::RuntimeError;
use crate::session::{DetectionLoop, RenderLoop, Session};
use crate::status::StatusSurface;

pub const STATUS_READY: &str = "Point the camera at the marker";

/// Tunables for the coordination engine.
#[derive(Resource, Debug, Clone)]
pub struct RuntimeConfig {
    pub tracking: TrackingConfig,
    pub predictor: PredictorConfig,
    pub acquisition: RetryPolicy,
    /// Minimum time between predictor samples.
    pub detection_interval: Duration,
    pub target_fps: f32,
    /// Hand score above this counts as detected. Loosened from the model's
    /// own default to cut false negatives on partial hands.
    pub detection_threshold: f32,
    /// Self-healing cap for the detection loop.
    pub max_recovery_attempts: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tracking: TrackingConfig::default(),
            predictor: PredictorConfig::default(),
            acquisition: RetryPolicy::default(),
            detection_interval: Duration::from_millis(100),
            target_fps: 60.0,
            detection_threshold: 0.5,
            max_recovery_attempts: 5,
        }
    }
}

/// Collaborator factories injected by the embedding app.
#[derive(Resource)]
pub struct RuntimeDeps {
    pub tracking_factory: Box<dyn TrackingFactory + Send + Sync>,
    pub predictor_factory: Box<dyn PredictorFactory + Send + Sync>,
}

/// Runs the full startup sequence: prepare the inference backend, reset any
/// previous session, construct the tracking provider, acquire the predictor
/// (bounded retry), register the anchor, start tracking, arm both loops.
/// On failure the partially constructed state is torn down before returning.
pub fn initialize(
    session: &mut Session,
    deps: &RuntimeDeps,
    config: &RuntimeConfig,
    status: &mut StatusSurface,
) -> Result<(), RuntimeError> {
    match try_initialize(session, deps, config, status) {
        Ok(()) => Ok(()),
        Err(err) => {
            session.teardown();
            Err(err)
        }
    }
}

fn try_initialize(
    session: &mut Session,
    deps: &RuntimeDeps,
    config: &RuntimeConfig,
    status: &mut StatusSurface,
) -> Result<(), RuntimeError> {
    deps.predictor_factory
        .prepare()
        .map_err(|err| RuntimeError::Initialization(format!("backend prepare: {err}")))?;
    session.teardown();

    // Handles land in the session as they are constructed so a failure on a
    // later step tears down everything built so far.
    session.tracking = Some(deps.tracking_factory.create(&config.tracking)?);
    session.predictor = Some(acquire_predictor(
        deps.predictor_factory.as_ref(),
        &config.predictor,
        config.acquisition,
    )?);
    if let Some(tracking) = session.tracking.as_mut() {
        let anchor = tracking.add_anchor(0)?;
        info!("registered target anchor {}", anchor.index);
        tracking.start()?;
    }

    session.render_loop = Some(RenderLoop::new(config.target_fps));
    session.detection_loop = Some(DetectionLoop::new(config.detection_interval));
    session.initialized = true;
    status.update_status(STATUS_READY);
    Ok(())
}

/// Startup system wrapping `initialize` with the single top-level error
/// handler: log, clear the loading state, surface the wrapped message, and
/// force a teardown.
pub fn initialize_session(
    mut session: ResMut<Session>,
    deps: Res<RuntimeDeps>,
    config: Res<RuntimeConfig>,
    mut status: ResMut<StatusSurface>,
) {
    status.set_loading(true);
    match initialize(&mut session, &deps, &config, &mut status) {
        Ok(()) => {
            status.set_loading(false);
            info!("overlay session initialized");
        }
        Err(err) => {
            error!("failed to initialize overlay session: {err}");
            status.set_loading(false);
            status.show_error(&format!("Failed to start AR session: {err}"));
            session.teardown();
        }
    }
}

/// Releases collaborators when the app shuts down, so an abrupt exit still
/// stops the camera and frees the model.
pub fn teardown_on_exit(mut exit: MessageReader<AppExit>, mut session: ResMut<Session>) {
    if exit.read().next().is_some() {
        session.teardown();
    }
}
