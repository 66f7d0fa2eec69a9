//! overlay_runtime: coordinates a tracking provider, a hand predictor, and
//! the overlay scene.
//!
//! Two independently throttled loops run in the single cooperative Bevy
//! schedule: a render loop capped at the target frame rate and a detection
//! loop that samples the predictor at most once per interval and flips the
//! indicator pair only on edges of the detected state. They share no
//! synchronization beyond the ECS visibility state; a flip landing one frame
//! late is tolerated. Model acquisition retries on a fixed schedule and the
//! session lifecycle is idempotent from any partial state.

pub mod bridge;
pub mod detect;
pub mod error;
pub mod lifecycle;
pub mod render;
pub mod session;
pub mod status;

use bevy::app::AppExit;
use bevy::prelude::*;

pub use bridge::{relay_tracking_events, STATUS_TARGET_FOUND, STATUS_TARGET_LOST};
pub use detect::{run_detection_loop, Indicator, STATUS_HAND_DETECTED, STATUS_SHOW_HAND};
pub use error::RuntimeError;
pub use lifecycle::{
    initialize, initialize_session, teardown_on_exit, RuntimeConfig, RuntimeDeps, STATUS_READY,
};
pub use render::run_render_loop;
pub use session::{DetectionLoop, RenderLoop, Session};
pub use status::{BufferedStatus, LogStatus, StatusModel, StatusSink, StatusSurface};

/// Installs the session resource and the coordination systems. The embedding
/// app must insert [`RuntimeDeps`], [`RuntimeConfig`], and a
/// [`StatusSurface`] before startup.
pub struct OverlayRuntimePlugin;

impl Plugin for OverlayRuntimePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AppExit>()
            .init_resource::<Session>()
            .add_systems(Startup, initialize_session)
            .add_systems(
                Update,
                (relay_tracking_events, run_detection_loop, run_render_loop).chain(),
            )
            .add_systems(PostUpdate, teardown_on_exit);
    }
}

pub mod prelude {
    pub use crate::{
        initialize, relay_tracking_events, run_detection_loop, run_render_loop, BufferedStatus,
        DetectionLoop, Indicator, LogStatus, OverlayRuntimePlugin, RenderLoop, RuntimeConfig,
        RuntimeDeps, RuntimeError, Session, StatusModel, StatusSink, StatusSurface,
        STATUS_HAND_DETECTED, STATUS_READY, STATUS_SHOW_HAND, STATUS_TARGET_FOUND,
        STATUS_TARGET_LOST,
    };
}
