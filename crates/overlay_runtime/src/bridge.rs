use bevy::prelude::*;
use overlay_core::prelude::TrackingEvent;

use crate::session::Session;
use crate::status::StatusSurface;

pub const STATUS_TARGET_FOUND: &str = "Target found! Show your hand to the camera";
pub const STATUS_TARGET_LOST: &str = "Target lost. Point the camera at the marker";

/// Relays target found/lost events from the tracking provider into the
/// status surface. Deliberately independent of the detection loop's state:
/// target-in-view and hand-in-view are never cross-validated.
pub fn relay_tracking_events(mut session: ResMut<Session>, mut status: ResMut<StatusSurface>) {
    let Some(tracking) = session.tracking.as_mut() else {
        return;
    };
    for event in tracking.poll_events() {
        match event {
            TrackingEvent::TargetFound { anchor } => {
                info!("image target found (anchor {anchor})");
                status.update_status(STATUS_TARGET_FOUND);
            }
            TrackingEvent::TargetLost { anchor } => {
                info!("image target lost (anchor {anchor})");
                status.update_status(STATUS_TARGET_LOST);
            }
        }
    }
}
