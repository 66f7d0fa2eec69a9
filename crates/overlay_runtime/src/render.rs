use bevy::prelude::*;

use crate::session::Session;

/// Frame-rate-capped render loop. Once armed it redraws the overlay scene
/// unconditionally whenever the frame interval has elapsed — no dirty
/// checking. Render failures are not handled here; the error bubbles to the
/// app-level handler of the schedule.
pub fn run_render_loop(time: Res<Time>, mut session: ResMut<Session>) -> Result {
    let Some(render) = session.render_loop.as_mut() else {
        return Ok(());
    };
    render.frame_interval.tick(time.delta());
    if !render.frame_interval.is_finished() {
        return Ok(());
    }
    let Some(tracking) = session.tracking.as_mut() else {
        return Ok(());
    };
    tracking.render_scene()?;
    Ok(())
}
