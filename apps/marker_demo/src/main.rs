mod cli;
mod config;
mod hud;
mod scene;
mod synthetic;

use bevy::prelude::*;
use bevy::window::WindowPlugin;
use clap::Parser;

use hand_inference::HeuristicPredictorFactory;
use overlay_runtime::prelude::{BufferedStatus, OverlayRuntimePlugin, RuntimeDeps, StatusSurface};

use cli::AppArgs;
use hud::{spawn_status_ui, threshold_hotkeys, update_status_ui, StatusHandle};
use scene::spawn_scene;
use synthetic::SyntheticTrackingFactory;

fn main() -> anyhow::Result<()> {
    let args = AppArgs::parse();
    let demo = config::load(&args)?;

    let status = BufferedStatus::default();
    let handle = StatusHandle(status.handle());

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: (!args.headless).then(|| Window {
            title: demo.window_title.clone(),
            ..default()
        }),
        ..default()
    }));
    app.insert_resource(demo.runtime)
        .insert_resource(RuntimeDeps {
            tracking_factory: Box::new(SyntheticTrackingFactory { seed: demo.seed }),
            predictor_factory: Box::new(HeuristicPredictorFactory),
        })
        .insert_resource(StatusSurface::new(status))
        .insert_resource(handle)
        .add_plugins(OverlayRuntimePlugin)
        .add_systems(Startup, (spawn_scene, spawn_status_ui))
        .add_systems(Update, (update_status_ui, threshold_hotkeys));
    app.run();
    Ok(())
}
