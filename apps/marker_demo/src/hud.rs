use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use bevy::ui::{BackgroundColor, BorderColor, BorderRadius, Display, PositionType, UiRect, Val};

use overlay_runtime::prelude::{RuntimeConfig, StatusModel};

/// Shared handle into the buffered status sink, read by the HUD each frame.
#[derive(Resource, Clone)]
pub struct StatusHandle(pub Arc<Mutex<StatusModel>>);

#[derive(Component)]
pub struct StatusText;
#[derive(Component)]
pub struct ErrorBanner;

pub fn spawn_status_ui(mut commands: Commands) {
    let bg = Color::srgba(0.04, 0.08, 0.14, 0.82);
    let border = Color::srgba(0.0, 0.8, 0.75, 0.85);
    let accent = Color::srgba(0.28, 0.9, 1.0, 0.95);

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            padding: UiRect::axes(Val::Px(14.0), Val::Px(10.0)),
            border: UiRect::all(Val::Px(1.5)),
            ..default()
        },
        BackgroundColor(bg),
        BorderColor::all(border),
        BorderRadius::all(Val::Px(10.0)),
        Text::new("Loading hand model..."),
        TextFont {
            font_size: 17.0,
            ..default()
        },
        TextColor(accent),
        StatusText,
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
            border: UiRect::all(Val::Px(1.0)),
            display: Display::None,
            ..default()
        },
        BorderColor::all(Color::srgba(0.9, 0.3, 0.2, 0.85)),
        BorderRadius::all(Val::Px(3.0)),
        BackgroundColor(Color::srgba(0.3, 0.08, 0.05, 0.92)),
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgba(1.0, 0.85, 0.8, 0.95)),
        ErrorBanner,
    ));
}

pub fn update_status_ui(
    handle: Res<StatusHandle>,
    mut status_q: Query<&mut Text, (With<StatusText>, Without<ErrorBanner>)>,
    mut banner_q: Query<(&mut Node, &mut Text), (With<ErrorBanner>, Without<StatusText>)>,
) {
    let model = handle.0.lock().expect("status mutex poisoned").clone();

    if let Ok(mut text) = status_q.single_mut() {
        text.0 = if model.loading {
            "Loading hand model...".to_string()
        } else {
            model.status.clone()
        };
    }

    let Ok((mut node, mut text)) = banner_q.single_mut() else {
        return;
    };
    if let Some(error) = &model.error {
        node.display = Display::Flex;
        text.0 = error.clone();
    } else {
        node.display = Display::None;
    }
}

/// Minus/Equal nudge the hand score threshold at runtime.
pub fn threshold_hotkeys(keys: Res<ButtonInput<KeyCode>>, mut config: ResMut<RuntimeConfig>) {
    if keys.just_pressed(KeyCode::Minus) {
        config.detection_threshold = (config.detection_threshold - 0.05).clamp(0.0, 1.0);
        info!("detection threshold -> {:.2}", config.detection_threshold);
    }
    if keys.just_pressed(KeyCode::Equal) {
        config.detection_threshold = (config.detection_threshold + 0.05).clamp(0.0, 1.0);
        info!("detection threshold -> {:.2}", config.detection_threshold);
    }
}
