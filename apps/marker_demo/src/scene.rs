use bevy::prelude::*;

use overlay_runtime::prelude::Indicator;

/// Camera, light, and the two overlay indicators. The cube shows while no
/// hand is in view; the sphere replaces it on detection.
pub fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 1.5, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 6.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.85, 0.78, 0.25),
            ..default()
        })),
        Transform::from_xyz(0.0, 0.5, 0.0),
        Visibility::Inherited,
        Indicator::Idle,
    ));
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(0.6))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.9, 0.6),
            ..default()
        })),
        Transform::from_xyz(0.0, 0.6, 0.0),
        Visibility::Hidden,
        Indicator::HandPresent,
    ));
}
