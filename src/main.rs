use bevy::prelude::*;
use bevy::math::bounding::Aabb2d;
use bevy::pbr::wireframe::{WireframeConfig, WireframePlugin};
use bevy::window::WindowPlugin;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy_egui::EguiPlugin;
use bevy_rts_camera::*;

pub mod config;
pub mod systems;

#[cfg(test)]
mod test;

// import modules here
use systems::grid::GridPlugin;
use systems::tree::{PlacementArmed, TreeGenerationPlugin};

use crate::systems::interaction;
use crate::systems::ui::UIPlugin;

fn main() -> bevy::app::AppExit {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "arbor_gen".to_string(),
                mode: bevy::window::WindowMode::Windowed,
                resolution: bevy::window::WindowResolution::new(1920.0, 1080.0),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(WireframePlugin::default())
        .add_plugins(RtsCameraPlugin)

        // my custom plugins
        .add_plugins(GridPlugin)
        .add_plugins(TreeGenerationPlugin)
        .add_plugins(UIPlugin)

        .insert_resource(WireframeConfig {
            global: false,
            default_color: Color::WHITE,
        })
        .insert_resource(ClearColor(Color::srgb(0.06, 0.07, 0.09))) // world color
        .add_systems(Startup, start)
        // exit must see the placement flag before interaction consumes Escape
        .add_systems(Update, (handle_exit, interaction::handle_mouse_interaction).chain())
        .run()
}

// application entry point here
fn start(
    mut commands: Commands
) {
    // spawn camera
    commands.spawn((
        RtsCamera {
            bounds: Aabb2d::new(
                Vec2::ZERO,
                Vec2::new(100.0, 100.0),
            ),
            min_angle: 0.3,
            height_max: 90.0,
            ..default()
        },
        RtsCameraControls {
            key_up: KeyCode::KeyW,
            key_down: KeyCode::KeyS,
            key_left: KeyCode::KeyA,
            key_right: KeyCode::KeyD,
            pan_speed: 25.0,
            zoom_sensitivity: 0.15,
            edge_pan_width: 0.0,
            ..default()
        },
    ));

    // spawn light source
    commands.spawn((
        DirectionalLight {
            illuminance: 4_000.,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(30000.0, 50000.0, 20000.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

// application exit
// Escape cancels placement first, then quits the app
fn handle_exit(
    keys: Res<ButtonInput<KeyCode>>,
    placement: Res<PlacementArmed>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) && !placement.0 {
        exit.write(AppExit::Success);
    }
}
