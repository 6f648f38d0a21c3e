use bevy::prelude::*;
use bevy::window::{PrimaryWindow, Window};
use bevy_rts_camera::RtsCamera;

use crate::systems::tree::{PlaceTreeEvent, PlacementArmed};

// project the cursor onto the ground plane (y = 0)
// full scene-mesh raycasting is deliberately not done here; trees are
// placed on the ground, which the plane intersection covers
fn cursor_ground_point(
    window: &Window,
    camera: &Camera,
    camera_transform: &GlobalTransform,
) -> Option<Vec3> {
    let cursor_pos = window.cursor_position()?;
    let ray = camera.viewport_to_world(camera_transform, cursor_pos).ok()?;

    let distance = ray.intersect_plane(Vec3::ZERO, InfinitePlane3d::new(Vec3::Y))?;
    Some(ray.get_point(distance))
}

// while placement is armed, a left click grows a tree under the cursor
// Escape disarms without placing
pub fn handle_mouse_interaction(
    mut placement: ResMut<PlacementArmed>,
    mut place_events: EventWriter<PlaceTreeEvent>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<RtsCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    if !placement.0 {
        return;
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        placement.0 = false;
        return;
    }

    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else { return };
    let Ok((camera, camera_transform)) = camera_query.single() else { return };

    match cursor_ground_point(window, camera, camera_transform) {
        Some(point) => {
            place_events.write(PlaceTreeEvent { position: point });
        }
        None => {
            // ray parallel to the ground or pointing away from it
            println!("No ground intersection, tree not placed");
        }
    }
}
