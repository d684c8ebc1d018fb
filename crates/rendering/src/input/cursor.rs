use bevy::prelude::*;

use crate::world_sprites::render_to_world;

use super::types::{CursorWorldPos, StatusMessage};

/// Project the window cursor through the 2D camera onto the world plane.
/// The camera works in render coordinates (y-up); the snapshot and the
/// validators are y-down, so the result is flipped before it is stored.
pub fn update_cursor_world_pos(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut cursor: ResMut<CursorWorldPos>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };

    if let Some(screen_pos) = window.cursor_position() {
        if let Ok(render_pos) = camera.viewport_to_world_2d(cam_transform, screen_pos) {
            cursor.pos = render_to_world(render_pos);
            cursor.valid = true;
            return;
        }
    }
    cursor.valid = false;
}

pub fn tick_status_message(time: Res<Time>, mut status: ResMut<StatusMessage>) {
    if status.timer > 0.0 {
        status.timer -= time.delta_secs();
    }
}
