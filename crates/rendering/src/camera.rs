use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use placement::snapshot::LocalPlayer;

use crate::world_sprites::to_render;

const FOLLOW_RATE: f32 = 5.0;
const ZOOM_SPEED: f32 = 0.15;
const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 4.0;

pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Ease the camera toward the player each frame instead of hard-locking it,
/// so placements near the screen edge stay readable while moving.
pub fn camera_follow_player(
    player: Res<LocalPlayer>,
    time: Res<Time>,
    mut query: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    let target = to_render(player.pos);
    let t = (FOLLOW_RATE * time.delta_secs()).min(1.0);
    let eased = transform.translation.truncate().lerp(target, t);
    transform.translation.x = eased.x;
    transform.translation.y = eased.y;
}

/// Scroll wheel: zoom by scaling the orthographic projection.
pub fn camera_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    mut query: Query<&mut OrthographicProjection, With<Camera2d>>,
) {
    let Ok(mut projection) = query.get_single_mut() else {
        return;
    };
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        let factor = 1.0 - dy * ZOOM_SPEED;
        projection.scale = (projection.scale * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}
