use bevy::prelude::*;

use placement::geometry::FoundationShape;
use placement::items::PlaceableKind;
use placement::snapshot::LocalPlayer;

use super::types::{ActiveTool, StatusMessage};

/// Movement speed of the locally-controlled player, world px per second.
const PLAYER_SPEED: f32 = 240.0;

// ---------------------------------------------------------------------------
// Keyboard shortcuts (core tools only; the full list lives in the toolbar)
// ---------------------------------------------------------------------------

/// Digit keys select tools directly.
pub fn keyboard_tool_switch(keys: Res<ButtonInput<KeyCode>>, mut tool: ResMut<ActiveTool>) {
    if keys.just_pressed(KeyCode::Digit1) {
        *tool = ActiveTool::Inspect;
    }
    if keys.just_pressed(KeyCode::Digit2) {
        *tool = ActiveTool::Foundation(FoundationShape::Full);
    }
    if keys.just_pressed(KeyCode::Digit3) {
        *tool = ActiveTool::Wall;
    }
    if keys.just_pressed(KeyCode::Digit4) {
        *tool = ActiveTool::Fence;
    }
    if keys.just_pressed(KeyCode::Digit5) {
        *tool = ActiveTool::Door;
    }
    if keys.just_pressed(KeyCode::Digit6) {
        *tool = ActiveTool::Place(PlaceableKind::Campfire);
    }
    if keys.just_pressed(KeyCode::Digit7) {
        *tool = ActiveTool::Place(PlaceableKind::Lantern);
    }
    if keys.just_pressed(KeyCode::Digit8) {
        *tool = ActiveTool::Place(PlaceableKind::WoodenStorageBox);
    }
    if keys.just_pressed(KeyCode::Digit9) {
        *tool = ActiveTool::Place(PlaceableKind::SleepingBag);
    }
    if keys.just_pressed(KeyCode::Digit0) {
        *tool = ActiveTool::Place(PlaceableKind::BrothPot);
    }
}

/// R cycles the foundation shape: full, then the four triangles.
pub fn rotate_foundation_shape(
    keys: Res<ButtonInput<KeyCode>>,
    mut tool: ResMut<ActiveTool>,
    mut status: ResMut<StatusMessage>,
) {
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    if let ActiveTool::Foundation(shape) = *tool {
        let next = shape.next();
        *tool = ActiveTool::Foundation(next);
        status.set(next.label(), false);
    }
}

/// Escape drops back to the inspect tool.
pub fn handle_escape_key(keys: Res<ButtonInput<KeyCode>>, mut tool: ResMut<ActiveTool>) {
    if keys.just_pressed(KeyCode::Escape) && *tool != ActiveTool::Inspect {
        *tool = ActiveTool::Inspect;
    }
}

/// WASD/arrow movement. World coordinates are y-down, so W (screen north)
/// decreases y.
pub fn move_player(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut player: ResMut<LocalPlayer>,
) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }

    if dir != Vec2::ZERO {
        player.pos += dir.normalize() * PLAYER_SPEED * time.delta_secs();
    }
}
