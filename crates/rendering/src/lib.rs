use bevy::prelude::*;

pub mod camera;
pub mod egui_input_guard;
pub mod ghost;
pub mod input;
pub mod world_sprites;

use ghost::PreviewState;
use input::{ActiveTool, CursorWorldPos, StatusMessage};

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorWorldPos>()
            .init_resource::<ActiveTool>()
            .init_resource::<StatusMessage>()
            .init_resource::<PreviewState>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    world_sprites::setup_build_meshes,
                    world_sprites::spawn_static_world,
                )
                    .chain()
                    .after(placement::world_init::init_sandbox_world),
            )
            .add_systems(
                Update,
                (
                    input::keyboard_tool_switch,
                    input::rotate_foundation_shape,
                    input::handle_escape_key,
                    input::move_player,
                    input::tick_status_message,
                    camera::camera_follow_player.after(input::move_player),
                    camera::camera_zoom,
                ),
            )
            // Cursor to verdict to click, in order, so the confirm submits
            // exactly what the ghost drew this frame.
            .add_systems(
                Update,
                (
                    input::update_cursor_world_pos,
                    ghost::update_preview,
                    input::confirm_placement,
                    ghost::draw_preview,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    world_sprites::sync_world_sprites,
                    world_sprites::sync_player_sprite,
                ),
            );
    }
}
