//! Input handling for the build client.
//!
//! Split into sub-modules by concern:
//! - `types`: Resource types and enums (ActiveTool, CursorWorldPos, etc.)
//! - `cursor`: Cursor-to-world projection, status message tick
//! - `keyboard`: Tool shortcuts, foundation rotation, escape key, movement
//! - `placement`: The confirm click feeding the request queue

mod cursor;
mod keyboard;
mod placement;
mod types;

#[cfg(test)]
mod tests;

// Re-export all public items so callers don't need to change their imports.

// Types and resources
pub use types::{ActiveTool, CursorWorldPos, StatusMessage};

// Cursor systems
pub use cursor::{tick_status_message, update_cursor_world_pos};

// Confirm click. `self::` disambiguates the submodule from the placement
// crate.
pub use self::placement::confirm_placement;

// Keyboard shortcut systems
pub use keyboard::{handle_escape_key, keyboard_tool_switch, move_player, rotate_foundation_shape};
