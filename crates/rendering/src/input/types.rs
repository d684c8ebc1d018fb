use bevy::prelude::*;

use placement::geometry::FoundationShape;
use placement::items::PlaceableKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Resource)]
pub enum ActiveTool {
    #[default]
    Inspect,
    /// Foundation tool carrying the shape the next click places. R rotates.
    Foundation(FoundationShape),
    Wall,
    Fence,
    Door,
    Place(PlaceableKind),
}

impl ActiveTool {
    pub fn label(&self) -> &'static str {
        match self {
            ActiveTool::Inspect => "Inspect",
            ActiveTool::Foundation(FoundationShape::Full) => "Foundation",
            ActiveTool::Foundation(FoundationShape::TriNw) => "Foundation (NW)",
            ActiveTool::Foundation(FoundationShape::TriNe) => "Foundation (NE)",
            ActiveTool::Foundation(FoundationShape::TriSe) => "Foundation (SE)",
            ActiveTool::Foundation(FoundationShape::TriSw) => "Foundation (SW)",
            ActiveTool::Wall => "Wall",
            ActiveTool::Fence => "Fence",
            ActiveTool::Door => "Door",
            ActiveTool::Place(kind) => kind.item_name(),
        }
    }

    /// Wood the next click would spend, if the tool costs wood.
    pub fn wood_cost(&self) -> Option<u32> {
        match self {
            ActiveTool::Foundation(shape) => Some(shape.wood_cost()),
            ActiveTool::Wall => Some(placement::config::WALL_WOOD_COST),
            ActiveTool::Fence => Some(placement::config::FENCE_WOOD_COST),
            ActiveTool::Door => Some(placement::config::DOOR_WOOD_COST),
            ActiveTool::Inspect | ActiveTool::Place(_) => None,
        }
    }

    /// True for every tool that drives the ghost preview.
    pub fn is_build_tool(&self) -> bool {
        *self != ActiveTool::Inspect
    }
}

/// Cursor position projected onto the world plane, in world coordinates
/// (y-down, matching the snapshot). Invalid while the cursor is outside the
/// window.
#[derive(Resource, Default)]
pub struct CursorWorldPos {
    pub pos: Vec2,
    pub valid: bool,
}

/// Status message shown briefly on screen.
#[derive(Resource, Default)]
pub struct StatusMessage {
    pub text: String,
    pub timer: f32,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn set(&mut self, text: impl Into<String>, is_error: bool) {
        self.text = text.into();
        self.timer = 3.0;
        self.is_error = is_error;
    }

    pub fn active(&self) -> bool {
        self.timer > 0.0
    }
}
