//! Validation verdicts.
//!
//! Validators never return `Result` in the hot path: a verdict is plain data
//! handed to the ghost renderer every frame and to the confirm path on click.
//! Deny reasons carry just enough context for a one-line status message.

use serde::{Deserialize, Serialize};

use crate::items::TerrainRequirement;
use crate::zones::RestrictedZone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Allow,
    Deny(DenyReason),
}

impl Verdict {
    #[inline]
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }

    pub fn reason(self) -> Option<DenyReason> {
        match self {
            Self::Allow => None,
            Self::Deny(reason) => Some(reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenyReason {
    OutOfRange,
    WaterBlocked,
    RestrictedZone(RestrictedZone),
    GrassBlocked,
    Overlap,
    NotEnoughWood { needed: u32 },
    MissingItem,
    NoFoundation,
    InvalidEdge,
    EdgeOccupied,
    SelfTrap,
    WrongTerrain(TerrainRequirement),
    TooFarFromShore,
    BlockedOnBeach,
    BlockedOnAlpine,
    ObjectOverlap,
    WallBuffer,
    NoHeatSource,
    HeatSourceOccupied,
}

impl DenyReason {
    /// One-line status text for the hotbar.
    pub fn message(self) -> String {
        match self {
            Self::OutOfRange => "Too far away".into(),
            Self::WaterBlocked => "Cannot build on water".into(),
            Self::RestrictedZone(RestrictedZone::Paved) => "Cannot build on paved ground".into(),
            Self::RestrictedZone(zone) => format!("Too close to a {}", zone.label()),
            Self::GrassBlocked => "Clear the grass first".into(),
            Self::Overlap => "A foundation is already here".into(),
            Self::NotEnoughWood { needed } => format!("Requires {needed} wood"),
            Self::MissingItem => "Item not in inventory".into(),
            Self::NoFoundation => "Needs a foundation".into(),
            Self::InvalidEdge => "That edge does not fit this shape".into(),
            Self::EdgeOccupied => "Edge already occupied".into(),
            Self::SelfTrap => "Would trap you inside".into(),
            Self::WrongTerrain(req) => match req {
                TerrainRequirement::Water => "Must be planted in water".into(),
                TerrainRequirement::Beach => "Must be planted on a beach".into(),
                TerrainRequirement::Alpine => "Must be planted on alpine ground".into(),
                TerrainRequirement::Tundra => "Must be planted on tundra".into(),
            },
            Self::TooFarFromShore => "Too far from shore".into(),
            Self::BlockedOnBeach => "Cannot be placed on a beach".into(),
            Self::BlockedOnAlpine => "Cannot be placed on alpine ground".into(),
            Self::ObjectOverlap => "Too close to another object".into(),
            Self::WallBuffer => "Too close to a wall".into(),
            Self::NoHeatSource => "Needs a campfire or fumarole".into(),
            Self::HeatSourceOccupied => "That heat source already has a pot".into(),
        }
    }
}
