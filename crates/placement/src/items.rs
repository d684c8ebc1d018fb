//! Item definitions, inventory slots, and the placement profile of every
//! free-standing object class.

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::config::{
    HEAT_SNAP_RADIUS_PX, PLACEABLE_RANGE_PX, PLANTING_RANGE_PX, POT_RANGE_PX, REED_SHORE_LIMIT_PX,
};

/// Name of the material consumed by buildable placements. Sufficiency sums
/// quantity over every slot holding it, wherever the slot lives.
pub const WOOD_ITEM_NAME: &str = "Wood";

// ---------------------------------------------------------------------------
// Catalog and inventory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: u32,
    pub name: String,
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub defs: Vec<ItemDef>,
}

impl ItemCatalog {
    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.defs.iter().find(|d| d.name == name).map(|d| d.id)
    }

    /// Catalog covering wood plus one definition per placeable class, with
    /// ids stable across runs.
    pub fn standard() -> Self {
        let mut defs = vec![ItemDef {
            id: 0,
            name: WOOD_ITEM_NAME.into(),
        }];
        for (offset, kind) in PlaceableKind::ALL.into_iter().enumerate() {
            defs.push(ItemDef {
                id: offset as u32 + 1,
                name: kind.item_name().into(),
            });
        }
        Self { defs }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySlot {
    pub item_def_id: u32,
    pub quantity: u32,
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub slots: Vec<InventorySlot>,
}

impl Inventory {
    /// Add `quantity` units, merging into an existing slot when one holds
    /// the same definition.
    pub fn grant(&mut self, item_def_id: u32, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(slot) = self.slots.iter_mut().find(|s| s.item_def_id == item_def_id) {
            slot.quantity += quantity;
            return;
        }
        self.slots.push(InventorySlot {
            item_def_id,
            quantity,
        });
    }

    pub fn count_of(&self, item_def_id: u32) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.item_def_id == item_def_id)
            .map(|s| s.quantity)
            .sum()
    }

    /// Remove `amount` units of a definition, draining slots front to back.
    /// Returns false (and removes nothing) when the inventory is short.
    pub fn consume(&mut self, item_def_id: u32, amount: u32) -> bool {
        if self.count_of(item_def_id) < amount {
            return false;
        }
        let mut remaining = amount;
        for slot in &mut self.slots {
            if slot.item_def_id != item_def_id || remaining == 0 {
                continue;
            }
            let take = slot.quantity.min(remaining);
            slot.quantity -= take;
            remaining -= take;
        }
        self.slots.retain(|s| s.quantity > 0);
        true
    }
}

/// Total wood across all wood-bearing slots.
pub fn wood_available(catalog: &ItemCatalog, inventory: &Inventory) -> u32 {
    match catalog.id_of(WOOD_ITEM_NAME) {
        Some(id) => inventory.count_of(id),
        None => 0,
    }
}

// ---------------------------------------------------------------------------
// Free-object placement profiles
// ---------------------------------------------------------------------------

/// Terrain a class must sit on. A requirement replaces the generic
/// water-block list for that class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainRequirement {
    Water,
    Beach,
    Alpine,
    Tundra,
}

/// Every free-standing object class the client can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceableKind {
    Campfire,
    Lantern,
    WoodenStorageBox,
    SleepingBag,
    Beehive,
    BrothPot,
    ReedRhizome,
    DuneGrass,
    AlpineSnowberry,
    TundraRoot,
}

impl PlaceableKind {
    pub const ALL: [PlaceableKind; 10] = [
        Self::Campfire,
        Self::Lantern,
        Self::WoodenStorageBox,
        Self::SleepingBag,
        Self::Beehive,
        Self::BrothPot,
        Self::ReedRhizome,
        Self::DuneGrass,
        Self::AlpineSnowberry,
        Self::TundraRoot,
    ];

    /// Item name as it appears in the catalog.
    pub fn item_name(self) -> &'static str {
        match self {
            Self::Campfire => "Campfire",
            Self::Lantern => "Lantern",
            Self::WoodenStorageBox => "Wooden Storage Box",
            Self::SleepingBag => "Sleeping Bag",
            Self::Beehive => "Beehive",
            Self::BrothPot => "Broth Pot",
            Self::ReedRhizome => "Reed Rhizome",
            Self::DuneGrass => "Dune Grass Seeds",
            Self::AlpineSnowberry => "Alpine Snowberry Seeds",
            Self::TundraRoot => "Tundra Root Cutting",
        }
    }

    /// Maximum player-to-target distance for this class.
    pub fn placement_range_px(self) -> f32 {
        match self {
            Self::BrothPot => POT_RANGE_PX,
            Self::ReedRhizome | Self::DuneGrass | Self::AlpineSnowberry | Self::TundraRoot => {
                PLANTING_RANGE_PX
            }
            _ => PLACEABLE_RANGE_PX,
        }
    }

    /// Collision radius used for overlap checks against already-placed
    /// objects. Plants grow around each other and pots snap onto heat
    /// sources, so neither participates.
    pub fn overlap_radius_px(self) -> Option<f32> {
        match self {
            Self::Campfire => Some(20.0),
            Self::Lantern => Some(14.0),
            Self::WoodenStorageBox => Some(22.0),
            Self::SleepingBag => Some(26.0),
            Self::Beehive => Some(20.0),
            Self::BrothPot
            | Self::ReedRhizome
            | Self::DuneGrass
            | Self::AlpineSnowberry
            | Self::TundraRoot => None,
        }
    }

    /// Terrain this class must be planted on, if any.
    pub fn terrain_requirement(self) -> Option<TerrainRequirement> {
        match self {
            Self::ReedRhizome => Some(TerrainRequirement::Water),
            Self::DuneGrass => Some(TerrainRequirement::Beach),
            Self::AlpineSnowberry => Some(TerrainRequirement::Alpine),
            Self::TundraRoot => Some(TerrainRequirement::Tundra),
            _ => None,
        }
    }

    /// Classes that require water proximity to land: the computed shore
    /// distance must stay under this limit.
    pub fn shore_limit_px(self) -> Option<f32> {
        match self {
            Self::ReedRhizome => Some(REED_SHORE_LIMIT_PX),
            _ => None,
        }
    }

    /// Generic water block for classes without a terrain requirement.
    pub fn blocked_on_water(self) -> bool {
        self.terrain_requirement().is_none()
    }

    /// Sleeping on loose sand is the one beach-specific ban.
    pub fn blocked_on_beach(self) -> bool {
        self == Self::SleepingBag
    }

    /// Bees do not survive the alpine zone.
    pub fn blocked_on_alpine(self) -> bool {
        self == Self::Beehive
    }

    /// Pots must sit on a campfire or fumarole within
    /// [`HEAT_SNAP_RADIUS_PX`] of the cursor.
    pub fn needs_heat_source(self) -> bool {
        self == Self::BrothPot
    }

    pub fn heat_snap_radius_px(self) -> f32 {
        HEAT_SNAP_RADIUS_PX
    }

    pub fn is_seed(self) -> bool {
        matches!(
            self,
            Self::ReedRhizome | Self::DuneGrass | Self::AlpineSnowberry | Self::TundraRoot
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with_wood() -> ItemCatalog {
        ItemCatalog {
            defs: vec![
                ItemDef {
                    id: 1,
                    name: WOOD_ITEM_NAME.into(),
                },
                ItemDef {
                    id: 2,
                    name: "Stone".into(),
                },
            ],
        }
    }

    #[test]
    fn test_wood_sums_across_slots() {
        let catalog = catalog_with_wood();
        let inventory = Inventory {
            slots: vec![
                InventorySlot {
                    item_def_id: 1,
                    quantity: 30,
                },
                InventorySlot {
                    item_def_id: 2,
                    quantity: 99,
                },
                InventorySlot {
                    item_def_id: 1,
                    quantity: 12,
                },
            ],
        };
        assert_eq!(wood_available(&catalog, &inventory), 42);
    }

    #[test]
    fn test_wood_missing_from_catalog() {
        let catalog = ItemCatalog::default();
        let inventory = Inventory {
            slots: vec![InventorySlot {
                item_def_id: 1,
                quantity: 10,
            }],
        };
        assert_eq!(wood_available(&catalog, &inventory), 0);
    }

    #[test]
    fn test_consume_spans_slots() {
        let mut inventory = Inventory {
            slots: vec![
                InventorySlot {
                    item_def_id: 1,
                    quantity: 10,
                },
                InventorySlot {
                    item_def_id: 1,
                    quantity: 10,
                },
            ],
        };
        assert!(inventory.consume(1, 15));
        assert_eq!(inventory.count_of(1), 5);
        assert!(!inventory.consume(1, 6), "short inventories refuse whole");
        assert_eq!(inventory.count_of(1), 5);
    }

    #[test]
    fn test_requirement_classes_skip_water_block() {
        for kind in PlaceableKind::ALL {
            if kind.terrain_requirement().is_some() {
                assert!(
                    !kind.blocked_on_water(),
                    "{kind:?} has a terrain requirement and must not also be water-blocked"
                );
            }
        }
    }

    #[test]
    fn test_profile_table_consistency() {
        assert!(PlaceableKind::BrothPot.needs_heat_source());
        assert_eq!(
            PlaceableKind::ReedRhizome.shore_limit_px(),
            Some(REED_SHORE_LIMIT_PX)
        );
        assert!(PlaceableKind::SleepingBag.blocked_on_beach());
        assert!(PlaceableKind::Beehive.blocked_on_alpine());
        for kind in PlaceableKind::ALL {
            if kind.is_seed() {
                assert_eq!(kind.placement_range_px(), PLANTING_RANGE_PX);
                assert_eq!(kind.overlap_radius_px(), None);
            }
        }
    }
}
