use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use placement::geometry::FoundationShape;
use placement::items::{wood_available, Inventory, ItemCatalog, PlaceableKind};
use placement::requests::{PlacementLog, PlacementOutcome};
use rendering::input::{ActiveTool, StatusMessage};

// ---------------------------------------------------------------------------
// Resource: which category popup is open
// ---------------------------------------------------------------------------

#[derive(Resource, Default)]
pub struct OpenCategory(pub Option<usize>);

// ---------------------------------------------------------------------------
// Data-driven category / item definitions
// ---------------------------------------------------------------------------

struct ToolItem {
    tool: ActiveTool,
    icon: &'static str,
    name: &'static str,
}

struct ToolCategory {
    name: &'static str,
    items: Vec<ToolItem>,
}

fn build_categories() -> Vec<ToolCategory> {
    vec![
        ToolCategory {
            name: "Build",
            items: vec![
                ToolItem {
                    tool: ActiveTool::Foundation(FoundationShape::Full),
                    icon: "Fo",
                    name: "Foundation",
                },
                ToolItem {
                    tool: ActiveTool::Foundation(FoundationShape::TriNw),
                    icon: "NW",
                    name: "Foundation (NW)",
                },
                ToolItem {
                    tool: ActiveTool::Foundation(FoundationShape::TriNe),
                    icon: "NE",
                    name: "Foundation (NE)",
                },
                ToolItem {
                    tool: ActiveTool::Foundation(FoundationShape::TriSe),
                    icon: "SE",
                    name: "Foundation (SE)",
                },
                ToolItem {
                    tool: ActiveTool::Foundation(FoundationShape::TriSw),
                    icon: "SW",
                    name: "Foundation (SW)",
                },
                ToolItem {
                    tool: ActiveTool::Wall,
                    icon: "Wa",
                    name: "Wall",
                },
                ToolItem {
                    tool: ActiveTool::Fence,
                    icon: "Fe",
                    name: "Fence",
                },
                ToolItem {
                    tool: ActiveTool::Door,
                    icon: "Do",
                    name: "Door",
                },
            ],
        },
        ToolCategory {
            name: "Objects",
            items: vec![
                ToolItem {
                    tool: ActiveTool::Place(PlaceableKind::Campfire),
                    icon: "Cf",
                    name: PlaceableKind::Campfire.item_name(),
                },
                ToolItem {
                    tool: ActiveTool::Place(PlaceableKind::Lantern),
                    icon: "La",
                    name: PlaceableKind::Lantern.item_name(),
                },
                ToolItem {
                    tool: ActiveTool::Place(PlaceableKind::WoodenStorageBox),
                    icon: "SB",
                    name: PlaceableKind::WoodenStorageBox.item_name(),
                },
                ToolItem {
                    tool: ActiveTool::Place(PlaceableKind::SleepingBag),
                    icon: "Sl",
                    name: PlaceableKind::SleepingBag.item_name(),
                },
                ToolItem {
                    tool: ActiveTool::Place(PlaceableKind::Beehive),
                    icon: "Be",
                    name: PlaceableKind::Beehive.item_name(),
                },
                ToolItem {
                    tool: ActiveTool::Place(PlaceableKind::BrothPot),
                    icon: "BP",
                    name: PlaceableKind::BrothPot.item_name(),
                },
            ],
        },
        ToolCategory {
            name: "Planting",
            items: vec![
                ToolItem {
                    tool: ActiveTool::Place(PlaceableKind::ReedRhizome),
                    icon: "Re",
                    name: PlaceableKind::ReedRhizome.item_name(),
                },
                ToolItem {
                    tool: ActiveTool::Place(PlaceableKind::DuneGrass),
                    icon: "Du",
                    name: PlaceableKind::DuneGrass.item_name(),
                },
                ToolItem {
                    tool: ActiveTool::Place(PlaceableKind::AlpineSnowberry),
                    icon: "As",
                    name: PlaceableKind::AlpineSnowberry.item_name(),
                },
                ToolItem {
                    tool: ActiveTool::Place(PlaceableKind::TundraRoot),
                    icon: "Tu",
                    name: PlaceableKind::TundraRoot.item_name(),
                },
            ],
        },
        ToolCategory {
            name: "Tools",
            items: vec![ToolItem {
                tool: ActiveTool::Inspect,
                icon: "?",
                name: "Inspect",
            }],
        },
    ]
}

/// Popup label: wood cost for buildables, inventory count for objects.
fn item_label(
    item: &ToolItem,
    catalog: &ItemCatalog,
    inventory: &Inventory,
) -> String {
    if let ActiveTool::Place(kind) = item.tool {
        let count = catalog
            .id_of(kind.item_name())
            .map(|id| inventory.count_of(id))
            .unwrap_or(0);
        return format!("{} {} x{}", item.icon, item.name, count);
    }
    match item.tool.wood_cost() {
        Some(cost) => format!("{} {} {}w", item.icon, item.name, cost),
        None => format!("{} {}", item.icon, item.name),
    }
}

// ---------------------------------------------------------------------------
// Main toolbar system
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut tool: ResMut<ActiveTool>,
    catalog: Res<ItemCatalog>,
    inventory: Res<Inventory>,
    log: Res<PlacementLog>,
    status: Res<StatusMessage>,
    mut open_cat: ResMut<OpenCategory>,
) {
    let categories = build_categories();

    // ---- Top info bar ----
    egui::TopBottomPanel::top("top_info_bar")
        .exact_height(36.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 12.0;

                ui.label(
                    egui::RichText::new("Skerry")
                        .strong()
                        .color(egui::Color32::from_rgb(170, 200, 220)),
                );

                ui.separator();

                // Wood
                ui.label(format!("Wood: {}", wood_available(&catalog, &inventory)));

                ui.separator();

                // Active tool + cost
                if let Some(cost) = tool.wood_cost() {
                    ui.label(format!("{}: {} wood", tool.label(), cost));
                } else {
                    ui.label(tool.label());
                }
                if matches!(*tool, ActiveTool::Foundation(_)) {
                    ui.label(egui::RichText::new("R rotates").weak());
                }

                // Latest placement outcome
                if let Some((request, outcome)) = log.latest() {
                    ui.separator();
                    match outcome {
                        PlacementOutcome::Placed { .. } => {
                            ui.colored_label(
                                egui::Color32::from_rgb(60, 200, 80),
                                format!("{} placed", request.label()),
                            );
                        }
                        PlacementOutcome::Rejected(reason) => {
                            ui.colored_label(
                                egui::Color32::from_rgb(220, 60, 50),
                                format!("{}: {}", request.label(), reason.message()),
                            );
                        }
                    }
                }
            });
        });

    // ---- Floating toast for status messages ----
    if status.active() {
        let color = if status.is_error {
            egui::Color32::from_rgb(220, 60, 50)
        } else {
            egui::Color32::from_rgb(60, 200, 80)
        };
        egui::Area::new(egui::Id::new("status_toast"))
            .fixed_pos(egui::pos2(
                contexts.ctx_mut().screen_rect().center().x - 100.0,
                42.0,
            ))
            .show(contexts.ctx_mut(), |ui| {
                egui::Frame::popup(ui.style())
                    .fill(egui::Color32::from_rgba_premultiplied(30, 30, 30, 220))
                    .show(ui, |ui| {
                        ui.colored_label(color, &status.text);
                    });
            });
    }

    // ---- Bottom toolbar: category buttons with full names ----
    let bottom_resp = egui::TopBottomPanel::bottom("bottom_toolbar")
        .exact_height(36.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;

                for (idx, cat) in categories.iter().enumerate() {
                    let is_open = open_cat.0 == Some(idx);
                    let btn = ui.selectable_label(is_open, egui::RichText::new(cat.name).strong());
                    if btn.clicked() {
                        if is_open {
                            open_cat.0 = None;
                        } else {
                            open_cat.0 = Some(idx);
                        }
                    }
                }
            });
        });

    // ---- Category popup (shown above bottom bar when a category is open) ----
    if let Some(cat_idx) = open_cat.0 {
        if cat_idx < categories.len() {
            let cat = &categories[cat_idx];
            let bottom_rect = bottom_resp.response.rect;

            let mut should_close = false;

            egui::Area::new(egui::Id::new("category_popup"))
                .fixed_pos(egui::pos2(
                    bottom_rect.left() + 4.0,
                    bottom_rect.top() - 8.0,
                ))
                .pivot(egui::Align2::LEFT_BOTTOM)
                .show(contexts.ctx_mut(), |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.set_min_width(200.0);
                        ui.heading(cat.name);
                        ui.separator();

                        // Grid layout: 3 columns
                        egui::Grid::new("cat_items_grid")
                            .num_columns(3)
                            .spacing([8.0, 6.0])
                            .show(ui, |ui| {
                                for (i, item) in cat.items.iter().enumerate() {
                                    let label_text = item_label(item, &catalog, &inventory);
                                    let is_active = *tool == item.tool;

                                    if ui.selectable_label(is_active, &label_text).clicked() {
                                        *tool = item.tool;
                                        should_close = true;
                                    }

                                    if (i + 1) % 3 == 0 {
                                        ui.end_row();
                                    }
                                }
                            });
                    });
                });

            if should_close {
                open_cat.0 = None;
            }
        }
    }
}
