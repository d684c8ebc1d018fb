use bevy::prelude::*;
use bevy_egui::EguiContexts;

use placement::requests::PlacementQueue;

use super::types::StatusMessage;
use crate::egui_input_guard::egui_wants_pointer;
use crate::ghost::PreviewState;

/// Left click submits whatever the ghost is showing. Denied targets only
/// surface their reason; nothing reaches the queue.
pub fn confirm_placement(
    mouse: Res<ButtonInput<MouseButton>>,
    mut contexts: EguiContexts,
    preview: Res<PreviewState>,
    mut queue: ResMut<PlacementQueue>,
    mut status: ResMut<StatusMessage>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    // Prevent click-through when the pointer is over the toolbar or a panel.
    if egui_wants_pointer(&mut contexts) {
        return;
    }

    let Some(verdict) = preview.verdict else {
        return;
    };
    if let Some(reason) = verdict.reason() {
        status.set(reason.message(), true);
        return;
    }
    if let Some(request) = preview.request {
        queue.push(request);
        status.set(format!("{} placed", request.label()), false);
    }
}
