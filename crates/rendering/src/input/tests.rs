#[cfg(test)]
mod tests {
    use super::super::types::{ActiveTool, StatusMessage};
    use placement::config::{DOOR_WOOD_COST, FENCE_WOOD_COST, WALL_WOOD_COST};
    use placement::geometry::FoundationShape;
    use placement::items::PlaceableKind;

    #[test]
    fn test_tool_wood_costs() {
        assert_eq!(ActiveTool::Inspect.wood_cost(), None);
        assert_eq!(
            ActiveTool::Foundation(FoundationShape::Full).wood_cost(),
            Some(FoundationShape::Full.wood_cost())
        );
        assert_eq!(
            ActiveTool::Foundation(FoundationShape::TriNe).wood_cost(),
            Some(FoundationShape::TriNe.wood_cost())
        );
        assert_eq!(ActiveTool::Wall.wood_cost(), Some(WALL_WOOD_COST));
        assert_eq!(ActiveTool::Fence.wood_cost(), Some(FENCE_WOOD_COST));
        assert_eq!(ActiveTool::Door.wood_cost(), Some(DOOR_WOOD_COST));
        assert_eq!(ActiveTool::Place(PlaceableKind::Campfire).wood_cost(), None);
    }

    #[test]
    fn test_only_inspect_is_not_a_build_tool() {
        assert!(!ActiveTool::Inspect.is_build_tool());
        assert!(ActiveTool::Wall.is_build_tool());
        assert!(ActiveTool::Foundation(FoundationShape::TriSw).is_build_tool());
        assert!(ActiveTool::Place(PlaceableKind::BrothPot).is_build_tool());
    }

    #[test]
    fn test_place_tool_labels_match_items() {
        for kind in PlaceableKind::ALL {
            assert_eq!(ActiveTool::Place(kind).label(), kind.item_name());
        }
    }

    #[test]
    fn test_status_message_lifecycle() {
        let mut status = StatusMessage::default();
        assert!(!status.active());
        status.set("Too far away", true);
        assert!(status.active());
        assert!(status.is_error);
        status.timer = 0.0;
        assert!(!status.active());
    }

    #[test]
    fn test_shape_rotation_cycles() {
        let mut shape = FoundationShape::Full;
        for _ in 0..5 {
            shape = shape.next();
        }
        assert_eq!(shape, FoundationShape::Full, "five steps return to start");
    }
}
