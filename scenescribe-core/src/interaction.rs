//! Pure drag/resize geometry
//!
//! The interaction controller in the editor translates pointer deltas into
//! proposed pixel geometry; these helpers apply the container constraints
//! and the hard 50 px minimum so the rules are testable without a UI.
//! A `None` return means the proposal is rejected outright and the caller
//! commits nothing — constraint violations are silent no-ops.

use crate::layout::Container;
use crate::scene::MIN_SCENE_PX;

/// Clamp a drag-stop position so the element stays inside its container.
///
/// Previews during the drag are intentionally unclamped; only the commit
/// goes through here. Returns `None` when the element cannot fit at all
/// (container narrower than the element), in which case the drag is
/// dropped.
pub fn clamp_drag(container: &Container, width: f32, proposed_position: f32) -> Option<f32> {
    if container.width() < width {
        return None;
    }
    Some(proposed_position.clamp(container.start, container.end - width))
}

/// Resolve a right-edge resize: new width from a proposed right edge.
///
/// The width is floored at `MIN_SCENE_PX` and capped at the container
/// end. Rejected when the container cannot hold a minimum-width scene at
/// this position.
pub fn resize_right(container: &Container, position: f32, proposed_right: f32) -> Option<f32> {
    let max_width = container.end - position;
    if max_width < MIN_SCENE_PX {
        return None;
    }
    let width = (proposed_right - position).max(MIN_SCENE_PX).min(max_width);
    Some(width)
}

/// Resolve a left-edge resize: new `(position, width)` from a proposed
/// left edge, keeping the right edge fixed.
pub fn resize_left(
    container: &Container,
    right_edge: f32,
    proposed_position: f32,
) -> Option<(f32, f32)> {
    if right_edge - container.start < MIN_SCENE_PX {
        return None;
    }
    let position = proposed_position
        .max(container.start)
        .min(right_edge - MIN_SCENE_PX);
    Some((position, right_edge - position))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Container = Container { start: 100.0, end: 400.0 };

    #[test]
    fn drag_commit_clamps_into_container() {
        assert_eq!(clamp_drag(&CONTAINER, 100.0, 50.0), Some(100.0));
        assert_eq!(clamp_drag(&CONTAINER, 100.0, 350.0), Some(300.0));
        assert_eq!(clamp_drag(&CONTAINER, 100.0, 180.0), Some(180.0));
    }

    #[test]
    fn drag_rejected_when_element_cannot_fit() {
        let narrow = Container { start: 0.0, end: 80.0 };
        assert_eq!(clamp_drag(&narrow, 100.0, 0.0), None);
    }

    #[test]
    fn right_resize_respects_floor_and_container() {
        // Proposed right edge below the floor snaps to 50 px.
        assert_eq!(resize_right(&CONTAINER, 150.0, 160.0), Some(MIN_SCENE_PX));
        // Proposed right edge beyond the container caps at its end.
        assert_eq!(resize_right(&CONTAINER, 150.0, 500.0), Some(250.0));
        assert_eq!(resize_right(&CONTAINER, 150.0, 300.0), Some(150.0));
    }

    #[test]
    fn right_resize_rejected_without_minimum_room() {
        // Only 40 px between position and container end: reject, never
        // clamp below the floor.
        assert_eq!(resize_right(&CONTAINER, 370.0, 390.0), None);
    }

    #[test]
    fn left_resize_clamps_position_and_keeps_right_edge() {
        assert_eq!(resize_left(&CONTAINER, 300.0, 50.0), Some((100.0, 200.0)));
        assert_eq!(resize_left(&CONTAINER, 300.0, 200.0), Some((200.0, 100.0)));
        // Pushing past the floor pins the width at 50 px.
        assert_eq!(resize_left(&CONTAINER, 300.0, 290.0), Some((250.0, 50.0)));
    }

    #[test]
    fn left_resize_rejected_without_minimum_room() {
        assert_eq!(resize_left(&CONTAINER, 140.0, 120.0), None);
    }
}
