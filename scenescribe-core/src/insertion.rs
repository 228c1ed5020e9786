//! Scene insertion at the play-head
//!
//! A new scene may be created in free timeline space only: never inside
//! an existing scene, never in a gap narrower than the minimum scene
//! width. The new scene fills the whole gap from the play-head to the
//! next scene (or the timeline end). Rejections are silent — the caller
//! simply gets no plan.

use crate::scene::{Scene, MIN_SCENE_PX, NEW_SCENE_TEXT};
use crate::timecode::ms_to_px;

/// Plan a scene insertion at `at_ms`, or reject with `None`.
pub fn plan_insert_at(scenes: &[Scene], duration_ms: u64, at_ms: u64) -> Option<Scene> {
    if scenes.iter().any(|s| s.contains_ms(at_ms)) {
        return None;
    }

    let previous_end = scenes
        .iter()
        .map(|s| s.end_ms)
        .filter(|&end| end <= at_ms)
        .max()
        .unwrap_or(0);
    let next_start = scenes
        .iter()
        .map(|s| s.start_ms)
        .filter(|&start| start > at_ms)
        .min()
        .unwrap_or(duration_ms);

    let position = ms_to_px(at_ms);
    if position < ms_to_px(previous_end) {
        return None;
    }
    let available = ms_to_px(next_start) - position;
    if available < MIN_SCENE_PX {
        return None;
    }

    Some(Scene::new(at_ms, next_start, NEW_SCENE_TEXT))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenes() -> Vec<Scene> {
        vec![Scene::new(1_000, 2_000, "a"), Scene::new(5_000, 6_000, "b")]
    }

    #[test]
    fn fills_the_gap_up_to_the_next_scene() {
        let planned = plan_insert_at(&scenes(), 10_000, 3_000).expect("gap is wide enough");
        assert_eq!(planned.start_ms, 3_000);
        assert_eq!(planned.end_ms, 5_000);
        assert_eq!(planned.description, NEW_SCENE_TEXT);
        assert!(planned.audio_file.is_none());
        assert!(!planned.is_edited);
    }

    #[test]
    fn extends_to_the_timeline_end_after_the_last_scene() {
        let planned = plan_insert_at(&scenes(), 10_000, 7_000).expect("tail gap");
        assert_eq!(planned.end_ms, 10_000);
    }

    #[test]
    fn rejected_inside_an_existing_scene() {
        assert!(plan_insert_at(&scenes(), 10_000, 1_500).is_none());
        // Start edge is inside, end edge is not.
        assert!(plan_insert_at(&scenes(), 10_000, 1_000).is_none());
        assert!(plan_insert_at(&scenes(), 10_000, 2_000).is_some());
    }

    #[test]
    fn rejected_when_the_gap_is_below_minimum_width() {
        // 400 ms before the next scene: under the 500 ms floor.
        assert!(plan_insert_at(&scenes(), 10_000, 4_600).is_none());
        // Exactly 500 ms is allowed.
        assert!(plan_insert_at(&scenes(), 10_000, 4_500).is_some());
    }

    #[test]
    fn rejected_at_the_very_end_of_the_timeline() {
        assert!(plan_insert_at(&scenes(), 10_000, 9_800).is_none());
    }
}
