//! Integration tests for timeline geometry invariants
//!
//! Drives committed move/resize/insert sequences the way the editor's
//! interaction layer does — project, resolve containers, clamp, commit —
//! and checks the non-overlap and minimum-width invariants survive.

use scenescribe_core::action::ActionExecutor;
use scenescribe_core::actions::{InsertSceneAction, MoveSceneAction, ReplaceScenesAction, ResizeSceneAction};
use scenescribe_core::document::SceneDocument;
use scenescribe_core::insertion::plan_insert_at;
use scenescribe_core::interaction::{clamp_drag, resize_left, resize_right};
use scenescribe_core::layout::TimelineLayout;
use scenescribe_core::scene::{Scene, MIN_SCENE_MS};
use scenescribe_core::timecode::px_to_ms;
use uuid::Uuid;

const DURATION_MS: u64 = 20_000;

fn setup_executor() -> (ActionExecutor, Vec<Uuid>) {
    let mut document = SceneDocument::new();
    document.duration_ms = DURATION_MS;
    let mut executor = ActionExecutor::new(document);

    let scenes = vec![
        Scene::new(0, 2_000, "intro"),
        Scene::new(3_000, 4_000, "TALKING"),
        Scene::new(6_000, 8_000, "finale"),
    ];
    let ids = scenes.iter().map(|s| s.id).collect();
    executor.execute(Box::new(ReplaceScenesAction::new(scenes)));
    (executor, ids)
}

/// Commit a drag the way the timeline pane does: clamp the proposed
/// position into the container, convert to ms, push a move action.
/// TALKING elements take no interactions at all.
fn commit_drag(executor: &mut ActionExecutor, id: Uuid, proposed_position: f32) -> bool {
    let document = executor.document();
    let layout = TimelineLayout::compute(document.scenes(), document.duration_ms);
    let Some((element, container)) = layout.element(id) else {
        return false;
    };
    if element.talking {
        return false;
    }
    let Some(position) = clamp_drag(container, element.width, proposed_position) else {
        return false;
    };
    let start_ms = px_to_ms(position);
    let end_ms = px_to_ms(position + element.width);
    if end_ms.saturating_sub(start_ms) < MIN_SCENE_MS {
        return false;
    }
    executor.execute(Box::new(MoveSceneAction::new(id, start_ms, end_ms)));
    true
}

fn commit_resize_right(executor: &mut ActionExecutor, id: Uuid, proposed_right: f32) -> bool {
    let document = executor.document();
    let layout = TimelineLayout::compute(document.scenes(), document.duration_ms);
    let Some((element, container)) = layout.element(id) else {
        return false;
    };
    if element.talking {
        return false;
    }
    let Some(width) = resize_right(container, element.position, proposed_right) else {
        return false;
    };
    let start_ms = px_to_ms(element.position);
    let end_ms = px_to_ms(element.position + width);
    if end_ms.saturating_sub(start_ms) < MIN_SCENE_MS {
        return false;
    }
    executor.execute(Box::new(ResizeSceneAction::new(id, start_ms, end_ms)));
    true
}

fn commit_resize_left(executor: &mut ActionExecutor, id: Uuid, proposed_position: f32) -> bool {
    let document = executor.document();
    let layout = TimelineLayout::compute(document.scenes(), document.duration_ms);
    let Some((element, container)) = layout.element(id) else {
        return false;
    };
    if element.talking {
        return false;
    }
    let Some((position, width)) = resize_left(container, element.right_edge(), proposed_position)
    else {
        return false;
    };
    let start_ms = px_to_ms(position);
    let end_ms = px_to_ms(position + width);
    if end_ms.saturating_sub(start_ms) < MIN_SCENE_MS {
        return false;
    }
    executor.execute(Box::new(ResizeSceneAction::new(id, start_ms, end_ms)));
    true
}

fn assert_invariants(document: &SceneDocument) {
    assert!(document.is_non_overlapping(), "scenes overlap: {:?}", document.scenes());
    for scene in document.scenes() {
        assert!(
            scene.duration_ms() >= MIN_SCENE_MS,
            "scene below minimum width: {:?}",
            scene
        );
    }
}

#[test]
fn committed_interaction_sequences_preserve_invariants() {
    let (mut executor, ids) = setup_executor();

    // Drag the intro right into the TALKING block: clamped to its end - width.
    assert!(commit_drag(&mut executor, ids[0], 280.0));
    assert_invariants(executor.document());
    assert_eq!(executor.document().get_scene(ids[0]).unwrap().end_ms, 3_000);

    // Grow the finale well past the timeline end: capped at the edge.
    assert!(commit_resize_right(&mut executor, ids[2], 5_000.0));
    assert_invariants(executor.document());
    assert_eq!(executor.document().get_scene(ids[2]).unwrap().end_ms, DURATION_MS);

    // Pull the finale's left edge back over the TALKING block: clamped to
    // the block's end.
    assert!(commit_resize_left(&mut executor, ids[2], 100.0));
    assert_invariants(executor.document());
    assert_eq!(executor.document().get_scene(ids[2]).unwrap().start_ms, 4_000);
}

#[test]
fn shrinking_pins_at_the_minimum_width_floor() {
    let (mut executor, ids) = setup_executor();

    // Shrinking toward zero pins at the 500 ms floor.
    assert!(commit_resize_right(&mut executor, ids[0], 10.0));
    let scene = executor.document().get_scene(ids[0]).unwrap();
    assert_eq!(scene.duration_ms(), MIN_SCENE_MS);
    assert_invariants(executor.document());
}

#[test]
fn talking_scenes_never_move_or_resize() {
    let (mut executor, ids) = setup_executor();

    assert!(!commit_drag(&mut executor, ids[1], 100.0));
    assert!(!commit_resize_right(&mut executor, ids[1], 9_000.0));
    assert!(!commit_resize_left(&mut executor, ids[1], 100.0));

    let talking = executor.document().get_scene(ids[1]).unwrap();
    assert_eq!((talking.start_ms, talking.end_ms), (3_000, 4_000));
    assert_invariants(executor.document());
}

#[test]
fn insertion_inside_a_scene_leaves_the_array_unchanged() {
    let (executor, _) = setup_executor();
    let document = executor.document();
    let before: Vec<(u64, u64)> = document.scenes().iter().map(|s| (s.start_ms, s.end_ms)).collect();

    assert!(plan_insert_at(document.scenes(), DURATION_MS, 1_000).is_none());
    assert!(plan_insert_at(document.scenes(), DURATION_MS, 3_500).is_none());

    let after: Vec<(u64, u64)> = document.scenes().iter().map(|s| (s.start_ms, s.end_ms)).collect();
    assert_eq!(before, after);
}

#[test]
fn insertion_fills_the_gap_and_renumbers_display_ids() {
    let (mut executor, ids) = setup_executor();
    let planned = plan_insert_at(executor.document().scenes(), DURATION_MS, 4_500)
        .expect("gap between TALKING and finale");
    let planned_id = planned.id;
    executor.execute(Box::new(InsertSceneAction::new(planned)));

    let document = executor.document();
    assert_invariants(document);
    let inserted = document.get_scene(planned_id).unwrap();
    assert_eq!((inserted.start_ms, inserted.end_ms), (4_500, 6_000));
    assert!(!inserted.is_edited);
    assert!(inserted.audio_file.is_none());

    // Display ids follow sorted start order after the insert.
    assert_eq!(document.display_index(ids[0]), Some(1));
    assert_eq!(document.display_index(ids[1]), Some(2));
    assert_eq!(document.display_index(planned_id), Some(3));
    assert_eq!(document.display_index(ids[2]), Some(4));
}

#[test]
fn random_walk_of_commits_never_breaks_invariants() {
    let (mut executor, ids) = setup_executor();

    // A deterministic pseudo-random pointer walk across many commits.
    let mut seed: u64 = 0x5ce9e5c3;
    let mut next = || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) as f32
    };

    for round in 0..200 {
        let id = ids[round % ids.len()];
        let proposal = (next() % 2_200.0).floor();
        match round % 3 {
            0 => {
                commit_drag(&mut executor, id, proposal);
            }
            1 => {
                commit_resize_right(&mut executor, id, proposal);
            }
            _ => {
                commit_resize_left(&mut executor, id, proposal);
            }
        }
        assert_invariants(executor.document());
    }
}
