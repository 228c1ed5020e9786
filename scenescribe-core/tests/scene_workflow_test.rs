//! Integration tests for scene editing workflows
//!
//! Tests end-to-end document operations through the action executor:
//! text edits, deletion, structural edits under both edit policies,
//! narration splicing, reanalysis merging, and undo/redo.

use scenescribe_core::action::ActionExecutor;
use scenescribe_core::actions::{
    MergeReanalysisAction, MoveSceneAction, RemoveSceneAction, ReplaceScenesAction,
    ResizeSceneAction, SpliceAudioAction, UpdateSceneTextAction,
};
use scenescribe_core::analysis::{ReanalyzedScene, RenderedClip};
use scenescribe_core::document::SceneDocument;
use scenescribe_core::scene::Scene;
use uuid::Uuid;

/// Executor holding three scenes, the middle one a TALKING segment.
fn setup_executor() -> (ActionExecutor, Vec<Uuid>) {
    let mut document = SceneDocument::new();
    document.duration_ms = 10_000;
    let mut executor = ActionExecutor::new(document);

    let mut first = Scene::new(0, 1_500, "a wide shot of the harbor");
    first.audio_file = Some("clips/harbor.mp3".into());
    let talking = Scene::new(2_000, 3_000, "TALKING");
    let last = Scene::new(4_000, 5_500, "close-up of the captain");
    let ids = vec![first.id, talking.id, last.id];

    executor.execute(Box::new(ReplaceScenesAction::new(vec![
        first, talking, last,
    ])));
    (executor, ids)
}

#[test]
fn text_edit_marks_edited_and_invalidates_audio() {
    let (mut executor, ids) = setup_executor();
    assert!(executor.document().get_scene(ids[0]).unwrap().audio_file.is_some());

    executor.execute(Box::new(UpdateSceneTextAction::new(
        ids[0],
        "a wide shot of the harbor at dawn",
    )));

    let scene = executor.document().get_scene(ids[0]).unwrap();
    assert_eq!(scene.description, "a wide shot of the harbor at dawn");
    assert!(scene.is_edited);
    assert!(scene.audio_file.is_none());
}

#[test]
fn text_edit_undo_restores_audio_and_flags() {
    let (mut executor, ids) = setup_executor();
    executor.execute(Box::new(UpdateSceneTextAction::new(ids[0], "changed")));
    executor.undo();

    let scene = executor.document().get_scene(ids[0]).unwrap();
    assert_eq!(scene.description, "a wide shot of the harbor");
    assert_eq!(scene.audio_file.as_deref(), Some("clips/harbor.mp3"));
    assert!(!scene.is_edited);

    executor.redo();
    let scene = executor.document().get_scene(ids[0]).unwrap();
    assert_eq!(scene.description, "changed");
    assert!(scene.audio_file.is_none());
}

#[test]
fn remove_keeps_other_scene_times_and_shifts_indices() {
    let (mut executor, ids) = setup_executor();
    executor.execute(Box::new(RemoveSceneAction::new(ids[1])));

    let document = executor.document();
    assert_eq!(document.scenes().len(), 2);
    assert_eq!(document.get_scene(ids[2]).unwrap().start_ms, 4_000);
    assert_eq!(document.display_index(ids[2]), Some(2));

    executor.undo();
    assert_eq!(executor.document().scenes().len(), 3);
    assert_eq!(executor.document().display_index(ids[1]), Some(2));
}

#[test]
fn structural_edits_mark_edited_under_default_policy() {
    let (mut executor, ids) = setup_executor();
    executor.execute(Box::new(MoveSceneAction::new(ids[0], 200, 1_700)));

    let scene = executor.document().get_scene(ids[0]).unwrap();
    assert_eq!((scene.start_ms, scene.end_ms), (200, 1_700));
    assert!(scene.is_edited);

    executor.execute(Box::new(ResizeSceneAction::new(ids[2], 4_000, 6_000)));
    assert!(executor.document().get_scene(ids[2]).unwrap().is_edited);
}

#[test]
fn structural_edits_leave_flag_alone_when_policy_disabled() {
    let (mut executor, ids) = setup_executor();
    let mut document = executor.document().clone();
    document.edit_policy.mark_edited_on_structural = false;
    executor.reset(document);

    executor.execute(Box::new(MoveSceneAction::new(ids[0], 200, 1_700)));
    executor.execute(Box::new(ResizeSceneAction::new(ids[2], 4_000, 6_000)));

    assert!(!executor.document().get_scene(ids[0]).unwrap().is_edited);
    assert!(!executor.document().get_scene(ids[2]).unwrap().is_edited);
}

#[test]
fn move_undo_redo_round_trips() {
    let (mut executor, ids) = setup_executor();
    executor.execute(Box::new(MoveSceneAction::new(ids[2], 4_500, 6_000)));

    executor.undo();
    let scene = executor.document().get_scene(ids[2]).unwrap();
    assert_eq!((scene.start_ms, scene.end_ms), (4_000, 5_500));
    assert!(!scene.is_edited);

    executor.redo();
    let scene = executor.document().get_scene(ids[2]).unwrap();
    assert_eq!((scene.start_ms, scene.end_ms), (4_500, 6_000));
}

#[test]
fn splice_matches_by_exact_range_only() {
    let (mut executor, ids) = setup_executor();
    executor.execute(Box::new(SpliceAudioAction::new(vec![
        RenderedClip {
            start: 4_000,
            end: 5_500,
            audio_file: "clips/captain.mp3".into(),
        },
        RenderedClip {
            start: 7_000,
            end: 8_000,
            audio_file: "clips/orphan.mp3".into(),
        },
    ])));

    let document = executor.document();
    let spliced = document.get_scene(ids[2]).unwrap();
    assert_eq!(spliced.audio_file.as_deref(), Some("clips/captain.mp3"));
    assert!(spliced.is_edited);
    // The unmatched clip changed nothing.
    assert!(!document.get_scene(ids[0]).unwrap().is_edited);

    executor.undo();
    let scene = executor.document().get_scene(ids[2]).unwrap();
    assert!(scene.audio_file.is_none());
    assert!(!scene.is_edited);
}

#[test]
fn reanalysis_merge_replaces_ranges_and_keeps_talking() {
    let (mut executor, ids) = setup_executor();
    executor.execute(Box::new(MergeReanalysisAction::new(
        vec![ids[0], ids[2]],
        vec![
            ReanalyzedScene {
                timestamp: (0, 1_800),
                description: "the harbor, reframed".into(),
                audio_file: Some("clips/harbor2.mp3".into()),
            },
            ReanalyzedScene {
                timestamp: (4_000, 5_000),
                description: "the captain, reframed".into(),
                audio_file: None,
            },
        ],
    )));

    let document = executor.document();
    assert_eq!(document.scenes().len(), 3);
    assert!(document.is_non_overlapping());
    // The TALKING segment survived untouched, in sorted position.
    assert_eq!(document.display_index(ids[1]), Some(2));
    assert_eq!(document.scenes()[0].description, "the harbor, reframed");
    assert_eq!(document.scenes()[2].description, "the captain, reframed");

    executor.undo();
    let document = executor.document();
    assert_eq!(document.scenes().len(), 3);
    assert_eq!(document.get_scene(ids[0]).unwrap().end_ms, 1_500);
}

#[test]
fn replace_all_resets_the_working_set_atomically() {
    let (mut executor, _) = setup_executor();
    let replacement = vec![Scene::new(100, 900, "only scene")];
    executor.execute(Box::new(ReplaceScenesAction::new(replacement)));

    assert_eq!(executor.document().scenes().len(), 1);
    executor.undo();
    assert_eq!(executor.document().scenes().len(), 3);
}
