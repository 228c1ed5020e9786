//! Scene resize
//!
//! Commits an edge drag: new bounds validated against the container and
//! the 500 ms floor before this action is ever constructed.

use uuid::Uuid;

use crate::action::Action;
use crate::document::SceneDocument;

pub struct ResizeSceneAction {
    scene_id: Uuid,
    new_start_ms: u64,
    new_end_ms: u64,
    previous: Option<(u64, u64, bool)>,
}

impl ResizeSceneAction {
    pub fn new(scene_id: Uuid, new_start_ms: u64, new_end_ms: u64) -> Self {
        Self {
            scene_id,
            new_start_ms,
            new_end_ms,
            previous: None,
        }
    }
}

impl Action for ResizeSceneAction {
    fn execute(&mut self, document: &mut SceneDocument) {
        let mark_edited = document.edit_policy.mark_edited_on_structural;
        if let Some(scene) = document.get_scene_mut(self.scene_id) {
            self.previous = Some((scene.start_ms, scene.end_ms, scene.is_edited));
            scene.start_ms = self.new_start_ms;
            scene.end_ms = self.new_end_ms;
            if mark_edited {
                scene.is_edited = true;
            }
        }
    }

    fn rollback(&mut self, document: &mut SceneDocument) {
        let Some((start_ms, end_ms, is_edited)) = self.previous.take() else {
            return;
        };
        if let Some(scene) = document.get_scene_mut(self.scene_id) {
            scene.start_ms = start_ms;
            scene.end_ms = end_ms;
            scene.is_edited = is_edited;
        }
    }

    fn description(&self) -> String {
        "Resize scene".to_string()
    }
}
