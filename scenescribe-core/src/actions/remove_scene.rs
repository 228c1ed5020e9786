//! Scene deletion
//!
//! Removes one scene. Other scenes keep their time fields; only the
//! derived display indices shift.

use uuid::Uuid;

use crate::action::Action;
use crate::document::SceneDocument;
use crate::scene::Scene;

pub struct RemoveSceneAction {
    scene_id: Uuid,
    removed: Option<Scene>,
}

impl RemoveSceneAction {
    pub fn new(scene_id: Uuid) -> Self {
        Self {
            scene_id,
            removed: None,
        }
    }
}

impl Action for RemoveSceneAction {
    fn execute(&mut self, document: &mut SceneDocument) {
        let scenes = document.scenes_mut();
        if let Some(index) = scenes.iter().position(|s| s.id == self.scene_id) {
            self.removed = Some(scenes.remove(index));
        }
    }

    fn rollback(&mut self, document: &mut SceneDocument) {
        if let Some(scene) = self.removed.take() {
            document.scenes_mut().push(scene);
        }
    }

    fn description(&self) -> String {
        "Delete scene".to_string()
    }
}
