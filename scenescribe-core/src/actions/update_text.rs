//! Scene text edit
//!
//! Editing text marks the scene edited and always invalidates any
//! rendered narration: stale audio would no longer match the words.

use uuid::Uuid;

use crate::action::Action;
use crate::document::SceneDocument;

pub struct UpdateSceneTextAction {
    scene_id: Uuid,
    new_text: String,
    previous: Option<(String, Option<String>, bool)>,
}

impl UpdateSceneTextAction {
    pub fn new(scene_id: Uuid, new_text: impl Into<String>) -> Self {
        Self {
            scene_id,
            new_text: new_text.into(),
            previous: None,
        }
    }
}

impl Action for UpdateSceneTextAction {
    fn execute(&mut self, document: &mut SceneDocument) {
        if let Some(scene) = document.get_scene_mut(self.scene_id) {
            self.previous = Some((
                std::mem::replace(&mut scene.description, self.new_text.clone()),
                scene.audio_file.take(),
                scene.is_edited,
            ));
            scene.is_edited = true;
        }
    }

    fn rollback(&mut self, document: &mut SceneDocument) {
        let Some((text, audio_file, is_edited)) = self.previous.take() else {
            return;
        };
        if let Some(scene) = document.get_scene_mut(self.scene_id) {
            scene.description = text;
            scene.audio_file = audio_file;
            scene.is_edited = is_edited;
        }
    }

    fn description(&self) -> String {
        "Edit scene description".to_string()
    }
}
