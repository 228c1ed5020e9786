//! Scene insertion
//!
//! Adds the scene planned by [`crate::insertion::plan_insert_at`]. The
//! executor re-sorts after every action, which reassigns display indices
//! across the whole set.

use uuid::Uuid;

use crate::action::Action;
use crate::document::SceneDocument;
use crate::scene::Scene;

pub struct InsertSceneAction {
    scene: Scene,
    inserted: Option<Uuid>,
}

impl InsertSceneAction {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            inserted: None,
        }
    }
}

impl Action for InsertSceneAction {
    fn execute(&mut self, document: &mut SceneDocument) {
        self.inserted = Some(self.scene.id);
        document.scenes_mut().push(self.scene.clone());
    }

    fn rollback(&mut self, document: &mut SceneDocument) {
        if let Some(id) = self.inserted.take() {
            document.scenes_mut().retain(|s| s.id != id);
        }
    }

    fn description(&self) -> String {
        "Insert scene".to_string()
    }
}
