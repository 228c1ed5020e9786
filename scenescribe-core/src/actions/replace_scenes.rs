//! Atomic replacement of the working scene set
//!
//! Used after a backend analysis response, an SRT import or a project
//! load merge. The previous set is kept for rollback.

use crate::action::Action;
use crate::document::SceneDocument;
use crate::scene::Scene;

pub struct ReplaceScenesAction {
    scenes: Vec<Scene>,
    previous: Option<Vec<Scene>>,
}

impl ReplaceScenesAction {
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self {
            scenes,
            previous: None,
        }
    }
}

impl Action for ReplaceScenesAction {
    fn execute(&mut self, document: &mut SceneDocument) {
        self.previous = Some(std::mem::replace(document.scenes_mut(), self.scenes.clone()));
    }

    fn rollback(&mut self, document: &mut SceneDocument) {
        if let Some(previous) = self.previous.take() {
            *document.scenes_mut() = previous;
        }
    }

    fn description(&self) -> String {
        format!("Replace scenes ({} total)", self.scenes.len())
    }
}
