//! Reanalysis merge
//!
//! Replaces the scenes that were sent for reanalysis with the service's
//! replacements, leaving every untouched scene (TALKING segments in
//! particular) in place. The executor's post-action sort restores start
//! order over the merged set.

use uuid::Uuid;

use crate::action::Action;
use crate::analysis::ReanalyzedScene;
use crate::document::SceneDocument;
use crate::scene::Scene;

pub struct MergeReanalysisAction {
    replaced_ids: Vec<Uuid>,
    replacements: Vec<ReanalyzedScene>,
    removed: Vec<Scene>,
    inserted_ids: Vec<Uuid>,
}

impl MergeReanalysisAction {
    /// `replaced_ids` are the scenes whose ranges were sent to the
    /// service; `replacements` is what came back for those ranges.
    pub fn new(replaced_ids: Vec<Uuid>, replacements: Vec<ReanalyzedScene>) -> Self {
        Self {
            replaced_ids,
            replacements,
            removed: Vec::new(),
            inserted_ids: Vec::new(),
        }
    }
}

impl Action for MergeReanalysisAction {
    fn execute(&mut self, document: &mut SceneDocument) {
        let scenes = document.scenes_mut();
        self.removed = scenes
            .iter()
            .filter(|s| self.replaced_ids.contains(&s.id))
            .cloned()
            .collect();
        scenes.retain(|s| !self.replaced_ids.contains(&s.id));

        self.inserted_ids.clear();
        for replacement in &self.replacements {
            let (start_ms, end_ms) = replacement.timestamp;
            if end_ms <= start_ms {
                continue;
            }
            let mut scene = Scene::new(start_ms, end_ms, replacement.description.clone());
            scene.audio_file = replacement.audio_file.clone();
            self.inserted_ids.push(scene.id);
            scenes.push(scene);
        }
    }

    fn rollback(&mut self, document: &mut SceneDocument) {
        let scenes = document.scenes_mut();
        scenes.retain(|s| !self.inserted_ids.contains(&s.id));
        scenes.append(&mut self.removed);
        self.inserted_ids.clear();
    }

    fn description(&self) -> String {
        format!("Merge reanalyzed scenes ({})", self.replacements.len())
    }
}
