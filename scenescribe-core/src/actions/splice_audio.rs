//! Narration splice
//!
//! Merges rendered narration clips back into the document. Clips match
//! scenes by exact start/end; matched scenes get the clip and are marked
//! edited. Clips with no matching scene are ignored.

use uuid::Uuid;

use crate::action::Action;
use crate::analysis::RenderedClip;
use crate::document::SceneDocument;

pub struct SpliceAudioAction {
    clips: Vec<RenderedClip>,
    previous: Vec<(Uuid, Option<String>, bool)>,
}

impl SpliceAudioAction {
    pub fn new(clips: Vec<RenderedClip>) -> Self {
        Self {
            clips,
            previous: Vec::new(),
        }
    }
}

impl Action for SpliceAudioAction {
    fn execute(&mut self, document: &mut SceneDocument) {
        self.previous.clear();
        for clip in &self.clips {
            let Some(scene) = document
                .scenes_mut()
                .iter_mut()
                .find(|s| s.start_ms == clip.start && s.end_ms == clip.end)
            else {
                continue;
            };
            self.previous
                .push((scene.id, scene.audio_file.clone(), scene.is_edited));
            scene.audio_file = Some(clip.audio_file.clone());
            scene.is_edited = true;
        }
    }

    fn rollback(&mut self, document: &mut SceneDocument) {
        for (id, audio_file, is_edited) in self.previous.drain(..) {
            if let Some(scene) = document.get_scene_mut(id) {
                scene.audio_file = audio_file;
                scene.is_edited = is_edited;
            }
        }
    }

    fn description(&self) -> String {
        format!("Apply narration audio ({} clips)", self.clips.len())
    }
}
