//! Scene document
//!
//! The document owns the scene collection and the project metadata around
//! it. It is the single source of truth: the timeline's pixel projection
//! is re-derived from it after every committed mutation and is never
//! written directly. Mutable access is deliberately `pub(crate)` so all
//! changes flow through the action system.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scene::Scene;

/// Policy knobs for how edits mark scenes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EditPolicy {
    /// Whether committed moves/resizes set `is_edited`, like text edits
    /// do. On by default so the encode gate sees structural work.
    pub mark_edited_on_structural: bool,
}

impl Default for EditPolicy {
    fn default() -> Self {
        Self {
            mark_edited_on_structural: true,
        }
    }
}

/// Output artifacts from the most recent encode.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EncodeOutputs {
    pub video_url: Option<String>,
    pub srt_url: Option<String>,
    pub talking_srt_url: Option<String>,
}

/// The editing session's state: scenes plus project metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Scenes, kept sorted by `start_ms`
    scenes: Vec<Scene>,

    /// File name of the uploaded video
    pub video_name: Option<String>,

    /// Video length in milliseconds; fixes the timeline extent
    pub duration_ms: u64,

    /// Thumbnail path captured at upload time
    pub thumbnail: Option<String>,

    /// URLs returned by the last encode
    pub outputs: EncodeOutputs,

    /// Edit-marking policy
    pub edit_policy: EditPolicy,
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self {
            scenes: Vec::new(),
            video_name: None,
            duration_ms: 0,
            thumbnail: None,
            outputs: EncodeOutputs::default(),
            edit_policy: EditPolicy::default(),
        }
    }
}

impl SceneDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scenes in start order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn get_scene(&self, id: Uuid) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    pub(crate) fn get_scene_mut(&mut self, id: Uuid) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|s| s.id == id)
    }

    pub(crate) fn scenes_mut(&mut self) -> &mut Vec<Scene> {
        &mut self.scenes
    }

    /// Restore start-order after a structural mutation.
    pub(crate) fn sort_scenes(&mut self) {
        self.scenes.sort_by_key(|s| s.start_ms);
    }

    /// 1-based display index of a scene in start order.
    pub fn display_index(&self, id: Uuid) -> Option<usize> {
        self.scenes.iter().position(|s| s.id == id).map(|i| i + 1)
    }

    /// The scene whose interval contains `ms`, if any.
    pub fn scene_at(&self, ms: u64) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.contains_ms(ms))
    }

    /// The scene active at a playback clock position in seconds.
    pub fn active_scene(&self, seconds: f64) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.contains_seconds(seconds))
    }

    /// Whether `candidate` overlaps any scene other than `ignore`.
    pub fn overlaps_existing(&self, candidate: &Scene, ignore: Option<Uuid>) -> bool {
        self.scenes
            .iter()
            .filter(|s| Some(s.id) != ignore)
            .any(|s| s.overlaps(candidate))
    }

    /// Pairwise non-overlap check over the whole set.
    pub fn is_non_overlapping(&self) -> bool {
        self.scenes
            .windows(2)
            .all(|pair| pair[0].end_ms <= pair[1].start_ms)
    }

    /// Scenes eligible for description editing (everything but TALKING).
    pub fn narration_scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter().filter(|s| !s.is_talking())
    }

    /// Encode gate: every narration scene has been touched by a human.
    pub fn all_edited(&self) -> bool {
        let mut any = false;
        for scene in self.narration_scenes() {
            any = true;
            if !scene.is_edited {
                return false;
            }
        }
        any
    }

    /// Encode gate alternative: every narration scene has rendered audio.
    pub fn all_have_audio(&self) -> bool {
        let mut any = false;
        for scene in self.narration_scenes() {
            any = true;
            if scene.audio_file.is_none() {
                return false;
            }
        }
        any
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(scenes: Vec<Scene>) -> SceneDocument {
        let mut doc = SceneDocument::new();
        doc.duration_ms = 10_000;
        *doc.scenes_mut() = scenes;
        doc.sort_scenes();
        doc
    }

    #[test]
    fn active_scene_uses_half_open_seconds() {
        let doc = doc_with(vec![Scene::new(2_000, 3_000, "a")]);
        assert!(doc.active_scene(2.5).is_some());
        assert!(doc.active_scene(3.0).is_none());
        assert!(doc.active_scene(4.9).is_none());
    }

    #[test]
    fn encode_gates_ignore_talking_scenes() {
        let mut edited = Scene::new(0, 1_000, "described");
        edited.is_edited = true;
        let talking = Scene::new(1_000, 2_000, "TALKING");
        let doc = doc_with(vec![edited, talking]);
        assert!(doc.all_edited());
        assert!(!doc.all_have_audio());
    }

    #[test]
    fn encode_gates_are_false_for_empty_documents() {
        let doc = doc_with(Vec::new());
        assert!(!doc.all_edited());
        assert!(!doc.all_have_audio());
    }
}
