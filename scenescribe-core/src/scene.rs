//! Scene entity
//!
//! A scene is a time-bounded interval with description text and an
//! optional rendered narration clip. Scenes whose description is the
//! reserved sentinel "TALKING" mark speech segments: they are fixed on the
//! timeline, excluded from text editing and pacing, and act as obstacles
//! for their neighbors.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reserved description marking a speech interval.
pub const TALKING_SENTINEL: &str = "TALKING";

/// Minimum scene width on the timeline, in pixels.
pub const MIN_SCENE_PX: f32 = 50.0;

/// Minimum scene duration, in milliseconds (50 px at 1 px = 10 ms).
pub const MIN_SCENE_MS: u64 = 500;

/// Placeholder text for scenes created through timeline insertion.
pub const NEW_SCENE_TEXT: &str = "New Scene";

/// A described interval of the video.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scene {
    /// Stable identity, preserved across edits and re-sorts
    pub id: Uuid,

    /// Interval start, milliseconds from the timeline origin
    pub start_ms: u64,

    /// Interval end, exclusive; always greater than `start_ms`
    pub end_ms: u64,

    /// Description text, or the reserved "TALKING" sentinel
    pub description: String,

    /// Rendered narration clip for this scene; `None` until generated,
    /// and cleared again whenever the text changes
    pub audio_file: Option<String>,

    /// True once a human has touched this scene since the last generation
    pub is_edited: bool,
}

impl Scene {
    pub fn new(start_ms: u64, end_ms: u64, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_ms,
            end_ms,
            description: description.into(),
            audio_file: None,
            is_edited: false,
        }
    }

    /// Duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Whether this is a reserved speech interval.
    ///
    /// Whole-string, case-insensitive match: prose that merely mentions
    /// the word is not captured.
    pub fn is_talking(&self) -> bool {
        self.description.trim().eq_ignore_ascii_case(TALKING_SENTINEL)
    }

    /// Whether `ms` falls inside the half-open interval `[start, end)`.
    pub fn contains_ms(&self, ms: u64) -> bool {
        ms >= self.start_ms && ms < self.end_ms
    }

    /// Whether a clock position in seconds falls inside this scene.
    pub fn contains_seconds(&self, seconds: f64) -> bool {
        let ms = seconds * 1_000.0;
        ms >= self.start_ms as f64 && ms < self.end_ms as f64
    }

    /// Whether two scenes occupy overlapping time ranges.
    pub fn overlaps(&self, other: &Scene) -> bool {
        self.start_ms < other.end_ms && other.start_ms < self.end_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn talking_detection_is_case_insensitive_and_whole_string() {
        assert!(Scene::new(0, 1_000, "TALKING").is_talking());
        assert!(Scene::new(0, 1_000, "talking").is_talking());
        assert!(Scene::new(0, 1_000, "  Talking ").is_talking());
        assert!(!Scene::new(0, 1_000, "people are talking here").is_talking());
    }

    #[test]
    fn interval_containment_is_half_open() {
        let scene = Scene::new(2_000, 3_000, "a");
        assert!(scene.contains_ms(2_000));
        assert!(scene.contains_ms(2_999));
        assert!(!scene.contains_ms(3_000));
        assert!(scene.contains_seconds(2.5));
        assert!(!scene.contains_seconds(3.0));
    }

    #[test]
    fn overlap_is_symmetric_and_excludes_adjacency() {
        let a = Scene::new(0, 1_000, "a");
        let b = Scene::new(1_000, 2_000, "b");
        let c = Scene::new(500, 1_500, "c");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }
}
