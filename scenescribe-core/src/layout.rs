//! Timeline pixel projection and boundary resolution
//!
//! `TimelineElement` is a scene projected into pixel space; `Container`
//! is the maximal span an element may occupy without intruding on a
//! neighbor. Both are derived wholesale from the current scene array —
//! a single move can shift two neighbors' boundaries, so nothing here is
//! incremental. The projection is disposable: it is recomputed after
//! every committed mutation and never written back to.

use uuid::Uuid;

use crate::scene::Scene;
use crate::timecode::ms_to_px;

/// A scene projected into timeline pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineElement {
    pub id: Uuid,

    /// 1-based display index in start order
    pub index: usize,

    /// Left edge in pixels
    pub position: f32,

    /// Width in pixels
    pub width: f32,

    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
    pub talking: bool,
    pub has_audio: bool,
}

impl TimelineElement {
    pub fn right_edge(&self) -> f32 {
        self.position + self.width
    }
}

/// Maximal pixel span an element's drag/resize may occupy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Container {
    pub start: f32,
    pub end: f32,
}

impl Container {
    pub fn width(&self) -> f32 {
        self.end - self.start
    }
}

/// The full derived projection for one revision of the scene array.
#[derive(Clone, Debug, Default)]
pub struct TimelineLayout {
    /// Elements sorted by position
    pub elements: Vec<TimelineElement>,

    /// Containers parallel to `elements`
    pub containers: Vec<Container>,

    /// Full timeline extent in pixels
    pub width: f32,
}

impl TimelineLayout {
    /// Project the scene array at the fixed scale and resolve every
    /// element's container. Pure: same scenes and duration, same layout.
    pub fn compute(scenes: &[Scene], duration_ms: u64) -> Self {
        let width = ms_to_px(duration_ms);
        let elements = project(scenes);
        let containers = resolve_containers(&elements, width);
        Self {
            elements,
            containers,
            width,
        }
    }

    pub fn element(&self, id: Uuid) -> Option<(&TimelineElement, &Container)> {
        self.elements
            .iter()
            .position(|e| e.id == id)
            .map(|i| (&self.elements[i], &self.containers[i]))
    }
}

/// Project scenes into sorted pixel-space elements with display indices.
pub fn project(scenes: &[Scene]) -> Vec<TimelineElement> {
    let mut elements: Vec<TimelineElement> = scenes
        .iter()
        .map(|scene| TimelineElement {
            id: scene.id,
            index: 0,
            position: ms_to_px(scene.start_ms),
            width: ms_to_px(scene.duration_ms()),
            start_ms: scene.start_ms,
            end_ms: scene.end_ms,
            text: scene.description.clone(),
            talking: scene.is_talking(),
            has_audio: scene.audio_file.is_some(),
        })
        .collect();
    elements.sort_by(|a, b| a.position.total_cmp(&b.position));
    for (i, element) in elements.iter_mut().enumerate() {
        element.index = i + 1;
    }
    elements
}

/// Resolve the container for each element of a position-sorted slice.
///
/// TALKING elements are containers unto themselves: fixed obstacles whose
/// extent is exactly their own. Every other element is bounded by the end
/// of its nearest earlier neighbor (0 when first) and the position of its
/// nearest later neighbor (the timeline width when last).
pub fn resolve_containers(sorted: &[TimelineElement], timeline_width: f32) -> Vec<Container> {
    sorted
        .iter()
        .enumerate()
        .map(|(i, element)| {
            if element.talking {
                return Container {
                    start: element.position,
                    end: element.right_edge(),
                };
            }
            let prev_boundary = if i > 0 { sorted[i - 1].right_edge() } else { 0.0 };
            let next_boundary = sorted
                .get(i + 1)
                .map(|next| next.position)
                .unwrap_or(timeline_width);
            Container {
                start: prev_boundary.min(element.position),
                end: next_boundary,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_of(intervals: &[(u64, u64, &str)], duration_ms: u64) -> TimelineLayout {
        let scenes: Vec<Scene> = intervals
            .iter()
            .map(|&(start, end, text)| Scene::new(start, end, text))
            .collect();
        TimelineLayout::compute(&scenes, duration_ms)
    }

    #[test]
    fn container_example_from_two_scenes() {
        // A=[0,1000), B=[2000,3000) on a 5000 ms timeline (500 px):
        // A may grow up to B's start, B may reach back to A's end.
        let layout = layout_of(&[(0, 1_000, "a"), (2_000, 3_000, "b")], 5_000);
        assert_eq!(layout.containers[0], Container { start: 0.0, end: 200.0 });
        assert_eq!(layout.containers[1], Container { start: 100.0, end: 500.0 });
    }

    #[test]
    fn talking_elements_are_their_own_container() {
        let layout = layout_of(
            &[(0, 1_000, "a"), (1_000, 2_000, "TALKING"), (3_000, 4_000, "b")],
            5_000,
        );
        assert_eq!(layout.containers[1], Container { start: 100.0, end: 200.0 });
        // The talking block still bounds its neighbors.
        assert_eq!(layout.containers[0].end, 100.0);
        assert_eq!(layout.containers[2].start, 200.0);
    }

    #[test]
    fn display_indices_follow_sorted_position() {
        let layout = layout_of(&[(3_000, 4_000, "late"), (0, 1_000, "early")], 5_000);
        assert_eq!(layout.elements[0].text, "early");
        assert_eq!(layout.elements[0].index, 1);
        assert_eq!(layout.elements[1].text, "late");
        assert_eq!(layout.elements[1].index, 2);
    }

    #[test]
    fn projection_is_pure() {
        let scenes = vec![Scene::new(0, 1_000, "a"), Scene::new(2_000, 3_000, "b")];
        let first = TimelineLayout::compute(&scenes, 5_000);
        let second = TimelineLayout::compute(&scenes, 5_000);
        assert_eq!(first.elements, second.elements);
        assert_eq!(first.containers, second.containers);
    }
}
