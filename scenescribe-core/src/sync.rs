//! Playback synchronization decisions
//!
//! The editor samples the transport clock once per rendered frame while
//! playing and applies these decisions to the per-scene narration sinks.
//! Keeping the decision pure means the phase-lock rules are testable
//! without an audio device: the scene whose interval contains the clock
//! gets seek-and-play when its sink is idle, everything else gets pause.

use crate::scene::Scene;

/// What to do with one scene's narration sink this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NarrationCommand {
    /// Seek the sink to `offset` seconds into the clip and start it.
    SeekAndPlay { offset: f64 },
    /// Ensure the sink is paused.
    Pause,
    /// Leave the sink as it is (already playing in phase).
    Continue,
}

/// Decide this frame's command for one scene's narration.
///
/// `audio_duration` is the rendered clip's own length; a clip shorter
/// than its scene window goes quiet once the offset passes its end.
pub fn narration_command(
    scene: &Scene,
    clock_seconds: f64,
    playing: bool,
    audio_duration: f64,
    sink_paused: bool,
) -> NarrationCommand {
    if !playing || !scene.contains_seconds(clock_seconds) {
        return NarrationCommand::Pause;
    }
    let offset = clock_seconds - scene.start_ms as f64 / 1_000.0;
    if offset >= audio_duration {
        return NarrationCommand::Pause;
    }
    if sink_paused {
        NarrationCommand::SeekAndPlay { offset }
    } else {
        NarrationCommand::Continue
    }
}

/// Offset to seek a scene's narration to after a timeline click, when the
/// click lands inside the scene and within the clip's duration.
pub fn click_seek_offset(scene: &Scene, clicked_seconds: f64, audio_duration: f64) -> Option<f64> {
    if !scene.contains_seconds(clicked_seconds) {
        return None;
    }
    let offset = clicked_seconds - scene.start_ms as f64 / 1_000.0;
    (offset < audio_duration).then_some(offset)
}

/// Margin at the visible edge that triggers a recenter, in pixels.
pub const AUTOSCROLL_MARGIN: f32 = 50.0;

/// Target scroll offset keeping the play-head in view, or `None` when no
/// scroll is needed. The target centers the play-head; the view animates
/// toward it rather than jumping.
pub fn autoscroll_target(playhead: f32, scroll_offset: f32, visible_width: f32) -> Option<f32> {
    let visible_start = scroll_offset;
    let visible_end = scroll_offset + visible_width;
    if playhead < visible_start || playhead > visible_end - AUTOSCROLL_MARGIN {
        Some((playhead - visible_width / 2.0).max(0.0))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrated_scene() -> Scene {
        let mut scene = Scene::new(2_000, 3_000, "a");
        scene.audio_file = Some("clips/a.mp3".into());
        scene
    }

    #[test]
    fn idle_sink_inside_the_scene_seeks_and_plays() {
        // Clock 2.5 s in a [2000,3000) scene with a 2 s clip: offset 0.5.
        let command = narration_command(&narrated_scene(), 2.5, true, 2.0, true);
        assert_eq!(command, NarrationCommand::SeekAndPlay { offset: 0.5 });
    }

    #[test]
    fn playing_sink_in_phase_is_left_alone() {
        let command = narration_command(&narrated_scene(), 2.5, true, 2.0, false);
        assert_eq!(command, NarrationCommand::Continue);
    }

    #[test]
    fn inactive_scene_is_paused_regardless_of_sink_state() {
        let scene = narrated_scene();
        assert_eq!(narration_command(&scene, 4.9, true, 2.0, false), NarrationCommand::Pause);
        assert_eq!(narration_command(&scene, 4.9, true, 2.0, true), NarrationCommand::Pause);
    }

    #[test]
    fn offset_past_clip_duration_pauses() {
        // Clip is 0.3 s but the clock sits 0.5 s into the scene.
        let command = narration_command(&narrated_scene(), 2.5, true, 0.3, false);
        assert_eq!(command, NarrationCommand::Pause);
    }

    #[test]
    fn paused_transport_silences_narration() {
        let command = narration_command(&narrated_scene(), 2.5, false, 2.0, false);
        assert_eq!(command, NarrationCommand::Pause);
    }

    #[test]
    fn click_seeks_only_within_clip_duration() {
        let scene = narrated_scene();
        assert_eq!(click_seek_offset(&scene, 2.5, 2.0), Some(0.5));
        assert_eq!(click_seek_offset(&scene, 2.9, 0.5), None);
        assert_eq!(click_seek_offset(&scene, 5.0, 2.0), None);
    }

    #[test]
    fn autoscroll_recenters_near_the_edge() {
        // Play-head within 50 px of the right edge: recenter on it.
        assert_eq!(autoscroll_target(960.0, 0.0, 1_000.0), Some(460.0));
        // Off the left of the view.
        assert_eq!(autoscroll_target(10.0, 500.0, 1_000.0), Some(0.0));
        // Comfortably visible: stay put.
        assert_eq!(autoscroll_target(500.0, 0.0, 1_000.0), None);
    }
}
