//! Transport clock and narration playback
//!
//! The transport is the single authoritative clock: while playing it
//! advances from a monotonic instant once per rendered frame (the
//! repaint loop is the sampling loop; pausing drops the instant so no
//! stale delta survives a resume). The narration mixer holds one rodio
//! sink per scene with rendered audio and applies the core's per-frame
//! sync decisions to keep each clip phase-locked to the transport.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::warn;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use scenescribe_core::document::SceneDocument;
use scenescribe_core::scene::Scene;
use scenescribe_core::sync::{self, NarrationCommand};
use uuid::Uuid;

/// Authoritative playback clock.
pub struct Transport {
    playing: bool,
    position: f64,
    duration: f64,
    last_instant: Option<Instant>,
}

impl Transport {
    pub fn new() -> Self {
        Self {
            playing: false,
            position: 0.0,
            duration: 0.0,
            last_instant: None,
        }
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    /// Current position in seconds.
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_duration(&mut self, seconds: f64) {
        self.duration = seconds;
        self.position = self.position.min(self.duration);
    }

    pub fn play(&mut self) {
        if self.duration <= 0.0 {
            return;
        }
        if self.position >= self.duration {
            self.position = 0.0;
        }
        self.playing = true;
        self.last_instant = Some(Instant::now());
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.last_instant = None;
    }

    pub fn seek(&mut self, seconds: f64) {
        self.position = seconds.clamp(0.0, self.duration);
        // Restart the delta from here so a seek never jumps twice.
        if self.playing {
            self.last_instant = Some(Instant::now());
        }
    }

    /// Advance the clock by the wall time since the previous tick.
    /// Stops at the end of the timeline.
    pub fn tick(&mut self) {
        if !self.playing {
            return;
        }
        let now = Instant::now();
        if let Some(previous) = self.last_instant {
            self.position += now.duration_since(previous).as_secs_f64();
            if self.position >= self.duration {
                self.position = self.duration;
                self.pause();
                return;
            }
        }
        self.last_instant = Some(now);
    }
}

/// One loaded narration clip.
struct NarrationSlot {
    sink: Sink,
    duration: f64,
    source_path: PathBuf,
}

/// Per-scene narration sinks driven by the transport.
pub struct NarrationMixer {
    stream: Option<OutputStream>,
    slots: HashMap<Uuid, NarrationSlot>,
    volume: f32,
    /// Scenes whose audio file could not be opened, to log only once
    missing: HashMap<Uuid, String>,
}

impl NarrationMixer {
    pub fn new() -> Self {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => Some(stream),
            Err(err) => {
                warn!("audio output unavailable, narration muted: {err}");
                None
            }
        };
        Self {
            stream,
            slots: HashMap::new(),
            volume: 1.0,
            missing: HashMap::new(),
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        for slot in self.slots.values() {
            slot.sink.set_volume(volume);
        }
    }

    /// Rendered clip duration for a scene, when its audio is loaded.
    pub fn clip_duration(&self, scene_id: Uuid) -> Option<f64> {
        self.slots.get(&scene_id).map(|slot| slot.duration)
    }

    /// Drop sinks whose scene disappeared or whose audio reference
    /// changed; called whenever the document revision moves.
    pub fn prune(&mut self, document: &SceneDocument, resolve: impl Fn(&str) -> Option<PathBuf>) {
        self.slots.retain(|id, slot| {
            document
                .get_scene(*id)
                .and_then(|scene| scene.audio_file.as_deref())
                .and_then(&resolve)
                .is_some_and(|path| path == slot.source_path)
        });
        self.missing
            .retain(|id, audio| {
                document.get_scene(*id).and_then(|s| s.audio_file.as_deref()) == Some(audio.as_str())
            });
    }

    /// Open a scene's clip if it is not loaded yet. A clip that cannot
    /// be opened is remembered so the failure logs once, not per frame.
    fn ensure_loaded(&mut self, scene: &Scene, path: &Path) {
        let rebuild = match self.slots.get(&scene.id) {
            Some(slot) => slot.sink.empty(),
            None => true,
        };
        if !rebuild || self.missing.contains_key(&scene.id) {
            return;
        }
        let Some(stream) = &self.stream else {
            return;
        };

        let decoded = File::open(path)
            .map_err(|err| err.to_string())
            .and_then(|file| Decoder::new(file).map_err(|err| err.to_string()));
        match decoded {
            Ok(decoder) => {
                let duration = decoder
                    .total_duration()
                    .map(|d| d.as_secs_f64())
                    .unwrap_or_else(|| scene.duration_ms() as f64 / 1_000.0);
                let sink = Sink::connect_new(stream.mixer());
                sink.pause();
                sink.set_volume(self.volume);
                sink.append(decoder);
                self.slots.insert(
                    scene.id,
                    NarrationSlot {
                        sink,
                        duration,
                        source_path: path.to_path_buf(),
                    },
                );
            }
            Err(err) => {
                warn!("cannot open narration clip {path:?}: {err}");
                self.missing
                    .insert(scene.id, scene.audio_file.clone().unwrap_or_default());
            }
        }
    }

    /// Apply this frame's sync decisions for every scene.
    pub fn sync(
        &mut self,
        document: &SceneDocument,
        transport: &Transport,
        resolve: impl Fn(&str) -> Option<PathBuf>,
    ) {
        for scene in document.scenes() {
            let Some(path) = scene.audio_file.as_deref().and_then(&resolve) else {
                continue;
            };
            self.ensure_loaded(scene, &path);
            let Some(slot) = self.slots.get(&scene.id) else {
                continue;
            };
            let command = sync::narration_command(
                scene,
                transport.position(),
                transport.playing(),
                slot.duration,
                slot.sink.is_paused(),
            );
            match command {
                NarrationCommand::SeekAndPlay { offset } => {
                    if let Err(err) = slot.sink.try_seek(Duration::from_secs_f64(offset)) {
                        warn!("narration seek failed for scene {}: {err}", scene.id);
                    }
                    slot.sink.play();
                }
                NarrationCommand::Pause => slot.sink.pause(),
                NarrationCommand::Continue => {}
            }
        }
    }

    /// A timeline click landed at `seconds`: realign the narration of
    /// the scene under the click, when the offset is inside its clip.
    pub fn seek_click(&mut self, document: &SceneDocument, seconds: f64) {
        for scene in document.scenes() {
            let Some(slot) = self.slots.get(&scene.id) else {
                continue;
            };
            if let Some(offset) = sync::click_seek_offset(scene, seconds, slot.duration) {
                if let Err(err) = slot.sink.try_seek(Duration::from_secs_f64(offset)) {
                    warn!("narration seek failed for scene {}: {err}", scene.id);
                }
            }
        }
    }

    pub fn pause_all(&mut self) {
        for slot in self.slots.values() {
            slot.sink.pause();
        }
    }
}
