//! Collaborator service contracts
//!
//! Payload types for the analysis, reanalysis, audio-regeneration and
//! encode services, plus tolerant decoding of their progressive JSON-line
//! responses. A malformed chunk is skipped with a warning; the stream
//! keeps going — one bad line never aborts a job.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::scene::Scene;

/// Final payload of a completed analysis: parallel arrays mapped 1:1
/// into scenes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnalysisData {
    /// `[start_ms, end_ms]` pairs
    pub timestamps: Vec<(u64, u64)>,
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub audio_files: Vec<Option<String>>,
    /// Video length when the service reports it; otherwise the timeline
    /// extent falls back to the last scene end
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

impl AnalysisData {
    /// Map the parallel arrays into scenes. Rows with a missing
    /// description get a placeholder; rows with inverted timestamps are
    /// skipped.
    pub fn into_scenes(self) -> Vec<Scene> {
        let mut scenes = Vec::with_capacity(self.timestamps.len());
        for (i, (start_ms, end_ms)) in self.timestamps.into_iter().enumerate() {
            if end_ms <= start_ms {
                warn!("skipping analysis row {i} with inverted timestamps {start_ms}..{end_ms}");
                continue;
            }
            let description = self
                .descriptions
                .get(i)
                .cloned()
                .unwrap_or_else(|| "No description available".to_string());
            let mut scene = Scene::new(start_ms, end_ms, description);
            scene.audio_file = self.audio_files.get(i).cloned().flatten();
            scenes.push(scene);
        }
        scenes.sort_by_key(|s| s.start_ms);
        scenes
    }
}

/// One event of a progressive analysis response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisUpdate {
    pub progress: u8,
    #[serde(default)]
    pub message: String,
    /// Present on the terminal event (`progress == 100`)
    #[serde(default)]
    pub data: Option<AnalysisData>,
}

impl AnalysisUpdate {
    /// Decode one JSON line of a progress stream. Blank lines and
    /// malformed chunks yield `None` and are skipped by the caller.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        match serde_json::from_str(line) {
            Ok(update) => Some(update),
            Err(err) => {
                warn!("skipping malformed progress chunk: {err}");
                None
            }
        }
    }
}

/// Request for reanalysis of the changed ranges only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReanalysisRequest {
    pub video_filename: String,
    /// `[start_ms, end_ms]` of each changed scene
    pub timestamps: Vec<(u64, u64)>,
}

/// One replacement scene from the reanalysis service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReanalyzedScene {
    pub timestamp: (u64, u64),
    pub description: String,
    #[serde(default)]
    pub audio_file: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReanalysisResponse {
    pub data: Vec<ReanalyzedScene>,
}

/// One scene sent for narration rendering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AudioRenderScene {
    pub description: String,
    /// `[start_ms, end_ms]`
    pub timestamps: (u64, u64),
}

/// One rendered narration clip, spliced back by exact start/end match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenderedClip {
    pub start: u64,
    pub end: u64,
    pub audio_file: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AudioRenderResponse {
    pub audio_files: Vec<RenderedClip>,
}

/// Final encode request: everything the muxer needs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncodeRequest {
    pub descriptions: Vec<String>,
    pub timestamps: Vec<(u64, u64)>,
    pub audio_files: Vec<Option<String>>,
    pub video_filename: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncodeResponse {
    pub output_video_url: String,
    #[serde(default)]
    pub srt_url: Option<String>,
    #[serde(default)]
    pub talking_srt_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_data_maps_rows_into_sorted_scenes() {
        let data = AnalysisData {
            timestamps: vec![(5_000, 6_000), (0, 1_000)],
            descriptions: vec!["late".into(), "early".into()],
            audio_files: vec![Some("late.mp3".into()), None],
            duration_ms: None,
        };
        let scenes = data.into_scenes();
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[0].description, "early");
        assert!(scenes[0].audio_file.is_none());
        assert_eq!(scenes[1].audio_file.as_deref(), Some("late.mp3"));
    }

    #[test]
    fn inverted_rows_are_skipped() {
        let data = AnalysisData {
            timestamps: vec![(2_000, 1_000), (3_000, 4_000)],
            descriptions: vec!["bad".into(), "good".into()],
            audio_files: Vec::new(),
            duration_ms: None,
        };
        let scenes = data.into_scenes();
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].description, "good");
    }

    #[test]
    fn progress_lines_decode_and_malformed_ones_skip() {
        let update = AnalysisUpdate::parse_line(r#"{"progress":40,"message":"detecting scenes"}"#)
            .expect("valid chunk");
        assert_eq!(update.progress, 40);
        assert!(update.data.is_none());

        assert!(AnalysisUpdate::parse_line("").is_none());
        assert!(AnalysisUpdate::parse_line("{not json").is_none());

        let terminal = AnalysisUpdate::parse_line(
            r#"{"progress":100,"message":"done","data":{"timestamps":[[0,1000]],"descriptions":["x"],"audio_files":[null]}}"#,
        )
        .expect("terminal chunk");
        assert_eq!(terminal.progress, 100);
        assert_eq!(terminal.data.unwrap().timestamps.len(), 1);
    }
}
