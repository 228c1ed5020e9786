//! Backend collaborator client
//!
//! Each job runs on its own worker thread speaking blocking HTTP and
//! reports back over a channel the UI drains once per frame, so the
//! editor stays interactive while analysis or rendering is in flight.
//! Progressive endpoints stream JSON lines; malformed chunks are skipped
//! by the tolerant decoder in the core. A failed job leaves the document
//! untouched — the app only applies state on a success event.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::thread;

use anyhow::{bail, Context, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::warn;
use scenescribe_core::analysis::{
    AnalysisData, AnalysisUpdate, AudioRenderResponse, AudioRenderScene, EncodeRequest,
    EncodeResponse, ReanalysisRequest, ReanalysisResponse, ReanalyzedScene, RenderedClip,
};
use uuid::Uuid;

/// What a running job is for; drives which success event applies it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobKind {
    Analyze,
    Reanalyze,
    RenderAudio,
    Encode,
}

impl JobKind {
    pub fn title(&self) -> &'static str {
        match self {
            JobKind::Analyze => "Analyzing video",
            JobKind::Reanalyze => "Reanalyzing scenes",
            JobKind::RenderAudio => "Rendering narration",
            JobKind::Encode => "Encoding video",
        }
    }
}

/// Events a worker reports back to the UI thread.
pub enum JobEvent {
    Progress { percent: u8, message: String },
    Analyzed(AnalysisData),
    Reanalyzed(Vec<ReanalyzedScene>),
    AudioRendered(Vec<RenderedClip>),
    Encoded(EncodeResponse),
    Downloaded { file_name: String },
    Failed(String),
}

/// Handle to a running job.
pub struct JobHandle {
    pub kind: JobKind,
    pub events: Receiver<JobEvent>,
    /// Scene ids captured at request time, for merge-on-completion
    pub scene_ids: Vec<Uuid>,
}

#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Absolute URL for a server-relative artifact reference.
    pub fn artifact_url(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            reference.to_string()
        } else {
            format!("{}/{}", self.base_url, reference.trim_start_matches('/'))
        }
    }

    fn http() -> Result<reqwest::blocking::Client> {
        // Analysis of a long video can take minutes; no request timeout.
        reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .context("building HTTP client")
    }

    /// Upload a video for full analysis. Streams `{progress, message}`
    /// lines, terminating in a chunk carrying the scene data.
    pub fn analyze(&self, video: PathBuf, mode: String) -> JobHandle {
        let url = format!("{}/process-video", self.base_url);
        spawn(JobKind::Analyze, Vec::new(), move |tx| {
            let form = reqwest::blocking::multipart::Form::new()
                .text("action", mode)
                .file("video", &video)
                .with_context(|| format!("reading video {video:?}"))?;
            let response = Self::http()?
                .post(&url)
                .multipart(form)
                .send()?
                .error_for_status()?;

            let mut data = None;
            for line in BufReader::new(response).lines() {
                let line = line?;
                let Some(update) = AnalysisUpdate::parse_line(&line) else {
                    continue;
                };
                let _ = tx.send(JobEvent::Progress {
                    percent: update.progress,
                    message: update.message,
                });
                if let Some(payload) = update.data {
                    data = Some(payload);
                }
            }
            match data {
                Some(payload) => {
                    let _ = tx.send(JobEvent::Analyzed(payload));
                    Ok(())
                }
                None => bail!("analysis stream ended without scene data"),
            }
        })
    }

    /// Reanalyze the changed ranges only.
    pub fn reanalyze(&self, request: ReanalysisRequest, scene_ids: Vec<Uuid>) -> JobHandle {
        let url = format!("{}/reanalyze-video", self.base_url);
        spawn(JobKind::Reanalyze, scene_ids, move |tx| {
            let response: ReanalysisResponse = Self::http()?
                .post(&url)
                .json(&request)
                .send()?
                .error_for_status()?
                .json()?;
            let _ = tx.send(JobEvent::Reanalyzed(response.data));
            Ok(())
        })
    }

    /// Render narration for the selected scenes. Streams progress lines,
    /// then a final chunk listing the rendered clips.
    pub fn render_audio(&self, scenes: Vec<AudioRenderScene>, scene_ids: Vec<Uuid>) -> JobHandle {
        let url = format!("{}/text-to-speech", self.base_url);
        spawn(JobKind::RenderAudio, scene_ids, move |tx| {
            let response = Self::http()?
                .post(&url)
                .json(&scenes)
                .send()?
                .error_for_status()?;

            let mut clips = None;
            for line in BufReader::new(response).lines() {
                let line = line?;
                if let Ok(done) = serde_json::from_str::<AudioRenderResponse>(&line) {
                    clips = Some(done.audio_files);
                    continue;
                }
                if let Some(update) = AnalysisUpdate::parse_line(&line) {
                    let _ = tx.send(JobEvent::Progress {
                        percent: update.progress,
                        message: update.message,
                    });
                }
            }
            match clips {
                Some(clips) => {
                    let _ = tx.send(JobEvent::AudioRendered(clips));
                    Ok(())
                }
                None => bail!("audio rendering ended without a clip list"),
            }
        })
    }

    /// Request the final encode; returns artifact URLs.
    pub fn encode(&self, request: EncodeRequest) -> JobHandle {
        let url = format!("{}/encode-video-with-subtitles", self.base_url);
        spawn(JobKind::Encode, Vec::new(), move |tx| {
            let response: EncodeResponse = Self::http()?
                .post(&url)
                .json(&request)
                .send()?
                .error_for_status()?
                .json()?;
            let _ = tx.send(JobEvent::Encoded(response));
            Ok(())
        })
    }

    /// Fetch one artifact to `dest`. Used both for narration clips going
    /// into the media cache and encode outputs going to a user-chosen
    /// folder.
    pub fn download(&self, url: String, dest: PathBuf) -> Receiver<JobEvent> {
        let (tx, rx) = unbounded();
        thread::spawn(move || {
            let result = (|| -> Result<()> {
                let bytes = Self::http()?.get(&url).send()?.error_for_status()?.bytes()?;
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&dest, &bytes)?;
                Ok(())
            })();
            match result {
                Ok(()) => {
                    let file_name = dest
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    let _ = tx.send(JobEvent::Downloaded { file_name });
                }
                Err(err) => {
                    warn!("download of {url} failed: {err:#}");
                    let _ = tx.send(JobEvent::Failed(format!("Download failed: {err}")));
                }
            }
        });
        rx
    }
}

fn spawn(
    kind: JobKind,
    scene_ids: Vec<Uuid>,
    work: impl FnOnce(&Sender<JobEvent>) -> Result<()> + Send + 'static,
) -> JobHandle {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        if let Err(err) = work(&tx) {
            warn!("backend job failed: {err:#}");
            let _ = tx.send(JobEvent::Failed(format!("{err:#}")));
        }
    });
    JobHandle {
        kind,
        events: rx,
        scene_ids,
    }
}
