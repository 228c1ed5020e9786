use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use crossbeam_channel::{Receiver, TryRecvError};
use eframe::egui;
use log::{error, info};
use scenescribe_core::action::{Action, ActionExecutor};
use scenescribe_core::actions::{
    MergeReanalysisAction, ReplaceScenesAction, SetProjectMetaAction, SpliceAudioAction,
};
use scenescribe_core::analysis::{AudioRenderScene, EncodeRequest, ReanalysisRequest};
use scenescribe_core::document::{EncodeOutputs, SceneDocument};
use scenescribe_core::layout::TimelineLayout;
use scenescribe_core::project_store::{ProjectSnapshot, ProjectStore};
use scenescribe_core::srt;
use scenescribe_core::timecode::format_timestamp;
use uuid::Uuid;

mod backend;
mod panes;
mod playback;

use backend::{BackendClient, JobEvent, JobHandle};
use panes::header::HeaderPane;
use panes::sidebar::SidebarPane;
use panes::timeline::TimelinePane;
use panes::{PaneRenderer, SelectionState, SharedPaneState, UiRequest};
use playback::{NarrationMixer, Transport};

/// SceneScribe Editor - audio-description authoring for video
#[derive(Parser, Debug)]
#[command(name = "SceneScribe Editor")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Analysis backend base URL
    #[arg(long, default_value = "http://localhost:5000")]
    server: String,

    /// Analysis pipeline selector passed to the backend
    #[arg(long, default_value = "new_gemini")]
    mode: String,

    /// Project name to load from the store at startup
    #[arg(long)]
    project: Option<String>,

    /// Use light theme
    #[arg(long, conflicts_with = "dark")]
    light: bool,

    /// Use dark theme
    #[arg(long, conflicts_with = "light")]
    dark: bool,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 900.0])
            .with_title("SceneScribe Editor")
            .with_app_id("scenescribe-editor"),
        ..Default::default()
    };

    eframe::run_native(
        "SceneScribe Editor",
        options,
        Box::new(move |cc| Ok(Box::new(EditorApp::new(cc, args)))),
    )
}

/// A modal backend job with its latest reported progress.
struct ActiveJob {
    handle: JobHandle,
    progress: u8,
    message: String,
}

impl ActiveJob {
    fn new(handle: JobHandle) -> Self {
        Self {
            handle,
            progress: 0,
            message: "Contacting server...".to_string(),
        }
    }
}

struct EditorApp {
    executor: ActionExecutor,
    layout: TimelineLayout,
    layout_revision: Option<u64>,

    transport: Transport,
    mixer: NarrationMixer,
    selection: SelectionState,

    client: BackendClient,
    job: Option<ActiveJob>,
    downloads: Vec<Receiver<JobEvent>>,
    requested_downloads: HashSet<String>,

    store: ProjectStore,
    project_name: String,
    media_dir: PathBuf,
    video_path: Option<PathBuf>,
    analysis_mode: String,

    pending_actions: Vec<Box<dyn Action>>,
    requests: Vec<UiRequest>,
    status: Option<(String, bool, Instant)>,

    header: HeaderPane,
    sidebar: SidebarPane,
    timeline: TimelinePane,
}

/// Local cache path for a server-side media reference.
fn media_path(media_dir: &Path, reference: &str) -> PathBuf {
    let file_name = Path::new(reference)
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| reference.into());
    media_dir.join(file_name)
}

impl EditorApp {
    fn new(cc: &eframe::CreationContext<'_>, args: Args) -> Self {
        if args.light {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
        } else if args.dark {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
        }

        let data_dir = directories::ProjectDirs::from("io", "SceneScribe", "SceneScribe")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        let store = ProjectStore::new(data_dir.join("projects.json"));
        let media_dir = data_dir.join("media");

        let project_name = args.project.clone().unwrap_or_else(|| "untitled".to_string());
        let mut executor = ActionExecutor::new(SceneDocument::new());
        if let Some(name) = &args.project {
            match store.load(name) {
                Ok(snapshot) => {
                    info!("loaded project {name:?} (saved {})", snapshot.saved_at);
                    executor.reset(snapshot.document);
                }
                Err(err) => error!("could not load project {name:?}: {err}"),
            }
        }

        let mut transport = Transport::new();
        transport.set_duration(executor.document().duration_ms as f64 / 1_000.0);

        Self {
            executor,
            layout: TimelineLayout::default(),
            layout_revision: None,
            transport,
            mixer: NarrationMixer::new(),
            selection: SelectionState::default(),
            client: BackendClient::new(args.server),
            job: None,
            downloads: Vec::new(),
            requested_downloads: HashSet::new(),
            store,
            project_name,
            media_dir,
            video_path: None,
            analysis_mode: args.mode,
            pending_actions: Vec::new(),
            requests: Vec::new(),
            status: None,
            header: HeaderPane::new(),
            sidebar: SidebarPane::new(),
            timeline: TimelinePane::new(),
        }
    }

    fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some((text.into(), is_error, Instant::now()));
    }

    /// Drain the modal job's events; apply results as single actions so
    /// a failure never leaves a partial replacement behind.
    fn drain_job_events(&mut self) {
        let Some(job) = &mut self.job else {
            return;
        };
        let scene_ids = job.handle.scene_ids.clone();
        let mut events = Vec::new();
        let mut disconnected = false;
        loop {
            match job.handle.events.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        for event in events {
            match event {
                JobEvent::Progress { percent, message } => {
                    if let Some(job) = &mut self.job {
                        job.progress = percent;
                        job.message = message;
                    }
                }
                JobEvent::Analyzed(data) => {
                    let duration_ms = data.duration_ms.unwrap_or_else(|| {
                        data.timestamps.iter().map(|&(_, end)| end).max().unwrap_or(0)
                    });
                    let scenes = data.into_scenes();
                    let count = scenes.len();
                    self.pending_actions.push(Box::new(
                        SetProjectMetaAction::new().duration_ms(duration_ms),
                    ));
                    self.pending_actions
                        .push(Box::new(ReplaceScenesAction::new(scenes)));
                    self.job = None;
                    self.set_status(format!("Analysis complete: {count} scenes"), false);
                }
                JobEvent::Reanalyzed(replacements) => {
                    let count = replacements.len();
                    self.pending_actions.push(Box::new(MergeReanalysisAction::new(
                        scene_ids.clone(),
                        replacements,
                    )));
                    self.selection.checked.clear();
                    self.job = None;
                    self.set_status(format!("Reanalyzed {count} scenes"), false);
                }
                JobEvent::AudioRendered(clips) => {
                    let count = clips.len();
                    self.pending_actions
                        .push(Box::new(SpliceAudioAction::new(clips)));
                    self.job = None;
                    self.set_status(format!("Rendered narration for {count} scenes"), false);
                }
                JobEvent::Encoded(response) => {
                    self.pending_actions.push(Box::new(
                        SetProjectMetaAction::new().outputs(EncodeOutputs {
                            video_url: Some(response.output_video_url.clone()),
                            srt_url: response.srt_url.clone(),
                            talking_srt_url: response.talking_srt_url.clone(),
                        }),
                    ));
                    self.job = None;
                    self.download_encode_outputs(&response);
                }
                JobEvent::Downloaded { .. } => {}
                JobEvent::Failed(message) => {
                    self.job = None;
                    self.set_status(message, true);
                }
            }
        }

        // A worker that died without a terminal event must not leave the
        // overlay up forever.
        if disconnected && self.job.is_some() {
            self.job = None;
            self.set_status("Backend worker stopped unexpectedly", true);
        }
    }

    fn download_encode_outputs(&mut self, response: &scenescribe_core::analysis::EncodeResponse) {
        let Some(folder) = rfd::FileDialog::new()
            .set_title("Save encoded outputs to...")
            .pick_folder()
        else {
            self.set_status("Encode finished; outputs left on the server", false);
            return;
        };
        let references = [
            Some(response.output_video_url.clone()),
            response.srt_url.clone(),
            response.talking_srt_url.clone(),
        ];
        for reference in references.into_iter().flatten() {
            let dest = media_path(&folder, &reference);
            let url = self.client.artifact_url(&reference);
            self.downloads.push(self.client.download(url, dest));
        }
        self.set_status("Encode complete, downloading outputs...", false);
    }

    fn drain_downloads(&mut self) {
        let mut notes = Vec::new();
        self.downloads.retain(|events| loop {
            match events.try_recv() {
                Ok(event) => notes.push(event),
                Err(TryRecvError::Empty) => break true,
                Err(TryRecvError::Disconnected) => break false,
            }
        });
        for note in notes {
            match note {
                JobEvent::Downloaded { file_name } => {
                    self.set_status(format!("Downloaded {file_name}"), false);
                }
                JobEvent::Failed(message) => self.set_status(message, true),
                _ => {}
            }
        }
    }

    /// Fetch narration clips the document references but the media cache
    /// does not hold yet.
    fn queue_missing_audio(&mut self) {
        let references: Vec<String> = self
            .executor
            .document()
            .scenes()
            .iter()
            .filter_map(|scene| scene.audio_file.clone())
            .collect();
        for reference in references {
            let local = media_path(&self.media_dir, &reference);
            if local.exists() || self.requested_downloads.contains(&reference) {
                continue;
            }
            self.requested_downloads.insert(reference.clone());
            let url = self.client.artifact_url(&reference);
            self.downloads.push(self.client.download(url, local));
        }
    }

    /// Re-derive the pixel projection when the document revision moved.
    fn refresh_layout(&mut self) {
        if self.layout_revision == Some(self.executor.revision()) {
            return;
        }
        let document = self.executor.document();
        self.layout = TimelineLayout::compute(document.scenes(), document.duration_ms);
        self.layout_revision = Some(self.executor.revision());
        self.transport
            .set_duration(document.duration_ms as f64 / 1_000.0);

        let media_dir = self.media_dir.clone();
        self.mixer.prune(document, |reference| {
            let path = media_path(&media_dir, reference);
            path.exists().then_some(path)
        });
        self.queue_missing_audio();

        // Drop drafts/selection for scenes that no longer exist.
        let document = self.executor.document();
        self.selection
            .checked
            .retain(|id| document.get_scene(*id).is_some());
        if let Some(selected) = self.selection.selected {
            if document.get_scene(selected).is_none() {
                self.selection.selected = None;
            }
        }
    }

    fn apply_pending_actions(&mut self) {
        for action in std::mem::take(&mut self.pending_actions) {
            self.executor.execute(action);
        }
    }

    fn checked_scenes(&self) -> Vec<(Uuid, u64, u64, String)> {
        self.executor
            .document()
            .scenes()
            .iter()
            .filter(|scene| !scene.is_talking() && self.selection.checked.contains(&scene.id))
            .map(|scene| {
                (
                    scene.id,
                    scene.start_ms,
                    scene.end_ms,
                    scene.description.clone(),
                )
            })
            .collect()
    }

    fn handle_requests(&mut self) {
        for request in std::mem::take(&mut self.requests) {
            match request {
                UiRequest::OpenVideo => self.open_video(),
                UiRequest::Analyze => self.start_analysis(),
                UiRequest::ReanalyzeSelection => self.start_reanalysis(),
                UiRequest::RegenerateSelection => self.start_audio_render(),
                UiRequest::Encode => self.start_encode(),
                UiRequest::ImportSrt => self.import_srt(),
                UiRequest::ExportSrt => self.export_srt(),
                UiRequest::SaveProject => self.save_project(),
                UiRequest::Undo => {
                    if let Some(description) = self.executor.undo() {
                        self.set_status(format!("Undid: {description}"), false);
                    }
                }
                UiRequest::Redo => {
                    if let Some(description) = self.executor.redo() {
                        self.set_status(format!("Redid: {description}"), false);
                    }
                }
            }
        }
    }

    fn open_video(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Open Video")
            .add_filter("Video", &["mp4", "mov", "mkv", "webm", "avi"])
            .pick_file()
        else {
            return;
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        self.pending_actions
            .push(Box::new(SetProjectMetaAction::new().video_name(name.clone())));
        self.video_path = Some(path);
        self.set_status(
            format!("Opened {}", name.unwrap_or_default()),
            false,
        );
    }

    fn start_analysis(&mut self) {
        let Some(video) = self.video_path.clone() else {
            self.set_status("Open a video first", true);
            return;
        };
        self.job = Some(ActiveJob::new(
            self.client.analyze(video, self.analysis_mode.clone()),
        ));
    }

    fn start_reanalysis(&mut self) {
        let Some(video_filename) = self.executor.document().video_name.clone() else {
            self.set_status("Open and analyze a video first", true);
            return;
        };
        let checked = self.checked_scenes();
        if checked.is_empty() {
            return;
        }
        let ids = checked.iter().map(|&(id, ..)| id).collect();
        let timestamps = checked
            .iter()
            .map(|&(_, start, end, _)| (start, end))
            .collect();
        self.job = Some(ActiveJob::new(self.client.reanalyze(
            ReanalysisRequest {
                video_filename,
                timestamps,
            },
            ids,
        )));
    }

    fn start_audio_render(&mut self) {
        let checked = self.checked_scenes();
        if checked.is_empty() {
            return;
        }
        let ids = checked.iter().map(|&(id, ..)| id).collect();
        let scenes = checked
            .into_iter()
            .map(|(_, start, end, description)| AudioRenderScene {
                description,
                timestamps: (start, end),
            })
            .collect();
        self.job = Some(ActiveJob::new(self.client.render_audio(scenes, ids)));
    }

    fn start_encode(&mut self) {
        let document = self.executor.document();
        let Some(video_filename) = document.video_name.clone() else {
            self.set_status("Open and analyze a video first", true);
            return;
        };
        let request = EncodeRequest {
            descriptions: document.scenes().iter().map(|s| s.description.clone()).collect(),
            timestamps: document
                .scenes()
                .iter()
                .map(|s| (s.start_ms, s.end_ms))
                .collect(),
            audio_files: document.scenes().iter().map(|s| s.audio_file.clone()).collect(),
            video_filename,
        };
        self.job = Some(ActiveJob::new(self.client.encode(request)));
    }

    fn import_srt(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Import SRT")
            .add_filter("SubRip subtitles", &["srt"])
            .pick_file()
        else {
            return;
        };
        let body = match std::fs::read_to_string(&path) {
            Ok(body) => body,
            Err(err) => {
                self.set_status(format!("Could not read {path:?}: {err}"), true);
                return;
            }
        };
        let scenes = srt::import(&body);
        if scenes.is_empty() {
            self.set_status("No usable entries in that SRT file", true);
            return;
        }
        let imported_extent = scenes.iter().map(|s| s.end_ms).max().unwrap_or(0);
        let duration_ms = self.executor.document().duration_ms.max(imported_extent);
        let count = scenes.len();
        self.pending_actions
            .push(Box::new(SetProjectMetaAction::new().duration_ms(duration_ms)));
        self.pending_actions
            .push(Box::new(ReplaceScenesAction::new(scenes)));
        self.set_status(format!("Imported {count} scenes"), false);
    }

    fn export_srt(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Export SRT")
            .set_file_name(format!("{}_video_descriptions.srt", self.project_name))
            .add_filter("SubRip subtitles", &["srt"])
            .save_file()
        else {
            return;
        };
        let body = srt::export(self.executor.document().scenes());
        match std::fs::write(&path, body) {
            Ok(()) => self.set_status(format!("Exported {path:?}"), false),
            Err(err) => self.set_status(format!("Export failed: {err}"), true),
        }
    }

    fn save_project(&mut self) {
        let snapshot = ProjectSnapshot::new(
            self.project_name.clone(),
            self.executor.document().clone(),
        );
        match self.store.save(snapshot) {
            Ok(()) => self.set_status(format!("Saved project {:?}", self.project_name), false),
            Err(err) => self.set_status(format!("Save failed: {err}"), true),
        }
    }

    /// Central player area: subtitle overlay plus transport controls.
    fn render_player(ui: &mut egui::Ui, shared: &mut SharedPaneState) {
        let controls_height = 36.0;
        let screen_height = (ui.available_height() - controls_height).max(60.0);
        let (screen_rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), screen_height),
            egui::Sense::hover(),
        );
        let painter = ui.painter_at(screen_rect);
        painter.rect_filled(screen_rect, 4.0, egui::Color32::from_rgb(13, 17, 23));

        let document = shared.executor.document();
        let heading = document
            .video_name
            .clone()
            .unwrap_or_else(|| "Open a video to begin".to_string());
        painter.text(
            screen_rect.center(),
            egui::Align2::CENTER_CENTER,
            heading,
            egui::FontId::proportional(16.0),
            egui::Color32::from_gray(110),
        );

        // Subtitle for the active scene; speech segments show nothing.
        if let Some(scene) = document.active_scene(shared.transport.position()) {
            if !scene.is_talking() {
                painter.text(
                    egui::pos2(screen_rect.center().x, screen_rect.max.y - 28.0),
                    egui::Align2::CENTER_BOTTOM,
                    &scene.description,
                    egui::FontId::proportional(15.0),
                    egui::Color32::WHITE,
                );
            }
        }

        ui.horizontal(|ui| {
            let label = if shared.transport.playing() { "⏸" } else { "▶" };
            if ui.button(label).clicked() {
                if shared.transport.playing() {
                    shared.transport.pause();
                    shared.mixer.pause_all();
                } else {
                    shared.transport.play();
                }
            }
            ui.monospace(format!(
                "{} / {}",
                format_timestamp((shared.transport.position() * 1_000.0) as u64),
                format_timestamp((shared.transport.duration() * 1_000.0) as u64),
            ));

            ui.separator();
            ui.label("Narration");
            let mut volume = shared.mixer.volume();
            if ui
                .add(egui::Slider::new(&mut volume, 0.0..=1.0).show_value(false))
                .changed()
            {
                shared.mixer.set_volume(volume);
            }
        });
    }

    fn render_processing_overlay(&self, ctx: &egui::Context) {
        let Some(job) = &self.job else {
            return;
        };
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Background,
            egui::Id::new("processing-dim"),
        ));
        painter.rect_filled(ctx.screen_rect(), 0.0, egui::Color32::from_black_alpha(180));

        egui::Area::new(egui::Id::new("processing-card"))
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Frame::window(ui.style()).show(ui, |ui| {
                    ui.set_width(320.0);
                    ui.label(egui::RichText::new(job.handle.kind.title()).strong());
                    ui.add(
                        egui::ProgressBar::new(job.progress as f32 / 100.0)
                            .text(format!("{}%", job.progress)),
                    );
                    ui.label(&job.message);
                });
            });
        ctx.request_repaint();
    }

    fn render_status_banner(&mut self, ctx: &egui::Context) {
        let Some((text, is_error, since)) = &self.status else {
            return;
        };
        let is_error = *is_error;
        // Progress notes fade out on their own; errors stay up until
        // dismissed.
        if !is_error && since.elapsed().as_secs_f32() > 6.0 {
            self.status = None;
            return;
        }
        let color = if is_error {
            egui::Color32::from_rgb(153, 27, 27)
        } else {
            egui::Color32::from_rgb(21, 94, 61)
        };
        let text = text.clone();
        let mut dismissed = false;
        egui::Area::new(egui::Id::new("status-banner"))
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -12.0])
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(color)
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(12, 6))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
                            if is_error && ui.small_button("Dismiss").clicked() {
                                dismissed = true;
                            }
                        });
                    });
            });
        if dismissed {
            self.status = None;
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_job_events();
        self.drain_downloads();
        self.refresh_layout();
        if self.job.is_some() || !self.downloads.is_empty() {
            // Keep polling worker channels even when the user is idle.
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        }

        self.transport.tick();
        if self.transport.playing() {
            // The repaint loop is the per-frame sampling loop; it goes
            // quiet as soon as playback stops.
            ctx.request_repaint();
        }
        let media_dir = self.media_dir.clone();
        self.mixer.sync(self.executor.document(), &self.transport, |reference| {
            let path = media_path(&media_dir, reference);
            path.exists().then_some(path)
        });

        let busy = self.job.is_some();
        let has_video = self.video_path.is_some();
        {
            let EditorApp {
                executor,
                layout,
                transport,
                mixer,
                selection,
                pending_actions,
                requests,
                header,
                sidebar,
                timeline,
                ..
            } = self;
            let mut shared = SharedPaneState {
                executor,
                layout,
                transport,
                mixer,
                selection,
                pending_actions,
                requests,
                busy,
                has_video,
            };

            egui::TopBottomPanel::top("header").show(ctx, |ui| {
                header.render_content(ui, &mut shared);
            });
            egui::TopBottomPanel::bottom("timeline")
                .exact_height(180.0)
                .show(ctx, |ui| {
                    timeline.render_content(ui, &mut shared);
                });
            egui::SidePanel::left("descriptions")
                .resizable(true)
                .default_width(360.0)
                .show(ctx, |ui| {
                    sidebar.render_content(ui, &mut shared);
                });
            egui::CentralPanel::default().show(ctx, |ui| {
                Self::render_player(ui, &mut shared);
            });
        }

        self.render_processing_overlay(ctx);
        self.render_status_banner(ctx);

        // Two-phase dispatch: panes queued work during render; apply it
        // now so the whole batch lands before one boundary recompute.
        self.apply_pending_actions();
        self.handle_requests();
    }
}
