//! Editor header bar
//!
//! Project-level controls: open/analyze/reanalyze/regenerate/encode,
//! SRT interchange, save and undo/redo. The encode button is gated on
//! every narration scene being edited or every one having audio.

use eframe::egui;

use super::{PaneRenderer, SharedPaneState, UiRequest};

pub struct HeaderPane;

impl HeaderPane {
    pub fn new() -> Self {
        Self
    }
}

impl PaneRenderer for HeaderPane {
    fn name(&self) -> &str {
        "SceneScribe"
    }

    fn render_content(&mut self, ui: &mut egui::Ui, shared: &mut SharedPaneState) {
        let document = shared.executor.document();
        let has_scenes = !document.scenes().is_empty();
        let encode_ready = document.all_edited() || document.all_have_audio();
        let has_selection = !shared.selection.checked.is_empty();

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(self.name()).strong().size(16.0));
            if let Some(video) = &document.video_name {
                ui.weak(video);
            }

            ui.separator();

            if ui
                .add_enabled(!shared.busy, egui::Button::new("Open Video"))
                .clicked()
            {
                shared.requests.push(UiRequest::OpenVideo);
            }
            if ui
                .add_enabled(shared.has_video && !shared.busy, egui::Button::new("Analyze"))
                .clicked()
            {
                shared.requests.push(UiRequest::Analyze);
            }
            if ui
                .add_enabled(
                    has_selection && !shared.busy,
                    egui::Button::new("Reanalyze"),
                )
                .on_hover_text("Reanalyze the checked scenes")
                .clicked()
            {
                shared.requests.push(UiRequest::ReanalyzeSelection);
            }
            if ui
                .add_enabled(
                    has_selection && !shared.busy,
                    egui::Button::new("Regenerate Audio"),
                )
                .on_hover_text("Render narration for the checked scenes")
                .clicked()
            {
                shared.requests.push(UiRequest::RegenerateSelection);
            }
            if ui
                .add_enabled(
                    has_scenes && encode_ready && shared.has_video && !shared.busy,
                    egui::Button::new("Encode"),
                )
                .on_hover_text("Enabled once every scene is edited or narrated")
                .clicked()
            {
                shared.requests.push(UiRequest::Encode);
            }

            ui.separator();

            if ui
                .add_enabled(!shared.busy, egui::Button::new("Import SRT"))
                .clicked()
            {
                shared.requests.push(UiRequest::ImportSrt);
            }
            if ui
                .add_enabled(has_scenes, egui::Button::new("Export SRT"))
                .clicked()
            {
                shared.requests.push(UiRequest::ExportSrt);
            }
            if ui
                .add_enabled(has_scenes, egui::Button::new("Save"))
                .clicked()
            {
                shared.requests.push(UiRequest::SaveProject);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(shared.executor.can_redo(), egui::Button::new("Redo"))
                    .clicked()
                {
                    shared.requests.push(UiRequest::Redo);
                }
                if ui
                    .add_enabled(shared.executor.can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    shared.requests.push(UiRequest::Undo);
                }
            });
        });
    }
}
