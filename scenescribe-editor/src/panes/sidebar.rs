//! Scene descriptions sidebar
//!
//! Lists every non-TALKING scene in timestamp order with its time range,
//! a pacing chip, an editable description and a delete affordance.
//! Edits are buffered in a per-scene draft and committed on focus loss,
//! so one editing session produces one undoable action (and one
//! narration invalidation, not one per keystroke).

use std::collections::HashMap;

use eframe::egui;
use scenescribe_core::actions::{RemoveSceneAction, UpdateSceneTextAction};
use scenescribe_core::pacing::{words_per_minute, PacingRating};
use uuid::Uuid;

use super::{PaneRenderer, SharedPaneState};

pub struct SidebarPane {
    drafts: HashMap<Uuid, String>,
}

struct SceneRow {
    id: Uuid,
    start_ms: u64,
    end_ms: u64,
    description: String,
    has_audio: bool,
    is_edited: bool,
}

impl SidebarPane {
    pub fn new() -> Self {
        Self {
            drafts: HashMap::new(),
        }
    }

    fn pacing_color(rating: PacingRating) -> egui::Color32 {
        match rating {
            PacingRating::Good => egui::Color32::from_rgb(34, 197, 94),
            PacingRating::TooSlow | PacingRating::TooFast => {
                egui::Color32::from_rgb(239, 68, 68)
            }
        }
    }
}

impl PaneRenderer for SidebarPane {
    fn name(&self) -> &str {
        "Scene Descriptions"
    }

    fn render_content(&mut self, ui: &mut egui::Ui, shared: &mut SharedPaneState) {
        let rows: Vec<SceneRow> = shared
            .executor
            .document()
            .narration_scenes()
            .map(|scene| SceneRow {
                id: scene.id,
                start_ms: scene.start_ms,
                end_ms: scene.end_ms,
                description: scene.description.clone(),
                has_audio: scene.audio_file.is_some(),
                is_edited: scene.is_edited,
            })
            .collect();
        self.drafts.retain(|id, _| rows.iter().any(|row| row.id == *id));

        ui.horizontal(|ui| {
            ui.heading(self.name());
        });
        ui.horizontal(|ui| {
            if ui.small_button("Select all").clicked() {
                shared.selection.checked = rows.iter().map(|row| row.id).collect();
            }
            if ui.small_button("Clear").clicked() {
                shared.selection.checked.clear();
            }
            if !shared.selection.checked.is_empty() {
                ui.label(format!("{} selected", shared.selection.checked.len()));
            }
        });
        ui.separator();

        if rows.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.label("No scenes added yet.");
                ui.label("Click \"+\" on the timeline to create scenes");
            });
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for row in &rows {
                let selected = shared.selection.selected == Some(row.id);
                let frame = egui::Frame::group(ui.style()).fill(if selected {
                    egui::Color32::from_rgb(30, 41, 59)
                } else {
                    egui::Color32::from_rgb(24, 31, 42)
                });
                let response = frame
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            let mut checked = shared.selection.checked.contains(&row.id);
                            if ui.checkbox(&mut checked, "").changed() {
                                if checked {
                                    shared.selection.checked.insert(row.id);
                                } else {
                                    shared.selection.checked.remove(&row.id);
                                }
                            }

                            let wpm = words_per_minute(row.start_ms, row.end_ms, &row.description);
                            ui.monospace(format!(
                                "{:.2}s - {:.2}s",
                                row.start_ms as f64 / 1_000.0,
                                row.end_ms as f64 / 1_000.0
                            ));
                            ui.colored_label(
                                Self::pacing_color(PacingRating::rate(wpm)),
                                format!("{wpm:.1} WPM"),
                            );
                            if row.has_audio {
                                ui.label("♪");
                            }
                            if row.is_edited {
                                ui.weak("edited");
                            }

                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.small_button("✕").clicked() {
                                        shared
                                            .pending_actions
                                            .push(Box::new(RemoveSceneAction::new(row.id)));
                                        shared.selection.checked.remove(&row.id);
                                    }
                                },
                            );
                        });

                        let draft = self
                            .drafts
                            .entry(row.id)
                            .or_insert_with(|| row.description.clone());
                        let editor = ui.add(
                            egui::TextEdit::multiline(draft)
                                .desired_rows(3)
                                .desired_width(f32::INFINITY)
                                .hint_text("Describe this scene..."),
                        );
                        if editor.lost_focus() && *draft != row.description {
                            shared.pending_actions.push(Box::new(
                                UpdateSceneTextAction::new(row.id, draft.clone()),
                            ));
                        } else if !editor.has_focus() && *draft != row.description {
                            // Pick up external changes (undo, reanalysis).
                            *draft = row.description.clone();
                        }
                    })
                    .response;

                if response.interact(egui::Sense::click()).clicked() {
                    shared.selection.selected = Some(row.id);
                    shared.transport.seek(row.start_ms as f64 / 1_000.0);
                }
                ui.add_space(6.0);
            }
        });
    }
}
