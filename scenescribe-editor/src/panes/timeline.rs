//! Timeline pane
//!
//! Fixed-scale scene timeline: 1 pixel = 10 ms. Renders the ruler,
//! the scene elements with their narration coverage, and the play-head;
//! owns the drag/resize interaction state machine. All committed
//! geometry goes back through actions — the pane never touches the
//! document directly.

use eframe::egui;
use scenescribe_core::actions::{InsertSceneAction, MoveSceneAction, ResizeSceneAction};
use scenescribe_core::insertion::plan_insert_at;
use scenescribe_core::interaction::{clamp_drag, resize_left, resize_right};
use scenescribe_core::layout::{Container, TimelineElement};
use scenescribe_core::scene::MIN_SCENE_MS;
use scenescribe_core::sync::autoscroll_target;
use scenescribe_core::timecode::{format_timestamp, px_to_ms};
use uuid::Uuid;

use super::{PaneRenderer, SharedPaneState};

const RULER_HEIGHT: f32 = 24.0;
const ELEMENT_HEIGHT: f32 = 64.0;
const MAJOR_TICK_SPACING: f32 = 100.0; // 1 s at the fixed scale
const MINOR_TICKS_PER_MAJOR: usize = 5;
const HANDLE_WIDTH: f32 = 9.0;
const AUTOSCROLL_SPEED: f32 = 6.0;

/// Type of scene drag operation
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragKind {
    Move,
    ResizeLeft,
    ResizeRight,
}

/// In-flight interaction; only one scene at a time.
struct ActiveDrag {
    id: Uuid,
    kind: DragKind,
    /// Accumulated raw proposal: position for Move/ResizeLeft, width
    /// for ResizeRight. Unclamped while dragging; clamped on commit.
    proposal: f32,
}

pub struct TimelinePane {
    /// Horizontal scroll offset in pixels
    scroll_x: f32,

    /// Smooth-scroll destination for play-head recentering
    scroll_target: Option<f32>,

    /// Play-head position last frame, to detect seeks while paused
    last_playhead: f32,

    drag: Option<ActiveDrag>,
}

impl TimelinePane {
    pub fn new() -> Self {
        Self {
            scroll_x: 0.0,
            scroll_target: None,
            last_playhead: 0.0,
            drag: None,
        }
    }

    /// Whether a drag or resize is in flight; insertion and seeks are
    /// rejected cheaply while one is.
    pub fn interaction_active(&self) -> bool {
        self.drag.is_some()
    }

    /// Display geometry for an element, with the live preview applied
    /// while it is being dragged or resized.
    fn display_geometry(&self, element: &TimelineElement, container: &Container) -> (f32, f32) {
        let Some(drag) = &self.drag else {
            return (element.position, element.width);
        };
        if drag.id != element.id {
            return (element.position, element.width);
        }
        match drag.kind {
            // Move previews are unclamped; only the commit is.
            DragKind::Move => (drag.proposal, element.width),
            DragKind::ResizeRight => {
                let width = resize_right(container, element.position, element.position + drag.proposal)
                    .unwrap_or(element.width);
                (element.position, width)
            }
            DragKind::ResizeLeft => {
                resize_left(container, element.right_edge(), drag.proposal)
                    .unwrap_or((element.position, element.width))
            }
        }
    }

    fn commit_drag(&self, shared: &mut SharedPaneState, drag: &ActiveDrag) {
        let Some((element, container)) = shared.layout.element(drag.id) else {
            return;
        };
        let (position, width) = match drag.kind {
            DragKind::Move => {
                let Some(position) = clamp_drag(container, element.width, drag.proposal) else {
                    return;
                };
                (position, element.width)
            }
            DragKind::ResizeRight => {
                let Some(width) =
                    resize_right(container, element.position, element.position + drag.proposal)
                else {
                    return;
                };
                (element.position, width)
            }
            DragKind::ResizeLeft => {
                let Some(geometry) = resize_left(container, element.right_edge(), drag.proposal)
                else {
                    return;
                };
                geometry
            }
        };

        let start_ms = px_to_ms(position);
        let end_ms = px_to_ms(position + width);
        if end_ms.saturating_sub(start_ms) < MIN_SCENE_MS {
            return;
        }
        let action: Box<dyn scenescribe_core::action::Action> = match drag.kind {
            DragKind::Move => Box::new(MoveSceneAction::new(drag.id, start_ms, end_ms)),
            DragKind::ResizeLeft | DragKind::ResizeRight => {
                Box::new(ResizeSceneAction::new(drag.id, start_ms, end_ms))
            }
        };
        shared.pending_actions.push(action);
    }

    fn render_ruler(&self, painter: &egui::Painter, rect: egui::Rect) {
        let first_major = (self.scroll_x / MAJOR_TICK_SPACING).floor() as i64;
        let visible_majors = (rect.width() / MAJOR_TICK_SPACING).ceil() as i64 + 1;

        for major in first_major..first_major + visible_majors {
            if major < 0 {
                continue;
            }
            let px = major as f32 * MAJOR_TICK_SPACING;
            let x = rect.min.x + px - self.scroll_x;
            painter.line_segment(
                [
                    egui::pos2(x, rect.min.y),
                    egui::pos2(x, rect.max.y),
                ],
                egui::Stroke::new(1.0, egui::Color32::from_gray(100)),
            );
            painter.text(
                egui::pos2(x + 3.0, rect.min.y + 2.0),
                egui::Align2::LEFT_TOP,
                format_timestamp(px_to_ms(px)),
                egui::FontId::monospace(10.0),
                egui::Color32::from_gray(150),
            );

            let minor_spacing = MAJOR_TICK_SPACING / MINOR_TICKS_PER_MAJOR as f32;
            for minor in 1..MINOR_TICKS_PER_MAJOR {
                let minor_x = x + minor as f32 * minor_spacing;
                painter.line_segment(
                    [
                        egui::pos2(minor_x, rect.max.y - 5.0),
                        egui::pos2(minor_x, rect.max.y),
                    ],
                    egui::Stroke::new(1.0, egui::Color32::from_gray(60)),
                );
            }
        }
    }

    fn render_playhead(&self, painter: &egui::Painter, rect: egui::Rect, playhead_px: f32) {
        let x = rect.min.x + playhead_px - self.scroll_x;
        if x < rect.min.x || x > rect.max.x {
            return;
        }
        let color = egui::Color32::from_rgb(239, 68, 68);
        painter.line_segment(
            [egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)],
            egui::Stroke::new(2.0, color),
        );
        let handle = 8.0;
        painter.add(egui::Shape::convex_polygon(
            vec![
                egui::pos2(x, rect.min.y + handle),
                egui::pos2(x - handle / 2.0, rect.min.y),
                egui::pos2(x + handle / 2.0, rect.min.y),
            ],
            color,
            egui::Stroke::NONE,
        ));
    }
}

impl PaneRenderer for TimelinePane {
    fn name(&self) -> &str {
        "Timeline"
    }

    fn render_content(&mut self, ui: &mut egui::Ui, shared: &mut SharedPaneState) {
        let layout = shared.layout;
        let (rect, background) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(31, 41, 55));

        let content_width = layout.width.max(rect.width());
        let playhead_px = (shared.transport.position() * MAJOR_TICK_SPACING as f64) as f32;

        // Wheel input pans the timeline horizontally.
        let scroll_delta = ui.input(|i| i.raw_scroll_delta);
        if ui.rect_contains_pointer(rect) && scroll_delta != egui::Vec2::ZERO {
            self.scroll_x -= scroll_delta.x + scroll_delta.y;
            self.scroll_target = None;
        }

        // Recenter on the play-head when it runs near the visible edge.
        let playhead_moved = (playhead_px - self.last_playhead).abs() > f32::EPSILON;
        self.last_playhead = playhead_px;
        if (shared.transport.playing() || playhead_moved) && self.drag.is_none() {
            if let Some(target) = autoscroll_target(playhead_px, self.scroll_x, rect.width()) {
                self.scroll_target = Some(target);
            }
        }
        if let Some(target) = self.scroll_target {
            let dt = ui.input(|i| i.stable_dt).min(0.1);
            self.scroll_x += (target - self.scroll_x) * (dt * AUTOSCROLL_SPEED).min(1.0);
            if (target - self.scroll_x).abs() < 1.0 {
                self.scroll_x = target;
                self.scroll_target = None;
            } else {
                ui.ctx().request_repaint();
            }
        }
        self.scroll_x = self.scroll_x.clamp(0.0, (content_width - rect.width()).max(0.0));

        let ruler_rect = egui::Rect::from_min_size(
            rect.min,
            egui::vec2(rect.width(), RULER_HEIGHT),
        );
        self.render_ruler(&painter, ruler_rect);

        let lane_top = rect.min.y + RULER_HEIGHT + 14.0;
        let mut pointer_over_element = false;
        let pointer_pos = ui.input(|i| i.pointer.interact_pos());

        let mut started: Option<ActiveDrag> = None;
        let mut committed = false;

        for (element, container) in layout.elements.iter().zip(&layout.containers) {
            let (position, width) = self.display_geometry(element, container);
            let element_rect = egui::Rect::from_min_size(
                egui::pos2(rect.min.x + position - self.scroll_x, lane_top),
                egui::vec2(width, ELEMENT_HEIGHT),
            );
            if !element_rect.intersects(rect) {
                continue;
            }
            if let Some(pos) = pointer_pos {
                if element_rect.contains(pos) {
                    pointer_over_element = true;
                }
            }

            if element.talking {
                // Fixed speech block: rendered distinctly, no handles.
                painter.rect_filled(
                    element_rect,
                    6.0,
                    egui::Color32::from_rgba_unmultiplied(239, 68, 68, 120),
                );
                painter.rect_stroke(
                    element_rect,
                    6.0,
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(185, 28, 28)),
                    egui::epaint::StrokeKind::Inside,
                );
                painter.text(
                    element_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "TALKING",
                    egui::FontId::proportional(12.0),
                    egui::Color32::WHITE,
                );
                continue;
            }

            let selected = shared.selection.selected == Some(element.id);
            let body_color = if selected {
                egui::Color32::from_rgb(67, 80, 100)
            } else {
                egui::Color32::from_rgb(55, 65, 81)
            };
            painter.rect_filled(element_rect, 6.0, body_color);
            painter.rect_stroke(
                element_rect,
                6.0,
                egui::Stroke::new(
                    1.0,
                    if selected {
                        egui::Color32::from_rgb(59, 130, 246)
                    } else {
                        egui::Color32::from_rgb(75, 85, 99)
                    },
                ),
                egui::epaint::StrokeKind::Inside,
            );

            // Display index badge.
            let badge = egui::Rect::from_min_size(element_rect.min, egui::vec2(22.0, 18.0));
            painter.rect_filled(badge, 4.0, egui::Color32::from_rgb(22, 163, 74));
            painter.text(
                badge.center(),
                egui::Align2::CENTER_CENTER,
                element.index.to_string(),
                egui::FontId::proportional(11.0),
                egui::Color32::WHITE,
            );

            painter.with_clip_rect(element_rect).text(
                egui::pos2(element_rect.min.x + 26.0, element_rect.center().y),
                egui::Align2::LEFT_CENTER,
                &element.text,
                egui::FontId::proportional(12.0),
                egui::Color32::from_gray(220),
            );

            // Narration coverage bar along the bottom edge.
            if element.has_audio {
                let bar = egui::Rect::from_min_max(
                    egui::pos2(element_rect.min.x, element_rect.max.y - 3.0),
                    element_rect.max,
                );
                painter.rect_filled(bar, 0.0, egui::Color32::from_rgb(59, 130, 246));
                if let Some(clip_seconds) = shared.mixer.clip_duration(element.id) {
                    let coverage =
                        ((clip_seconds as f32 * MAJOR_TICK_SPACING) / width).clamp(0.0, 1.0);
                    let covered = egui::Rect::from_min_size(
                        bar.min,
                        egui::vec2(bar.width() * coverage, bar.height()),
                    );
                    painter.rect_filled(covered, 0.0, egui::Color32::from_rgb(34, 197, 94));
                }
            }

            // Interaction: body drag, then edge handles on top of it.
            let body_response = ui.interact(
                element_rect,
                ui.id().with(("scene-body", element.id)),
                egui::Sense::click_and_drag(),
            );
            let left_handle = egui::Rect::from_min_size(
                element_rect.min,
                egui::vec2(HANDLE_WIDTH, ELEMENT_HEIGHT),
            );
            let right_handle = egui::Rect::from_min_size(
                egui::pos2(element_rect.max.x - HANDLE_WIDTH, element_rect.min.y),
                egui::vec2(HANDLE_WIDTH, ELEMENT_HEIGHT),
            );
            let left_response = ui.interact(
                left_handle,
                ui.id().with(("scene-left", element.id)),
                egui::Sense::drag(),
            );
            let right_response = ui.interact(
                right_handle,
                ui.id().with(("scene-right", element.id)),
                egui::Sense::drag(),
            );

            body_response.clone().on_hover_cursor(egui::CursorIcon::Grab);
            left_response
                .clone()
                .on_hover_cursor(egui::CursorIcon::ResizeHorizontal);
            right_response
                .clone()
                .on_hover_cursor(egui::CursorIcon::ResizeHorizontal);

            // Resize grip glyphs.
            for handle_rect in [left_handle, right_handle] {
                painter.text(
                    handle_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "⋮",
                    egui::FontId::proportional(12.0),
                    egui::Color32::from_gray(140),
                );
            }

            if body_response.clicked() {
                shared.selection.selected = Some(element.id);
            }

            // One interaction at a time: a live resize blocks dragging
            // and vice versa.
            if self.drag.is_none() {
                if left_response.drag_started() {
                    started = Some(ActiveDrag {
                        id: element.id,
                        kind: DragKind::ResizeLeft,
                        proposal: element.position,
                    });
                } else if right_response.drag_started() {
                    started = Some(ActiveDrag {
                        id: element.id,
                        kind: DragKind::ResizeRight,
                        proposal: element.width,
                    });
                } else if body_response.drag_started() {
                    started = Some(ActiveDrag {
                        id: element.id,
                        kind: DragKind::Move,
                        proposal: element.position,
                    });
                }
            }

            if let Some(drag) = &mut self.drag {
                if drag.id == element.id {
                    let response = match drag.kind {
                        DragKind::Move => &body_response,
                        DragKind::ResizeLeft => &left_response,
                        DragKind::ResizeRight => &right_response,
                    };
                    if response.dragged() {
                        drag.proposal += response.drag_delta().x;
                    }
                    if response.drag_stopped() {
                        committed = true;
                    }
                }
            }
        }

        if let Some(drag) = started {
            self.drag = Some(drag);
        }
        if committed {
            if let Some(drag) = self.drag.take() {
                self.commit_drag(shared, &drag);
            }
        }

        self.render_playhead(&painter, rect, playhead_px);

        // Insert a scene at the play-head; rejected cheaply mid-drag.
        let insert_rect = egui::Rect::from_min_size(
            egui::pos2(
                (rect.min.x + playhead_px - self.scroll_x + 6.0).min(rect.max.x - 26.0),
                rect.min.y + 2.0,
            ),
            egui::vec2(22.0, 20.0),
        );
        let insert_enabled = !self.interaction_active() && !shared.busy;
        if ui
            .put(
                insert_rect,
                egui::Button::new("+").small().fill(egui::Color32::from_rgb(22, 163, 74)),
            )
            .clicked()
            && insert_enabled
        {
            let document = shared.executor.document();
            let at_ms = px_to_ms(playhead_px);
            if let Some(planned) = plan_insert_at(document.scenes(), document.duration_ms, at_ms) {
                shared.pending_actions.push(Box::new(InsertSceneAction::new(planned)));
            }
        }

        // Clicks on empty timeline seek the transport and any narration
        // under the new position.
        if background.clicked() && !pointer_over_element && self.drag.is_none() {
            if let Some(pos) = background.interact_pointer_pos() {
                let seconds = px_to_ms(pos.x - rect.min.x + self.scroll_x) as f64 / 1_000.0;
                shared.transport.seek(seconds);
                shared
                    .mixer
                    .seek_click(shared.executor.document(), seconds);
            }
        }
    }
}
