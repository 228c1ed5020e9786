//! Pane implementations for the editor
//!
//! Each pane holds its own local state and reaches shared state through
//! `SharedPaneState`. Panes never mutate the document directly: they
//! push actions into `pending_actions` (executed by the app after the
//! whole frame renders, so a batch lands before one boundary
//! recomputation) and app-level commands into `requests`.

use std::collections::HashSet;

use eframe::egui;
use scenescribe_core::action::{Action, ActionExecutor};
use scenescribe_core::layout::TimelineLayout;
use uuid::Uuid;

use crate::playback::{NarrationMixer, Transport};

pub mod header;
pub mod sidebar;
pub mod timeline;

/// Commands panes ask the app to run after rendering.
pub enum UiRequest {
    OpenVideo,
    Analyze,
    ReanalyzeSelection,
    RegenerateSelection,
    Encode,
    ImportSrt,
    ExportSrt,
    SaveProject,
    Undo,
    Redo,
}

/// Scene selection state shared between sidebar and timeline.
#[derive(Default)]
pub struct SelectionState {
    /// The highlighted scene
    pub selected: Option<Uuid>,
    /// Scenes checked for batch reanalyze/regenerate
    pub checked: HashSet<Uuid>,
}

/// Shared state that all panes can access.
pub struct SharedPaneState<'a> {
    /// Read-only document access
    pub executor: &'a ActionExecutor,

    /// Pixel projection for the current document revision
    pub layout: &'a TimelineLayout,

    pub transport: &'a mut Transport,
    pub mixer: &'a mut NarrationMixer,
    pub selection: &'a mut SelectionState,

    /// Actions to execute after rendering completes (two-phase dispatch)
    pub pending_actions: &'a mut Vec<Box<dyn Action>>,

    /// App-level commands raised by panes
    pub requests: &'a mut Vec<UiRequest>,

    /// True while a modal backend job is running
    pub busy: bool,

    /// Whether a video has been opened this session
    pub has_video: bool,
}

/// Trait for pane rendering.
pub trait PaneRenderer {
    fn render_content(&mut self, ui: &mut egui::Ui, shared: &mut SharedPaneState);

    /// Display name of this pane.
    fn name(&self) -> &str;
}
