//! Project metadata updates
//!
//! Video name, timeline extent, thumbnail and encode outputs change
//! through here so they share the undo history with scene edits. Only
//! the provided fields are touched.

use crate::action::Action;
use crate::document::{EncodeOutputs, SceneDocument};

#[derive(Default)]
pub struct SetProjectMetaAction {
    video_name: Option<Option<String>>,
    duration_ms: Option<u64>,
    thumbnail: Option<Option<String>>,
    outputs: Option<EncodeOutputs>,
    previous: Option<(Option<String>, u64, Option<String>, EncodeOutputs)>,
}

impl SetProjectMetaAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn video_name(mut self, name: Option<String>) -> Self {
        self.video_name = Some(name);
        self
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn thumbnail(mut self, thumbnail: Option<String>) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }

    pub fn outputs(mut self, outputs: EncodeOutputs) -> Self {
        self.outputs = Some(outputs);
        self
    }
}

impl Action for SetProjectMetaAction {
    fn execute(&mut self, document: &mut SceneDocument) {
        self.previous = Some((
            document.video_name.clone(),
            document.duration_ms,
            document.thumbnail.clone(),
            document.outputs.clone(),
        ));
        if let Some(video_name) = &self.video_name {
            document.video_name = video_name.clone();
        }
        if let Some(duration_ms) = self.duration_ms {
            document.duration_ms = duration_ms;
        }
        if let Some(thumbnail) = &self.thumbnail {
            document.thumbnail = thumbnail.clone();
        }
        if let Some(outputs) = &self.outputs {
            document.outputs = outputs.clone();
        }
    }

    fn rollback(&mut self, document: &mut SceneDocument) {
        let Some((video_name, duration_ms, thumbnail, outputs)) = self.previous.take() else {
            return;
        };
        document.video_name = video_name;
        document.duration_ms = duration_ms;
        document.thumbnail = thumbnail;
        document.outputs = outputs;
    }

    fn description(&self) -> String {
        "Update project settings".to_string()
    }
}
