//! Concrete document actions, one per file.

mod insert_scene;
mod merge_reanalysis;
mod move_scene;
mod remove_scene;
mod replace_scenes;
mod resize_scene;
mod set_project_meta;
mod splice_audio;
mod update_text;

pub use insert_scene::InsertSceneAction;
pub use merge_reanalysis::MergeReanalysisAction;
pub use move_scene::MoveSceneAction;
pub use remove_scene::RemoveSceneAction;
pub use replace_scenes::ReplaceScenesAction;
pub use resize_scene::ResizeSceneAction;
pub use set_project_meta::SetProjectMetaAction;
pub use splice_audio::SpliceAudioAction;
pub use update_text::UpdateSceneTextAction;
