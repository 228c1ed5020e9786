//! Core data model and timeline logic for SceneScribe
//!
//! This crate owns everything the editor mutates: the scene document, the
//! command-pattern action system that is its single mutation entry point,
//! the pixel projection and boundary resolution for the timeline, and the
//! import/export formats. It has no UI or I/O-device dependencies so the
//! invariants (non-overlap, minimum scene width) are testable headless.

pub mod action;
pub mod actions;
pub mod analysis;
pub mod document;
pub mod error;
pub mod insertion;
pub mod interaction;
pub mod layout;
pub mod pacing;
pub mod project_store;
pub mod scene;
pub mod srt;
pub mod sync;
pub mod timecode;

pub use action::{Action, ActionExecutor};
pub use document::{EditPolicy, SceneDocument};
pub use error::CoreError;
pub use scene::{Scene, MIN_SCENE_MS};
