//! Action system: the document's single mutation entry point
//!
//! Every change to the scene set goes through an [`Action`] executed by
//! the [`ActionExecutor`], which keeps undo/redo stacks and a revision
//! counter the editor uses to know when its derived timeline projection
//! is stale. External code only ever gets read access via
//! [`ActionExecutor::document`]; mutable document accessors are
//! `pub(crate)`, so the non-overlap and minimum-width invariants are
//! enforced at one choke point.

use crate::document::SceneDocument;

/// An undoable document mutation.
///
/// Validation happens before an action is constructed (the interaction
/// layer drops rejected proposals), so `execute` itself is infallible.
pub trait Action: Send {
    /// Apply this action to the document.
    fn execute(&mut self, document: &mut SceneDocument);

    /// Undo this action.
    fn rollback(&mut self, document: &mut SceneDocument);

    /// Human-readable description for the undo menu.
    fn description(&self) -> String;
}

/// Wraps the document and serializes all mutations through actions.
pub struct ActionExecutor {
    document: SceneDocument,
    undo_stack: Vec<Box<dyn Action>>,
    redo_stack: Vec<Box<dyn Action>>,
    max_undo_depth: usize,
    revision: u64,
}

impl ActionExecutor {
    pub fn new(document: SceneDocument) -> Self {
        Self {
            document,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo_depth: 100,
            revision: 0,
        }
    }

    /// Read-only access to the document.
    pub fn document(&self) -> &SceneDocument {
        &self.document
    }

    /// Monotonic counter bumped on every mutation; derived projections
    /// cache against it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Execute an action and push it onto the undo stack.
    pub fn execute(&mut self, mut action: Box<dyn Action>) {
        action.execute(&mut self.document);
        self.document.sort_scenes();
        self.revision += 1;
        self.redo_stack.clear();
        self.undo_stack.push(action);
        if self.undo_stack.len() > self.max_undo_depth {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the most recent action. Returns its description.
    pub fn undo(&mut self) -> Option<String> {
        let mut action = self.undo_stack.pop()?;
        action.rollback(&mut self.document);
        self.document.sort_scenes();
        self.revision += 1;
        let description = action.description();
        self.redo_stack.push(action);
        Some(description)
    }

    /// Re-apply the most recently undone action.
    pub fn redo(&mut self) -> Option<String> {
        let mut action = self.redo_stack.pop()?;
        action.execute(&mut self.document);
        self.document.sort_scenes();
        self.revision += 1;
        let description = action.description();
        self.undo_stack.push(action);
        Some(description)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Replace the document wholesale (project load), dropping history.
    pub fn reset(&mut self, document: SceneDocument) {
        self.document = document;
        self.document.sort_scenes();
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.revision += 1;
    }
}
