//! Error taxonomy for the core crate
//!
//! Constraint violations on the timeline (overlap, sub-minimum resize) are
//! not errors: the interaction layer drops them as silent no-ops. These
//! variants cover the cases that do surface to the user-visible layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no project named {0:?} in the store")]
    ProjectNotFound(String),
}
