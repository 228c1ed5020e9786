//! Project persistence
//!
//! Projects are stored by name in a single `projects.json` under the
//! user's data directory: load-by-name, save-replace-by-name, list and
//! delete. The snapshot carries the scene array and the surrounding
//! session metadata so a project reopens exactly where it was left.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::document::SceneDocument;
use crate::error::CoreError;

/// Store file format version.
pub const STORE_VERSION: &str = "1.0.0";

/// One saved project.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub name: String,
    pub document: SceneDocument,
    /// Save date, `DD.MM.YYYY`
    pub saved_at: String,
}

impl ProjectSnapshot {
    pub fn new(name: impl Into<String>, document: SceneDocument) -> Self {
        Self {
            name: name.into(),
            document,
            saved_at: chrono::Local::now().format("%d.%m.%Y").to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Default)]
struct StoreFile {
    #[serde(default)]
    version: String,
    #[serde(default)]
    projects: Vec<ProjectSnapshot>,
}

/// Name-keyed project store backed by one JSON file.
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<StoreFile, CoreError> {
        if !self.path.exists() {
            return Ok(StoreFile::default());
        }
        let body = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn write(&self, mut store: StoreFile) -> Result<(), CoreError> {
        store.version = STORE_VERSION.to_string();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&store)?)?;
        Ok(())
    }

    /// Save a snapshot, replacing any existing project with the same name.
    pub fn save(&self, snapshot: ProjectSnapshot) -> Result<(), CoreError> {
        let mut store = self.read()?;
        store.projects.retain(|p| p.name != snapshot.name);
        store.projects.push(snapshot);
        self.write(store)
    }

    pub fn load(&self, name: &str) -> Result<ProjectSnapshot, CoreError> {
        self.read()?
            .projects
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| CoreError::ProjectNotFound(name.to_string()))
    }

    /// Project names with their save dates, in stored order.
    pub fn list(&self) -> Result<Vec<(String, String)>, CoreError> {
        Ok(self
            .read()?
            .projects
            .into_iter()
            .map(|p| (p.name, p.saved_at))
            .collect())
    }

    pub fn delete(&self, name: &str) -> Result<(), CoreError> {
        let mut store = self.read()?;
        let before = store.projects.len();
        store.projects.retain(|p| p.name != name);
        if store.projects.len() == before {
            return Err(CoreError::ProjectNotFound(name.to_string()));
        }
        self.write(store)
    }
}
