//! Scene snapshot serialization
//!
//! The host editor hands the exporter a consistent read-only snapshot of
//! its scene; this module is that hand-off as a file format.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::scene::SceneNode;

/// A serialized scene snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// File format version
    pub version: u32,
    /// Scene tree root
    pub scene: SceneNode,
}

impl Project {
    /// Wrap a scene snapshot in the current file format version
    pub fn new(scene: SceneNode) -> Self {
        Self { version: 1, scene }
    }

    /// Save the snapshot to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        let path = path.as_ref();
        let content = self.to_bytes()?;
        std::fs::write(path, content).map_err(|e| ProjectError::Io(e.to_string()))?;
        Ok(())
    }

    /// Serialize the snapshot to bytes (for embedding hosts)
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProjectError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ProjectError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Load a snapshot from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ProjectError::Io(e.to_string()))?;
        let project: Project =
            ron::from_str(&content).map_err(|e| ProjectError::Deserialize(e.to_string()))?;
        Ok(project)
    }

    /// Load a snapshot from bytes (for embedding hosts)
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, ProjectError> {
        let content =
            std::str::from_utf8(data).map_err(|e| ProjectError::Deserialize(e.to_string()))?;
        let project: Project =
            ron::from_str(content).map_err(|e| ProjectError::Deserialize(e.to_string()))?;
        Ok(project)
    }
}

/// Project-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
