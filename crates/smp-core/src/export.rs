//! SMP export entry point

use std::fmt;

use crate::classify::classify;
use crate::document::assemble;
use crate::scene::{BodyKind, SceneNode};

/// Result of a successful export
#[derive(Debug, Clone)]
pub struct ExportOutput {
    /// The complete document text
    pub document: String,
    /// Non-fatal conditions recorded during classification
    pub diagnostics: Vec<Diagnostic>,
}

/// Non-fatal conditions reported alongside a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A rigid body of the wrong simulation kind for where it was found;
    /// the object was skipped. `found` is `None` when the object carried
    /// no body descriptor at all.
    MisclassifiedBody {
        object: String,
        expected: BodyKind,
        found: Option<BodyKind>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MisclassifiedBody {
                object,
                expected,
                found,
            } => {
                let found = found.map_or("no rigid body", |kind| kind.display_name());
                write!(
                    f,
                    "object '{}' skipped: expected a {} rigid body, found {}",
                    object,
                    expected.display_name(),
                    found
                )
            }
        }
    }
}

/// Export-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("no static bones found; at least one passive bone is required")]
    EmptyStaticSet,
    #[error("constraint '{constraint}' endpoint '{endpoint}' does not resolve to a scene object")]
    DanglingConstraintEndpoint { constraint: String, endpoint: String },
}

/// Classify one scene snapshot and render the physics document.
///
/// One-shot and deterministic: the same snapshot always yields the same
/// bytes. Fatal conditions return an error with no partial document.
pub fn export(scene: &SceneNode) -> Result<ExportOutput, ExportError> {
    let classified = classify(scene)?;
    let document = assemble(&classified)?;
    Ok(ExportOutput {
        document,
        diagnostics: classified.diagnostics,
    })
}
