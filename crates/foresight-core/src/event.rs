//! Engine events emitted by a pipeline run.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::artifact::{Artifact, ArtifactPatch};

/// One event in a pipeline run's strictly ordered stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// A new artifact was produced; the consumer appends it.
    Artifact { artifact: Artifact },

    /// A partial patch targeting an existing artifact by id.
    #[serde(rename = "artifact-update")]
    ArtifactUpdate {
        artifact_id: Uuid,
        patch: ArtifactPatch,
    },

    /// Terminal marker; no further events follow in this run.
    Done,
}

impl EngineEvent {
    /// Returns true for the terminal `done` marker.
    pub fn is_done(&self) -> bool {
        matches!(self, EngineEvent::Done)
    }
}
