//! Common enums used across the Foresight workspace.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an Exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplorationStatus {
    /// Created but no pipeline has started.
    Idle,
    /// A pipeline is actively appending artifacts.
    Running,
    /// The pipeline was cancelled mid-run; resumable only by a fresh run.
    Paused,
    /// The pipeline completed normally.
    Done,
}

impl ExplorationStatus {
    /// Returns true if no pipeline is currently active.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            ExplorationStatus::Idle | ExplorationStatus::Paused | ExplorationStatus::Done
        )
    }

    /// Returns true while a pipeline is appending artifacts.
    pub fn is_running(&self) -> bool {
        matches!(self, ExplorationStatus::Running)
    }
}

/// Status of a single artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactStatus {
    /// Not yet finalized; editable by the user.
    Draft,
    /// Actively being populated by the pipeline.
    Streaming,
    /// Complete and immutable to the pipeline.
    Locked,
}

impl ArtifactStatus {
    /// Returns true if the pipeline may no longer mutate this artifact.
    pub fn is_locked(&self) -> bool {
        matches!(self, ArtifactStatus::Locked)
    }
}

/// How an exploration is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Fully scripted walkthrough (default).
    #[default]
    Guided,
    /// The user locks the frame themselves; `frame` starts as a draft.
    Manual,
    /// Abbreviated run with the same step order.
    Rapid,
}

/// A user's decision about a streamed signal item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalAction {
    Saved,
    Dismissed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exploration_status_settled() {
        assert!(ExplorationStatus::Idle.is_settled());
        assert!(ExplorationStatus::Paused.is_settled());
        assert!(ExplorationStatus::Done.is_settled());
        assert!(!ExplorationStatus::Running.is_settled());
    }

    #[test]
    fn test_artifact_status_locked() {
        assert!(ArtifactStatus::Locked.is_locked());
        assert!(!ArtifactStatus::Draft.is_locked());
        assert!(!ArtifactStatus::Streaming.is_locked());
    }

    #[test]
    fn test_mode_serialization() {
        let json = serde_json::to_string(&Mode::Manual).unwrap();
        assert_eq!(json, "\"manual\"");
    }
}
