//! Exploration and aggregate state types.
//!
//! An Exploration is one end-to-end user research session; DemoState is the
//! client-visible aggregate root holding all sessions, saved futures, and
//! signal decisions.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::artifact::{Artifact, FrameData, FrameMetric};
use crate::types::{ExplorationStatus, Mode, SignalAction};

/// Maximum length of a derived exploration title.
const TITLE_MAX_CHARS: usize = 56;

/// One user-initiated research session and its artifact history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exploration {
    pub id: Uuid,

    /// Derived from the query, truncated.
    pub title: String,

    /// Raw user input.
    pub query: String,

    /// Derived goal text.
    pub goal: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub mode: Mode,
    pub status: ExplorationStatus,

    /// Static seed frame populated at creation for immediate display. The
    /// pipeline later emits its own `frame` artifact; both are kept.
    pub frame: FrameData,

    /// Insertion order = arrival order; append-only except for in-place
    /// patch merges by artifact id.
    pub artifacts: Vec<Artifact>,
}

impl Exploration {
    /// Create a new running exploration from a raw query.
    pub fn new(query: impl Into<String>, mode: Mode) -> Self {
        let query = query.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: query.chars().take(TITLE_MAX_CHARS).collect(),
            goal: format!("Explore plausible futures related to: {}", query),
            query,
            created_at: now,
            updated_at: now,
            mode,
            status: ExplorationStatus::Running,
            frame: FrameData::seed(),
            artifacts: Vec::new(),
        }
    }

    /// Find an artifact by id.
    pub fn artifact(&self, id: Uuid) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.id == id)
    }

    /// Find an artifact by id, mutably.
    pub fn artifact_mut(&mut self, id: Uuid) -> Option<&mut Artifact> {
        self.artifacts.iter_mut().find(|a| a.id == id)
    }
}

impl FrameData {
    /// The static seed frame content used at exploration creation.
    pub fn seed() -> Self {
        let scope: BTreeMap<String, String> = [
            ("Geographic", "Global"),
            ("Political", "Mixed governance"),
            ("Industry", "Technology"),
            ("Technology", "AI + Quantum"),
            ("Social", "Labor + Education"),
            ("Entity", "Public-private coalitions"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            time_horizon: "5y".to_string(),
            scope,
            metrics: vec![
                FrameMetric {
                    name: "Adoption".to_string(),
                    value: "18".to_string(),
                    unit: "%".to_string(),
                    note: "baseline mock estimate".to_string(),
                },
                FrameMetric {
                    name: "Policy latency".to_string(),
                    value: "14".to_string(),
                    unit: "months".to_string(),
                    note: "avg policy update cadence".to_string(),
                },
                FrameMetric {
                    name: "Public trust".to_string(),
                    value: "62".to_string(),
                    unit: "/100".to_string(),
                    note: "sentiment trend proxy".to_string(),
                },
            ],
        }
    }
}

/// A user-saved scenario bookmark. Created only by explicit user action on
/// a `scenarios` artifact; never mutated; deleted only by full state reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferableFuture {
    pub id: Uuid,

    /// Back-reference to the owning exploration (non-owning).
    pub exploration_id: Uuid,

    /// The scenario entry this bookmark was taken from.
    pub scenario_id: Uuid,

    pub title: String,
    pub brief: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// The aggregate root for the client-visible demo state.
///
/// Every field carries a serde default so persisted blobs from older
/// versions load cleanly with new fields defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DemoState {
    /// Most-recent-first on insert.
    #[serde(default)]
    pub explorations: Vec<Exploration>,

    /// Most-recent-first on insert.
    #[serde(default)]
    pub preferable_futures: Vec<PreferableFuture>,

    /// Signal id to the user's saved/dismissed decision.
    #[serde(default)]
    pub signal_selections: BTreeMap<Uuid, SignalAction>,
}

impl DemoState {
    /// Find an exploration by id.
    pub fn exploration(&self, id: Uuid) -> Option<&Exploration> {
        self.explorations.iter().find(|e| e.id == id)
    }

    /// Find an exploration by id, mutably.
    pub fn exploration_mut(&mut self, id: Uuid) -> Option<&mut Exploration> {
        self.explorations.iter_mut().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_truncated_to_56_chars() {
        let long = "x".repeat(200);
        let exploration = Exploration::new(long.clone(), Mode::Guided);
        assert_eq!(exploration.title.chars().count(), 56);
        assert_eq!(exploration.query, long);
    }

    #[test]
    fn test_short_query_kept_whole() {
        let exploration = Exploration::new("Future of EVs", Mode::Guided);
        assert_eq!(exploration.title, "Future of EVs");
        assert!(exploration.goal.contains("Future of EVs"));
    }

    #[test]
    fn test_new_exploration_is_running_with_seed_frame() {
        let exploration = Exploration::new("q", Mode::Rapid);
        assert_eq!(exploration.status, ExplorationStatus::Running);
        assert_eq!(exploration.frame.time_horizon, "5y");
        assert_eq!(exploration.frame.metrics.len(), 3);
        assert!(exploration.artifacts.is_empty());
    }

    #[test]
    fn test_demo_state_loads_with_missing_fields() {
        // Forward-compatible: a persisted blob lacking newer fields still
        // deserializes with defaults.
        let state: DemoState = serde_json::from_str("{\"explorations\": []}").unwrap();
        assert!(state.preferable_futures.is_empty());
        assert!(state.signal_selections.is_empty());
    }
}
