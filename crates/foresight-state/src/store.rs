//! Pure merge functions over the [`DemoState`] aggregate.
//!
//! Every mutation goes through these functions; they touch nothing outside
//! the passed-in state, so each is independently testable. Events must be
//! applied in arrival order since later patches depend on earlier appends.

use chrono::Utc;
use foresight_core::artifact::{Artifact, ArtifactData};
use foresight_core::event::EngineEvent;
use foresight_core::exploration::{DemoState, Exploration, PreferableFuture};
use foresight_core::types::{ExplorationStatus, Mode, SignalAction};
use uuid::Uuid;

/// Create a new running exploration and prepend it (most-recent-first).
/// Returns the new exploration's id.
pub fn create_exploration(state: &mut DemoState, query: impl Into<String>, mode: Mode) -> Uuid {
    let exploration = Exploration::new(query, mode);
    let id = exploration.id;
    insert_exploration(state, exploration);
    id
}

/// Prepend an already-constructed exploration (most-recent-first).
pub fn insert_exploration(state: &mut DemoState, exploration: Exploration) {
    state.explorations.insert(0, exploration);
}

/// Fold one engine event into the owning exploration.
///
/// Unknown exploration or artifact ids are silently ignored; the pipeline
/// and the aggregate can disagree only transiently (e.g. after a reset
/// mid-run) and dropping the event is the demo's contract.
pub fn apply_event(state: &mut DemoState, exploration_id: Uuid, event: &EngineEvent) {
    let Some(exploration) = state.exploration_mut(exploration_id) else {
        return;
    };

    match event {
        EngineEvent::Artifact { artifact } => {
            exploration.artifacts.push(artifact.clone());
            exploration.updated_at = Utc::now();
        }
        EngineEvent::ArtifactUpdate { artifact_id, patch } => {
            if let Some(artifact) = exploration.artifact_mut(*artifact_id) {
                artifact.apply(patch);
            }
            exploration.updated_at = Utc::now();
        }
        EngineEvent::Done => {
            exploration.status = ExplorationStatus::Done;
        }
    }
}

/// Mark an exploration paused after a cancelled run.
pub fn pause_exploration(state: &mut DemoState, exploration_id: Uuid) {
    if let Some(exploration) = state.exploration_mut(exploration_id) {
        exploration.status = ExplorationStatus::Paused;
    }
}

/// Fields the caller supplies when bookmarking a scenario.
#[derive(Debug, Clone)]
pub struct NewFuture {
    pub exploration_id: Uuid,
    pub scenario_id: Uuid,
    pub title: String,
    pub brief: String,
    pub tags: Vec<String>,
}

/// Prepend a new preferable future with a fresh id and timestamp.
/// Returns the bookmark's id.
pub fn save_future(state: &mut DemoState, future: NewFuture) -> Uuid {
    let id = Uuid::new_v4();
    state.preferable_futures.insert(
        0,
        PreferableFuture {
            id,
            exploration_id: future.exploration_id,
            scenario_id: future.scenario_id,
            title: future.title,
            brief: future.brief,
            tags: future.tags,
            created_at: Utc::now(),
        },
    );
    id
}

/// Record a saved/dismissed decision for a signal. Re-applying the same
/// action is a no-op in effect; switching simply overwrites.
pub fn record_signal_action(state: &mut DemoState, signal_id: Uuid, action: SignalAction) {
    state.signal_selections.insert(signal_id, action);
}

/// Append a locked report artifact titled from the exploration.
pub fn add_report(state: &mut DemoState, exploration_id: Uuid) {
    if let Some(exploration) = state.exploration_mut(exploration_id) {
        let report = Artifact::locked(ArtifactData::Report {
            title: format!("Report for {}", exploration.title),
        });
        exploration.artifacts.push(report);
        exploration.updated_at = Utc::now();
    }
}
