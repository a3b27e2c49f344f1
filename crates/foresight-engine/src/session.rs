//! Per-session run driver.
//!
//! A session owns the client-visible aggregate, a persistence backend, and
//! at most one active pipeline. Starting a new run cancels the previous
//! producer first, so only a single pipeline ever appends to the aggregate.
//! Every applied event persists the whole state.

use std::sync::Arc;

use foresight_core::exploration::{DemoState, Exploration};
use foresight_core::types::{Mode, SignalAction};
use foresight_state::storage::StateStorage;
use foresight_state::store::{self, NewFuture};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use uuid::Uuid;

use crate::pipeline::spawn_pipeline;

struct ActiveRun {
    exploration_id: Uuid,
    token: CancellationToken,
    driver: JoinHandle<()>,
}

/// One client session: the aggregate, its storage, and the active run.
pub struct Session {
    state: Arc<RwLock<DemoState>>,
    storage: Arc<dyn StateStorage>,
    active: Mutex<Option<ActiveRun>>,
}

impl Session {
    /// Open a session, loading any persisted state.
    pub async fn open(storage: Arc<dyn StateStorage>) -> Self {
        let state = storage.load().await;
        Self {
            state: Arc::new(RwLock::new(state)),
            storage,
            active: Mutex::new(None),
        }
    }

    /// A snapshot of the current aggregate.
    pub async fn state(&self) -> DemoState {
        self.state.read().await.clone()
    }

    /// The id of the exploration a run is currently appending to, if any.
    pub async fn active_exploration(&self) -> Option<Uuid> {
        self.active.lock().await.as_ref().map(|r| r.exploration_id)
    }

    /// Start a new run for a fresh exploration.
    ///
    /// Any previously active run is cancelled and drained before the new
    /// producer begins appending, so no two producers ever interleave
    /// writes to the aggregate.
    pub async fn start_run(&self, query: impl Into<String>, mode: Mode) -> Uuid {
        let mut active = self.active.lock().await;
        if let Some(previous) = active.take() {
            previous.token.cancel();
            let _ = previous.driver.await;
        }

        let exploration = Exploration::new(query, mode);
        let exploration_id = exploration.id;
        {
            let mut state = self.state.write().await;
            store::insert_exploration(&mut state, exploration.clone());
            self.persist(&state).await;
        }
        info!(%exploration_id, "run started");

        let token = CancellationToken::new();
        let mut handle = spawn_pipeline(&exploration, token.clone());

        let state = self.state.clone();
        let storage = self.storage.clone();
        let driver = tokio::spawn(async move {
            let mut saw_done = false;
            while let Some(event) = handle.events.recv().await {
                saw_done |= event.is_done();
                let mut state = state.write().await;
                store::apply_event(&mut state, exploration_id, &event);
                if let Err(err) = storage.save(&state).await {
                    error!(%exploration_id, "failed to persist state: {err}");
                }
            }
            if !saw_done {
                // The producer stopped without its terminal marker: this is
                // cancellation, not an error to surface.
                let mut state = state.write().await;
                store::pause_exploration(&mut state, exploration_id);
                if let Err(err) = storage.save(&state).await {
                    error!(%exploration_id, "failed to persist state: {err}");
                }
                info!(%exploration_id, "run cancelled, exploration paused");
            }
        });

        *active = Some(ActiveRun {
            exploration_id,
            token,
            driver,
        });
        exploration_id
    }

    /// Cancel the active run, if any, and wait for its driver to settle.
    pub async fn stop(&self) {
        if let Some(run) = self.active.lock().await.take() {
            run.token.cancel();
            let _ = run.driver.await;
        }
    }

    /// Wait for the active run to finish (complete or cancelled).
    pub async fn wait(&self) {
        if let Some(run) = self.active.lock().await.take() {
            let _ = run.driver.await;
        }
    }

    /// Bookmark a scenario as a preferable future.
    pub async fn save_future(&self, future: NewFuture) -> Uuid {
        let mut state = self.state.write().await;
        let id = store::save_future(&mut state, future);
        self.persist(&state).await;
        id
    }

    /// Record a saved/dismissed decision for a signal.
    pub async fn record_signal_action(&self, signal_id: Uuid, action: SignalAction) {
        let mut state = self.state.write().await;
        store::record_signal_action(&mut state, signal_id, action);
        self.persist(&state).await;
    }

    /// Append a report artifact to an exploration.
    pub async fn add_report(&self, exploration_id: Uuid) {
        let mut state = self.state.write().await;
        store::add_report(&mut state, exploration_id);
        self.persist(&state).await;
    }

    /// Clear the aggregate to defaults and delete the persisted copy.
    pub async fn reset(&self) {
        self.stop().await;
        let mut state = self.state.write().await;
        *state = DemoState::default();
        if let Err(err) = self.storage.reset().await {
            error!("failed to reset storage: {err}");
        }
    }

    async fn persist(&self, state: &DemoState) {
        if let Err(err) = self.storage.save(state).await {
            error!("failed to persist state: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foresight_core::artifact::ArtifactKind;
    use foresight_core::types::ExplorationStatus;
    use foresight_state::storage::InMemoryStorage;

    async fn session() -> Session {
        Session::open(Arc::new(InMemoryStorage::new())).await
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_run_reaches_done_with_all_steps() {
        let session = session().await;
        let id = session.start_run("Future of EVs in NYC by 2030?", Mode::Guided).await;
        session.wait().await;

        let state = session.state().await;
        let exploration = state.exploration(id).unwrap();
        assert_eq!(exploration.status, ExplorationStatus::Done);

        let kinds: Vec<ArtifactKind> = exploration.artifacts.iter().map(|a| a.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ArtifactKind::Clarify,
                ArtifactKind::Frame,
                ArtifactKind::Stakeholders,
                ArtifactKind::Personas,
                ArtifactKind::CollectionPlan,
                ArtifactKind::Signals,
                ArtifactKind::HorizonScan,
                ArtifactKind::Scenarios,
                ArtifactKind::Simulation,
            ]
        );
        // Everything is locked once the run completes.
        assert!(exploration.artifacts.iter().all(|a| a.status.is_locked()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_pauses_exploration_and_stops_merges() {
        let session = session().await;
        let id = session.start_run("query", Mode::Guided).await;

        // Give the pipeline room to emit its first couple of steps.
        tokio::time::sleep(tokio::time::Duration::from_millis(600)).await;
        session.stop().await;

        let state = session.state().await;
        let exploration = state.exploration(id).unwrap();
        assert_eq!(exploration.status, ExplorationStatus::Paused);
        let merged = exploration.artifacts.len();
        assert!(merged < 9);

        // Nothing arrives after the cancellation point.
        tokio::time::sleep(tokio::time::Duration::from_secs(30)).await;
        let state = session.state().await;
        assert_eq!(state.exploration(id).unwrap().artifacts.len(), merged);
        assert_eq!(
            state.exploration(id).unwrap().status,
            ExplorationStatus::Paused
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_run_cancels_previous_producer() {
        let session = session().await;
        let first = session.start_run("first question", Mode::Guided).await;

        tokio::time::sleep(tokio::time::Duration::from_millis(600)).await;
        let second = session.start_run("second question", Mode::Guided).await;
        assert_eq!(session.active_exploration().await, Some(second));

        session.wait().await;
        let state = session.state().await;

        // The superseded run is paused; the new one ran to completion.
        assert_eq!(
            state.exploration(first).unwrap().status,
            ExplorationStatus::Paused
        );
        assert_eq!(
            state.exploration(second).unwrap().status,
            ExplorationStatus::Done
        );
        // Most-recent-first ordering.
        assert_eq!(state.explorations[0].id, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_state_persists_across_sessions() {
        let storage = Arc::new(InMemoryStorage::new());
        {
            let session = Session::open(storage.clone() as Arc<dyn StateStorage>).await;
            session.start_run("persisted", Mode::Guided).await;
            session.wait().await;
        }

        let reopened = Session::open(storage).await;
        let state = reopened.state().await;
        assert_eq!(state.explorations.len(), 1);
        assert_eq!(state.explorations[0].status, ExplorationStatus::Done);
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_future_and_signal_action_persist() {
        let storage = Arc::new(InMemoryStorage::new());
        let session = Session::open(storage.clone() as Arc<dyn StateStorage>).await;
        let exploration_id = session.start_run("q", Mode::Guided).await;
        session.wait().await;

        let scenario_id = Uuid::new_v4();
        session
            .save_future(NewFuture {
                exploration_id,
                scenario_id,
                title: "Coordinated Acceleration".to_string(),
                brief: "brief".to_string(),
                tags: vec!["policy".to_string()],
            })
            .await;
        let signal_id = Uuid::new_v4();
        session.record_signal_action(signal_id, SignalAction::Saved).await;

        let loaded = storage.load().await;
        assert_eq!(loaded.preferable_futures.len(), 1);
        assert_eq!(loaded.signal_selections[&signal_id], SignalAction::Saved);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_state_and_storage() {
        let storage = Arc::new(InMemoryStorage::new());
        let session = Session::open(storage.clone() as Arc<dyn StateStorage>).await;
        session.start_run("q", Mode::Guided).await;
        session.wait().await;

        session.reset().await;
        assert!(session.state().await.explorations.is_empty());
        assert_eq!(storage.load().await, DemoState::default());
    }
}
