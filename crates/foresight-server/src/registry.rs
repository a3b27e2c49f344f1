//! Run registry: maps run ids to their lifecycle records.
//!
//! Records are process-lifetime and never evicted; acceptable for a
//! bounded-lifetime demo process, a production port must add expiry.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use foresight_core::bundle::{ArtifactBundle, GenerateInput};
use tokio::sync::RwLock;
use tokio::time::{sleep, Duration};
use tracing::debug;
use uuid::Uuid;

use crate::bundle::build_bundle;

/// Lifecycle record for one asynchronous generation run.
#[derive(Debug, Clone)]
pub enum RunRecord {
    Processing {
        created_at: DateTime<Utc>,
    },
    Ready {
        created_at: DateTime<Utc>,
        result: ArtifactBundle,
    },
}

/// Injectable store of run records with deferred completion.
#[derive(Clone)]
pub struct RunRegistry {
    runs: Arc<RwLock<HashMap<String, RunRecord>>>,
    completion_delay: Duration,
}

impl RunRegistry {
    /// Create a registry whose deferred completions fire after `delay`.
    pub fn new(completion_delay: Duration) -> Self {
        Self {
            runs: Arc::new(RwLock::new(HashMap::new())),
            completion_delay,
        }
    }

    /// Accept a validated request: store a processing record and schedule
    /// its completion. Returns the run id immediately.
    ///
    /// The completion timer always fires once scheduled; it is not
    /// cancelable. The synthesized bundle is stored without an output
    /// validation gate; `poll` is where validation happens.
    pub async fn submit(&self, input: GenerateInput) -> String {
        let run_id = {
            let mut runs = self.runs.write().await;
            // The short id keeps the original wire format but can collide;
            // regenerate under the lock so no record is ever overwritten.
            let mut run_id = new_run_id();
            while runs.contains_key(&run_id) {
                run_id = new_run_id();
            }
            runs.insert(
                run_id.clone(),
                RunRecord::Processing {
                    created_at: Utc::now(),
                },
            );
            run_id
        };
        debug!(%run_id, "run accepted");

        let runs = self.runs.clone();
        let delay = self.completion_delay;
        let completed_id = run_id.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            let result = build_bundle(&input);
            runs.write().await.insert(
                completed_id.clone(),
                RunRecord::Ready {
                    created_at: Utc::now(),
                    result,
                },
            );
            debug!(run_id = %completed_id, "run ready");
        });

        run_id
    }

    /// Look up a run record by id.
    pub async fn poll(&self, run_id: &str) -> Option<RunRecord> {
        self.runs.read().await.get(run_id).cloned()
    }

    /// Store an already-completed record. Used by tests and fixtures to
    /// seed the registry without waiting on the timer.
    pub async fn insert_ready(&self, run_id: impl Into<String>, result: ArtifactBundle) {
        self.runs.write().await.insert(
            run_id.into(),
            RunRecord::Ready {
                created_at: Utc::now(),
                result,
            },
        );
    }
}

fn new_run_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("RUN-{}", &suffix[..6])
}
