//! The run pipeline: a cooperative, channel-based artifact producer.
//!
//! One spawned task emits the fixed step sequence onto an mpsc channel,
//! sleeping between steps and checking the cancellation token at every
//! delay boundary. Events for one run are strictly sequential; the consumer
//! observes them in emission order. On cancellation the producer stops
//! immediately with [`ForesightError::Cancelled`] and emits nothing further,
//! including the terminal `done`.

use foresight_core::artifact::{
    Artifact, ArtifactData, Persona, RangeMetric, Scenario, SignalItem, Stakeholder,
};
use foresight_core::error::{ForesightError, Result};
use foresight_core::event::EngineEvent;
use foresight_core::exploration::Exploration;
use foresight_core::seq::SeededSequence;
use foresight_core::types::{ArtifactStatus, Mode};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

/// Base delay before each signal item, in milliseconds.
const SIGNAL_BASE_DELAY_MS: u64 = 500;
/// Seeded jitter added on top of the base signal delay.
const SIGNAL_JITTER_MS: u64 = 400;
/// Number of signal items streamed per run.
const SIGNAL_COUNT: usize = 8;

/// A running pipeline: the event receiver, its cancellation token, and the
/// producer task handle.
pub struct RunHandle {
    /// Ordered event stream; closes after `done` or on cancellation.
    pub events: mpsc::Receiver<EngineEvent>,

    /// Cancels the producer at its next delay boundary.
    pub token: CancellationToken,

    /// Resolves to `Err(Cancelled)` when the run was aborted.
    pub task: JoinHandle<Result<()>>,
}

/// Spawn the pipeline for an exploration.
///
/// The caller owns single-producer discipline: it must cancel any previous
/// run for the same session before spawning a new one.
pub fn spawn_pipeline(exploration: &Exploration, token: CancellationToken) -> RunHandle {
    let (tx, rx) = mpsc::channel(32);
    let exploration = exploration.clone();
    let task_token = token.clone();
    let task = tokio::spawn(async move {
        let result = run_pipeline(&exploration, &task_token, &tx).await;
        if result.is_err() {
            info!(exploration_id = %exploration.id, "pipeline cancelled");
        }
        result
    });

    RunHandle { events: rx, token, task }
}

/// Sleep for `ms`, abandoning the wait immediately on cancellation.
async fn pause(ms: u64, token: &CancellationToken) -> Result<()> {
    tokio::select! {
        _ = token.cancelled() => Err(ForesightError::Cancelled),
        _ = sleep(Duration::from_millis(ms)) => Ok(()),
    }
}

async fn emit(tx: &mpsc::Sender<EngineEvent>, event: EngineEvent) -> Result<()> {
    // A dropped receiver means the consumer abandoned the run; treat it the
    // same as cancellation.
    tx.send(event).await.map_err(|_| ForesightError::Cancelled)
}

/// Emit the fixed, ordered artifact sequence for one run.
async fn run_pipeline(
    exploration: &Exploration,
    token: &CancellationToken,
    tx: &mpsc::Sender<EngineEvent>,
) -> Result<()> {
    let mut rand = SeededSequence::new(&exploration.query);
    debug!(exploration_id = %exploration.id, "pipeline started");

    // 1. clarify: emitted once, immediately locked.
    let clarify = Artifact::locked(clarify_data(&exploration.query));
    emit(tx, EngineEvent::Artifact { artifact: clarify }).await?;
    pause(500, token).await?;

    // 2. frame: draft under manual mode, else streaming; locked in place
    // after a delay. The payload mirrors the exploration's seed frame.
    let frame_status = if exploration.mode == Mode::Manual {
        ArtifactStatus::Draft
    } else {
        ArtifactStatus::Streaming
    };
    let frame = Artifact::new(ArtifactData::Frame(exploration.frame.clone()), frame_status);
    let frame_id = frame.id;
    emit(tx, EngineEvent::Artifact { artifact: frame }).await?;
    pause(700, token).await?;
    emit(tx, lock_update(frame_id)).await?;

    // 3. stakeholders
    pause(500, token).await?;
    emit(
        tx,
        EngineEvent::Artifact {
            artifact: Artifact::locked(stakeholders_data()),
        },
    )
    .await?;

    // 4. personas
    pause(450, token).await?;
    emit(
        tx,
        EngineEvent::Artifact {
            artifact: Artifact::locked(personas_data()),
        },
    )
    .await?;

    // 5. collection plan
    pause(450, token).await?;
    emit(
        tx,
        EngineEvent::Artifact {
            artifact: Artifact::locked(collection_plan_data()),
        },
    )
    .await?;

    // 6. signals: streamed one item at a time. Each update carries the full
    // accumulated list, not a delta.
    let signals = Artifact::new(
        ArtifactData::Signals { items: Vec::new() },
        ArtifactStatus::Streaming,
    );
    let signals_id = signals.id;
    emit(tx, EngineEvent::Artifact { artifact: signals }).await?;

    let mut items: Vec<SignalItem> = Vec::with_capacity(SIGNAL_COUNT);
    for i in 0..SIGNAL_COUNT {
        pause(SIGNAL_BASE_DELAY_MS + rand.next_below(SIGNAL_JITTER_MS), token).await?;
        items.push(signal_item(i));
        emit(
            tx,
            EngineEvent::ArtifactUpdate {
                artifact_id: signals_id,
                patch: foresight_core::artifact::ArtifactPatch::data(ArtifactData::Signals {
                    items: items.clone(),
                }),
            },
        )
        .await?;
    }
    emit(tx, lock_update(signals_id)).await?;

    // 7. horizon scan
    pause(450, token).await?;
    emit(
        tx,
        EngineEvent::Artifact {
            artifact: Artifact::locked(horizon_scan_data()),
        },
    )
    .await?;

    // 8. scenarios: exactly three entries.
    pause(500, token).await?;
    emit(
        tx,
        EngineEvent::Artifact {
            artifact: Artifact::locked(scenarios_data()),
        },
    )
    .await?;

    // 9. simulation
    pause(400, token).await?;
    emit(
        tx,
        EngineEvent::Artifact {
            artifact: Artifact::locked(simulation_data()),
        },
    )
    .await?;

    // 10. terminal done
    emit(tx, EngineEvent::Done).await?;
    debug!(exploration_id = %exploration.id, "pipeline complete");
    Ok(())
}

fn lock_update(artifact_id: Uuid) -> EngineEvent {
    EngineEvent::ArtifactUpdate {
        artifact_id,
        patch: foresight_core::artifact::ArtifactPatch::lock(),
    }
}

fn clarify_data(query: &str) -> ArtifactData {
    ArtifactData::Clarify {
        summary: format!(
            "I understand your goal as evaluating strategic consequences and decision points for \u{201c}{}\u{201d}.",
            query
        ),
        bullets: vec![
            "Define strategic uncertainties".to_string(),
            "Map second-order effects across institutions".to_string(),
            "Identify early indicators and intervention points".to_string(),
        ],
    }
}

fn stakeholders_data() -> ArtifactData {
    let entry = |name: &str, influence: &str, interest: &str| Stakeholder {
        name: name.to_string(),
        influence: influence.to_string(),
        interest: interest.to_string(),
    };
    ArtifactData::Stakeholders {
        primary: vec![
            entry("National regulators", "high", "high"),
            entry("Critical infrastructure operators", "high", "medium"),
        ],
        secondary: vec![
            entry("Labor groups", "medium", "high"),
            entry("Regional startups", "low", "medium"),
        ],
    }
}

fn personas_data() -> ArtifactData {
    let roles = ["Minister", "CTO", "Union Lead", "Civic Organizer"];
    ArtifactData::Personas {
        personas: roles
            .iter()
            .enumerate()
            .map(|(i, role)| Persona {
                name: format!("Persona {}", i + 1),
                role: role.to_string(),
                goals: "Maintain resilience while increasing upside".to_string(),
                fears: "Asymmetric disruption and legitimacy loss".to_string(),
                leverage: "Policy design + coalition building".to_string(),
                quote: "If we move too slow, the future gets decided for us.".to_string(),
            })
            .collect(),
    }
}

fn collection_plan_data() -> ArtifactData {
    ArtifactData::CollectionPlan {
        domains: ["Political", "Economic", "Social", "Technological", "Legal", "Environmental"]
            .iter()
            .map(|d| d.to_string())
            .collect(),
        criteria: "Signals with novelty, reliability, and plausible propagation pathways"
            .to_string(),
        note: "Bias watch: over-indexing on anglophone policy discourse".to_string(),
    }
}

fn signal_item(i: usize) -> SignalItem {
    let titles = [
        "Regulatory sandbox expands",
        "Breakthrough battery chain",
        "Cross-border AI treaty draft",
        "Labor automation pact",
        "Compute subsidy shift",
        "Cyber resilience standard",
        "Satellite internet bloc",
        "Civic AI oversight pilots",
    ];
    let sources = ["Policy Desk", "Market Wire", "Academic Brief"];
    let tags = ["policy", "technology", "society"];

    SignalItem {
        id: Uuid::new_v4(),
        title: format!("Signal {}: {}", i + 1, titles[i % titles.len()]),
        source: sources[i % sources.len()].to_string(),
        date: format!("202{}-0{}-1{}", i % 5, (i % 8) + 1, i),
        tags: tags[..(i % 3) + 1].iter().map(|t| t.to_string()).collect(),
        why: "Could alter adoption velocity, trust, and strategic coordination.".to_string(),
    }
}

fn horizon_scan_data() -> ArtifactData {
    ArtifactData::HorizonScan {
        past: "Infrastructure bottlenecks + policy lag dominated.".to_string(),
        present: "Coordination races and uneven capability spread.".to_string(),
        emerging: "Coalition governance and capability safeguards converge.".to_string(),
        actors: ["States", "Cloud providers", "Civil networks"]
            .iter()
            .map(|a| a.to_string())
            .collect(),
        metrics: vec![
            RangeMetric {
                name: "Diffusion".to_string(),
                range: "20\u{2013}45%".to_string(),
            },
            RangeMetric {
                name: "Risk incidents".to_string(),
                range: "3\u{2013}7/qtr".to_string(),
            },
        ],
    }
}

fn scenarios_data() -> ArtifactData {
    let titles = [
        "Coordinated Acceleration",
        "Fragmented Leapfrogging",
        "Guardrailed Slow Burn",
    ];
    ArtifactData::Scenarios {
        scenarios: titles
            .iter()
            .map(|title| Scenario {
                id: Uuid::new_v4(),
                title: title.to_string(),
                logline: "A plausible future shaped by policy timing, capital flow, and trust."
                    .to_string(),
                chain: ["Trigger event", "Feedback loop", "Institutional response"]
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
                outcomes: "GDP impact +1.2% to +3.8%; trust 40\u{2013}78/100".to_string(),
                indicators: [
                    "Treaty cadence",
                    "Compute concentration",
                    "Public sentiment delta",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            })
            .collect(),
    }
}

fn simulation_data() -> ArtifactData {
    ArtifactData::Simulation {
        distribution: "Median uplift 2.3%; P10 -0.8%; P90 +5.1%".to_string(),
        sensitivity: ["Policy response lag", "Energy constraints", "Talent concentration"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        assumptions: [
            "Mock Monte Carlo with synthetic priors",
            "No exogenous shocks modeled",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    }
}
