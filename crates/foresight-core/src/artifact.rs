//! Artifact types for the Foresight pipeline.
//!
//! An Artifact is one pipeline step's structured output. Payloads form a
//! closed sum type ([`ArtifactData`]) with one variant per step so every
//! consumer matches exhaustively.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ArtifactStatus;

/// The closed set of artifact kinds, in canonical pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Clarify,
    Frame,
    Stakeholders,
    Personas,
    CollectionPlan,
    Signals,
    HorizonScan,
    Scenarios,
    Simulation,
    Report,
}

/// Framing payload: the scope and baseline metrics for an exploration.
///
/// Also used as the static seed frame populated at exploration creation,
/// separately from the pipeline's own `frame` artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameData {
    /// Time horizon label, e.g. "5y".
    pub time_horizon: String,

    /// Named scope dimensions (Geographic, Political, ...).
    pub scope: BTreeMap<String, String>,

    /// Baseline mock metrics.
    pub metrics: Vec<FrameMetric>,
}

/// One baseline metric in a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameMetric {
    pub name: String,
    pub value: String,
    pub unit: String,
    pub note: String,
}

/// A stakeholder entry with influence/interest weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub name: String,
    pub influence: String,
    pub interest: String,
}

/// A synthetic persona sketched by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub role: String,
    pub goals: String,
    pub fears: String,
    pub leverage: String,
    pub quote: String,
}

/// One streamed signal item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalItem {
    pub id: Uuid,
    pub title: String,
    pub source: String,
    pub date: String,
    pub tags: Vec<String>,
    pub why: String,
}

/// A named metric range in a horizon scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeMetric {
    pub name: String,
    pub range: String,
}

/// One generated scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: Uuid,
    pub title: String,
    pub logline: String,
    pub chain: Vec<String>,
    pub outcomes: String,
    pub indicators: Vec<String>,
}

/// Type-specific artifact payload, one variant per [`ArtifactKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArtifactData {
    Clarify {
        summary: String,
        bullets: Vec<String>,
    },
    Frame(FrameData),
    Stakeholders {
        primary: Vec<Stakeholder>,
        secondary: Vec<Stakeholder>,
    },
    Personas {
        personas: Vec<Persona>,
    },
    CollectionPlan {
        domains: Vec<String>,
        criteria: String,
        note: String,
    },
    Signals {
        items: Vec<SignalItem>,
    },
    HorizonScan {
        past: String,
        present: String,
        emerging: String,
        actors: Vec<String>,
        metrics: Vec<RangeMetric>,
    },
    Scenarios {
        scenarios: Vec<Scenario>,
    },
    Simulation {
        distribution: String,
        sensitivity: Vec<String>,
        assumptions: Vec<String>,
    },
    Report {
        title: String,
    },
}

impl ArtifactData {
    /// The kind this payload belongs to.
    pub fn kind(&self) -> ArtifactKind {
        match self {
            ArtifactData::Clarify { .. } => ArtifactKind::Clarify,
            ArtifactData::Frame(_) => ArtifactKind::Frame,
            ArtifactData::Stakeholders { .. } => ArtifactKind::Stakeholders,
            ArtifactData::Personas { .. } => ArtifactKind::Personas,
            ArtifactData::CollectionPlan { .. } => ArtifactKind::CollectionPlan,
            ArtifactData::Signals { .. } => ArtifactKind::Signals,
            ArtifactData::HorizonScan { .. } => ArtifactKind::HorizonScan,
            ArtifactData::Scenarios { .. } => ArtifactKind::Scenarios,
            ArtifactData::Simulation { .. } => ArtifactKind::Simulation,
            ArtifactData::Report { .. } => ArtifactKind::Report,
        }
    }
}

/// One pipeline step's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Unique identifier for this artifact.
    pub id: Uuid,

    /// Schema version; incremented on explicit re-generation.
    pub version: u32,

    /// Current status.
    pub status: ArtifactStatus,

    /// Type-specific payload.
    pub data: ArtifactData,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Artifact {
    /// Construct a fresh artifact: assigns a new id and the current
    /// timestamp. Payloads are not validated here; the validation layer is
    /// the service side's concern.
    pub fn new(data: ArtifactData, status: ArtifactStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 1,
            status,
            data,
            created_at: Utc::now(),
        }
    }

    /// Construct an already-locked artifact.
    pub fn locked(data: ArtifactData) -> Self {
        Self::new(data, ArtifactStatus::Locked)
    }

    /// The kind of this artifact, derived from its payload.
    pub fn kind(&self) -> ArtifactKind {
        self.data.kind()
    }

    /// Shallow-merge a patch into this artifact.
    ///
    /// Once locked, the artifact is immutable to the pipeline: data patches
    /// are ignored and a redundant re-lock is a no-op. Returns true if the
    /// artifact changed.
    pub fn apply(&mut self, patch: &ArtifactPatch) -> bool {
        if self.status.is_locked() {
            return false;
        }
        let mut changed = false;
        if let Some(data) = &patch.data {
            self.data = data.clone();
            changed = true;
        }
        if let Some(status) = patch.status {
            if status != self.status {
                self.status = status;
                changed = true;
            }
        }
        changed
    }
}

/// A partial update targeting an existing artifact by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ArtifactPatch {
    /// New status, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArtifactStatus>,

    /// Full replacement payload, if changing. Streaming updates carry the
    /// complete accumulated payload, never a delta.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ArtifactData>,
}

impl ArtifactPatch {
    /// A patch that only locks the artifact.
    pub fn lock() -> Self {
        Self {
            status: Some(ArtifactStatus::Locked),
            data: None,
        }
    }

    /// A patch that replaces the payload.
    pub fn data(data: ArtifactData) -> Self {
        Self {
            status: None,
            data: Some(data),
        }
    }
}
