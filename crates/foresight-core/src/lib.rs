//! # Foresight Core
//!
//! Core domain types for the Foresight demo pipeline:
//! - [`Artifact`] - one pipeline step's structured output
//! - [`Exploration`] - one user research session and its artifact history
//! - [`DemoState`] - the client-visible aggregate root
//! - [`EngineEvent`] - events emitted by a pipeline run
//! - [`SeededSequence`] - reproducible mock-timing source
//! - [`ForesightError`] - workspace error type

pub mod artifact;
pub mod bundle;
pub mod error;
pub mod event;
pub mod exploration;
pub mod seq;
pub mod types;

// Re-exports for convenience
pub use artifact::{Artifact, ArtifactData, ArtifactKind, ArtifactPatch, FrameData, SignalItem};
pub use bundle::{ArtifactBundle, GenerateInput, Horizon, Perspective, SeedBias};
pub use error::{ForesightError, Result};
pub use event::EngineEvent;
pub use exploration::{DemoState, Exploration, PreferableFuture};
pub use seq::SeededSequence;
pub use types::{ArtifactStatus, ExplorationStatus, Mode, SignalAction};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::artifact::{Artifact, ArtifactData, ArtifactKind, ArtifactPatch};
    pub use crate::error::{ForesightError, Result};
    pub use crate::event::EngineEvent;
    pub use crate::exploration::{DemoState, Exploration, PreferableFuture};
    pub use crate::types::{ArtifactStatus, ExplorationStatus, Mode, SignalAction};
}
