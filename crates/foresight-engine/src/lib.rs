//! # Foresight Engine
//!
//! The run pipeline (a channel-based cooperative artifact producer) and the
//! per-session driver that folds its events into the aggregate state.

pub mod pipeline;
pub mod session;

pub use pipeline::{spawn_pipeline, RunHandle};
pub use session::Session;
pub use tokio_util::sync::CancellationToken;
