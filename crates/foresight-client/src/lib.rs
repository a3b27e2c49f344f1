//! # Foresight Client SDK
//!
//! Thin async client for the Foresight generation API: submit a request,
//! then poll the returned run id until the artifact bundle is ready.

mod client;

pub use client::{ForesightClient, RunStatus};

pub use foresight_core::{ArtifactBundle, ForesightError, GenerateInput, Result};
