//! # Foresight State
//!
//! Merge logic for the [`DemoState`](foresight_core::DemoState) aggregate
//! and whole-state persistence behind the [`StateStorage`] trait.

pub mod storage;
pub mod store;

pub use storage::{InMemoryStorage, JsonFileStorage, StateStorage};
pub use store::{
    add_report, apply_event, create_exploration, insert_exploration, pause_exploration,
    record_signal_action, save_future, NewFuture,
};
