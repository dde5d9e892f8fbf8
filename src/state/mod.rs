//! State management module
//!
//! This module handles conversation state: which prompt a user is answering
//! and the context carried to the handler that consumes the answer.

pub mod pending;
pub mod tracker;

// Re-export commonly used state components
pub use pending::{PendingState, StateData, StateTag, state_data};
pub use tracker::{StateTracker, StateTrackerManager, TrackerStats};
