//! Storage module
//!
//! This module handles the auto-response command file

pub mod repository;
pub mod store;

// Re-export commonly used storage components
pub use repository::CommandRepository;
pub use store::AutoResponseStore;
