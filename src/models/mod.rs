//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod command;
pub mod marketplace;

// Re-export commonly used models
pub use command::{CommandGroup, DEFAULT_RESPONSE, DEFAULT_NOTIFICATION_TEXT};
pub use marketplace::{Category, CategoryType, Lot, UserLotsInfo};
