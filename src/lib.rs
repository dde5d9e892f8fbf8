//! LotPilot Telegram Bot
//!
//! A Telegram bot for a marketplace seller: an operator-only control panel
//! for chat auto-response commands and a scraper for public seller profiles.
//! The panel's multi-step edits are driven by a per-(chat, user)
//! conversation state tracker.

#![allow(non_snake_case)]

pub mod config;
pub mod context;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use context::AppContext;
pub use utils::errors::{LotPilotError, Result};

// Re-export main components for easy access
pub use services::MarketplaceService;
pub use state::{StateTracker, StateTrackerManager};
pub use storage::CommandRepository;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
