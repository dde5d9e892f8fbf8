//! Services module
//!
//! This module contains clients for external systems

pub mod marketplace;

// Re-export commonly used services
pub use marketplace::{MarketplaceService, parse_user_categories, parse_user_lots_info};
