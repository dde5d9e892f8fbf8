//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub auto_response: AutoResponseConfig,
    pub state: StateConfig,
    pub marketplace: MarketplaceConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    pub admin_ids: Vec<i64>,
}

/// Auto-response command file configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AutoResponseConfig {
    pub path: String,
    /// Number of commands shown per page of the command list
    pub page_size: usize,
}

/// Conversation state configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateConfig {
    /// Pending prompts older than this are dropped; 0 keeps them until cleared
    pub ttl_seconds: u64,
    pub cleanup_interval_seconds: u64,
}

/// Marketplace scraper configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketplaceConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Settings::default())?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("LOTPILOT")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("bot.admin_ids")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::LotPilotError> {
        super::validation::validate_settings(self)
    }
}

impl StateConfig {
    /// Expiry applied to new pending states, if any
    pub fn ttl(&self) -> Option<Duration> {
        (self.ttl_seconds > 0).then(|| Duration::from_secs(self.ttl_seconds))
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds)
    }
}

impl MarketplaceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                admin_ids: vec![],
            },
            auto_response: AutoResponseConfig {
                path: "configs/auto_response.cfg".to_string(),
                page_size: 10,
            },
            state: StateConfig {
                ttl_seconds: 0,
                cleanup_interval_seconds: 300,
            },
            marketplace: MarketplaceConfig {
                base_url: "https://funpay.com".to_string(),
                timeout_seconds: 10,
                user_agent: "LotPilot/1.0".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
        }
    }
}
