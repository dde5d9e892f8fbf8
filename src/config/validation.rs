//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{LotPilotError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_auto_response_config(&settings.auto_response)?;
    validate_state_config(&settings.state)?;
    validate_marketplace_config(&settings.marketplace)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(LotPilotError::Config(
            "Bot token is required".to_string()
        ));
    }

    if config.admin_ids.is_empty() {
        return Err(LotPilotError::Config(
            "At least one admin ID must be configured".to_string()
        ));
    }

    Ok(())
}

/// Validate auto-response file configuration
fn validate_auto_response_config(config: &super::AutoResponseConfig) -> Result<()> {
    if config.path.is_empty() {
        return Err(LotPilotError::Config(
            "Auto-response file path is required".to_string()
        ));
    }

    // Telegram allows at most 100 inline buttons per message
    if config.page_size == 0 || config.page_size > 90 {
        return Err(LotPilotError::Config(
            format!("Page size must be between 1 and 90, got {}", config.page_size)
        ));
    }

    Ok(())
}

/// Validate conversation state configuration
fn validate_state_config(config: &super::StateConfig) -> Result<()> {
    if config.ttl_seconds > 0 && config.cleanup_interval_seconds == 0 {
        return Err(LotPilotError::Config(
            "Cleanup interval must be greater than 0 when state TTL is set".to_string()
        ));
    }

    Ok(())
}

/// Validate marketplace configuration
fn validate_marketplace_config(config: &super::MarketplaceConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(LotPilotError::Config(
            "Marketplace base URL is required".to_string()
        ));
    }

    url::Url::parse(&config.base_url)?;

    if config.timeout_seconds == 0 {
        return Err(LotPilotError::Config(
            "Marketplace timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(LotPilotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(LotPilotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.bot.token = "12345:test_token".to_string();
        settings.bot.admin_ids = vec![42];
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_empty_token_rejected() {
        let mut settings = valid_settings();
        settings.bot.token.clear();
        assert_matches!(validate_settings(&settings), Err(LotPilotError::Config(_)));
    }

    #[test]
    fn test_missing_admins_rejected() {
        let mut settings = valid_settings();
        settings.bot.admin_ids.clear();
        assert_matches!(validate_settings(&settings), Err(LotPilotError::Config(_)));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut settings = valid_settings();
        settings.logging.level = "verbose".to_string();
        assert_matches!(validate_settings(&settings), Err(LotPilotError::Config(msg)) if msg.contains("verbose"));
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut settings = valid_settings();
        settings.marketplace.base_url = "not a url".to_string();
        assert_matches!(validate_settings(&settings), Err(LotPilotError::UrlParse(_)));
    }

    #[test]
    fn test_cleanup_interval_needed_only_with_ttl() {
        let mut settings = valid_settings();
        settings.state.cleanup_interval_seconds = 0;
        assert!(validate_settings(&settings).is_ok());

        settings.state.ttl_seconds = 600;
        assert_matches!(validate_settings(&settings), Err(LotPilotError::Config(msg)) if msg.contains("Cleanup"));
    }
}
