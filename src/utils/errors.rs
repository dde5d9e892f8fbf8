//! Error handling for LotPilot
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for LotPilot application
#[derive(Error, Debug)]
pub enum LotPilotError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Marketplace error: {0}")]
    Scraper(#[from] ScraperError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Auto-response file error: {0}")]
    CommandFile(#[from] ini::Error),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Marketplace scraping errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScraperError {
    #[error("User {user_id} does not exist")]
    UserNotFound { user_id: u64 },

    #[error("Failed to fetch page: HTTP {status}")]
    FetchFailed { status: u16 },

    #[error("Marketplace request timed out")]
    Timeout,

    #[error("Marketplace request failed: {0}")]
    Request(String),

    #[error("Unexpected page layout: {0}")]
    MalformedPage(String),
}

/// Auto-response command validation errors.
///
/// These are reported back to the operator in chat and never propagated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Command with index {index} not found")]
    CommandNotFound { index: usize },

    #[error("Command {0} is repeated in the set")]
    DuplicateAlias(String),

    #[error("Command {0} already exists")]
    AliasExists(String),

    #[error("No commands given")]
    EmptyCommand,

    #[error("Command contains unsupported character {0:?}")]
    UnsupportedCharacter(char),
}

/// Result type alias for LotPilot operations
pub type Result<T> = std::result::Result<T, LotPilotError>;

/// Result type alias for marketplace operations
pub type ScraperResult<T> = std::result::Result<T, ScraperError>;

impl LotPilotError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            LotPilotError::Telegram(_) => true,
            LotPilotError::Scraper(_) => true,
            LotPilotError::Validation(_) => true,
            LotPilotError::Config(_) => false,
            LotPilotError::CommandFile(_) => false,
            LotPilotError::PermissionDenied(_) => false,
            LotPilotError::Serialization(_) => false,
            LotPilotError::Io(_) => true,
            LotPilotError::UrlParse(_) => false,
            LotPilotError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LotPilotError::Config(_) => ErrorSeverity::Critical,
            LotPilotError::CommandFile(_) => ErrorSeverity::Critical,
            LotPilotError::PermissionDenied(_) => ErrorSeverity::Warning,
            LotPilotError::Scraper(_) => ErrorSeverity::Warning,
            LotPilotError::Validation(_) => ErrorSeverity::Info,
            LotPilotError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
