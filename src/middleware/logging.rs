//! Logging middleware
//!
//! Logs incoming updates before they reach the handlers and measures
//! slow operations such as marketplace requests.

use std::time::{Duration, Instant};
use teloxide::types::{Message, Update, UpdateKind, User};
use tracing::{debug, info, warn, Span};

/// Operations slower than this are reported
const SLOW_OPERATION: Duration = Duration::from_secs(1);

/// Logging middleware for bot interactions
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    log_user_interactions: bool,
    log_performance: bool,
}

impl LoggingMiddleware {
    /// Create a new LoggingMiddleware instance
    pub fn new(log_user_interactions: bool, log_performance: bool) -> Self {
        Self {
            log_user_interactions,
            log_performance,
        }
    }

    /// Log incoming update
    pub fn log_update(&self, update: &Update) {
        if !self.log_user_interactions {
            return;
        }

        match &update.kind {
            UpdateKind::Message(message) => self.log_message(message),
            UpdateKind::CallbackQuery(callback) => {
                info!(
                    user_id = callback.from.id.0,
                    callback_data = callback.data.as_deref().unwrap_or("none"),
                    "Callback query received"
                );
            }
            _ => {
                debug!(update_id = update.id.0, "Other update type received");
            }
        }
    }

    /// Log message details
    pub fn log_message(&self, message: &Message) {
        if !self.log_user_interactions {
            return;
        }

        let user_id = message.from.as_ref().map(|user| user.id.0);
        let chat_type = if message.chat.is_private() { "private" } else { "group" };

        match message.text() {
            Some(text) => debug!(
                user_id = user_id,
                chat_id = message.chat.id.0,
                chat_type = chat_type,
                text = %text,
                "Text message received"
            ),
            None => debug!(
                user_id = user_id,
                chat_id = message.chat.id.0,
                chat_type = chat_type,
                "Non-text message received"
            ),
        }
    }

    /// Log command execution
    pub fn log_command(&self, user: &User, command: &str, args: &[String]) {
        if !self.log_user_interactions {
            return;
        }

        info!(
            user_id = user.id.0,
            username = user.username.as_deref().unwrap_or("none"),
            command = command,
            args = ?args,
            "Command executed"
        );
    }

    /// Create a performance tracking span
    pub fn create_performance_span(&self, operation: &str) -> Option<PerformanceTracker> {
        self.log_performance
            .then(|| PerformanceTracker::new(operation.to_string()))
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new(true, true)
    }
}

/// Performance tracker for measuring operation duration
pub struct PerformanceTracker {
    operation: String,
    start_time: Instant,
    _span: Span,
}

impl PerformanceTracker {
    fn new(operation: String) -> Self {
        let span = tracing::info_span!("performance", operation = %operation);

        Self {
            operation,
            start_time: Instant::now(),
            _span: span,
        }
    }

    /// Complete the performance tracking and log the result
    pub fn complete(self, success: bool) -> Duration {
        let duration = self.start_time.elapsed();
        let duration_ms = duration.as_millis();

        if success {
            info!(operation = %self.operation, duration_ms = duration_ms, "Operation completed successfully");
        } else {
            warn!(operation = %self.operation, duration_ms = duration_ms, "Operation failed");
        }

        if duration > SLOW_OPERATION {
            warn!(operation = %self.operation, duration_ms = duration_ms, "Slow operation detected");
        }

        duration
    }
}
