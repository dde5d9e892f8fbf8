//! Auto-response command model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::helpers::split_aliases;

/// Response text given to freshly added commands
pub const DEFAULT_RESPONSE: &str = "This command needs a response text to be configured :(";

/// Notification text shown when none is configured
pub const DEFAULT_NOTIFICATION_TEXT: &str = "User $username entered command $message_text.";

/// One section of the auto-response file: a set of alias commands sharing a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandGroup {
    pub id: Uuid,
    /// Section name as written in the file, aliases joined by `|`
    pub raw_name: String,
    pub aliases: Vec<String>,
    pub response: String,
    pub telegram_notification: bool,
    pub notification_text: Option<String>,
}

impl CommandGroup {
    /// Create a group with default response and notifications off
    pub fn new(raw_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            raw_name: raw_name.trim().to_string(),
            aliases: split_aliases(raw_name),
            response: DEFAULT_RESPONSE.to_string(),
            telegram_notification: false,
            notification_text: None,
        }
    }

    /// Notification text, falling back to the default template
    pub fn notification_text_or_default(&self) -> &str {
        self.notification_text
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(DEFAULT_NOTIFICATION_TEXT)
    }

    /// Flag value as stored in the file
    pub fn notification_flag(&self) -> &'static str {
        if self.telegram_notification { "1" } else { "0" }
    }
}
