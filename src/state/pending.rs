//! Pending conversation state
//!
//! A pending state records that the bot prompted a user for free-text input
//! and which handler is allowed to consume the reply.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use teloxide::types::{ChatId, MessageId, UserId};

use crate::utils::errors::{LotPilotError, Result};

/// Which handler should claim the next text message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateTag {
    #[serde(rename = "ADD_CMD")]
    AddCommand,
    #[serde(rename = "EDIT_CMD_RESPONSE_TEXT")]
    EditResponseText,
    #[serde(rename = "EDIT_CMD_NOTIFICATION_TEXT")]
    EditNotificationText,
}

impl StateTag {
    pub const ALL: [StateTag; 3] = [
        StateTag::AddCommand,
        StateTag::EditResponseText,
        StateTag::EditNotificationText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateTag::AddCommand => "ADD_CMD",
            StateTag::EditResponseText => "EDIT_CMD_RESPONSE_TEXT",
            StateTag::EditNotificationText => "EDIT_CMD_NOTIFICATION_TEXT",
        }
    }
}

impl fmt::Display for StateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateTag {
    type Err = LotPilotError;

    fn from_str(s: &str) -> Result<Self> {
        StateTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| LotPilotError::InvalidInput(format!("Unknown state tag: {}", s)))
    }
}

/// Payload carried from the prompt phase to the completion phase
pub type StateData = HashMap<String, serde_json::Value>;

/// Pending input request for one (chat, user) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingState {
    pub chat_id: ChatId,
    /// Prompt message to delete once the input is consumed
    pub prompt_message_id: MessageId,
    pub user_id: UserId,
    pub tag: StateTag,
    pub data: StateData,
    pub created_at: DateTime<Utc>,
    /// When this state stops gating messages; `None` keeps it until cleared
    pub expires_at: Option<DateTime<Utc>>,
}

impl PendingState {
    /// Create a new pending state without expiry
    pub fn new(
        chat_id: ChatId,
        prompt_message_id: MessageId,
        user_id: UserId,
        tag: StateTag,
        data: StateData,
    ) -> Self {
        Self {
            chat_id,
            prompt_message_id,
            user_id,
            tag,
            data,
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    /// Get typed data from the payload
    pub fn get_data<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        match self.data.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Get a required index-like value from the payload
    pub fn require_usize(&self, key: &str) -> Result<usize> {
        self.get_data::<usize>(key)?.ok_or_else(|| {
            LotPilotError::InvalidInput(format!("Missing state data: {}", key))
        })
    }

    /// Check if the state has expired
    pub fn is_expired(&self) -> bool {
        self.expires_at.map_or(false, |expires_at| Utc::now() > expires_at)
    }

    pub fn is(&self, tag: StateTag) -> bool {
        self.tag == tag
    }
}

/// Build a state payload from key/value pairs
pub fn state_data<I, K, V>(pairs: I) -> StateData
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<serde_json::Value>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}
