//! Callback data of the control panel buttons
//!
//! Each button carries one `CallbackAction`, encoded as a short token
//! followed by its numeric arguments, e.g. `ec:3:0`.

use std::fmt;
use std::str::FromStr;

use crate::utils::errors::LotPilotError;

/// Telegram rejects callback data longer than this
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Main control panel
    MainMenu,
    /// Page of the command list starting at `offset`
    CommandList { offset: usize },
    /// Prompt for a new command or alias set
    AddCommand,
    /// Settings panel of one command
    EditCommand { index: usize, offset: usize },
    /// Prompt for a new response text
    EditResponseText { index: usize, offset: usize },
    /// Prompt for a new notification text
    EditNotificationText { index: usize, offset: usize },
    /// Flip the Telegram notification flag
    SwitchNotification { index: usize, offset: usize },
    /// Remove the command
    DeleteCommand { index: usize, offset: usize },
    /// Cancel a pending prompt
    ClearState,
}

impl CallbackAction {
    fn token(&self) -> &'static str {
        match self {
            CallbackAction::MainMenu => "mm",
            CallbackAction::CommandList { .. } => "cl",
            CallbackAction::AddCommand => "ac",
            CallbackAction::EditCommand { .. } => "ec",
            CallbackAction::EditResponseText { .. } => "er",
            CallbackAction::EditNotificationText { .. } => "en",
            CallbackAction::SwitchNotification { .. } => "sn",
            CallbackAction::DeleteCommand { .. } => "dc",
            CallbackAction::ClearState => "cs",
        }
    }

    /// Command index the action refers to, if any
    pub fn command_index(&self) -> Option<usize> {
        match *self {
            CallbackAction::EditCommand { index, .. }
            | CallbackAction::EditResponseText { index, .. }
            | CallbackAction::EditNotificationText { index, .. }
            | CallbackAction::SwitchNotification { index, .. }
            | CallbackAction::DeleteCommand { index, .. } => Some(index),
            _ => None,
        }
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = self.token();
        match *self {
            CallbackAction::MainMenu | CallbackAction::AddCommand | CallbackAction::ClearState => {
                f.write_str(token)
            }
            CallbackAction::CommandList { offset } => write!(f, "{}:{}", token, offset),
            CallbackAction::EditCommand { index, offset }
            | CallbackAction::EditResponseText { index, offset }
            | CallbackAction::EditNotificationText { index, offset }
            | CallbackAction::SwitchNotification { index, offset }
            | CallbackAction::DeleteCommand { index, offset } => {
                write!(f, "{}:{}:{}", token, index, offset)
            }
        }
    }
}

impl FromStr for CallbackAction {
    type Err = LotPilotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LotPilotError::InvalidInput(format!("Invalid callback data: {}", s));

        let mut parts = s.split(':');
        let token = parts.next().ok_or_else(invalid)?;
        let args = parts
            .map(|part| part.parse::<usize>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        let action = match (token, args.as_slice()) {
            ("mm", []) => CallbackAction::MainMenu,
            ("ac", []) => CallbackAction::AddCommand,
            ("cs", []) => CallbackAction::ClearState,
            ("cl", [offset]) => CallbackAction::CommandList { offset: *offset },
            ("ec", [index, offset]) => CallbackAction::EditCommand { index: *index, offset: *offset },
            ("er", [index, offset]) => CallbackAction::EditResponseText { index: *index, offset: *offset },
            ("en", [index, offset]) => CallbackAction::EditNotificationText { index: *index, offset: *offset },
            ("sn", [index, offset]) => CallbackAction::SwitchNotification { index: *index, offset: *offset },
            ("dc", [index, offset]) => CallbackAction::DeleteCommand { index: *index, offset: *offset },
            _ => return Err(invalid()),
        };

        Ok(action)
    }
}
