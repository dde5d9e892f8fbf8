//! Message handlers module
//!
//! Completion phase of the control panel prompts. The dispatcher routes a
//! text message here only while the sender has a matching pending state;
//! each handler clears that state (deleting the prompt) before it
//! validates anything.

use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, Message, ParseMode, ReplyParameters};
use tracing::debug;

use crate::context::AppContext;
use crate::handlers::callbacks::CallbackAction;
use crate::handlers::{keyboards, views};
use crate::state::StateTag;
use crate::storage::AutoResponseStore;
use crate::utils::errors::{LotPilotError, Result, ValidationError};
use crate::utils::helpers::offset_for_index;
use crate::utils::logging::log_admin_action;

/// Whether `msg` is a text answer to a pending prompt with `tag`
pub fn awaiting_input(msg: &Message, ctx: &AppContext, tag: StateTag) -> bool {
    match (msg.from.as_ref(), msg.text()) {
        (Some(user), Some(_)) => ctx.states.check_state(msg.chat.id, user.id, tag),
        _ => false,
    }
}

async fn reply(bot: &Bot, msg: &Message, text: String, keyboard: InlineKeyboardMarkup) -> Result<()> {
    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .reply_parameters(ReplyParameters::new(msg.id).allow_sending_without_reply())
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

/// Add the command or alias set typed by the operator
pub async fn handle_add_command(bot: Bot, msg: Message, ctx: Arc<AppContext>) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    ctx.states.clear_state(&bot, msg.chat.id, user.id, true).await;

    let raw = msg.text().unwrap_or_default().trim().to_string();

    match ctx.commands.update(|store| store.add_group(&raw)) {
        Ok(index) => {
            log_admin_action(user.id.0 as i64, user.username.as_deref(), "add_command", &raw, None);
            reply(&bot, &msg, views::command_added(&raw), keyboards::command_added(index)).await
        }
        Err(LotPilotError::Validation(e)) => {
            reply(&bot, &msg, views::validation_error(&e), keyboards::add_command_error()).await
        }
        Err(e) => Err(e),
    }
}

/// Text field of a command that is edited through a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextField {
    Response,
    Notification,
}

impl TextField {
    fn tag(self) -> StateTag {
        match self {
            TextField::Response => StateTag::EditResponseText,
            TextField::Notification => StateTag::EditNotificationText,
        }
    }

    /// Store the text, returning the section name of the command
    fn apply(self, store: &mut AutoResponseStore, index: usize, text: &str) -> std::result::Result<String, ValidationError> {
        let group = match self {
            TextField::Response => store.set_response(index, text)?,
            TextField::Notification => store.set_notification_text(index, text)?,
        };
        Ok(group.raw_name.clone())
    }

    fn edit_again(self, index: usize, offset: usize) -> CallbackAction {
        match self {
            TextField::Response => CallbackAction::EditResponseText { index, offset },
            TextField::Notification => CallbackAction::EditNotificationText { index, offset },
        }
    }

    fn confirmation(self, raw_name: &str, text: &str) -> String {
        match self {
            TextField::Response => views::response_changed(raw_name, text),
            TextField::Notification => views::notification_changed(raw_name, text),
        }
    }

    fn action(self) -> &'static str {
        match self {
            TextField::Response => "edit_response_text",
            TextField::Notification => "edit_notification_text",
        }
    }
}

/// Set the response text of the command chosen in the prompt
pub async fn handle_edit_response_text(bot: Bot, msg: Message, ctx: Arc<AppContext>) -> Result<()> {
    edit_text_field(&bot, &msg, &ctx, TextField::Response).await
}

/// Set the notification text of the command chosen in the prompt
pub async fn handle_edit_notification_text(bot: Bot, msg: Message, ctx: Arc<AppContext>) -> Result<()> {
    edit_text_field(&bot, &msg, &ctx, TextField::Notification).await
}

async fn edit_text_field(bot: &Bot, msg: &Message, ctx: &AppContext, field: TextField) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let Some(state) = ctx.states.clear_state(bot, msg.chat.id, user.id, true).await else {
        debug!(chat_id = msg.chat.id.0, user_id = user.id.0, "Prompt was cancelled before the answer arrived");
        return Ok(());
    };
    if !state.is(field.tag()) {
        debug!(expected = %field.tag(), found = %state.tag, "Pending state changed before the answer arrived");
        return Ok(());
    }

    let index = state.require_usize("command_index")?;
    let offset = state.get_data::<usize>("offset")?.unwrap_or_else(|| offset_for_index(index));
    let text = msg.text().unwrap_or_default().trim().to_string();

    match ctx.commands.update(|store| field.apply(store, index, &text)) {
        Ok(section) => {
            log_admin_action(user.id.0 as i64, user.username.as_deref(), field.action(), &section, Some(&text));
            let keyboard = keyboards::text_changed(index, offset, field.edit_again(index, offset));
            reply(bot, msg, field.confirmation(&section, &text), keyboard).await
        }
        Err(LotPilotError::Validation(e)) => {
            reply(bot, msg, views::validation_error(&e), keyboards::refresh_list()).await
        }
        Err(e) => Err(e),
    }
}
