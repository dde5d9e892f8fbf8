//! Auto-response control panel callbacks
//!
//! Prompt phases register a pending state and wait for the operator's
//! next message (see `handlers::messages`). Toggle and delete apply at
//! once and re-render the panel they were pressed on.

use chrono::Local;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardMarkup, Message, MessageId, ParseMode, User, UserId};
use teloxide::{ApiError, RequestError};
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::handlers::{keyboards, views};
use crate::state::{state_data, StateData, StateTag};
use crate::utils::errors::{LotPilotError, Result, ValidationError};
use crate::utils::logging::{log_admin_action, log_user_action};

/// Replace the text and keyboard of a panel message.
///
/// Re-rendering an unchanged panel is not an error.
pub async fn edit_panel(
    bot: &Bot,
    message: &Message,
    text: String,
    keyboard: InlineKeyboardMarkup,
) -> Result<()> {
    match bot
        .edit_message_text(message.chat.id, message.id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await
    {
        Ok(_) => Ok(()),
        Err(RequestError::Api(ApiError::MessageNotModified)) => {
            debug!(chat_id = message.chat.id.0, message_id = message.id.0, "Panel unchanged");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Turn the panel into a "command not found" notice
async fn report_missing(bot: &Bot, message: &Message, index: usize) -> Result<()> {
    warn!(chat_id = message.chat.id.0, index = index, "Command index is out of range");
    edit_panel(bot, message, views::command_not_found(index), keyboards::refresh_list()).await
}

pub async fn open_main_menu(bot: &Bot, message: &Message) -> Result<()> {
    edit_panel(bot, message, views::MAIN_MENU.to_string(), keyboards::main_menu()).await
}

/// Show one page of the command list
pub async fn open_commands_list(bot: &Bot, message: &Message, ctx: &AppContext, offset: usize) -> Result<()> {
    let keyboard = ctx
        .commands
        .read(|store| keyboards::commands_list(store, offset, ctx.page_size()));

    edit_panel(bot, message, views::COMMANDS_LIST.to_string(), keyboard).await
}

/// Show the settings panel of one command
pub async fn open_edit_command(
    bot: &Bot,
    message: &Message,
    ctx: &AppContext,
    index: usize,
    offset: usize,
) -> Result<()> {
    let panel = ctx.commands.read(|store| {
        store.get(index).map(|group| {
            (views::command_panel(group, Local::now()), keyboards::edit_command(group, index, offset))
        })
    });

    match panel {
        Some((text, keyboard)) => edit_panel(bot, message, text, keyboard).await,
        None => report_missing(bot, message, index).await,
    }
}

/// Send a prompt with a cancel button and wait for the answer
async fn prompt(
    bot: &Bot,
    chat_id: ChatId,
    user_id: UserId,
    ctx: &AppContext,
    text: &str,
    tag: StateTag,
    data: StateData,
) -> Result<MessageId> {
    let prompt = bot
        .send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::clear_state())
        .await?;

    ctx.states.set_state(chat_id, prompt.id, user_id, tag, data);
    Ok(prompt.id)
}

/// Ask for a new command or alias set
pub async fn act_add_command(bot: &Bot, chat_id: ChatId, user_id: UserId, ctx: &AppContext) -> Result<()> {
    prompt(bot, chat_id, user_id, ctx, views::ADD_COMMAND_PROMPT, StateTag::AddCommand, StateData::new()).await?;
    Ok(())
}

/// Ask for a new response text of the command at `index`
pub async fn act_edit_response_text(
    bot: &Bot,
    chat_id: ChatId,
    user_id: UserId,
    ctx: &AppContext,
    index: usize,
    offset: usize,
) -> Result<()> {
    let data = state_data([("command_index", index), ("offset", offset)]);
    prompt(bot, chat_id, user_id, ctx, views::RESPONSE_PROMPT, StateTag::EditResponseText, data).await?;
    Ok(())
}

/// Ask for a new notification text of the command at `index`
pub async fn act_edit_notification_text(
    bot: &Bot,
    chat_id: ChatId,
    user_id: UserId,
    ctx: &AppContext,
    index: usize,
    offset: usize,
) -> Result<()> {
    let data = state_data([("command_index", index), ("offset", offset)]);
    prompt(bot, chat_id, user_id, ctx, views::NOTIFICATION_PROMPT, StateTag::EditNotificationText, data).await?;
    Ok(())
}

/// Flip the Telegram notification flag and re-render the panel
pub async fn switch_notification(
    bot: &Bot,
    message: &Message,
    user: &User,
    ctx: &AppContext,
    index: usize,
    offset: usize,
) -> Result<()> {
    let result = ctx.commands.update(|store| {
        let enabled = store.toggle_notification(index)?;
        Ok((store.check_index(index)?.raw_name.clone(), enabled))
    });

    match result {
        Ok((section, enabled)) => {
            let value = if enabled { "1" } else { "0" };
            log_admin_action(user.id.0 as i64, user.username.as_deref(), "switch_notification", &section, Some(value));
            open_edit_command(bot, message, ctx, index, offset).await
        }
        Err(LotPilotError::Validation(ValidationError::CommandNotFound { index })) => {
            report_missing(bot, message, index).await
        }
        Err(e) => Err(e),
    }
}

/// Remove the command and go back to the list
pub async fn delete_command(
    bot: &Bot,
    message: &Message,
    user: &User,
    ctx: &AppContext,
    index: usize,
    offset: usize,
) -> Result<()> {
    match ctx.commands.update(|store| store.remove(index)) {
        Ok(group) => {
            log_admin_action(user.id.0 as i64, user.username.as_deref(), "delete_command", &group.raw_name, None);
            open_commands_list(bot, message, ctx, offset).await
        }
        Err(LotPilotError::Validation(ValidationError::CommandNotFound { index })) => {
            report_missing(bot, message, index).await
        }
        Err(e) => Err(e),
    }
}

/// Cancel the pending prompt
pub async fn clear_state(bot: &Bot, message: &Message, user_id: UserId, ctx: &AppContext) -> Result<()> {
    let chat_id = message.chat.id;
    let cleared = ctx.states.clear_state(bot, chat_id, user_id, true).await;

    // A cancel button on an outdated prompt: the prompt was not deleted with the state
    if cleared.map_or(true, |state| state.prompt_message_id != message.id) {
        if let Err(e) = bot.delete_message(chat_id, message.id).await {
            warn!(chat_id = chat_id.0, message_id = message.id.0, error = %e, "Failed to delete outdated prompt");
        }
    }

    log_user_action(user_id.0 as i64, "cancel_prompt", None);
    Ok(())
}
