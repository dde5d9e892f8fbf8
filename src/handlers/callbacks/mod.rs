//! Callback query handlers module
//!
//! This module contains handlers for all inline keyboard button callbacks

pub mod auto_response;
pub mod data;

pub use data::CallbackAction;

use std::sync::Arc;
use teloxide::{prelude::*, types::{CallbackQuery, Message, User}};
use tracing::{debug, info, warn};

use crate::context::AppContext;
use crate::handlers::views;
use crate::utils::errors::Result;

/// Main callback query dispatcher
pub async fn handle_callback_query(bot: Bot, query: CallbackQuery, ctx: Arc<AppContext>) -> Result<()> {
    let user = &query.from;

    if ctx.auth.check_admin_auth(user).is_err() {
        bot.answer_callback_query(query.id.clone())
            .text(views::ACCESS_DENIED)
            .show_alert(true)
            .await?;
        return Ok(());
    }

    // Answer the callback query first to remove loading state
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    let Some(data) = query.data.as_deref() else {
        debug!(user_id = user.id.0, "Callback query without data");
        return Ok(());
    };

    let action = match data.parse::<CallbackAction>() {
        Ok(action) => action,
        Err(e) => {
            warn!(user_id = user.id.0, error = %e, "Unknown callback data");
            return Ok(());
        }
    };

    let Some(message) = query.regular_message() else {
        warn!(user_id = user.id.0, callback_data = %data, "Callback message is no longer accessible");
        return Ok(());
    };

    info!(
        user_id = user.id.0,
        chat_id = message.chat.id.0,
        action = %action,
        command_index = ?action.command_index(),
        "Routing callback"
    );

    dispatch_action(&bot, message, user, &ctx, action).await
}

/// Run the handler behind a callback action
pub async fn dispatch_action(
    bot: &Bot,
    message: &Message,
    user: &User,
    ctx: &AppContext,
    action: CallbackAction,
) -> Result<()> {
    let chat_id = message.chat.id;

    match action {
        CallbackAction::MainMenu => auto_response::open_main_menu(bot, message).await,
        CallbackAction::CommandList { offset } => {
            auto_response::open_commands_list(bot, message, ctx, offset).await
        }
        CallbackAction::AddCommand => auto_response::act_add_command(bot, chat_id, user.id, ctx).await,
        CallbackAction::EditCommand { index, offset } => {
            auto_response::open_edit_command(bot, message, ctx, index, offset).await
        }
        CallbackAction::EditResponseText { index, offset } => {
            auto_response::act_edit_response_text(bot, chat_id, user.id, ctx, index, offset).await
        }
        CallbackAction::EditNotificationText { index, offset } => {
            auto_response::act_edit_notification_text(bot, chat_id, user.id, ctx, index, offset).await
        }
        CallbackAction::SwitchNotification { index, offset } => {
            auto_response::switch_notification(bot, message, user, ctx, index, offset).await
        }
        CallbackAction::DeleteCommand { index, offset } => {
            auto_response::delete_command(bot, message, user, ctx, index, offset).await
        }
        CallbackAction::ClearState => auto_response::clear_state(bot, message, user.id, ctx).await,
    }
}
