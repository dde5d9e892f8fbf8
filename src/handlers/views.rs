//! Message texts of the control panel
//!
//! All texts are HTML; user supplied parts go through `html::escape`.

use chrono::{DateTime, Local};
use teloxide::utils::html::escape;

use crate::models::{CommandGroup, UserLotsInfo};
use crate::state::TrackerStats;
use crate::utils::errors::{ScraperError, ValidationError};
use crate::utils::helpers::format_clock;

/// Categories listed in the /lots summary
const LOTS_SUMMARY_CATEGORIES: usize = 10;

pub const MAIN_MENU: &str = "🤖 <b>LotPilot control panel</b>\n\nAuto-response: manage the commands buyers can send in chat.";
pub const COMMANDS_LIST: &str = "Choose a command.";
pub const ADD_COMMAND_PROMPT: &str = "Enter a new command (or several commands separated by <code>|</code>).";
pub const RESPONSE_PROMPT: &str = "Enter a new response text.";
pub const NOTIFICATION_PROMPT: &str = "Enter a new notification text.";
pub const ACCESS_DENIED: &str = "⛔ Access denied.";

pub fn yes_no(value: bool) -> &'static str {
    if value { "Yes." } else { "No." }
}

/// Settings panel of one command
pub fn command_panel(group: &CommandGroup, now: DateTime<Local>) -> String {
    format!(
        "<b>[{}]</b>\n\n\
         <b><i>Response:</i></b> <code>{}</code>\n\n\
         <b><i>Send Telegram notifications:</i></b> <b><u>{}</u></b>\n\n\
         <b><i>Notification text:</i></b> <code>{}</code>\n\n\
         <i>Updated:</i>  <code>{}</code>",
        escape(&group.raw_name),
        escape(&group.response),
        yes_no(group.telegram_notification),
        escape(group.notification_text_or_default()),
        format_clock(now),
    )
}

pub fn command_not_found(index: usize) -> String {
    format!("❌ Could not find a command with index <code>{}</code>.", index)
}

/// Readable reason for a rejected change
pub fn validation_error(error: &ValidationError) -> String {
    match error {
        ValidationError::CommandNotFound { index } => command_not_found(*index),
        ValidationError::DuplicateAlias(alias) => {
            format!("❌ Command <code>{}</code> is repeated in the set.", escape(alias))
        }
        ValidationError::AliasExists(alias) => {
            format!("❌ Command <code>{}</code> already exists.", escape(alias))
        }
        ValidationError::EmptyCommand => "❌ No commands given.".to_string(),
        ValidationError::UnsupportedCharacter(c) => format!(
            "❌ Commands cannot contain <code>{}</code>.",
            escape(&c.escape_default().to_string())
        ),
    }
}

pub fn command_added(raw_name: &str) -> String {
    format!(
        "✅ Added a new section <code>[{}]</code> to the auto-response config.",
        escape(raw_name)
    )
}

pub fn response_changed(raw_name: &str, text: &str) -> String {
    format!(
        "✅ Response text of command / command set <code>[{}]</code> changed to <code>{}</code>",
        escape(raw_name),
        escape(text)
    )
}

pub fn notification_changed(raw_name: &str, text: &str) -> String {
    format!(
        "✅ Notification text of command / command set <code>[{}]</code> changed to <code>{}</code>",
        escape(raw_name),
        escape(text)
    )
}

/// Summary of a seller's public lots
pub fn lots_summary(user_id: u64, info: &UserLotsInfo) -> String {
    let mut text = format!(
        "📦 <b>User {}</b>\n\nCategories: <b>{}</b>\nLots: <b>{}</b>",
        user_id,
        info.categories.len(),
        info.lots.len()
    );

    if !info.categories.is_empty() {
        text.push('\n');
        for category in info.categories.iter().take(LOTS_SUMMARY_CATEGORIES) {
            text.push_str(&format!(
                "\n• <a href=\"{}\">{}</a>: {}",
                escape(&category.public_link),
                escape(&category.title),
                info.lots_in(category.id).count()
            ));
        }
        if info.categories.len() > LOTS_SUMMARY_CATEGORIES {
            text.push_str(&format!("\n…and {} more", info.categories.len() - LOTS_SUMMARY_CATEGORIES));
        }
    }

    text
}

/// Readable reason for a failed marketplace request
pub fn scraper_error(error: &ScraperError) -> String {
    match error {
        ScraperError::UserNotFound { user_id } => {
            format!("❌ User <code>{}</code> does not exist.", user_id)
        }
        ScraperError::FetchFailed { status } => {
            format!("❌ The marketplace answered with HTTP <code>{}</code>. Try again later.", status)
        }
        ScraperError::Timeout => "❌ The marketplace did not answer in time.".to_string(),
        ScraperError::Request(_) => "❌ Could not reach the marketplace.".to_string(),
        ScraperError::MalformedPage(reason) => {
            format!("❌ Could not read the profile page: <code>{}</code>", escape(reason))
        }
    }
}

pub fn status(commands: usize, stats: &TrackerStats) -> String {
    format!(
        "📊 <b>Status</b>\n\nAuto-response sections: <b>{}</b>\nPending prompts: <b>{}</b>",
        commands, stats.active_states
    )
}

pub const HELP: &str = "🤖 <b>LotPilot help</b>\n\n\
    /start - Open the control panel\n\
    /menu - Open the control panel\n\
    /lots &lt;user_id&gt; - Summarize a seller's public lots\n\
    /status - Show command and prompt counts\n\
    /help - Show this help message";
