//! Inline keyboards of the control panel

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::handlers::callbacks::data::CallbackAction;
use crate::models::CommandGroup;
use crate::storage::AutoResponseStore;
use crate::utils::helpers::{offset_for_index, truncate_text};

/// Longest command name shown on a list button
const BUTTON_TEXT_LIMIT: usize = 40;

fn button(text: impl Into<String>, action: CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text, action.to_string())
}

/// Main control panel
pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("📋 Commands", CallbackAction::CommandList { offset: 0 })],
        vec![button("➕ Add command", CallbackAction::AddCommand)],
    ])
}

/// Cancel button attached to every prompt
pub fn clear_state() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("❌ Cancel", CallbackAction::ClearState)]])
}

/// First index of the page that should be shown for `offset`.
///
/// An offset past the end (after deletions) falls back to the last page.
pub fn clamp_offset(offset: usize, total: usize, page_size: usize) -> usize {
    if total == 0 {
        return 0;
    }
    if offset < total {
        return offset;
    }
    let page_size = page_size.max(1);
    (total - 1) / page_size * page_size
}

/// One page of the command list with navigation
pub fn commands_list(store: &AutoResponseStore, offset: usize, page_size: usize) -> InlineKeyboardMarkup {
    let total = store.len();
    let offset = clamp_offset(offset, total, page_size);

    let mut rows: Vec<Vec<InlineKeyboardButton>> = store
        .groups()
        .iter()
        .enumerate()
        .skip(offset)
        .take(page_size)
        .map(|(index, group)| {
            vec![button(
                truncate_text(&group.raw_name, BUTTON_TEXT_LIMIT),
                CallbackAction::EditCommand { index, offset },
            )]
        })
        .collect();

    let mut navigation = Vec::new();
    if offset > 0 {
        navigation.push(button(
            "◀️ Previous",
            CallbackAction::CommandList { offset: offset.saturating_sub(page_size) },
        ));
    }
    if offset + page_size < total {
        navigation.push(button("Next ▶️", CallbackAction::CommandList { offset: offset + page_size }));
    }
    if !navigation.is_empty() {
        rows.push(navigation);
    }

    rows.push(vec![
        button("➕ Add command", CallbackAction::AddCommand),
        button("◀️ Back", CallbackAction::MainMenu),
    ]);

    InlineKeyboardMarkup::new(rows)
}

/// Settings panel of one command
pub fn edit_command(group: &CommandGroup, index: usize, offset: usize) -> InlineKeyboardMarkup {
    let notification = if group.telegram_notification {
        "🔔 Notifications: on"
    } else {
        "🔕 Notifications: off"
    };

    InlineKeyboardMarkup::new(vec![
        vec![button("✏️ Edit response", CallbackAction::EditResponseText { index, offset })],
        vec![button("✏️ Edit notification text", CallbackAction::EditNotificationText { index, offset })],
        vec![button(notification, CallbackAction::SwitchNotification { index, offset })],
        vec![button("🗑️ Delete", CallbackAction::DeleteCommand { index, offset })],
        vec![
            button("◀️ Back", CallbackAction::CommandList { offset }),
            button("🔄 Refresh", CallbackAction::EditCommand { index, offset }),
        ],
    ])
}

/// Shown when a command index no longer exists
pub fn refresh_list() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("🔄 Refresh", CallbackAction::CommandList { offset: 0 })]])
}

/// Recovery keyboard after a rejected command set
pub fn add_command_error() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        button("◀️ Back", CallbackAction::MainMenu),
        button("➕ Add another", CallbackAction::AddCommand),
    ]])
}

/// Follow-up keyboard after a command set was added at `index`
pub fn command_added(index: usize) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        button("◀️ Back", CallbackAction::MainMenu),
        button("➕ Add more", CallbackAction::AddCommand),
        button("⚙️ Configure", CallbackAction::EditCommand { index, offset: offset_for_index(index) }),
    ]])
}

/// Follow-up keyboard after a text field was changed
pub fn text_changed(index: usize, offset: usize, again: CallbackAction) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        button("◀️ Back", CallbackAction::EditCommand { index, offset }),
        button("✏️ Change", again),
    ]])
}
