//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Callback handlers for inline keyboard interactions
//! - Message handlers for answers to control panel prompts

pub mod callbacks;
pub mod commands;
pub mod dispatch;
pub mod keyboards;
pub mod messages;
pub mod views;

// Re-export commonly used handler functions
pub use callbacks::{handle_callback_query, CallbackAction};
pub use commands::{handle_command, Command};
pub use dispatch::{create_handler, HandlerError, HandlerResult};
pub use messages::{awaiting_input, handle_add_command, handle_edit_notification_text, handle_edit_response_text};
