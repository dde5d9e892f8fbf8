//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Local};

/// Separator between alias commands inside one section name
pub const ALIAS_DELIMITER: char = '|';

/// Split a raw section name into its alias commands.
///
/// Parts are trimmed and empty parts are dropped, so `" a | |b "` yields `["a", "b"]`.
pub fn split_aliases(raw: &str) -> Vec<String> {
    raw.split(ALIAS_DELIMITER)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Offset of the command list page that shows `index` near its bottom
pub fn offset_for_index(index: usize) -> usize {
    index.saturating_sub(4)
}

/// Format a timestamp as wall-clock time for panel footers
pub fn format_clock(timestamp: DateTime<Local>) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
