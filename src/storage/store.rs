//! Auto-response command store
//!
//! Command groups are kept in file order, each under a generated id. An alias
//! index maps every single command to its group, so lookups by command and
//! edits by section index always see the same data.

use std::collections::HashMap;
use std::path::Path;
use ini::{Ini, ParseOption};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::command::CommandGroup;
use crate::utils::errors::{Result, ValidationError};
use crate::utils::helpers::split_aliases;

const RESPONSE_KEY: &str = "response";
const NOTIFICATION_FLAG_KEY: &str = "telegramNotification";
const NOTIFICATION_TEXT_KEY: &str = "notificationText";

/// Characters that would end or split a section header
const FORBIDDEN_NAME_CHARS: [char; 4] = ['[', ']', '\r', '\n'];

type ValidationResult<T> = std::result::Result<T, ValidationError>;

#[derive(Debug, Clone, Default)]
pub struct AutoResponseStore {
    groups: Vec<CommandGroup>,
    alias_index: HashMap<String, Uuid>,
}

impl AutoResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from an INI file; a missing file yields an empty store
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Auto-response file not found, starting empty");
            return Ok(Self::new());
        }

        // Values are written unquoted, so quotes in them are literal text
        let options = ParseOption {
            enabled_quote: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_file_opt(path, options)?;
        Ok(Self::from_ini(&ini))
    }

    /// Build the store from parsed INI sections
    pub fn from_ini(ini: &Ini) -> Self {
        let mut store = Self::new();

        for (section, properties) in ini.iter() {
            let Some(raw_name) = section else {
                continue;
            };

            let mut group = CommandGroup::new(raw_name);
            group.response = properties.get(RESPONSE_KEY).unwrap_or_default().to_string();
            group.telegram_notification = properties.get(NOTIFICATION_FLAG_KEY) == Some("1");
            group.notification_text = properties.get(NOTIFICATION_TEXT_KEY).map(str::to_string);

            for alias in &group.aliases {
                if store.alias_index.contains_key(alias) {
                    warn!(alias = %alias, section = %raw_name, "Command is defined in several sections, keeping the first");
                } else {
                    store.alias_index.insert(alias.clone(), group.id);
                }
            }
            store.groups.push(group);
        }

        store
    }

    /// Render the store as INI, one section per group
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();

        for group in &self.groups {
            let mut setter = ini.with_section(Some(group.raw_name.as_str()));
            let section = setter
                .set(RESPONSE_KEY, group.response.as_str())
                .set(NOTIFICATION_FLAG_KEY, group.notification_flag());
            if let Some(text) = &group.notification_text {
                section.set(NOTIFICATION_TEXT_KEY, text.as_str());
            }
        }

        ini
    }

    /// Persist the store to an INI file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.to_ini().write_to_file(path)?;
        debug!(path = %path.display(), groups = self.groups.len(), "Saved auto-response file");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Section names in file order
    pub fn sections(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.raw_name.clone()).collect()
    }

    pub fn groups(&self) -> &[CommandGroup] {
        &self.groups
    }

    pub fn get(&self, index: usize) -> Option<&CommandGroup> {
        self.groups.get(index)
    }

    /// Group that answers the given single command
    pub fn find_by_alias(&self, alias: &str) -> Option<&CommandGroup> {
        let id = self.alias_index.get(alias)?;
        self.groups.iter().find(|g| g.id == *id)
    }

    pub fn contains_alias(&self, alias: &str) -> bool {
        self.alias_index.contains_key(alias)
    }

    /// Look up a group by index, failing if the index went stale
    pub fn check_index(&self, index: usize) -> ValidationResult<&CommandGroup> {
        self.groups.get(index).ok_or(ValidationError::CommandNotFound { index })
    }

    /// Split and validate a new alias set without changing the store
    pub fn validate_new(&self, raw: &str) -> ValidationResult<Vec<String>> {
        if let Some(c) = raw.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
            return Err(ValidationError::UnsupportedCharacter(c));
        }

        let aliases = split_aliases(raw);
        if aliases.is_empty() {
            return Err(ValidationError::EmptyCommand);
        }

        for (i, alias) in aliases.iter().enumerate() {
            if aliases[..i].contains(alias) {
                return Err(ValidationError::DuplicateAlias(alias.clone()));
            }
            if self.contains_alias(alias) {
                return Err(ValidationError::AliasExists(alias.clone()));
            }
        }

        Ok(aliases)
    }

    /// Add a new alias set; nothing is added unless every alias is new
    pub fn add_group(&mut self, raw: &str) -> ValidationResult<usize> {
        self.validate_new(raw)?;

        let group = CommandGroup::new(raw);
        for alias in &group.aliases {
            self.alias_index.insert(alias.clone(), group.id);
        }
        self.groups.push(group);

        Ok(self.groups.len() - 1)
    }

    pub fn set_response(&mut self, index: usize, text: &str) -> ValidationResult<&CommandGroup> {
        let group = self.group_mut(index)?;
        group.response = text.trim().to_string();
        Ok(&*group)
    }

    pub fn set_notification_text(&mut self, index: usize, text: &str) -> ValidationResult<&CommandGroup> {
        let group = self.group_mut(index)?;
        group.notification_text = Some(text.trim().to_string());
        Ok(&*group)
    }

    /// Flip the notification flag, returning the new value
    pub fn toggle_notification(&mut self, index: usize) -> ValidationResult<bool> {
        let group = self.group_mut(index)?;
        group.telegram_notification = !group.telegram_notification;
        Ok(group.telegram_notification)
    }

    /// Remove a group and every alias pointing at it
    pub fn remove(&mut self, index: usize) -> ValidationResult<CommandGroup> {
        self.check_index(index)?;
        let group = self.groups.remove(index);
        self.alias_index.retain(|_, id| *id != group.id);
        Ok(group)
    }

    fn group_mut(&mut self, index: usize) -> ValidationResult<&mut CommandGroup> {
        self.groups.get_mut(index).ok_or(ValidationError::CommandNotFound { index })
    }
}
