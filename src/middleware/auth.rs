//! Authentication middleware
//!
//! Only configured administrators may open the control panel or change
//! auto-response commands.

use std::collections::HashSet;
use teloxide::types::User;
use tracing::{debug, warn};
use crate::config::settings::BotConfig;
use crate::utils::errors::{LotPilotError, Result};

/// Authentication middleware
#[derive(Debug, Clone)]
pub struct AuthMiddleware {
    admin_ids: HashSet<i64>,
}

impl AuthMiddleware {
    /// Create a new AuthMiddleware instance
    pub fn new(config: &BotConfig) -> Self {
        Self {
            admin_ids: config.admin_ids.iter().copied().collect(),
        }
    }

    /// Check if user is an admin
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    /// Check if user is authorized to use the control panel
    pub fn check_admin_auth(&self, user: &User) -> Result<()> {
        let user_id = user.id.0 as i64;

        if self.is_admin(user_id) {
            debug!(user_id = user_id, "Admin authentication successful");
            Ok(())
        } else {
            warn!(user_id = user_id, username = ?user.username, "Unauthorized panel access attempt");
            Err(LotPilotError::PermissionDenied(
                "Admin privileges required".to_string()
            ))
        }
    }

    /// Get list of admin IDs
    pub fn get_admin_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.admin_ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use teloxide::types::UserId;

    fn create_test_user(id: u64) -> User {
        User {
            id: UserId(id),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: None,
            username: None,
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        }
    }

    fn bot_config(admin_ids: Vec<i64>) -> BotConfig {
        BotConfig {
            token: "12345:test_token".to_string(),
            admin_ids,
        }
    }

    #[test]
    fn test_admin_check() {
        let auth = AuthMiddleware::new(&bot_config(vec![456, 123]));

        assert!(auth.is_admin(123));
        assert!(auth.is_admin(456));
        assert!(!auth.is_admin(789));
        assert_eq!(auth.get_admin_ids(), vec![123, 456]);
    }

    #[test]
    fn test_admin_auth() {
        let auth = AuthMiddleware::new(&bot_config(vec![123]));

        assert!(auth.check_admin_auth(&create_test_user(123)).is_ok());
        assert_matches!(
            auth.check_admin_auth(&create_test_user(456)),
            Err(LotPilotError::PermissionDenied(_))
        );
    }
}
