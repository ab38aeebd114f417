//! Account, delegate and grant models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::Permission;

/// An account the current user represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Login of the represented account
    pub user_login: String,
    /// Access level granted to the current user
    #[serde(default)]
    pub perm: Permission,
    /// When the representation was granted
    #[serde(
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// A user who has been given access to the current account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delegate {
    /// Login of the delegate
    pub user_login: String,
    /// Access level of the delegate
    #[serde(default)]
    pub perm: Permission,
    /// Set by the server
    #[serde(
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Free-text note
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl Delegate {
    /// Create a delegate entry to send to the server.
    pub fn new(user_login: impl Into<String>, perm: Permission) -> Self {
        Self {
            user_login: user_login.into(),
            perm,
            created_at: None,
            comment: String::new(),
        }
    }

    /// Attach a comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Permission for a user to manage a single segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    /// Login of the grantee
    pub user_login: String,
    /// Set by the server
    #[serde(
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Free-text note
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl Grant {
    /// Create a grant entry to send to the server.
    pub fn new(user_login: impl Into<String>) -> Self {
        Self {
            user_login: user_login.into(),
            created_at: None,
            comment: String::new(),
        }
    }

    /// Attach a comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_account() {
        let json = r#"{
            "user_login": "guest",
            "perm": "view",
            "created_at": "2006-01-02T15:04:05Z"
        }"#;

        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.user_login, "guest");
        assert_eq!(account.perm, Permission::View);
        assert_eq!(
            account.created_at,
            Some(Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap())
        );
    }

    #[test]
    fn test_missing_perm_is_not_a_grant() {
        let account: Account = serde_json::from_str(r#"{"user_login": "guest"}"#).unwrap();
        assert_eq!(account.perm, Permission::Unknown);

        let delegate: Delegate = serde_json::from_str(r#"{"user_login": "editor"}"#).unwrap();
        assert_eq!(delegate.perm, Permission::Unknown);
        assert!(!delegate.perm.can_edit());
    }

    #[test]
    fn test_new_delegate_omits_server_fields() {
        let delegate = Delegate::new("editor", Permission::Edit);
        let json = serde_json::to_value(&delegate).unwrap();
        assert_eq!(json, serde_json::json!({"user_login": "editor", "perm": "edit"}));

        let grant = Grant::new("guest").with_comment("1'st comment");
        let json = serde_json::to_value(&grant).unwrap();
        assert_eq!(json, serde_json::json!({"user_login": "guest", "comment": "1'st comment"}));
    }
}
