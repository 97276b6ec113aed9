use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Presence of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Online,
    Away,
    Busy,
    #[default]
    Offline,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Online => "online",
            UserStatus::Away => "away",
            UserStatus::Busy => "busy",
            UserStatus::Offline => "offline",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "online" => Some(UserStatus::Online),
            "away" => Some(UserStatus::Away),
            "busy" => Some(UserStatus::Busy),
            "offline" => Some(UserStatus::Offline),
            _ => None,
        }
    }

    /// Design token colour for the presence bullet.
    pub fn color(&self) -> &'static str {
        match self {
            UserStatus::Busy => "danger-500",
            UserStatus::Away => "warning-600",
            UserStatus::Online => "success-500",
            UserStatus::Offline => "neutral-600",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailEntry {
    pub address: String,
    #[serde(default)]
    pub verified: bool,
}

/// A user as returned by `users.info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub emails: Vec<EmailEntry>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub utc_offset: Option<i32>,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub custom_fields: BTreeMap<String, String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default, rename = "avatarETag")]
    pub avatar_etag: Option<String>,
    #[serde(default)]
    pub require_password_change: bool,
}

fn default_active() -> bool {
    true
}

impl UserRecord {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            name: None,
            roles: vec!["user".to_string()],
            status: UserStatus::Offline,
            status_text: None,
            bio: None,
            nickname: None,
            emails: Vec::new(),
            phone: None,
            utc_offset: None,
            last_login: None,
            created_at: None,
            custom_fields: BTreeMap::new(),
            active: true,
            reason: None,
            avatar_etag: None,
            require_password_change: false,
        }
    }

    pub fn primary_email(&self) -> Option<&EmailEntry> {
        self.emails.first()
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == "admin")
    }
}

/// Identifies the user `users.info` should return.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserLookup {
    Id(String),
    Username(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Role {
    pub fn new(id: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            id: id.into(),
            description: description.map(str::to_string),
        }
    }

    /// The description, or the id when there is none.
    pub fn label(&self) -> &str {
        match self.description.as_deref() {
            Some(description) if !description.is_empty() => description,
            _ => &self.id,
        }
    }
}

/// An avatar image picked from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Payload of `users.create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub roles: Vec<String>,
    pub name: String,
    pub username: String,
    pub status_text: String,
    pub bio: String,
    pub nickname: String,
    pub email: String,
    pub password: String,
    pub verified: bool,
    pub require_password_change: bool,
    pub set_random_password: bool,
    pub send_welcome_email: bool,
    pub join_default_channels: bool,
    pub custom_fields: BTreeMap<String, String>,
}

/// Payload of `users.update`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub roles: Vec<String>,
    pub name: String,
    pub username: String,
    pub status: UserStatus,
    pub status_text: String,
    pub bio: String,
    pub nickname: String,
    pub email: String,
    /// Empty keeps the current password.
    pub password: String,
    pub verified: bool,
    pub require_password_change: bool,
    pub set_random_password: bool,
    pub custom_fields: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_wire_format() {
        let user: UserRecord = serde_json::from_str(
            r#"{
                "_id": "u1",
                "username": "alice",
                "roles": ["user", "admin"],
                "status": "away",
                "statusText": "lunch",
                "emails": [{"address": "alice@example.com", "verified": true}],
                "utcOffset": -3,
                "avatarETag": "e1"
            }"#,
        )
        .unwrap();

        assert_eq!(user.status, UserStatus::Away);
        assert_eq!(user.status_text.as_deref(), Some("lunch"));
        assert_eq!(user.utc_offset, Some(-3));
        assert_eq!(user.avatar_etag.as_deref(), Some("e1"));
        assert!(user.active);
        assert!(user.is_admin());
    }

    #[test]
    fn test_role_label_falls_back_to_id() {
        assert_eq!(Role::new("admin", Some("Administrator")).label(), "Administrator");
        assert_eq!(Role::new("bot", None).label(), "bot");
        assert_eq!(Role::new("guest", Some("")).label(), "guest");
    }
}
