//! # Console Configuration
//!
//! Loaded from TOML. Every key is optional; a missing file means defaults.
//!
//! ```toml
//! [views]
//! page_size = 25
//! mailbox_capacity = 32
//!
//! [settings]
//! use_real_name = false
//! manually_approve_new_users = false
//! allow_email_notifications = true
//! default_desktop_notifications = "all"
//! default_audio_notifications = "mentions"
//! default_mobile_notifications = "all"
//! ```

use crate::error::AdminError;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "ADMIN_VIEWS_CONFIG";

const NOTIFICATION_LEVELS: [&str; 3] = ["all", "mentions", "nothing"];

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub views: ViewsConfig,
    pub settings: UiSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    pub page_size: usize,
    pub mailbox_capacity: usize,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            page_size: view_framework::list::DEFAULT_PAGE_SIZE,
            mailbox_capacity: 32,
        }
    }
}

/// Workspace settings the screens read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub use_real_name: bool,
    pub manually_approve_new_users: bool,
    pub allow_email_notifications: bool,
    pub default_desktop_notifications: String,
    pub default_audio_notifications: String,
    pub default_mobile_notifications: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            use_real_name: false,
            manually_approve_new_users: false,
            allow_email_notifications: true,
            default_desktop_notifications: "all".to_owned(),
            default_audio_notifications: "mentions".to_owned(),
            default_mobile_notifications: "all".to_owned(),
        }
    }
}

impl ConsoleConfig {
    /// The path named by `ADMIN_VIEWS_CONFIG`, if set.
    pub fn env_path() -> Option<PathBuf> {
        env::var_os(CONFIG_ENV).map(PathBuf::from)
    }

    /// Loads the file named by `ADMIN_VIEWS_CONFIG`, or defaults.
    pub fn from_env() -> Result<Self, AdminError> {
        match Self::env_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Self, AdminError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|e| {
            AdminError::Config(format!("read config file {}: {e}", path.display()))
        })?;
        let config = Self::from_toml(&raw)
            .map_err(|e| AdminError::Config(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, AdminError> {
        let config: ConsoleConfig =
            toml::from_str(raw).map_err(|e| AdminError::Config(format!("parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AdminError> {
        if self.views.page_size == 0 {
            return Err(AdminError::Config(
                "views.page_size must be positive, got 0".into(),
            ));
        }
        if self.views.mailbox_capacity == 0 {
            return Err(AdminError::Config(
                "views.mailbox_capacity must be positive, got 0".into(),
            ));
        }
        for (key, value) in [
            ("default_desktop_notifications", &self.settings.default_desktop_notifications),
            ("default_audio_notifications", &self.settings.default_audio_notifications),
            ("default_mobile_notifications", &self.settings.default_mobile_notifications),
        ] {
            if !NOTIFICATION_LEVELS.contains(&value.as_str()) {
                return Err(AdminError::Config(format!(
                    "settings.{key} must be one of {NOTIFICATION_LEVELS:?}, got {value:?}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = ConsoleConfig::from_toml("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.views.page_size, 25);
        assert!(config.settings.allow_email_notifications);
    }

    #[test]
    fn test_partial_sections() {
        let config = ConsoleConfig::from_toml(
            r#"
            [views]
            page_size = 50

            [settings]
            manually_approve_new_users = true
            default_audio_notifications = "nothing"
            "#,
        )
        .unwrap();
        assert_eq!(config.views.page_size, 50);
        assert_eq!(config.views.mailbox_capacity, 32);
        assert!(config.settings.manually_approve_new_users);
        assert_eq!(config.settings.default_audio_notifications, "nothing");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ConsoleConfig::from_toml("[views]\npage_size = 0").is_err());
        assert!(ConsoleConfig::from_toml("[views]\nmailbox_capacity = 0").is_err());
        assert!(
            ConsoleConfig::from_toml("[settings]\ndefault_desktop_notifications = \"loud\"")
                .is_err()
        );
        assert!(ConsoleConfig::from_toml("[views]\npage_size = \"many\"").is_err());
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let path = std::env::temp_dir().join("admin-views-config-that-does-not-exist.toml");
        assert_eq!(ConsoleConfig::load(&path).unwrap(), ConsoleConfig::default());
    }
}
