//! # Notification Preferences
//!
//! One section of the account preferences page. It is embedded in the page's
//! own form, so it is a plain struct rather than a hosted view: every edit is
//! reported to the page through the draft's on-change callback.

use crate::context::ViewContext;
use crate::lifecycle::config::UiSettings;
use view_framework::{form_values, FormDraft, Toast, Translate};

form_values! {
    pub struct NotificationPrefs {
        pub desktop_notification_require_interaction: bool,
        pub desktop_notifications: String,
        pub mobile_notifications: String,
        pub email_notification_mode: String,
        pub audio_notifications: String,
    }
}

const NOTIFICATION_LABELS: [(&str, &str); 3] = [
    ("all", "All_messages"),
    ("mentions", "Mentions"),
    ("nothing", "Nothing"),
];

const EMAIL_LABELS: [(&str, &str); 2] = [
    ("mentions", "Email_Notification_Mode_All"),
    ("nothing", "Email_Notification_Mode_Disabled"),
];

/// Browser permission for desktop notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DesktopPermission {
    /// Not asked yet, or notifications unsupported.
    #[default]
    Default,
    Granted,
    Denied,
}

/// What the desktop notifications row shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopNotice {
    Disabled(String),
    TestButton(String),
    EnableButton(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailModeSelect {
    pub options: Vec<(String, String)>,
    pub disabled: bool,
    pub hint: String,
}

fn label_for(labels: &[(&str, &'static str)], value: &str) -> Option<&'static str> {
    labels
        .iter()
        .find(|(key, _)| *key == value)
        .map(|(_, label)| *label)
}

fn options_with_default(
    translator: &dyn Translate,
    labels: &[(&str, &'static str)],
    default_value: &str,
) -> Vec<(String, String)> {
    let default_label = translator.t(label_for(labels, default_value).unwrap_or(default_value));
    let mut options = vec![(
        "default".to_string(),
        format!("{} ({})", translator.t("Default"), default_label),
    )];
    options.extend(
        labels
            .iter()
            .map(|(key, label)| (key.to_string(), translator.t(label))),
    );
    options
}

pub struct NotificationPreferences {
    draft: FormDraft<NotificationPrefs>,
    settings: UiSettings,
    permission: DesktopPermission,
}

impl NotificationPreferences {
    /// `current` holds the user's stored preferences.
    pub fn new(
        current: NotificationPrefs,
        settings: UiSettings,
        permission: DesktopPermission,
        on_change: impl Fn(&NotificationPrefs) + Send + Sync + 'static,
    ) -> Self {
        Self {
            draft: FormDraft::new(current).with_on_change(on_change),
            settings,
            permission,
        }
    }

    pub fn draft(&self) -> &FormDraft<NotificationPrefs> {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FormDraft<NotificationPrefs> {
        &mut self.draft
    }

    pub fn permission(&self) -> DesktopPermission {
        self.permission
    }

    /// Records the answer of a permission prompt.
    pub fn set_permission(&mut self, permission: DesktopPermission) {
        self.permission = permission;
    }

    pub fn desktop_notice(&self, translator: &dyn Translate) -> DesktopNotice {
        match self.permission {
            DesktopPermission::Denied => {
                DesktopNotice::Disabled(translator.t("Desktop_Notifications_Disabled"))
            }
            DesktopPermission::Granted => {
                DesktopNotice::TestButton(translator.t("Test_Desktop_Notifications"))
            }
            DesktopPermission::Default => {
                DesktopNotice::EnableButton(translator.t("Enable_Desktop_Notifications"))
            }
        }
    }

    /// Fires the sample notification behind the test button.
    pub fn send_test_notification(&self, ctx: &ViewContext) {
        ctx.toasts.dispatch(Toast::info(format!(
            "{}: {}",
            ctx.t("Desktop_Notification_Test"),
            ctx.t("This_is_a_desktop_notification")
        )));
    }

    pub fn desktop_options(&self, translator: &dyn Translate) -> Vec<(String, String)> {
        options_with_default(
            translator,
            &NOTIFICATION_LABELS,
            &self.settings.default_desktop_notifications,
        )
    }

    pub fn audio_options(&self, translator: &dyn Translate) -> Vec<(String, String)> {
        options_with_default(
            translator,
            &NOTIFICATION_LABELS,
            &self.settings.default_audio_notifications,
        )
    }

    pub fn mobile_options(&self, translator: &dyn Translate) -> Vec<(String, String)> {
        options_with_default(
            translator,
            &NOTIFICATION_LABELS,
            &self.settings.default_mobile_notifications,
        )
    }

    /// The default entry names the user's stored mode, not a workspace setting.
    pub fn email_select(&self, translator: &dyn Translate) -> EmailModeSelect {
        let allowed = self.settings.allow_email_notifications;
        EmailModeSelect {
            options: options_with_default(
                translator,
                &EMAIL_LABELS,
                &self.draft.initial().email_notification_mode,
            ),
            disabled: !allowed,
            hint: if allowed {
                translator.t("You_need_to_verifiy_your_email_address_to_get_notications")
            } else {
                translator.t("Email_Notifications_Change_Disabled")
            },
        }
    }
}
