//! The admin screens.

pub mod add_user;
pub mod agent_status;
pub mod business_hours;
pub mod edit_user;
pub mod integrations;
pub mod notification_preferences;
pub mod user_form;
pub mod user_info;

pub use add_user::{AddUserEvent, AddUserSnapshot, AddUserView};
pub use agent_status::{AgentStatusChart, AgentStatusEvent, AgentStatusSnapshot};
pub use business_hours::{
    BusinessHourRow, BusinessHoursEvent, BusinessHoursSnapshot, BusinessHoursTableView,
};
pub use edit_user::{AvatarChange, EditUserEvent, EditUserProps, EditUserSnapshot, EditUserView};
pub use integrations::{EditIntegrationsPage, IntegrationEditor};
pub use notification_preferences::{
    DesktopNotice, DesktopPermission, NotificationPreferences, NotificationPrefs,
};
pub use user_form::{UserFormValues, UserFormValuesField, UserFormValuesHandlers};
pub use user_info::{UserInfoEvent, UserInfoProps, UserInfoSnapshot, UserInfoView};

/// Route of the user administration pages.
pub const USERS_ROUTE: &str = "admin-users";
