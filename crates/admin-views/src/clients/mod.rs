//! Typed clients of the admin views.
//!
//! Each wraps a [`ViewHandle`](view_framework::ViewHandle) and turns screen
//! gestures into events, mapping framework errors to [`AdminError`](crate::error::AdminError).

pub mod add_user_client;
pub mod agent_status_client;
pub mod business_hours_client;
pub mod edit_user_client;
pub mod user_info_client;

pub use add_user_client::AddUserClient;
pub use agent_status_client::AgentStatusClient;
pub use business_hours_client::BusinessHoursClient;
pub use edit_user_client::EditUserClient;
pub use user_info_client::UserInfoClient;
