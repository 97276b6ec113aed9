//! # User Info
//!
//! Read-only profile of one user, fetched from `users.info`. While a fetch is
//! running the screen shows a skeleton; any fetch error shows "user not found".

use crate::api::UsersInfo;
use crate::context::ViewContext;
use crate::lifecycle::config::UiSettings;
use crate::model::{UserLookup, UserRecord, UserStatus};
use async_trait::async_trait;
use std::collections::BTreeMap;
use view_framework::{AsyncPhase, Endpoint, EndpointData, Settled, View, ViewError};

/// Buttons under the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfoActions {
    pub id: String,
    pub username: String,
    pub is_active: bool,
    pub is_admin: bool,
}

/// What the profile card draws.
#[derive(Debug, Clone, PartialEq)]
pub struct UserInfoProps {
    pub name: Option<String>,
    pub username: String,
    pub show_real_names: bool,
    pub roles: Vec<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub utc_offset: Option<i32>,
    pub email: Option<String>,
    pub created_at: Option<String>,
    pub last_login: Option<String>,
    pub status: UserStatus,
    pub custom_status: Option<String>,
    pub nickname: Option<String>,
    pub custom_fields: BTreeMap<String, String>,
    pub actions: UserInfoActions,
}

/// Projects a fetched user onto the card.
///
/// With manual approval on, an inactive user's pending reason is shown as an
/// extra `Reason` custom field.
pub fn project_user(user: &UserRecord, settings: &UiSettings) -> UserInfoProps {
    let mut custom_fields = user.custom_fields.clone();
    if settings.manually_approve_new_users && !user.active {
        if let Some(reason) = &user.reason {
            custom_fields.insert("Reason".to_string(), reason.clone());
        }
    }

    UserInfoProps {
        name: user.name.clone(),
        username: user.username.clone(),
        show_real_names: settings.use_real_name,
        roles: user.roles.clone(),
        bio: user.bio.clone(),
        phone: user.phone.clone(),
        utc_offset: user.utc_offset,
        email: user.primary_email().map(|email| email.address.clone()),
        created_at: user.created_at.clone(),
        last_login: user.last_login.clone(),
        status: user.status,
        custom_status: user.status_text.clone(),
        nickname: user.nickname.clone(),
        custom_fields,
        actions: UserInfoActions {
            id: user.id.clone(),
            username: user.username.clone(),
            is_active: user.active,
            is_admin: user.is_admin(),
        },
    }
}

#[derive(Debug)]
pub enum UserInfoEvent {
    /// Something changed the user (an action under the card); refetch.
    Changed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserInfoSnapshot {
    Loading,
    NotFound(String),
    Ready(Box<UserInfoProps>),
}

pub struct UserInfoView<E = UsersInfo>
where
    E: Endpoint<Params = UserLookup, Output = UserRecord>,
{
    source: EndpointData<E>,
    lookup: UserLookup,
}

impl<E> UserInfoView<E>
where
    E: Endpoint<Params = UserLookup, Output = UserRecord>,
{
    pub fn new(endpoint: E, lookup: UserLookup) -> Self {
        Self {
            source: EndpointData::new(endpoint),
            lookup,
        }
    }
}

#[async_trait]
impl<E> View for UserInfoView<E>
where
    E: Endpoint<Params = UserLookup, Output = UserRecord>,
{
    type Event = UserInfoEvent;
    type Snapshot = UserInfoSnapshot;
    type Context = ViewContext;

    async fn on_mount(&mut self, _ctx: &ViewContext) -> Result<(), ViewError> {
        self.source.fetch(self.lookup.clone());
        Ok(())
    }

    async fn handle_event(&mut self, event: UserInfoEvent, _ctx: &ViewContext) -> Result<(), ViewError> {
        match event {
            UserInfoEvent::Changed => {
                self.source.reload();
                Ok(())
            }
        }
    }

    fn has_pending(&self) -> bool {
        self.source.has_pending()
    }

    async fn settle(&mut self, _ctx: &ViewContext) -> bool {
        matches!(
            self.source.next_completion().await,
            Some(Settled::Applied(_))
        )
    }

    fn snapshot(&self, ctx: &ViewContext) -> UserInfoSnapshot {
        match (self.source.phase(), self.source.value()) {
            (AsyncPhase::Loading, _) | (AsyncPhase::Idle, _) => UserInfoSnapshot::Loading,
            (_, Some(user)) if self.source.error().is_none() => {
                UserInfoSnapshot::Ready(Box::new(project_user(user, &ctx.settings)))
            }
            _ => UserInfoSnapshot::NotFound(ctx.t("User_not_found")),
        }
    }

    fn on_unmount(&mut self) {
        self.source.unmount();
    }
}
