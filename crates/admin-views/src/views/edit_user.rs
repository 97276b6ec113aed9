//! # Edit User
//!
//! Fetches the user and the role list, hydrates the shared user form from the
//! user, and saves the whole draft through `users.update`. An avatar change is
//! queued next to the draft and committed only after the update succeeded.

use super::user_form::{
    available_roles, validate_existing_user, UpdateUser, UserFormValues, UserFormValuesField,
};
use super::USERS_ROUTE;
use crate::api::{RolesList, SharedApi, UsersInfo};
use crate::context::ViewContext;
use crate::model::{AvatarFile, Role, UserLookup, UserRecord};
use async_trait::async_trait;
use tracing::debug;
use view_framework::{
    AsyncPhase, DetailForm, Endpoint, EndpointData, EndpointError, FieldValue, FormDraft, Route,
    SaveReceipt, SecondaryUpload, Settled, UploadStatus, View, ViewError,
};

/// The avatar the user picked in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarChange {
    Reset,
    Url(String),
    Upload(AvatarFile),
}

/// Commits an [`AvatarChange`] once the user update went through.
pub struct AvatarCommit {
    api: SharedApi,
    change: AvatarChange,
}

impl AvatarCommit {
    pub fn new(api: SharedApi, change: AvatarChange) -> Self {
        Self { api, change }
    }
}

impl std::fmt::Debug for AvatarCommit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarCommit")
            .field("change", &self.change)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SecondaryUpload for AvatarCommit {
    fn label(&self) -> &'static str {
        "avatar"
    }

    async fn commit(&self, receipt: &SaveReceipt) -> Result<(), EndpointError> {
        match &self.change {
            AvatarChange::Reset => self.api.reset_avatar(&receipt.id).await,
            AvatarChange::Url(url) => self.api.set_avatar_url(&receipt.id, url).await,
            AvatarChange::Upload(file) => self.api.upload_avatar(&receipt.id, file).await,
        }
    }
}

#[derive(Debug)]
pub enum EditUserEvent {
    Edit(UserFormValuesField, FieldValue),
    SetAvatar(AvatarChange),
    Save,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditUserProps {
    pub values: UserFormValues,
    pub available_roles: Vec<(String, String)>,
    pub can_save: bool,
    pub can_reset: bool,
    pub avatar_queued: bool,
    pub username: String,
    pub avatar_etag: Option<String>,
    pub validation_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditUserSnapshot {
    Loading,
    NotFound(String),
    Ready(Box<EditUserProps>),
}

pub struct EditUserView<U = UsersInfo, R = RolesList>
where
    U: Endpoint<Params = UserLookup, Output = UserRecord>,
    R: Endpoint<Params = (), Output = Vec<Role>>,
{
    api: SharedApi,
    user_id: String,
    user: EndpointData<U>,
    roles: EndpointData<R>,
    form: Option<DetailForm<UserFormValues>>,
}

enum Source {
    User(Settled),
    Roles(Settled),
    Idle,
}

impl<U, R> EditUserView<U, R>
where
    U: Endpoint<Params = UserLookup, Output = UserRecord>,
    R: Endpoint<Params = (), Output = Vec<Role>>,
{
    pub fn new(api: SharedApi, user_id: impl Into<String>, users: U, roles: R) -> Self {
        Self {
            api,
            user_id: user_id.into(),
            user: EndpointData::new(users),
            roles: EndpointData::new(roles),
            form: None,
        }
    }

    fn form_mut(&mut self) -> Result<&mut DetailForm<UserFormValues>, ViewError> {
        self.form
            .as_mut()
            .ok_or_else(|| ViewError::Validation("user not loaded".into()))
    }

    /// Rebuilds the draft from the freshly resolved user.
    fn hydrate(&mut self) {
        let Some(user) = self.user.value() else {
            return;
        };
        let values = UserFormValues::from_record(user);
        match &mut self.form {
            Some(form) => form.draft_mut().rebase(values),
            None => {
                self.form = Some(
                    DetailForm::new(FormDraft::new(values)).with_validator(validate_existing_user),
                );
            }
        }
        debug!(user_id = %self.user_id, "Form hydrated");
    }

    async fn save(&mut self, ctx: &ViewContext) -> Result<(), ViewError> {
        let submit = UpdateUser {
            api: self.api.clone(),
            user_id: self.user_id.clone(),
        };
        let form = self.form_mut()?;
        let report = match form.save(&submit).await {
            Ok(report) => report,
            Err(ViewError::RemoteAction(e)) => {
                ctx.toast_error(e.to_string());
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        ctx.toast_success("User_updated_successfully");
        match &report.upload {
            UploadStatus::NotQueued => {}
            UploadStatus::Committed(_) => ctx.toast_success("Avatar_changed_successfully"),
            UploadStatus::Failed { error, .. } => ctx.toast_error(error.to_string()),
        }
        ctx.navigator.push(
            Route::new(USERS_ROUTE)
                .param("context", "info")
                .param("id", report.receipt.id.as_str()),
        );
        Ok(())
    }
}

#[async_trait]
impl<U, R> View for EditUserView<U, R>
where
    U: Endpoint<Params = UserLookup, Output = UserRecord>,
    R: Endpoint<Params = (), Output = Vec<Role>>,
{
    type Event = EditUserEvent;
    type Snapshot = EditUserSnapshot;
    type Context = ViewContext;

    async fn on_mount(&mut self, _ctx: &ViewContext) -> Result<(), ViewError> {
        self.roles.fetch(());
        self.user.fetch(UserLookup::Id(self.user_id.clone()));
        Ok(())
    }

    async fn handle_event(&mut self, event: EditUserEvent, ctx: &ViewContext) -> Result<(), ViewError> {
        match event {
            EditUserEvent::Edit(field, value) => self.form_mut()?.draft_mut().handle(field, value),
            EditUserEvent::SetAvatar(change) => {
                let upload = AvatarCommit::new(self.api.clone(), change);
                self.form_mut()?.queue_upload(Box::new(upload));
                Ok(())
            }
            EditUserEvent::Save => self.save(ctx).await,
            EditUserEvent::Reset => {
                self.form_mut()?.reset();
                Ok(())
            }
        }
    }

    fn has_pending(&self) -> bool {
        self.user.has_pending() || self.roles.has_pending()
    }

    async fn settle(&mut self, _ctx: &ViewContext) -> bool {
        let source = {
            let user = &mut self.user;
            let roles = &mut self.roles;
            let user_pending = user.has_pending();
            let roles_pending = roles.has_pending();
            tokio::select! {
                Some(settled) = user.next_completion(), if user_pending => Source::User(settled),
                Some(settled) = roles.next_completion(), if roles_pending => Source::Roles(settled),
                else => Source::Idle,
            }
        };

        match source {
            Source::User(settled) => {
                if settled == Settled::Applied(AsyncPhase::Resolved) {
                    self.hydrate();
                }
                settled.is_applied()
            }
            Source::Roles(settled) => settled.is_applied(),
            Source::Idle => false,
        }
    }

    fn snapshot(&self, ctx: &ViewContext) -> EditUserSnapshot {
        let loading = |phase: AsyncPhase| matches!(phase, AsyncPhase::Idle | AsyncPhase::Loading);
        if loading(self.user.phase()) || loading(self.roles.phase()) {
            return EditUserSnapshot::Loading;
        }
        let (Some(user), Some(roles), Some(form)) =
            (self.user.value(), self.roles.value(), self.form.as_ref())
        else {
            return EditUserSnapshot::NotFound(ctx.t("User_not_found"));
        };

        EditUserSnapshot::Ready(Box::new(EditUserProps {
            values: form.draft().values().clone(),
            available_roles: available_roles(roles),
            can_save: form.can_save(),
            can_reset: form.can_reset(),
            avatar_queued: form.has_queued_upload(),
            username: user.username.clone(),
            avatar_etag: user.avatar_etag.clone(),
            validation_error: form.validation_error(),
        }))
    }

    fn on_unmount(&mut self) {
        self.user.unmount();
        self.roles.unmount();
    }
}
