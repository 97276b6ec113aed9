//! # Add User
//!
//! The user form over a blank draft. Roles load in the background; the form
//! is usable before they arrive.

use super::user_form::{
    available_roles, validate_new_user, CreateUser, UserFormValues, UserFormValuesField,
};
use super::USERS_ROUTE;
use crate::api::{RolesList, SharedApi};
use crate::context::ViewContext;
use crate::model::Role;
use async_trait::async_trait;
use view_framework::{
    DetailForm, Endpoint, EndpointData, FieldValue, FormDraft, Route, Settled, View, ViewError,
};

#[derive(Debug)]
pub enum AddUserEvent {
    Edit(UserFormValuesField, FieldValue),
    Save,
    /// Discards the draft.
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddUserSnapshot {
    pub values: UserFormValues,
    pub available_roles: Vec<(String, String)>,
    pub can_save: bool,
    pub can_cancel: bool,
    pub validation_error: Option<String>,
}

pub struct AddUserView<R = RolesList>
where
    R: Endpoint<Params = (), Output = Vec<Role>>,
{
    api: SharedApi,
    roles: EndpointData<R>,
    form: DetailForm<UserFormValues>,
}

impl<R> AddUserView<R>
where
    R: Endpoint<Params = (), Output = Vec<Role>>,
{
    pub fn new(api: SharedApi, roles: R) -> Self {
        Self {
            api,
            roles: EndpointData::new(roles),
            form: DetailForm::new(FormDraft::new(UserFormValues::for_new_user()))
                .with_validator(validate_new_user),
        }
    }
}

#[async_trait]
impl<R> View for AddUserView<R>
where
    R: Endpoint<Params = (), Output = Vec<Role>>,
{
    type Event = AddUserEvent;
    type Snapshot = AddUserSnapshot;
    type Context = ViewContext;

    async fn on_mount(&mut self, _ctx: &ViewContext) -> Result<(), ViewError> {
        self.roles.fetch(());
        Ok(())
    }

    async fn handle_event(&mut self, event: AddUserEvent, ctx: &ViewContext) -> Result<(), ViewError> {
        match event {
            AddUserEvent::Edit(field, value) => self.form.draft_mut().handle(field, value),
            AddUserEvent::Save => {
                let submit = CreateUser {
                    api: self.api.clone(),
                };
                match self.form.save(&submit).await {
                    Ok(report) => {
                        ctx.toast_success("User_created_successfully");
                        ctx.navigator.push(
                            Route::new(USERS_ROUTE)
                                .param("context", "info")
                                .param("id", report.receipt.id.as_str()),
                        );
                        Ok(())
                    }
                    Err(ViewError::RemoteAction(e)) => {
                        ctx.toast_error(e.to_string());
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            AddUserEvent::Cancel => {
                self.form.reset();
                Ok(())
            }
        }
    }

    fn has_pending(&self) -> bool {
        self.roles.has_pending()
    }

    async fn settle(&mut self, _ctx: &ViewContext) -> bool {
        matches!(
            self.roles.next_completion().await,
            Some(Settled::Applied(_))
        )
    }

    fn snapshot(&self, _ctx: &ViewContext) -> AddUserSnapshot {
        AddUserSnapshot {
            values: self.form.draft().values().clone(),
            available_roles: self
                .roles
                .value()
                .map(|roles| available_roles(roles))
                .unwrap_or_default(),
            can_save: self.form.can_save(),
            can_cancel: self.form.can_reset(),
            validation_error: self.form.validation_error(),
        }
    }

    fn on_unmount(&mut self) {
        self.roles.unmount();
    }
}
