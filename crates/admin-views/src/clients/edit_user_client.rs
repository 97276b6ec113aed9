//! Client for the [`EditUserView`].

use crate::api::{RolesList, UsersInfo};
use crate::error::AdminError;
use crate::model::{Role, UserLookup, UserRecord};
use crate::views::{AvatarChange, EditUserEvent, EditUserSnapshot, EditUserView, UserFormValuesField};
use async_trait::async_trait;
use tracing::{debug, instrument};
use view_framework::{Endpoint, FieldValue, ViewClient, ViewError, ViewHandle};

pub struct EditUserClient<U = UsersInfo, R = RolesList>
where
    U: Endpoint<Params = UserLookup, Output = UserRecord>,
    R: Endpoint<Params = (), Output = Vec<Role>>,
{
    inner: ViewHandle<EditUserView<U, R>>,
}

impl<U, R> Clone for EditUserClient<U, R>
where
    U: Endpoint<Params = UserLookup, Output = UserRecord>,
    R: Endpoint<Params = (), Output = Vec<Role>>,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[async_trait]
impl<U, R> ViewClient<EditUserView<U, R>> for EditUserClient<U, R>
where
    U: Endpoint<Params = UserLookup, Output = UserRecord>,
    R: Endpoint<Params = (), Output = Vec<Role>>,
{
    type Error = AdminError;

    fn inner(&self) -> &ViewHandle<EditUserView<U, R>> {
        &self.inner
    }

    fn map_error(e: ViewError) -> Self::Error {
        AdminError::View(e)
    }
}

impl<U, R> EditUserClient<U, R>
where
    U: Endpoint<Params = UserLookup, Output = UserRecord>,
    R: Endpoint<Params = (), Output = Vec<Role>>,
{
    pub fn new(inner: ViewHandle<EditUserView<U, R>>) -> Self {
        Self { inner }
    }

    async fn send(&self, event: EditUserEvent) -> Result<EditUserSnapshot, AdminError> {
        self.inner.dispatch(event).await.map_err(AdminError::View)
    }

    #[instrument(skip(self, value))]
    pub async fn edit(
        &self,
        field: UserFormValuesField,
        value: impl Into<FieldValue> + Send,
    ) -> Result<EditUserSnapshot, AdminError> {
        debug!("Sending request");
        self.send(EditUserEvent::Edit(field, value.into())).await
    }

    #[instrument(skip(self))]
    pub async fn set_avatar(&self, change: AvatarChange) -> Result<EditUserSnapshot, AdminError> {
        debug!("Sending request");
        self.send(EditUserEvent::SetAvatar(change)).await
    }

    #[instrument(skip(self))]
    pub async fn save(&self) -> Result<EditUserSnapshot, AdminError> {
        debug!("Sending request");
        self.send(EditUserEvent::Save).await
    }

    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<EditUserSnapshot, AdminError> {
        debug!("Sending request");
        self.send(EditUserEvent::Reset).await
    }
}
