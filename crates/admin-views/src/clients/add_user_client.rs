//! Client for the [`AddUserView`].

use crate::api::RolesList;
use crate::error::AdminError;
use crate::model::Role;
use crate::views::{AddUserEvent, AddUserSnapshot, AddUserView, UserFormValuesField};
use async_trait::async_trait;
use tracing::{debug, instrument};
use view_framework::{Endpoint, FieldValue, ViewClient, ViewError, ViewHandle};

pub struct AddUserClient<R = RolesList>
where
    R: Endpoint<Params = (), Output = Vec<Role>>,
{
    inner: ViewHandle<AddUserView<R>>,
}

impl<R> Clone for AddUserClient<R>
where
    R: Endpoint<Params = (), Output = Vec<Role>>,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[async_trait]
impl<R> ViewClient<AddUserView<R>> for AddUserClient<R>
where
    R: Endpoint<Params = (), Output = Vec<Role>>,
{
    type Error = AdminError;

    fn inner(&self) -> &ViewHandle<AddUserView<R>> {
        &self.inner
    }

    fn map_error(e: ViewError) -> Self::Error {
        AdminError::View(e)
    }
}

impl<R> AddUserClient<R>
where
    R: Endpoint<Params = (), Output = Vec<Role>>,
{
    pub fn new(inner: ViewHandle<AddUserView<R>>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, value))]
    pub async fn edit(
        &self,
        field: UserFormValuesField,
        value: impl Into<FieldValue> + Send,
    ) -> Result<AddUserSnapshot, AdminError> {
        debug!("Sending request");
        self.inner
            .dispatch(AddUserEvent::Edit(field, value.into()))
            .await
            .map_err(AdminError::View)
    }

    #[instrument(skip(self))]
    pub async fn save(&self) -> Result<AddUserSnapshot, AdminError> {
        debug!("Sending request");
        self.inner
            .dispatch(AddUserEvent::Save)
            .await
            .map_err(AdminError::View)
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self) -> Result<AddUserSnapshot, AdminError> {
        debug!("Sending request");
        self.inner
            .dispatch(AddUserEvent::Cancel)
            .await
            .map_err(AdminError::View)
    }
}
