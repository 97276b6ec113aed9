//! Client for the [`UserInfoView`].

use crate::api::UsersInfo;
use crate::error::AdminError;
use crate::model::{UserLookup, UserRecord};
use crate::views::{UserInfoEvent, UserInfoSnapshot, UserInfoView};
use async_trait::async_trait;
use tracing::{debug, instrument};
use view_framework::{Endpoint, ViewClient, ViewError, ViewHandle};

pub struct UserInfoClient<E = UsersInfo>
where
    E: Endpoint<Params = UserLookup, Output = UserRecord>,
{
    inner: ViewHandle<UserInfoView<E>>,
}

impl<E> Clone for UserInfoClient<E>
where
    E: Endpoint<Params = UserLookup, Output = UserRecord>,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[async_trait]
impl<E> ViewClient<UserInfoView<E>> for UserInfoClient<E>
where
    E: Endpoint<Params = UserLookup, Output = UserRecord>,
{
    type Error = AdminError;

    fn inner(&self) -> &ViewHandle<UserInfoView<E>> {
        &self.inner
    }

    fn map_error(e: ViewError) -> Self::Error {
        AdminError::View(e)
    }
}

impl<E> UserInfoClient<E>
where
    E: Endpoint<Params = UserLookup, Output = UserRecord>,
{
    pub fn new(inner: ViewHandle<UserInfoView<E>>) -> Self {
        Self { inner }
    }

    /// Refetches after an action changed the user.
    #[instrument(skip(self))]
    pub async fn changed(&self) -> Result<UserInfoSnapshot, AdminError> {
        debug!("Sending request");
        self.inner
            .dispatch(UserInfoEvent::Changed)
            .await
            .map_err(AdminError::View)
    }
}
