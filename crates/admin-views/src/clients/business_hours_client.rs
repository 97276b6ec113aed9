//! # Business Hours Client
//!
//! High-level API over a running [`BusinessHoursTableView`].

use crate::api::BusinessHoursList;
use crate::error::AdminError;
use crate::model::BusinessHour;
use crate::views::{BusinessHoursEvent, BusinessHoursSnapshot, BusinessHoursTableView};
use async_trait::async_trait;
use tracing::{debug, instrument};
use view_framework::{Endpoint, ListQuery, Page, QueryEdit, ViewClient, ViewError, ViewHandle};

pub struct BusinessHoursClient<E = BusinessHoursList>
where
    E: Endpoint<Params = ListQuery, Output = Page<BusinessHour>>,
{
    inner: ViewHandle<BusinessHoursTableView<E>>,
}

impl<E> Clone for BusinessHoursClient<E>
where
    E: Endpoint<Params = ListQuery, Output = Page<BusinessHour>>,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[async_trait]
impl<E> ViewClient<BusinessHoursTableView<E>> for BusinessHoursClient<E>
where
    E: Endpoint<Params = ListQuery, Output = Page<BusinessHour>>,
{
    type Error = AdminError;

    fn inner(&self) -> &ViewHandle<BusinessHoursTableView<E>> {
        &self.inner
    }

    fn map_error(e: ViewError) -> Self::Error {
        AdminError::View(e)
    }
}

impl<E> BusinessHoursClient<E>
where
    E: Endpoint<Params = ListQuery, Output = Page<BusinessHour>>,
{
    pub fn new(inner: ViewHandle<BusinessHoursTableView<E>>) -> Self {
        Self { inner }
    }

    async fn send(&self, event: BusinessHoursEvent) -> Result<BusinessHoursSnapshot, AdminError> {
        self.inner.dispatch(event).await.map_err(AdminError::View)
    }

    #[instrument(skip(self))]
    pub async fn filter(&self, text: String) -> Result<BusinessHoursSnapshot, AdminError> {
        debug!("Sending request");
        self.send(BusinessHoursEvent::EditQuery(QueryEdit::Filter(text)))
            .await
    }

    #[instrument(skip(self))]
    pub async fn edit_query(&self, edit: QueryEdit) -> Result<BusinessHoursSnapshot, AdminError> {
        debug!("Sending request");
        self.send(BusinessHoursEvent::EditQuery(edit)).await
    }

    #[instrument(skip(self))]
    pub async fn open(&self, id: String) -> Result<BusinessHoursSnapshot, AdminError> {
        debug!("Sending request");
        self.send(BusinessHoursEvent::Open(id)).await
    }

    /// Asks for confirmation of removing `id`.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: String) -> Result<BusinessHoursSnapshot, AdminError> {
        debug!("Sending request");
        self.send(BusinessHoursEvent::Remove(id)).await
    }

    #[instrument(skip(self))]
    pub async fn confirm_remove(&self) -> Result<BusinessHoursSnapshot, AdminError> {
        debug!("Sending request");
        self.send(BusinessHoursEvent::ConfirmRemove).await
    }

    #[instrument(skip(self))]
    pub async fn cancel_remove(&self) -> Result<BusinessHoursSnapshot, AdminError> {
        debug!("Sending request");
        self.send(BusinessHoursEvent::CancelRemove).await
    }

    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<BusinessHoursSnapshot, AdminError> {
        debug!("Sending request");
        self.send(BusinessHoursEvent::Reload).await
    }
}
