//! Client for the [`AgentStatusChart`].

use crate::api::AgentsStatus;
use crate::error::AdminError;
use crate::model::{AgentStatusCounts, DashboardRange};
use crate::views::{AgentStatusChart, AgentStatusEvent, AgentStatusSnapshot};
use async_trait::async_trait;
use tracing::{debug, instrument};
use view_framework::{Endpoint, ViewClient, ViewError, ViewHandle};

pub struct AgentStatusClient<E = AgentsStatus>
where
    E: Endpoint<Params = DashboardRange, Output = AgentStatusCounts>,
{
    inner: ViewHandle<AgentStatusChart<E>>,
}

impl<E> Clone for AgentStatusClient<E>
where
    E: Endpoint<Params = DashboardRange, Output = AgentStatusCounts>,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[async_trait]
impl<E> ViewClient<AgentStatusChart<E>> for AgentStatusClient<E>
where
    E: Endpoint<Params = DashboardRange, Output = AgentStatusCounts>,
{
    type Error = AdminError;

    fn inner(&self) -> &ViewHandle<AgentStatusChart<E>> {
        &self.inner
    }

    fn map_error(e: ViewError) -> Self::Error {
        AdminError::View(e)
    }
}

impl<E> AgentStatusClient<E>
where
    E: Endpoint<Params = DashboardRange, Output = AgentStatusCounts>,
{
    pub fn new(inner: ViewHandle<AgentStatusChart<E>>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn set_range(&self, range: DashboardRange) -> Result<AgentStatusSnapshot, AdminError> {
        debug!("Sending request");
        self.inner
            .dispatch(AgentStatusEvent::SetRange(range))
            .await
            .map_err(AdminError::View)
    }

    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<AgentStatusSnapshot, AdminError> {
        debug!("Sending request");
        self.inner
            .dispatch(AgentStatusEvent::Reload)
            .await
            .map_err(AdminError::View)
    }
}
