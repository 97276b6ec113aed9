//! # Admin API
//!
//! [`AdminApi`] is the server surface the admin screens talk to. The screens
//! never hold it directly for reads: each read is wrapped in a small
//! [`Endpoint`] adapter so views stay generic over their data source and can
//! be tested against [`view_framework::mock::MockEndpoint`].

use crate::model::{
    AgentStatusCounts, AvatarFile, BusinessHour, DashboardRange, NewUser, Role, UserLookup,
    UserRecord, UserUpdate,
};
use async_trait::async_trait;
use std::sync::Arc;
use view_framework::{Endpoint, EndpointError, ListQuery, Page, RemoteMethod};

#[async_trait]
pub trait AdminApi: Send + Sync + 'static {
    async fn users_info(&self, lookup: &UserLookup) -> Result<UserRecord, EndpointError>;

    async fn roles_list(&self) -> Result<Vec<Role>, EndpointError>;

    async fn business_hours_list(
        &self,
        query: &ListQuery,
    ) -> Result<Page<BusinessHour>, EndpointError>;

    async fn remove_business_hour(&self, id: &str, kind: Option<&str>)
        -> Result<(), EndpointError>;

    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, EndpointError>;

    async fn update_user(&self, id: &str, update: &UserUpdate)
        -> Result<UserRecord, EndpointError>;

    async fn set_avatar_url(&self, user_id: &str, url: &str) -> Result<(), EndpointError>;

    async fn upload_avatar(&self, user_id: &str, file: &AvatarFile) -> Result<(), EndpointError>;

    async fn reset_avatar(&self, user_id: &str) -> Result<(), EndpointError>;

    async fn agents_status(&self, range: &DashboardRange)
        -> Result<AgentStatusCounts, EndpointError>;
}

pub type SharedApi = Arc<dyn AdminApi>;

/// `users.info`
#[derive(Clone)]
pub struct UsersInfo(pub SharedApi);

#[async_trait]
impl Endpoint for UsersInfo {
    type Params = UserLookup;
    type Output = UserRecord;

    fn name(&self) -> &'static str {
        "users.info"
    }

    async fn fetch(&self, params: UserLookup) -> Result<UserRecord, EndpointError> {
        self.0.users_info(&params).await
    }
}

/// `roles.list`
#[derive(Clone)]
pub struct RolesList(pub SharedApi);

#[async_trait]
impl Endpoint for RolesList {
    type Params = ();
    type Output = Vec<Role>;

    fn name(&self) -> &'static str {
        "roles.list"
    }

    async fn fetch(&self, _params: ()) -> Result<Vec<Role>, EndpointError> {
        self.0.roles_list().await
    }
}

/// `livechat/business-hours.list`
#[derive(Clone)]
pub struct BusinessHoursList(pub SharedApi);

#[async_trait]
impl Endpoint for BusinessHoursList {
    type Params = ListQuery;
    type Output = Page<BusinessHour>;

    fn name(&self) -> &'static str {
        "livechat/business-hours.list"
    }

    async fn fetch(&self, params: ListQuery) -> Result<Page<BusinessHour>, EndpointError> {
        self.0.business_hours_list(&params).await
    }
}

/// `livechat/analytics/dashboards/charts/agents-status`
#[derive(Clone)]
pub struct AgentsStatus(pub SharedApi);

#[async_trait]
impl Endpoint for AgentsStatus {
    type Params = DashboardRange;
    type Output = AgentStatusCounts;

    fn name(&self) -> &'static str {
        "livechat/analytics/dashboards/charts/agents-status"
    }

    async fn fetch(&self, params: DashboardRange) -> Result<AgentStatusCounts, EndpointError> {
        self.0.agents_status(&params).await
    }
}

/// `livechat:removeBusinessHour`
#[derive(Clone)]
pub struct RemoveBusinessHour(pub SharedApi);

#[async_trait]
impl RemoteMethod for RemoveBusinessHour {
    fn name(&self) -> &'static str {
        "livechat:removeBusinessHour"
    }

    async fn call(&self, id: &str, kind: Option<&str>) -> Result<(), EndpointError> {
        self.0.remove_business_hour(id, kind).await
    }
}
