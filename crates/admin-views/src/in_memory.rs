//! # In-Memory Admin API
//!
//! An [`AdminApi`] backed by plain collections. Every call is answered through
//! a [`RemoteReply`] envelope, the same shape the real server uses, and any
//! operation can be made to fail once with [`InMemoryAdmin::fail_next`].

use crate::api::AdminApi;
use crate::model::{
    AgentStatusCounts, AvatarFile, BusinessHour, DashboardRange, EmailEntry, NewUser, Role,
    UserLookup, UserRecord, UserUpdate,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};
use view_framework::{EndpointError, ListQuery, Page, RemoteReply};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    UsersInfo,
    RolesList,
    BusinessHoursList,
    RemoveBusinessHour,
    CreateUser,
    UpdateUser,
    SetAvatar,
    ResetAvatar,
    AgentsStatus,
}

/// Where a user's avatar currently comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarSource {
    Url(String),
    Upload { file_name: String, size: usize },
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<String, UserRecord>,
    roles: Vec<Role>,
    business_hours: Vec<BusinessHour>,
    agents: AgentStatusCounts,
    avatars: BTreeMap<String, AvatarSource>,
    failures: Vec<(Operation, String)>,
    next_user: u64,
}

#[derive(Debug, Default)]
pub struct InMemoryAdmin {
    state: Mutex<State>,
}

impl InMemoryAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: UserRecord) -> Self {
        self.lock().users.insert(user.id.clone(), user);
        self
    }

    pub fn with_role(self, role: Role) -> Self {
        self.lock().roles.push(role);
        self
    }

    pub fn with_business_hour(self, hour: BusinessHour) -> Self {
        self.lock().business_hours.push(hour);
        self
    }

    pub fn with_agents(self, agents: AgentStatusCounts) -> Self {
        self.lock().agents = agents;
        self
    }

    /// Makes the next call of `operation` fail with `message`.
    pub fn fail_next(&self, operation: Operation, message: impl Into<String>) {
        self.lock().failures.push((operation, message.into()));
    }

    pub fn set_agents(&self, agents: AgentStatusCounts) {
        self.lock().agents = agents;
    }

    pub fn user(&self, id: &str) -> Option<UserRecord> {
        self.lock().users.get(id).cloned()
    }

    pub fn avatar(&self, user_id: &str) -> Option<AvatarSource> {
        self.lock().avatars.get(user_id).cloned()
    }

    pub fn business_hour_ids(&self) -> Vec<String> {
        self.lock()
            .business_hours
            .iter()
            .map(|hour| hour.id.clone())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `handler` against the state and wraps the outcome in a reply.
    fn reply<T>(
        &self,
        operation: Operation,
        handler: impl FnOnce(&mut State) -> Result<T, String>,
    ) -> Result<T, EndpointError> {
        let mut state = self.lock();
        let reply = match state.failures.iter().position(|(op, _)| *op == operation) {
            Some(index) => {
                let (_, message) = state.failures.remove(index);
                warn!(?operation, %message, "Injected failure");
                RemoteReply::err(message)
            }
            None => match handler(&mut state) {
                Ok(data) => RemoteReply::ok(data),
                Err(message) => RemoteReply::err(message),
            },
        };
        debug!(?operation, success = reply.success, "Reply");
        reply.into_result()
    }
}

fn find_user<'a>(state: &'a State, lookup: &UserLookup) -> Option<&'a UserRecord> {
    match lookup {
        UserLookup::Id(id) => state.users.get(id),
        UserLookup::Username(username) => {
            state.users.values().find(|user| &user.username == username)
        }
    }
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn username_taken(state: &State, username: &str, except: Option<&str>) -> bool {
    state
        .users
        .values()
        .any(|user| user.username == username && Some(user.id.as_str()) != except)
}

#[async_trait]
impl AdminApi for InMemoryAdmin {
    async fn users_info(&self, lookup: &UserLookup) -> Result<UserRecord, EndpointError> {
        self.reply(Operation::UsersInfo, |state| {
            find_user(state, lookup)
                .cloned()
                .ok_or_else(|| "error-invalid-user".to_string())
        })
    }

    async fn roles_list(&self) -> Result<Vec<Role>, EndpointError> {
        self.reply(Operation::RolesList, |state| Ok(state.roles.clone()))
    }

    async fn business_hours_list(
        &self,
        query: &ListQuery,
    ) -> Result<Page<BusinessHour>, EndpointError> {
        self.reply(Operation::BusinessHoursList, |state| {
            let needle = query.filter_text.to_lowercase();
            let matching: Vec<&BusinessHour> = state
                .business_hours
                .iter()
                .filter(|hour| hour.name.to_lowercase().contains(&needle))
                .collect();
            let total = matching.len();
            let items = matching
                .into_iter()
                .skip(query.offset)
                .take(query.limit)
                .cloned()
                .collect();
            Ok(Page::new(items, total))
        })
    }

    async fn remove_business_hour(
        &self,
        id: &str,
        kind: Option<&str>,
    ) -> Result<(), EndpointError> {
        self.reply(Operation::RemoveBusinessHour, |state| {
            let index = state
                .business_hours
                .iter()
                .position(|hour| hour.id == id)
                .ok_or_else(|| "error-business-hour-not-found".to_string())?;
            let hour = &state.business_hours[index];
            if kind.is_some_and(|kind| kind != hour.kind.as_str()) {
                return Err("error-business-hour-type-mismatch".to_string());
            }
            if !hour.is_removable() {
                return Err("error-not-allowed".to_string());
            }
            state.business_hours.remove(index);
            Ok(())
        })
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, EndpointError> {
        self.reply(Operation::CreateUser, |state| {
            if user.username.is_empty() {
                return Err("error-invalid-username".to_string());
            }
            if username_taken(state, &user.username, None) {
                return Err(format!("{} is already in use", user.username));
            }
            state.next_user += 1;
            let id = format!("user_{}", state.next_user);

            let mut record = UserRecord::new(id.clone(), user.username.clone());
            record.roles = if user.roles.is_empty() {
                vec!["user".to_string()]
            } else {
                user.roles.clone()
            };
            record.name = optional(&user.name);
            record.status_text = optional(&user.status_text);
            record.bio = optional(&user.bio);
            record.nickname = optional(&user.nickname);
            if !user.email.is_empty() {
                record.emails = vec![EmailEntry {
                    address: user.email.clone(),
                    verified: user.verified,
                }];
            }
            record.custom_fields = user.custom_fields.clone();
            record.require_password_change = user.require_password_change;

            state.users.insert(id, record.clone());
            Ok(record)
        })
    }

    async fn update_user(
        &self,
        id: &str,
        update: &UserUpdate,
    ) -> Result<UserRecord, EndpointError> {
        self.reply(Operation::UpdateUser, |state| {
            if username_taken(state, &update.username, Some(id)) {
                return Err(format!("{} is already in use", update.username));
            }
            let record = state
                .users
                .get_mut(id)
                .ok_or_else(|| "error-invalid-user".to_string())?;
            record.roles = update.roles.clone();
            record.name = optional(&update.name);
            record.username = update.username.clone();
            record.status = update.status;
            record.status_text = optional(&update.status_text);
            record.bio = optional(&update.bio);
            record.nickname = optional(&update.nickname);
            record.emails = if update.email.is_empty() {
                Vec::new()
            } else {
                vec![EmailEntry {
                    address: update.email.clone(),
                    verified: update.verified,
                }]
            };
            record.require_password_change = update.require_password_change;
            record.custom_fields = update.custom_fields.clone();
            Ok(record.clone())
        })
    }

    async fn set_avatar_url(&self, user_id: &str, url: &str) -> Result<(), EndpointError> {
        self.reply(Operation::SetAvatar, |state| {
            if !state.users.contains_key(user_id) {
                return Err("error-invalid-user".to_string());
            }
            state
                .avatars
                .insert(user_id.to_string(), AvatarSource::Url(url.to_string()));
            Ok(())
        })
    }

    async fn upload_avatar(&self, user_id: &str, file: &AvatarFile) -> Result<(), EndpointError> {
        self.reply(Operation::SetAvatar, |state| {
            if !file.content_type.starts_with("image/") {
                return Err("error-invalid-image".to_string());
            }
            if !state.users.contains_key(user_id) {
                return Err("error-invalid-user".to_string());
            }
            state.avatars.insert(
                user_id.to_string(),
                AvatarSource::Upload {
                    file_name: file.file_name.clone(),
                    size: file.bytes.len(),
                },
            );
            Ok(())
        })
    }

    async fn reset_avatar(&self, user_id: &str) -> Result<(), EndpointError> {
        self.reply(Operation::ResetAvatar, |state| {
            if !state.users.contains_key(user_id) {
                return Err("error-invalid-user".to_string());
            }
            state.avatars.remove(user_id);
            Ok(())
        })
    }

    async fn agents_status(
        &self,
        range: &DashboardRange,
    ) -> Result<AgentStatusCounts, EndpointError> {
        self.reply(Operation::AgentsStatus, |state| {
            debug!(start = %range.start, end = %range.end, "Agent status");
            Ok(state.agents)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BusinessHourType, Timezone};

    fn hour(id: &str, name: &str) -> BusinessHour {
        BusinessHour {
            id: id.to_string(),
            name: name.to_string(),
            timezone: Timezone {
                name: "UTC".to_string(),
            },
            work_hours: Vec::new(),
            active: true,
            kind: if name.is_empty() {
                BusinessHourType::Default
            } else {
                BusinessHourType::Custom
            },
        }
    }

    #[tokio::test]
    async fn test_business_hours_filter_and_paging() {
        let api = InMemoryAdmin::new()
            .with_business_hour(hour("bh0", ""))
            .with_business_hour(hour("bh1", "Support"))
            .with_business_hour(hour("bh2", "Sales"));

        let page = api
            .business_hours_list(&ListQuery::default().with_filter("s"))
            .await
            .unwrap();
        assert_eq!(page.total(), 2);

        let query = ListQuery {
            offset: 1,
            limit: 1,
            filter_text: String::new(),
        };
        let page = api.business_hours_list(&query).await.unwrap();
        assert_eq!(page.total(), 3);
        assert_eq!(page.items()[0].id, "bh1");
    }

    #[tokio::test]
    async fn test_remove_rules() {
        let api = InMemoryAdmin::new()
            .with_business_hour(hour("bh0", ""))
            .with_business_hour(hour("bh1", "Support"));

        assert!(api.remove_business_hour("bh0", Some("default")).await.is_err());
        assert!(api.remove_business_hour("bh1", Some("default")).await.is_err());
        api.remove_business_hour("bh1", Some("custom")).await.unwrap();
        assert_eq!(api.business_hour_ids(), vec!["bh0".to_string()]);
    }

    #[tokio::test]
    async fn test_injected_failure_is_consumed_once() {
        let api = InMemoryAdmin::new().with_role(Role::new("admin", None));
        api.fail_next(Operation::RolesList, "error-not-allowed");

        let err = api.roles_list().await.unwrap_err();
        assert_eq!(err, EndpointError::Remote("error-not-allowed".into()));
        assert_eq!(api.roles_list().await.unwrap().len(), 1);
    }
}
